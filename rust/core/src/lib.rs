// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # scanlint Core
//!
//! Data model and strict parser for structured 3D room-scan documents.
//!
//! A scan lists floors, walls, doors, windows, openings and furniture-like
//! objects. Each entity carries a 4×4 placement, its dimensions and an
//! optional local outline. [`RawScan::from_value`] accepts only the exact
//! root key set and rejects the document as a whole on any violation.
//!
//! ```rust
//! use scanlint_core::RawScan;
//!
//! let text = r#"{
//!     "version": 2, "sections": [], "coreModel": "", "story": 0,
//!     "floors": [], "walls": [], "objects": [],
//!     "windows": [], "doors": [], "openings": []
//! }"#;
//! let scan = RawScan::from_json_str(text).unwrap();
//! assert!(scan.walls.is_empty());
//!
//! let bad = text.replace("\"story\": 0", "\"storey\": 0");
//! assert!(RawScan::from_json_str(&bad).is_err());
//! ```

pub mod category;
pub mod entity;
pub mod error;
pub mod scan;

pub use category::{Confidence, ObjectCategory, SurfaceCategory};
pub use entity::{Curve, Object, Placed, Section, Surface};
pub use error::{Error, Result};
pub use scan::{RawScan, ALLOWED_KEYS};
