// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # scanlint Processing
//!
//! Spatial quality checks over parsed room scans and the metadata record
//! they feed.
//!
//! - [`checks`]: wall, door, opening, fixture and intersection predicates
//! - [`vanity`]: sink/storage vanity classification
//! - [`metadata`]: [`compute_raw_scan_metadata`] folds everything into one
//!   serializable [`RawScanMetadata`]
//! - [`cache`]: cache-or-recompute behind the [`MetadataCache`] capability
//!
//! ```rust
//! use scanlint_core::RawScan;
//! use scanlint_processing::compute_raw_scan_metadata;
//!
//! let scan = RawScan::from_json_str(r#"{
//!     "version": 2, "sections": [], "coreModel": "", "story": 0,
//!     "floors": [], "walls": [], "objects": [],
//!     "windows": [], "doors": [], "openings": []
//! }"#).unwrap();
//!
//! let metadata = compute_raw_scan_metadata(&scan);
//! assert!(!metadata.has_wall_gaps);
//! ```

pub mod cache;
pub mod checks;
pub mod error;
pub mod extract;
pub mod footprint;
pub mod metadata;
pub mod vanity;

#[cfg(test)]
mod test_support;

pub use cache::{load_or_compute, load_scan, MemoryCache, MetadataCache, SidecarCache, METADATA_FILE_NAME};
pub use checks::{IntersectionChecker, IntersectionFlags, SatIntersectionChecker};
pub use error::{Error, Result};
pub use extract::Dimensions;
pub use metadata::{
    compute_raw_scan_metadata, compute_raw_scan_metadata_with, RawScanMetadata, SCHEMA_VERSION,
};
pub use vanity::{find_vanity_candidate, get_vanity_lengths, VanityType};
