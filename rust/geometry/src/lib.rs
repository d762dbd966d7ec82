// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # scanlint Geometry
//!
//! Floor-plane geometry for room-scan validation. Everything here works on a
//! top-down 2D projection of the scan: `x` is world X and `y` is world Z.
//!
//! - **Primitives**: [`vector`] operations on [`Point`]
//! - **Segments**: clamped point-to-segment distance and strict crossing tests
//! - **Polygons**: the strict outline validator [`check_polygon_integrity`]
//! - **SAT**: [`do_polygons_intersect`] for (approximately) convex overlap
//! - **Transforms**: [`Transform`] flattens a 4×4 placement to the floor plane
//!
//! ```rust
//! use scanlint_geometry::{do_polygons_intersect, Point};
//!
//! let a = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 1.0)];
//! let b = [Point::new(1.0, 0.0), Point::new(2.0, 0.0), Point::new(2.0, 1.0), Point::new(1.0, 1.0)];
//!
//! // Touching counts as intersecting
//! assert!(do_polygons_intersect(&a, &b));
//! ```

pub mod polygon;
pub mod sat;
pub mod segment;
pub mod tolerance;
pub mod transform;
pub mod vector;

pub use nalgebra::Vector2;

pub use polygon::{check_polygon_integrity, edges, perimeter, shoelace_area, Footprint};
pub use sat::do_polygons_intersect;
pub use segment::{dist_to_segment, min_points_to_edges, segments_intersect};
pub use tolerance::{EPSILON, FOOT, INCH};
pub use transform::{get_position, transform_point, Transform};
pub use vector::Point;
