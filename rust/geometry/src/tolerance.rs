// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared numeric tolerances and length units.
//!
//! All geometry is in meters and radians. Imperial thresholds used by the
//! checks are expressed through [`INCH`] and [`FOOT`] so the values stay
//! readable at the call site.

/// Geometric "effectively zero" for magnitudes, areas and determinants.
pub const EPSILON: f64 = 1e-9;

/// One inch in meters.
pub const INCH: f64 = 0.0254;

/// One foot in meters.
pub const FOOT: f64 = 0.3048;

/// Converts degrees to radians.
#[inline]
pub fn deg(degrees: f64) -> f64 {
    degrees.to_radians()
}
