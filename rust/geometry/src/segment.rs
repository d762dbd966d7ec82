// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Segment distance and crossing tests.

use crate::tolerance::EPSILON;
use crate::vector::{cross, Point};

/// Euclidean distance from `p` to the closed segment `ab`.
///
/// The projection parameter is clamped to `[0, 1]`; a degenerate segment
/// (`a == b`) falls back to the point distance `|p - a|`.
pub fn dist_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < EPSILON * EPSILON {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Minimum distance from any point in `points` to any edge in `edges`.
///
/// Returns `f64::INFINITY` when either side is empty.
pub fn min_points_to_edges(points: &[Point], edges: &[(Point, Point)]) -> f64 {
    let mut best = f64::INFINITY;
    for &p in points {
        for &(a, b) in edges {
            best = best.min(dist_to_segment(p, a, b));
        }
    }
    best
}

/// Strict crossing test for segments `ab` and `cd`.
///
/// Only interior crossings count: both parameters must lie in the open
/// interval `(0, 1)`. Shared endpoints, T-junctions, parallel and collinear
/// segments all return `false`, as do non-finite inputs.
pub fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    if ![a, b, c, d].iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
        return false;
    }

    let r = b - a;
    let s = d - c;
    let denom = cross(r, s);
    if denom.abs() < EPSILON {
        return false;
    }

    let ac = c - a;
    let t = cross(ac, s) / denom;
    let u = cross(ac, r) / denom;

    t > EPSILON && t < 1.0 - EPSILON && u > EPSILON && u < 1.0 - EPSILON
}
