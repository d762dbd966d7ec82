// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Separating Axis Theorem overlap test.
//!
//! Exact for convex polygons. Concave inputs behave like their edge-normal
//! hull, so two concave shapes that only share hull area still report an
//! overlap. Downstream thresholds are tuned against that behaviour.

use crate::vector::Point;

/// Returns `true` unless some edge normal of `a` or `b` separates them.
///
/// Touching intervals (`max_a == min_b`) are not a separation, so polygons
/// that share an edge or a vertex intersect. Empty polygons never intersect.
pub fn do_polygons_intersect(a: &[Point], b: &[Point]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    for polygon in [a, b] {
        let n = polygon.len();
        for i in 0..n {
            let p1 = polygon[i];
            let p2 = polygon[(i + 1) % n];
            let normal = Point::new(p2.y - p1.y, p1.x - p2.x);
            if normal.x == 0.0 && normal.y == 0.0 {
                continue;
            }

            let (min_a, max_a) = project(a, normal);
            let (min_b, max_b) = project(b, normal);
            if max_a < min_b || max_b < min_a {
                return false;
            }
        }
    }

    true
}

fn project(polygon: &[Point], axis: Point) -> (f64, f64) {
    polygon
        .iter()
        .map(|p| p.dot(&axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}
