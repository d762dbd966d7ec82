// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon measurements and the strict outline integrity validator.
//!
//! Polygons are implicitly closed vertex loops: edge `i` runs from vertex `i`
//! to vertex `(i + 1) % n`. The scan format never repeats the first vertex.

use smallvec::SmallVec;

use crate::segment::segments_intersect;
use crate::tolerance::{deg, EPSILON};
use crate::vector::{cross, equals, normalize, Point};

/// World-space outline of a scanned element (2 corners for a zero-depth
/// wall, 4 for a box).
pub type Footprint = SmallVec<[Point; 4]>;

/// Largest absolute coordinate accepted in scan space (meters).
pub const MAX_COORDINATE: f64 = 10_000.0;

/// Shortest edge accepted by [`check_polygon_integrity`] (1 mm).
pub const MIN_EDGE_LENGTH: f64 = 0.001;

/// Vertex angle window accepted by [`check_polygon_integrity`] (degrees).
pub const MIN_VERTEX_ANGLE_DEG: f64 = 5.0;
pub const MAX_VERTEX_ANGLE_DEG: f64 = 175.0;

/// Edges of `points`. A closed loop of `n >= 3` points yields `n` edges, a
/// two-point outline yields its single segment.
pub fn edges(points: &[Point]) -> SmallVec<[(Point, Point); 4]> {
    let n = points.len();
    match n {
        0 | 1 => SmallVec::new(),
        2 => smallvec::smallvec![(points[0], points[1])],
        _ => (0..n).map(|i| (points[i], points[(i + 1) % n])).collect(),
    }
}

/// Signed area `Σ (x_{i+1} - x_i)(y_{i+1} + y_i) / 2`.
///
/// Negative for the winding the scan format uses (counter-clockwise in a
/// conventional x-right/y-up frame).
pub fn shoelace_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += (b.x - a.x) * (b.y + a.y);
    }
    sum / 2.0
}

/// Closed-loop perimeter; a two-point outline measures its single segment.
pub fn perimeter(points: &[Point]) -> f64 {
    edges(points).iter().map(|(a, b)| (b - a).norm()).sum()
}

/// Strict validity check for a scanned outline.
///
/// Rules, evaluated in order (first failure returns `false`):
/// 1. at least 3 vertices
/// 2. finite coordinates within ±[`MAX_COORDINATE`]
/// 3. not explicitly closed (first vertex repeated at the end)
/// 4. edges at least [`MIN_EDGE_LENGTH`], vertex angles within
///    [`MIN_VERTEX_ANGLE_DEG`, `MAX_VERTEX_ANGLE_DEG`]
/// 5. non-degenerate area with negative winding
/// 6. no crossing between non-adjacent edges
/// 7. no collinear overlap between non-adjacent edges
/// 8. no duplicate vertices
pub fn check_polygon_integrity(points: &[Point]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }

    let in_bounds = |v: f64| v.is_finite() && v.abs() <= MAX_COORDINATE;
    if !points.iter().all(|p| in_bounds(p.x) && in_bounds(p.y)) {
        return false;
    }

    let first = points[0];
    let last = points[n - 1];
    if (first.x - last.x).abs() < EPSILON && (first.y - last.y).abs() < EPSILON {
        return false;
    }

    if !edges_and_angles_valid(points) {
        return false;
    }

    let area = shoelace_area(points);
    if area.abs() <= EPSILON || area >= -EPSILON {
        return false;
    }

    for (i, j) in non_adjacent_edge_pairs(n) {
        let (a, b) = (points[i], points[(i + 1) % n]);
        let (c, d) = (points[j], points[(j + 1) % n]);
        if segments_intersect(a, b, c, d) {
            return false;
        }
    }

    for (i, j) in non_adjacent_edge_pairs(n) {
        let (a, b) = (points[i], points[(i + 1) % n]);
        let (c, d) = (points[j], points[(j + 1) % n]);
        if collinear_overlap(a, b, c, d) {
            return false;
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            if equals(points[i], points[j]) {
                return false;
            }
        }
    }

    true
}

/// Rule 4: minimum edge length and the per-vertex angle window.
fn edges_and_angles_valid(points: &[Point]) -> bool {
    let n = points.len();
    let min_angle = deg(MIN_VERTEX_ANGLE_DEG);
    let max_angle = deg(MAX_VERTEX_ANGLE_DEG);

    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let curr = points[i];
        let next = points[(i + 1) % n];

        let a = (prev - curr).norm();
        let b = (next - curr).norm();
        if b < MIN_EDGE_LENGTH {
            return false;
        }

        // Law of cosines on the triangle (prev, curr, next)
        let c = (next - prev).norm();
        let cos = ((a * a + b * b - c * c) / (2.0 * a * b)).clamp(-1.0, 1.0);
        let angle = cos.acos();
        if !(min_angle..=max_angle).contains(&angle) {
            return false;
        }
    }

    true
}

/// Edge index pairs `(i, j)` with `i < j` that share no vertex.
fn non_adjacent_edge_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| {
        ((i + 2)..n)
            .filter(move |&j| !(i == 0 && j == n - 1))
            .map(move |j| (i, j))
    })
}

/// Parallel edges on one supporting line whose projections share a stretch
/// of positive length.
fn collinear_overlap(a: Point, b: Point, c: Point, d: Point) -> bool {
    let u = normalize(b - a);
    let v = normalize(d - c);
    if cross(u, v).abs() >= EPSILON {
        return false;
    }
    if cross(u, c - a).abs() >= EPSILON {
        return false;
    }

    let (a0, a1): (f64, f64) = (0.0, (b - a).dot(&u));
    let (c0, c1) = ((c - a).dot(&u), (d - a).dot(&u));
    let lo = a0.min(a1).max(c0.min(c1));
    let hi = a0.max(a1).min(c0.max(c1));
    lo < hi - EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn poly(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn unit_square() -> Vec<Point> {
        poly(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn accepts_valid_square() {
        assert!(check_polygon_integrity(&unit_square()));
    }

    #[test]
    fn rejects_fewer_than_three_points() {
        assert!(!check_polygon_integrity(&[]));
        assert!(!check_polygon_integrity(&poly(&[(0.0, 0.0), (1.0, 0.0)])));
    }

    #[test]
    fn reversal_flips_result() {
        let square = unit_square();
        let mut reversed = square.clone();
        reversed.reverse();
        assert!(check_polygon_integrity(&square));
        assert!(!check_polygon_integrity(&reversed));

        let l_shape = poly(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let mut reversed = l_shape.clone();
        reversed.reverse();
        assert!(check_polygon_integrity(&l_shape));
        assert!(!check_polygon_integrity(&reversed));
    }

    #[test]
    fn rejects_explicitly_closed_loop() {
        let mut square = unit_square();
        square.push(square[0]);
        assert!(!check_polygon_integrity(&square));
    }

    #[test]
    fn rejects_out_of_bounds_and_non_finite() {
        let mut square = unit_square();
        square[2].x = MAX_COORDINATE + 0.5;
        assert!(!check_polygon_integrity(&square));

        let mut square = unit_square();
        square[1].y = -MAX_COORDINATE - 1.0;
        assert!(!check_polygon_integrity(&square));

        let mut square = unit_square();
        square[3].x = f64::NAN;
        assert!(!check_polygon_integrity(&square));
    }

    #[test]
    fn rejects_short_edge() {
        let p = poly(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0005), (1.0, 1.0), (0.0, 1.0)]);
        assert!(!check_polygon_integrity(&p));
    }

    #[test]
    fn rejects_flat_vertex() {
        // (0.5, 0) is a redundant vertex on a straight edge
        let p = poly(&[(0.0, 0.0), (0.5, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert!(!check_polygon_integrity(&p));
    }

    #[test]
    fn rejects_spike() {
        let p = poly(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.6, 1.0),
            (0.55, 5.0),
            (0.5, 1.0),
            (0.0, 1.0),
        ]);
        assert!(!check_polygon_integrity(&p));
    }

    #[test]
    fn rejects_self_intersection() {
        let p = poly(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (2.0, -1.0), (0.0, 3.0)]);
        assert!(shoelace_area(&p) < 0.0);
        assert!(!check_polygon_integrity(&p));
    }

    #[test]
    fn rejects_collinear_overlap() {
        // Edge (3,0)->(2,0) runs back along the first edge
        let p = poly(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 3.0),
            (3.0, 3.0),
            (3.0, 0.0),
            (2.0, 0.0),
            (1.0, -1.0),
        ]);
        assert!(shoelace_area(&p) < 0.0);
        assert!(!check_polygon_integrity(&p));
    }

    #[test]
    fn collinear_overlap_needs_shared_stretch() {
        let p = |x: f64, y: f64| Point::new(x, y);
        assert!(collinear_overlap(p(0.0, 0.0), p(4.0, 0.0), p(3.0, 0.0), p(2.0, 0.0)));
        assert!(collinear_overlap(p(4.0, 0.0), p(0.0, 0.0), p(1.0, 0.0), p(5.0, 0.0)));
        // Touching at a single point
        assert!(!collinear_overlap(p(0.0, 0.0), p(2.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)));
        // Parallel but offset
        assert!(!collinear_overlap(p(0.0, 0.0), p(2.0, 0.0), p(0.0, 1.0), p(2.0, 1.0)));
    }

    #[test]
    fn rejects_duplicate_vertex() {
        // Bow-tie pinched at (1, 1)
        let p = poly(&[(0.0, 0.0), (2.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.0, 2.0), (1.0, 1.0)]);
        assert!(shoelace_area(&p) < 0.0);
        assert!(!check_polygon_integrity(&p));
    }

    #[test]
    fn shoelace_and_perimeter() {
        assert_relative_eq!(shoelace_area(&unit_square()), -1.0);
        assert_relative_eq!(perimeter(&unit_square()), 4.0);
        assert_relative_eq!(perimeter(&poly(&[(0.0, 0.0), (3.0, 4.0)])), 5.0);
        assert_eq!(shoelace_area(&poly(&[(0.0, 0.0), (3.0, 4.0)])), 0.0);
    }

    #[test]
    fn edge_enumeration() {
        assert_eq!(edges(&unit_square()).len(), 4);
        assert_eq!(edges(&poly(&[(0.0, 0.0), (1.0, 0.0)])).len(), 1);
        assert!(edges(&poly(&[(0.0, 0.0)])).is_empty());
    }
}
