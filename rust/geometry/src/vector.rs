// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D vector primitives on the floor plane.
//!
//! Points and vectors share one representation. The `y` component is always a
//! local or world Z coordinate, never a height.

use nalgebra::Vector2;

use crate::tolerance::EPSILON;

/// A floor-plane point or direction `(x, z)`.
pub type Point = Vector2<f64>;

#[inline]
pub fn dot(a: Point, b: Point) -> f64 {
    a.dot(&b)
}

/// Z component of the 3D cross product of `a` and `b`.
#[inline]
pub fn cross(a: Point, b: Point) -> f64 {
    a.perp(&b)
}

#[inline]
pub fn magnitude(a: Point) -> f64 {
    a.norm()
}

#[inline]
pub fn add(a: Point, b: Point) -> Point {
    a + b
}

#[inline]
pub fn subtract(a: Point, b: Point) -> Point {
    a - b
}

#[inline]
pub fn scale(a: Point, factor: f64) -> Point {
    a * factor
}

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (a - b).norm()
}

/// Unit vector along `a`; the zero vector maps to itself.
pub fn normalize(a: Point) -> Point {
    let len = a.norm();
    if len < EPSILON {
        Point::zeros()
    } else {
        a / len
    }
}

/// Unsigned angle between two vectors in `[0, π]`.
///
/// Returns 0 when either vector has zero magnitude.
pub fn angle_between(a: Point, b: Point) -> f64 {
    let la = a.norm();
    let lb = b.norm();
    if la < EPSILON || lb < EPSILON {
        return 0.0;
    }
    (a.dot(&b) / (la * lb)).clamp(-1.0, 1.0).acos()
}

/// Component-wise comparison: `|Δx| ≤ eps && |Δy| ≤ eps`.
#[inline]
pub fn approx_eq(a: Point, b: Point, eps: f64) -> bool {
    (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps
}

/// [`approx_eq`] with the shared [`EPSILON`].
#[inline]
pub fn equals(a: Point, b: Point) -> bool {
    approx_eq(a, b, EPSILON)
}
