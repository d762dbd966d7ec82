// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Top-down projection of scan placement matrices.
//!
//! Scan transforms are flat, column-major 4×4 homogeneous matrices. Only the
//! X-Z rotation/scale block (slots 0, 2, 8, 10), the X/Z translation
//! (12, 14) and the Y translation (13) are meaningful on the floor plane.
//! [`Transform`] holds exactly those slots so callers never index the raw
//! array themselves.

use nalgebra::Matrix2;

use crate::vector::Point;

/// Number of slots in a raw placement matrix.
pub const RAW_LEN: usize = 16;

const M_XX: usize = 0;
const M_ZX: usize = 2;
const M_XZ: usize = 8;
const M_ZZ: usize = 10;
const M_TX: usize = 12;
const M_TY: usize = 13;
const M_TZ: usize = 14;

/// Floor-plane view of a validated 16-slot placement matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Maps local `(x, z)` onto world `(x, z)`.
    pub rotation_xz: Matrix2<f64>,
    /// World `(x, z)` of the local origin.
    pub translation_xz: Point,
    /// World height of the local origin.
    pub translation_y: f64,
}

impl Transform {
    /// Builds a transform from a raw matrix; `None` unless it has exactly 16
    /// slots.
    pub fn from_raw(raw: &[f64]) -> Option<Self> {
        if raw.len() != RAW_LEN {
            return None;
        }
        Some(Self {
            rotation_xz: Matrix2::new(raw[M_XX], raw[M_XZ], raw[M_ZX], raw[M_ZZ]),
            translation_xz: Point::new(raw[M_TX], raw[M_TZ]),
            translation_y: raw[M_TY],
        })
    }

    pub fn identity() -> Self {
        Self::from_translation(0.0, 0.0, 0.0)
    }

    pub fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            rotation_xz: Matrix2::identity(),
            translation_xz: Point::new(x, z),
            translation_y: y,
        }
    }

    /// Rotation about the vertical axis by `angle` radians plus a translation.
    ///
    /// Positive angles turn local +X towards world -Z, matching a right-handed
    /// Y-up frame.
    pub fn from_yaw(angle: f64, x: f64, y: f64, z: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            rotation_xz: Matrix2::new(c, s, -s, c),
            translation_xz: Point::new(x, z),
            translation_y: y,
        }
    }

    /// World `(x, z)` of the local origin.
    #[inline]
    pub fn position(&self) -> Point {
        self.translation_xz
    }

    /// Projects a local floor-plane point (`p.y` is local Z) into world space.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        self.rotation_xz * p + self.translation_xz
    }

    /// Projects a local direction; translation is ignored.
    #[inline]
    pub fn apply_vector(&self, v: Point) -> Point {
        self.rotation_xz * v
    }

    /// `self` followed by `outer`.
    ///
    /// Composition is exact on the X-Z block; the Y translations are summed,
    /// which holds for the upright placements scans contain.
    pub fn then(&self, outer: &Transform) -> Transform {
        Transform {
            rotation_xz: outer.rotation_xz * self.rotation_xz,
            translation_xz: outer.apply(self.translation_xz),
            translation_y: self.translation_y + outer.translation_y,
        }
    }

    /// Raw 16-slot form with the unused slots of an upright placement.
    pub fn to_raw(&self) -> [f64; RAW_LEN] {
        let mut raw = [0.0; RAW_LEN];
        raw[M_XX] = self.rotation_xz[(0, 0)];
        raw[M_XZ] = self.rotation_xz[(0, 1)];
        raw[M_ZX] = self.rotation_xz[(1, 0)];
        raw[M_ZZ] = self.rotation_xz[(1, 1)];
        raw[5] = 1.0;
        raw[15] = 1.0;
        raw[M_TX] = self.translation_xz.x;
        raw[M_TY] = self.translation_y;
        raw[M_TZ] = self.translation_xz.y;
        raw
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// World `(x, z)` translation of a raw matrix, or the origin when it does not
/// have 16 slots.
pub fn get_position(raw: &[f64]) -> Point {
    Transform::from_raw(raw)
        .map(|t| t.position())
        .unwrap_or_else(Point::zeros)
}

/// Projects `p` through a raw matrix, reading any missing slot as 0.
///
/// Never fails: a short matrix degrades slot by slot instead of rejecting.
pub fn transform_point(p: Point, raw: &[f64]) -> Point {
    let m = |i: usize| raw.get(i).copied().unwrap_or(0.0);
    Point::new(
        p.x * m(M_XX) + p.y * m(M_XZ) + m(M_TX),
        p.x * m(M_ZX) + p.y * m(M_ZZ) + m(M_TZ),
    )
}
