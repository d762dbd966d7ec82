// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! World-space footprints of scanned entities.
//!
//! Entities without a 16-slot transform or without the dimensions a footprint
//! needs are skipped here, so every check only sees usable geometry.

use scanlint_core::{Object, Placed, RawScan, Surface};
use scanlint_geometry::polygon::edges;
use scanlint_geometry::vector::normalize;
use scanlint_geometry::{min_points_to_edges, Footprint, Point, Transform, EPSILON};
use smallvec::SmallVec;

/// A wall with its projected corners and direction.
#[derive(Debug, Clone)]
pub struct PlacedWall<'a> {
    pub wall: &'a Surface,
    pub transform: Transform,
    /// Two endpoints for a zero-depth wall, otherwise four box corners.
    pub corners: Footprint,
    /// Unit world direction of local +X.
    pub direction: Point,
}

impl<'a> PlacedWall<'a> {
    pub fn from_surface(wall: &'a Surface) -> Option<Self> {
        let transform = wall.placement()?;
        let width = wall.width().filter(|w| w.is_finite() && *w >= 0.0)?;
        let depth = wall.depth().filter(|d| d.is_finite()).unwrap_or(0.0);

        let corners = if depth > EPSILON {
            box_footprint(&transform, width, depth)
        } else {
            let half = width / 2.0;
            smallvec::smallvec![
                transform.apply(Point::new(-half, 0.0)),
                transform.apply(Point::new(half, 0.0)),
            ]
        };

        Some(Self {
            wall,
            transform,
            corners,
            direction: normalize(transform.apply_vector(Point::new(1.0, 0.0))),
        })
    }

    pub fn edges(&self) -> SmallVec<[(Point, Point); 4]> {
        edges(&self.corners)
    }

    pub fn story(&self) -> Option<i64> {
        self.wall.story
    }

    /// Largest distance between any two corners.
    pub fn diagonal(&self) -> f64 {
        let mut best = 0.0_f64;
        for (i, a) in self.corners.iter().enumerate() {
            for b in &self.corners[i + 1..] {
                best = best.max((a - b).norm());
            }
        }
        best
    }
}

/// Walls of `scan` that have usable geometry, in document order.
pub fn placed_walls(scan: &RawScan) -> Vec<PlacedWall<'_>> {
    scan.walls
        .iter()
        .filter_map(|wall| {
            let placed = PlacedWall::from_surface(wall);
            if placed.is_none() {
                tracing::trace!(identifier = %wall.identifier, "skipping wall without usable geometry");
            }
            placed
        })
        .collect()
}

/// Smallest corner-to-edge distance between two walls, measured both ways.
pub fn wall_gap(a: &PlacedWall<'_>, b: &PlacedWall<'_>) -> f64 {
    min_points_to_edges(&a.corners, &b.edges()).min(min_points_to_edges(&b.corners, &a.edges()))
}

/// Smallest corner-to-edge distance between two footprints, measured both ways.
pub fn footprint_gap(a: &[Point], b: &[Point]) -> f64 {
    min_points_to_edges(a, &edges(b)).min(min_points_to_edges(b, &edges(a)))
}

/// Local box `(±w/2, ±d/2)` projected through `transform`, wound the way
/// the scan format expects.
pub fn box_footprint(transform: &Transform, width: f64, depth: f64) -> Footprint {
    let (hw, hd) = (width / 2.0, depth / 2.0);
    [(-hw, -hd), (hw, -hd), (hw, hd), (-hw, hd)]
        .into_iter()
        .map(|(x, z)| transform.apply(Point::new(x, z)))
        .collect()
}

/// Object box shrunk inwards by `inset` on every side.
///
/// `None` when the object has no usable geometry or the inset swallows it.
pub fn object_footprint(object: &Object, inset: f64) -> Option<Footprint> {
    let transform = object.placement()?;
    let width = object.width()? - 2.0 * inset;
    let depth = object.depth()? - 2.0 * inset;
    if !(width > 0.0 && depth > 0.0) {
        return None;
    }
    Some(box_footprint(&transform, width, depth))
}

/// Footprint of a door, window or opening: its box when it has depth,
/// otherwise the segment it spans.
pub fn surface_footprint(surface: &Surface) -> Option<Footprint> {
    let transform = surface.placement()?;
    let width = surface.width().filter(|w| *w > 0.0)?;
    let depth = surface.depth().unwrap_or(0.0);
    if depth > EPSILON {
        return Some(box_footprint(&transform, width, depth));
    }
    let half = width / 2.0;
    Some(smallvec::smallvec![
        transform.apply(Point::new(-half, 0.0)),
        transform.apply(Point::new(half, 0.0)),
    ])
}

/// Story scoping shared by every pairwise check: unknown stories match
/// anything.
#[inline]
pub fn stories_compatible(a: Option<i64>, b: Option<i64>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

/// Overlap length of two vertical bands (negative when apart).
#[inline]
pub fn vertical_overlap(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.1.min(b.1) - a.0.max(b.0)
}

/// First floor compatible with `story`.
pub fn reference_floor(scan: &RawScan, story: Option<i64>) -> Option<&Surface> {
    scan.floors.iter().find(|f| stories_compatible(f.story, story))
}
