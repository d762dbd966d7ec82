// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Overlapping geometry, grouped by the kinds of entity involved.

use scanlint_core::{Object, Placed, RawScan, Surface};
use scanlint_geometry::{do_polygons_intersect, segments_intersect, Footprint, INCH};
use serde::{Deserialize, Serialize};

use super::any_pair;
use crate::footprint::{
    object_footprint, placed_walls, stories_compatible, surface_footprint, vertical_overlap,
};

/// Object boxes are shrunk by this on every side before testing, so that
/// furniture pushed flush against a wall or a neighbour does not count.
pub const OBJECT_INSET: f64 = INCH;
/// Minimum shared height for two objects to be stacked into each other.
pub const VERTICAL_OVERLAP_MIN: f64 = INCH;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionFlags {
    pub has_object_intersection_errors: bool,
    pub has_wall_object_intersection_errors: bool,
    pub has_wall_wall_intersection_errors: bool,
    pub has_embedded_object_intersection_errors: bool,
}

impl IntersectionFlags {
    pub fn any(&self) -> bool {
        self.has_object_intersection_errors
            || self.has_wall_object_intersection_errors
            || self.has_wall_wall_intersection_errors
            || self.has_embedded_object_intersection_errors
    }
}

/// Source of the intersection flags folded into the metadata record.
pub trait IntersectionChecker {
    fn check_intersections(&self, scan: &RawScan) -> IntersectionFlags;
}

/// Default checker built on SAT overlap of floor-plane footprints.
#[derive(Debug, Clone, Copy, Default)]
pub struct SatIntersectionChecker;

struct PlacedObject<'a> {
    object: &'a Object,
    footprint: Footprint,
    band: (f64, f64),
}

fn placed_objects(scan: &RawScan) -> Vec<PlacedObject<'_>> {
    scan.objects
        .iter()
        .filter_map(|object| {
            Some(PlacedObject {
                object,
                footprint: object_footprint(object, OBJECT_INSET)?,
                band: object.vertical_band()?,
            })
        })
        .collect()
}

fn is_child_of(object: &Object, parent: &Surface) -> bool {
    !parent.identifier.is_empty()
        && object.parent_identifier.as_deref() == Some(parent.identifier.as_str())
}

impl SatIntersectionChecker {
    /// Wall edges that properly cross; shared corners do not count.
    pub fn wall_wall(&self, scan: &RawScan) -> bool {
        let walls = placed_walls(scan);
        any_pair(&walls, |a, b| {
            if !stories_compatible(a.story(), b.story()) {
                return false;
            }
            let (edges_a, edges_b) = (a.edges(), b.edges());
            edges_a
                .iter()
                .any(|&(p, q)| edges_b.iter().any(|&(r, s)| segments_intersect(p, q, r, s)))
        })
    }

    pub fn wall_object(&self, scan: &RawScan) -> bool {
        let walls = placed_walls(scan);
        let objects = placed_objects(scan);
        walls.iter().any(|wall| {
            objects.iter().any(|o| {
                stories_compatible(wall.story(), o.object.story)
                    && do_polygons_intersect(&wall.corners, &o.footprint)
            })
        })
    }

    pub fn object_object(&self, scan: &RawScan) -> bool {
        let objects = placed_objects(scan);
        any_pair(&objects, |a, b| {
            stories_compatible(a.object.story, b.object.story)
                && vertical_overlap(a.band, b.band) > VERTICAL_OVERLAP_MIN
                && do_polygons_intersect(&a.footprint, &b.footprint)
        })
    }

    /// Doors, windows and openings against objects that are not parented to
    /// them.
    pub fn embedded_object(&self, scan: &RawScan) -> bool {
        let objects = placed_objects(scan);
        scan.embedded().any(|element| {
            let (Some(footprint), Some(band)) = (surface_footprint(element), element.vertical_band())
            else {
                return false;
            };
            objects.iter().any(|o| {
                !is_child_of(o.object, element)
                    && stories_compatible(element.story, o.object.story)
                    && vertical_overlap(band, o.band) > 0.0
                    && do_polygons_intersect(&footprint, &o.footprint)
            })
        })
    }
}

impl IntersectionChecker for SatIntersectionChecker {
    fn check_intersections(&self, scan: &RawScan) -> IntersectionFlags {
        let flags = IntersectionFlags {
            has_object_intersection_errors: self.object_object(scan),
            has_wall_object_intersection_errors: self.wall_object(scan),
            has_wall_wall_intersection_errors: self.wall_wall(scan),
            has_embedded_object_intersection_errors: self.embedded_object(scan),
        };
        if flags.any() {
            tracing::debug!(?flags, "intersections found");
        }
        flags
    }
}
