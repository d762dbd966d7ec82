// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! External openings: openings in walls that sit on the floor perimeter.

use scanlint_core::{Placed, RawScan, Surface};
use scanlint_geometry::polygon::edges;
use scanlint_geometry::{dist_to_segment, Point};

use crate::footprint::reference_floor;

/// Parent walls closer than this to the floor perimeter are exterior walls.
pub const EXTERNAL_WALL_DISTANCE: f64 = 0.5;

/// Floor outline in world space, `None` without a placement or an outline.
pub fn floor_perimeter(floor: &Surface) -> Option<Vec<Point>> {
    let transform = floor.placement()?;
    if !floor.has_outline() {
        return None;
    }
    Some(floor.outline().into_iter().map(|p| transform.apply(p)).collect())
}

/// Any opening whose parent wall sits on the floor perimeter.
///
/// The parent wall's position is its translation; openings without a parent,
/// or whose parent is not a wall of this scan, are skipped.
pub fn check_external_openings(scan: &RawScan) -> bool {
    scan.openings.iter().any(|opening| {
        let Some(parent) = opening.parent_identifier.as_deref() else {
            return false;
        };
        let Some(position) = scan
            .walls
            .iter()
            .find(|w| w.identifier == parent)
            .and_then(Placed::placement)
            .map(|t| t.position())
        else {
            tracing::trace!(identifier = %opening.identifier, parent, "opening parent wall not placed");
            return false;
        };
        let Some(perimeter) = reference_floor(scan, opening.story).and_then(floor_perimeter) else {
            return false;
        };
        edges(&perimeter)
            .iter()
            .any(|&(a, b)| dist_to_segment(position, a, b) < EXTERNAL_WALL_DISTANCE)
    })
}
