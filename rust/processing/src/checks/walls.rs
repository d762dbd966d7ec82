// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall-to-wall checks: gaps, colinear pairs, nib walls and crooked joins.

use std::f64::consts::PI;

use scanlint_core::RawScan;
use scanlint_geometry::tolerance::deg;
use scanlint_geometry::vector::{angle_between, dot};
use scanlint_geometry::{FOOT, INCH};

use super::any_pair;
use crate::footprint::{placed_walls, stories_compatible, wall_gap, PlacedWall};

/// Gaps at or above this are real gaps, not scan noise.
pub const WALL_GAP_MIN: f64 = INCH;
/// Gaps below this are small enough to be a missed join.
pub const WALL_GAP_MAX: f64 = 12.0 * INCH;

/// `|cos|` above which two walls count as parallel (about 5°).
pub const COLINEAR_DOT_THRESHOLD: f64 = 0.996;
pub const COLINEAR_GAP_MAX: f64 = 3.0 * INCH;

/// Walls whose footprint diagonal is shorter than this are nibs.
pub const NIB_WALL_MAX: f64 = FOOT;

/// Walls closer than this are treated as joined.
pub const CONNECTED_GAP_MAX: f64 = INCH;
pub const CROOKED_ANGLE_MAX_DEG: f64 = 5.0;

fn same_story(a: &PlacedWall<'_>, b: &PlacedWall<'_>) -> bool {
    stories_compatible(a.story(), b.story())
}

/// Any wall pair separated by a gap in `[1in, 12in)`.
///
/// The gap is the minimum over every corner of one wall against every edge of
/// the other, both ways round.
pub fn check_wall_gaps(scan: &RawScan) -> bool {
    let walls = placed_walls(scan);
    any_pair(&walls, |a, b| {
        if !same_story(a, b) {
            return false;
        }
        let gap = wall_gap(a, b);
        let hit = (WALL_GAP_MIN..WALL_GAP_MAX).contains(&gap);
        if hit {
            tracing::debug!(a = %a.wall.identifier, b = %b.wall.identifier, gap, "wall gap");
        }
        hit
    })
}

/// Any pair of parallel or antiparallel walls that touch or nearly touch.
pub fn check_colinear_walls(scan: &RawScan) -> bool {
    let walls = placed_walls(scan);
    any_pair(&walls, |a, b| {
        same_story(a, b)
            && dot(a.direction, b.direction).abs() > COLINEAR_DOT_THRESHOLD
            && wall_gap(a, b) < COLINEAR_GAP_MAX
    })
}

/// Any wall on the scan's own story whose footprint is shorter than a foot.
pub fn check_nib_walls(scan: &RawScan) -> bool {
    placed_walls(scan)
        .iter()
        .filter(|w| stories_compatible(w.story(), Some(scan.story)))
        .any(|w| {
            let diagonal = w.diagonal();
            diagonal > 0.0 && diagonal < NIB_WALL_MAX
        })
}

/// Any joined wall pair whose directions deviate at most 5° from straight.
///
/// Despite the name this flags joints that are nearly straight (0° or 180°),
/// which is how the downstream reports have always read it.
pub fn check_crooked_walls(scan: &RawScan) -> bool {
    let walls = placed_walls(scan);
    let max_deviation = deg(CROOKED_ANGLE_MAX_DEG);
    any_pair(&walls, |a, b| {
        if !same_story(a, b) || wall_gap(a, b) > CONNECTED_GAP_MAX {
            return false;
        }
        let angle = angle_between(a.direction, b.direction);
        let deviation = angle.min(PI - angle);
        deviation <= max_deviation
    })
}
