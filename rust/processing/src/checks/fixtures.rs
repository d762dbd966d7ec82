// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bathroom fixture placement against walls.

use scanlint_core::{Object, ObjectCategory, Placed, RawScan};
use scanlint_geometry::{min_points_to_edges, Point, EPSILON, INCH};

use crate::footprint::{footprint_gap, object_footprint, placed_walls, stories_compatible, PlacedWall};

/// A toilet's backface must be within this of a wall.
pub const TOILET_WALL_GAP_MAX: f64 = INCH;

/// Tub-to-wall distances in `[TUB_GAP_MIN, TUB_GAP_MAX]` are too wide to be
/// flush and too narrow to be intentional.
pub const TUB_GAP_MIN: f64 = INCH;
pub const TUB_GAP_MAX: f64 = 6.0 * INCH;

fn fixtures(scan: &RawScan, category: ObjectCategory) -> impl Iterator<Item = &Object> {
    scan.objects.iter().filter(move |o| o.category == category)
}

fn walls_near<'s, 'w>(
    walls: &'w [PlacedWall<'s>],
    fixture: &'w Object,
) -> impl Iterator<Item = &'w PlacedWall<'s>> {
    walls
        .iter()
        .filter(move |w| stories_compatible(w.story(), fixture.story))
}

/// Any toilet whose back is not against a wall.
///
/// The backface is the local point `(0, -depth/2)`. A toilet with no wall on
/// its story is flagged as well.
pub fn check_toilet_gaps(scan: &RawScan) -> bool {
    let walls = placed_walls(scan);
    fixtures(scan, ObjectCategory::Toilet).any(|toilet| {
        let (Some(transform), Some(depth)) = (toilet.placement(), toilet.depth()) else {
            return false;
        };
        let backface = [transform.apply(Point::new(0.0, -depth / 2.0))];
        let nearest = walls_near(&walls, toilet)
            .map(|w| min_points_to_edges(&backface, &w.edges()))
            .fold(f64::INFINITY, f64::min);
        let flagged = nearest > TOILET_WALL_GAP_MAX;
        if flagged {
            tracing::debug!(identifier = %toilet.identifier, nearest, "toilet away from wall");
        }
        flagged
    })
}

/// Any tub with a wall at a distance in the forbidden band.
///
/// Each compatible wall is measured on its own, both tub corners to wall
/// edges and wall corners to tub edges.
pub fn check_tub_gaps(scan: &RawScan) -> bool {
    let walls = placed_walls(scan);
    let band = (TUB_GAP_MIN - EPSILON)..=(TUB_GAP_MAX + EPSILON);
    fixtures(scan, ObjectCategory::Bathtub).any(|tub| {
        let Some(footprint) = object_footprint(tub, 0.0) else {
            return false;
        };
        walls_near(&walls, tub).any(|w| band.contains(&footprint_gap(&footprint, &w.corners)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{object_at, scan_with, wall_at};
    use scanlint_geometry::Transform;

    fn toilet() -> Object {
        object_at("t", ObjectCategory::Toilet, [0.4, 0.8, 0.7], Transform::identity())
    }

    fn tub() -> Object {
        object_at("b", ObjectCategory::Bathtub, [1.5, 0.5, 0.75], Transform::identity())
    }

    fn wall_behind(offset: f64) -> impl FnOnce(&mut RawScan) {
        move |s| {
            s.walls.push(wall_at("w", 2.0, Transform::from_translation(0.0, 1.2, -0.375 - offset)));
        }
    }

    #[test]
    fn toilet_against_wall() {
        let scan = scan_with(|s| {
            s.objects.push(toilet());
            s.walls.push(wall_at("w", 2.0, Transform::from_translation(0.0, 1.2, -0.35)));
        });
        assert!(!check_toilet_gaps(&scan));
    }

    #[test]
    fn toilet_pulled_out() {
        let scan = scan_with(|s| {
            s.objects.push(toilet());
            s.walls.push(wall_at("w", 2.0, Transform::from_translation(0.0, 1.2, -0.45)));
        });
        assert!(check_toilet_gaps(&scan));
    }

    #[test]
    fn toilet_without_walls() {
        assert!(check_toilet_gaps(&scan_with(|s| s.objects.push(toilet()))));
        assert!(!check_toilet_gaps(&scan_with(|_| {})));
    }

    #[test]
    fn toilet_ignores_walls_on_other_stories() {
        let scan = scan_with(|s| {
            s.objects.push(toilet());
            let mut wall = wall_at("w", 2.0, Transform::from_translation(0.0, 1.2, -0.35));
            wall.story = Some(1);
            s.walls.push(wall);
        });
        assert!(check_toilet_gaps(&scan));
    }

    #[test]
    fn tub_gap_band() {
        let at = |offset: f64| {
            let mut scan = scan_with(wall_behind(offset));
            scan.objects.push(tub());
            scan
        };
        assert!(check_tub_gaps(&at(3.0 * INCH)));
        assert!(check_tub_gaps(&at(INCH)));
        assert!(check_tub_gaps(&at(6.0 * INCH)));
        assert!(!check_tub_gaps(&at(0.0)));
        assert!(!check_tub_gaps(&at(7.0 * INCH)));
    }

    #[test]
    fn tub_without_walls_is_fine() {
        assert!(!check_tub_gaps(&scan_with(|s| s.objects.push(tub()))));
    }
}
