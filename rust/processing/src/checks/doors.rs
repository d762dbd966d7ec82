// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door checks: clearance in front of the door and contact with the floor.

use scanlint_core::{Placed, RawScan, Surface};
use scanlint_geometry::{do_polygons_intersect, Footprint, Point, INCH};

use crate::footprint::{object_footprint, reference_floor, stories_compatible};

/// Total width trimmed off the door leaf for the clearance box.
pub const CLEARANCE_WIDTH_MARGIN: f64 = 0.1;
/// How far the clearance box reaches in front of the door.
pub const CLEARANCE_DEPTH: f64 = 0.6;
/// Objects whose top stays below `door bottom + STEP_OVER_HEIGHT` can be
/// stepped over and never block.
pub const STEP_OVER_HEIGHT: f64 = 0.05;

/// Largest accepted distance between a door's bottom and the floor.
pub const FLOOR_CONTACT_TOLERANCE: f64 = 2.0 * INCH;

/// Region in front of the door leaf, on its local +Z side.
fn clearance_box(door: &Surface) -> Option<Footprint> {
    let transform = door.placement()?;
    let half = (door.width()? - CLEARANCE_WIDTH_MARGIN) / 2.0;
    if half <= 0.0 {
        return None;
    }
    Some(
        [(-half, 0.0), (half, 0.0), (half, CLEARANCE_DEPTH), (-half, CLEARANCE_DEPTH)]
            .into_iter()
            .map(|(x, z)| transform.apply(Point::new(x, z)))
            .collect(),
    )
}

/// Any door whose clearance box overlaps an object on the same story.
///
/// Objects parented to the door, objects low enough to step over and objects
/// entirely above the door are ignored.
pub fn check_door_blocking(scan: &RawScan) -> bool {
    for door in &scan.doors {
        let (Some(clearance), Some((door_bottom, door_top))) =
            (clearance_box(door), door.vertical_band())
        else {
            tracing::trace!(identifier = %door.identifier, "skipping door without usable geometry");
            continue;
        };

        for object in &scan.objects {
            if !stories_compatible(object.story, door.story) {
                continue;
            }
            if !door.identifier.is_empty()
                && object.parent_identifier.as_deref() == Some(door.identifier.as_str())
            {
                continue;
            }
            let Some((bottom, top)) = object.vertical_band() else {
                continue;
            };
            if top < door_bottom + STEP_OVER_HEIGHT || bottom > door_top {
                continue;
            }
            let Some(footprint) = object_footprint(object, 0.0) else {
                continue;
            };
            if do_polygons_intersect(&clearance, &footprint) {
                tracing::debug!(door = %door.identifier, object = %object.identifier, "door blocked");
                return true;
            }
        }
    }
    false
}

/// Floor height: its placement's Y translation, or the second component of
/// its first outline corner when the placement is unusable.
pub fn floor_height(floor: &Surface) -> Option<f64> {
    match floor.placement() {
        Some(t) => Some(t.translation_y),
        None => floor.polygon_corners.first().and_then(|c| c.get(1)).copied(),
    }
}

/// Any door whose bottom sits more than 2in off the reference floor.
pub fn check_door_floor_contact(scan: &RawScan) -> bool {
    scan.doors.iter().any(|door| {
        let Some((bottom, _)) = door.vertical_band() else {
            return false;
        };
        let Some(floor_y) = reference_floor(scan, door.story).and_then(floor_height) else {
            return false;
        };
        (bottom - floor_y).abs() > FLOOR_CONTACT_TOLERANCE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cube_object, door_at, floor_at, scan_with};
    use scanlint_geometry::Transform;

    fn door_scan(object_z: f64) -> RawScan {
        scan_with(|s| {
            s.doors.push(door_at("d", Transform::identity()));
            s.objects.push(cube_object("o", 0.5, Transform::from_translation(0.0, 0.0, object_z)));
        })
    }

    #[test]
    fn object_in_front_blocks() {
        assert!(check_door_blocking(&door_scan(0.3)));
    }

    #[test]
    fn object_behind_does_not_block() {
        assert!(!check_door_blocking(&door_scan(-0.3)));
    }

    #[test]
    fn parented_object_is_ignored() {
        let mut scan = door_scan(0.3);
        scan.objects[0].parent_identifier = Some("d".into());
        assert!(!check_door_blocking(&scan));
    }

    #[test]
    fn low_profile_object_is_stepped_over() {
        let mut scan = door_scan(0.3);
        // Door bottom is -1.05; a 0.02 m rug centred at -1.04 tops out at -1.03
        scan.objects[0].dimensions = vec![0.5, 0.02, 0.5];
        scan.objects[0].transform = Transform::from_translation(0.0, -1.04, 0.3).to_raw().to_vec();
        assert!(!check_door_blocking(&scan));
    }

    #[test]
    fn object_above_door_is_ignored() {
        let mut scan = door_scan(0.3);
        scan.objects[0].transform = Transform::from_translation(0.0, 2.0, 0.3).to_raw().to_vec();
        assert!(!check_door_blocking(&scan));
    }

    #[test]
    fn other_story_object_is_ignored() {
        let mut scan = door_scan(0.3);
        scan.objects[0].story = Some(2);
        assert!(!check_door_blocking(&scan));
    }

    #[test]
    fn door_floor_contact() {
        let touching = scan_with(|s| {
            s.floors.push(floor_at(0.0));
            s.doors.push(door_at("d", Transform::from_translation(0.0, 1.05, 0.0)));
        });
        assert!(!check_door_floor_contact(&touching));

        let floating = scan_with(|s| {
            s.floors.push(floor_at(0.0));
            s.doors.push(door_at("d", Transform::from_translation(0.0, 1.25, 0.0)));
        });
        assert!(check_door_floor_contact(&floating));
    }

    #[test]
    fn floor_height_falls_back_to_outline() {
        let mut floor = floor_at(0.0);
        floor.transform.clear();
        floor.polygon_corners = vec![vec![0.0, -0.3, 0.0], vec![1.0, -0.3, 0.0]];
        assert_eq!(floor_height(&floor), Some(-0.3));
    }

    #[test]
    fn no_floor_means_no_contact_error() {
        let scan = scan_with(|s| s.doors.push(door_at("d", Transform::from_translation(0.0, 3.0, 0.0))));
        assert!(!check_door_floor_contact(&scan));
    }
}
