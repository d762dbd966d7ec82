// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial scan-quality checks.
//!
//! Every check is a pure predicate over a [`RawScan`](scanlint_core::RawScan):
//! it gathers the entities with usable geometry, projects them onto the floor
//! plane and returns `true` on the first violation it finds. Entities with
//! bad geometry are skipped, never reported.
//!
//! All pairwise searches are brute force. Scans hold tens of entities per
//! room and the thresholds below are tuned against exhaustive pairing.

pub mod doors;
pub mod fixtures;
pub mod intersections;
pub mod openings;
pub mod walls;

pub use doors::{check_door_blocking, check_door_floor_contact};
pub use fixtures::{check_toilet_gaps, check_tub_gaps};
pub use intersections::{IntersectionChecker, IntersectionFlags, SatIntersectionChecker};
pub use openings::check_external_openings;
pub use walls::{check_colinear_walls, check_crooked_walls, check_nib_walls, check_wall_gaps};

/// Returns `true` if `pred` holds for any unordered pair `(items[i], items[j])`
/// with `i < j`.
pub(crate) fn any_pair<T>(items: &[T], mut pred: impl FnMut(&T, &T) -> bool) -> bool {
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            if pred(a, b) {
                return true;
            }
        }
    }
    false
}
