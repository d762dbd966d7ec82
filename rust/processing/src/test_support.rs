// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scan builders shared by the unit tests.

use scanlint_core::{Object, ObjectCategory, RawScan, Surface, SurfaceCategory};
use scanlint_geometry::Transform;

/// An empty story-0 scan, adjusted by `build`.
pub(crate) fn scan_with(build: impl FnOnce(&mut RawScan)) -> RawScan {
    let mut scan = RawScan {
        version: 2.0,
        ..Default::default()
    };
    build(&mut scan);
    scan
}

fn surface(id: &str, dimensions: [f64; 3], transform: Transform, category: SurfaceCategory) -> Surface {
    Surface {
        identifier: id.into(),
        dimensions: dimensions.to_vec(),
        transform: transform.to_raw().to_vec(),
        story: Some(0),
        category,
        ..Default::default()
    }
}

/// Zero-depth 2.4 m high wall of the given width.
pub(crate) fn wall_at(id: &str, width: f64, transform: Transform) -> Surface {
    surface(id, [width, 2.4, 0.0], transform, SurfaceCategory::Wall)
}

/// Closed 0.9 × 2.1 m door.
pub(crate) fn door_at(id: &str, transform: Transform) -> Surface {
    surface(id, [0.9, 2.1, 0.0], transform, SurfaceCategory::Door { is_open: false })
}

/// 4 × 3 m floor at height `y` with a matching outline.
pub(crate) fn floor_at(y: f64) -> Surface {
    let mut floor = surface(
        "floor",
        [4.0, 3.0, 0.0],
        Transform::from_translation(0.0, y, 0.0),
        SurfaceCategory::Floor,
    );
    floor.polygon_corners = vec![
        vec![-2.0, -1.5, 0.0],
        vec![2.0, -1.5, 0.0],
        vec![2.0, 1.5, 0.0],
        vec![-2.0, 1.5, 0.0],
    ];
    floor
}

pub(crate) fn object_at(
    id: &str,
    category: ObjectCategory,
    dimensions: [f64; 3],
    transform: Transform,
) -> Object {
    Object {
        identifier: id.into(),
        dimensions: dimensions.to_vec(),
        transform: transform.to_raw().to_vec(),
        story: Some(0),
        category,
        ..Default::default()
    }
}

/// Storage cube of side `size`.
pub(crate) fn cube_object(id: &str, size: f64, transform: Transform) -> Object {
    object_at(id, ObjectCategory::Storage, [size; 3], transform)
}
