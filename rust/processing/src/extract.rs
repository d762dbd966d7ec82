// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-entity measurements and histograms folded into the metadata record.
//!
//! Measurements prefer the entity's local outline and fall back to its
//! dimensions. Entities lacking both contribute nothing.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use scanlint_core::{Confidence, Placed, RawScan, Surface, SurfaceCategory};
use scanlint_geometry::vector::{dot, magnitude};
use scanlint_geometry::{perimeter, shoelace_area, EPSILON, FOOT};
use serde::{Deserialize, Serialize};

/// Ceilings below this are reported as low.
pub const LOW_CEILING_HEIGHT: f64 = 7.5 * FOOT;

/// `|cos|` below which a corner counts as square.
pub const RIGHT_ANGLE_COS_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: f64,
    pub width: f64,
}

pub fn dimensions(surface: &Surface) -> Option<Dimensions> {
    Some(Dimensions {
        height: surface.height()?,
        width: surface.width()?,
    })
}

/// Width times height of a door, window or opening.
pub fn surface_area(surface: &Surface) -> Option<f64> {
    Some(surface.width()? * surface.height()?)
}

/// Outline edge sum, or `2·(width + height)` without an outline.
pub fn wall_perimeter(wall: &Surface) -> Option<f64> {
    if wall.has_outline() {
        return Some(perimeter(&wall.outline()));
    }
    Some(2.0 * (wall.width()? + wall.height()?))
}

/// Lowest ceiling along a wall.
///
/// Wall outlines are elevations, so the second component is height. The
/// ceiling is the lowest vertex above the outline's base, measured from the
/// base. Walls without an outline report their height.
pub fn wall_min_ceiling(wall: &Surface) -> Option<f64> {
    if !wall.has_outline() {
        return wall.height().filter(|h| *h > 0.0);
    }
    let outline = wall.outline();
    let base = outline.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    outline
        .iter()
        .map(|p| p.y - base)
        .filter(|h| *h > EPSILON)
        .reduce(f64::min)
}

/// Lowest ceiling across every wall of the scan.
pub fn min_ceiling_height(scan: &RawScan) -> Option<f64> {
    scan.walls.iter().filter_map(wall_min_ceiling).reduce(f64::min)
}

/// `true` without an outline; otherwise the outline must be four corners
/// meeting at right angles.
pub fn is_rectangular(surface: &Surface) -> bool {
    if surface.polygon_corners.is_empty() {
        return true;
    }
    let outline = surface.outline();
    if outline.len() != 4 {
        return false;
    }
    (0..4).all(|i| {
        let prev = outline[(i + 3) % 4];
        let curr = outline[i];
        let next = outline[(i + 1) % 4];
        let (a, b) = (prev - curr, next - curr);
        let scale = magnitude(a) * magnitude(b);
        scale > EPSILON && (dot(a, b) / scale).abs() < RIGHT_ANGLE_COS_TOLERANCE
    })
}

pub fn is_unparented(surface: &Surface) -> bool {
    surface.parent_identifier.as_deref().map_or(true, str::is_empty)
}

/// Plan dimensions of a floor: width by depth, or width by height when the
/// floor was exported without depth.
fn floor_box(floor: &Surface) -> Option<(f64, f64)> {
    let width = floor.width()?;
    match floor.depth() {
        Some(depth) if depth > EPSILON => Some((width, depth)),
        _ => Some((width, floor.height()?)),
    }
}

pub fn floor_area(floor: &Surface) -> Option<f64> {
    if floor.has_outline() {
        return Some(shoelace_area(&floor.outline()).abs());
    }
    floor_box(floor).map(|(w, d)| w * d)
}

pub fn floor_perimeter_length(floor: &Surface) -> Option<f64> {
    if floor.has_outline() {
        return Some(perimeter(&floor.outline()));
    }
    floor_box(floor).map(|(w, d)| 2.0 * (w + d))
}

/// Number of objects per category name.
pub fn object_counts(scan: &RawScan) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for object in &scan.objects {
        *counts.entry(object.category.name().to_string()).or_insert(0) += 1;
    }
    counts
}

/// `attribute -> value -> count` over every object.
pub fn object_attributes(scan: &RawScan) -> BTreeMap<String, BTreeMap<String, usize>> {
    let mut histogram: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for object in &scan.objects {
        for (key, label) in object.attribute_labels() {
            *histogram
                .entry(key.to_string())
                .or_default()
                .entry(label)
                .or_insert(0) += 1;
        }
    }
    histogram
}

/// Doors counted under `"open"` and `"closed"`.
pub fn door_open_counts(scan: &RawScan) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for door in &scan.doors {
        let key = match door.category {
            SurfaceCategory::Door { is_open: true } => "open",
            _ => "closed",
        };
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Distinct parent walls referenced by `surfaces`.
pub fn parent_walls<'a>(surfaces: impl IntoIterator<Item = &'a Surface>) -> FxHashSet<&'a str> {
    surfaces
        .into_iter()
        .filter_map(|s| s.parent_identifier.as_deref())
        .filter(|id| !id.is_empty())
        .collect()
}

/// Surfaces and objects the scanner reported with low confidence.
pub fn low_confidence_count(scan: &RawScan) -> usize {
    let surfaces = scan.floors.iter().chain(&scan.walls).chain(scan.embedded());
    surfaces.filter(|s| s.confidence == Confidence::Low).count()
        + scan.objects.iter().filter(|o| o.confidence == Confidence::Low).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{door_at, floor_at, scan_with, wall_at};
    use approx::assert_relative_eq;
    use scanlint_core::{Object, ObjectCategory};
    use scanlint_geometry::Transform;
    use serde_json::json;

    fn corners(points: &[(f64, f64)]) -> Vec<Vec<f64>> {
        points.iter().map(|&(x, y)| vec![x, y, 0.0]).collect()
    }

    #[test]
    fn wall_perimeter_prefers_outline() {
        let mut wall = wall_at("w", 3.0, Transform::identity());
        assert_relative_eq!(wall_perimeter(&wall).unwrap(), 2.0 * (3.0 + 2.4));
        wall.polygon_corners = corners(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        assert_relative_eq!(wall_perimeter(&wall).unwrap(), 8.0);
    }

    #[test]
    fn ceiling_from_sloped_outline() {
        let mut wall = wall_at("w", 4.0, Transform::identity());
        assert_relative_eq!(wall_min_ceiling(&wall).unwrap(), 2.4);

        // Sloped ceiling: 2.0 m on one end, 2.6 m on the other
        wall.polygon_corners = corners(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.6), (0.0, 2.0)]);
        assert_relative_eq!(wall_min_ceiling(&wall).unwrap(), 2.0);
        assert!(wall_min_ceiling(&wall).unwrap() < LOW_CEILING_HEIGHT);
    }

    #[test]
    fn min_ceiling_across_walls() {
        let scan = scan_with(|s| {
            s.walls.push(wall_at("a", 2.0, Transform::identity()));
            let mut low = wall_at("b", 2.0, Transform::identity());
            low.dimensions[1] = 2.1;
            s.walls.push(low);
        });
        assert_relative_eq!(min_ceiling_height(&scan).unwrap(), 2.1);
        assert!(min_ceiling_height(&scan_with(|_| {})).is_none());
    }

    #[test]
    fn rectangularity() {
        let mut door = door_at("d", Transform::identity());
        assert!(is_rectangular(&door));

        door.polygon_corners = corners(&[(0.0, 0.0), (0.9, 0.0), (0.9, 2.1), (0.0, 2.1)]);
        assert!(is_rectangular(&door));

        door.polygon_corners = corners(&[(0.0, 0.0), (0.9, 0.0), (0.7, 2.1), (0.0, 2.1)]);
        assert!(!is_rectangular(&door));

        // Arched top
        door.polygon_corners =
            corners(&[(0.0, 0.0), (0.9, 0.0), (0.9, 2.0), (0.45, 2.2), (0.0, 2.0)]);
        assert!(!is_rectangular(&door));
    }

    #[test]
    fn floor_measurements() {
        let floor = floor_at(0.0);
        assert_relative_eq!(floor_area(&floor).unwrap(), 12.0);
        assert_relative_eq!(floor_perimeter_length(&floor).unwrap(), 14.0);

        let mut boxed = floor_at(0.0);
        boxed.polygon_corners.clear();
        boxed.dimensions = vec![5.0, 0.0, 4.0];
        assert_relative_eq!(floor_area(&boxed).unwrap(), 20.0);
        boxed.dimensions = vec![5.0, 3.0, 0.0];
        assert_relative_eq!(floor_area(&boxed).unwrap(), 15.0);
        assert_relative_eq!(floor_perimeter_length(&boxed).unwrap(), 16.0);
    }

    #[test]
    fn histograms() {
        let scan = scan_with(|s| {
            s.doors.push(door_at("a", Transform::identity()));
            let mut open = door_at("b", Transform::identity());
            open.category = SurfaceCategory::Door { is_open: true };
            s.doors.push(open);

            for sofa_type in ["lShaped", "lShaped", "rectangular"] {
                let sofa: Object = serde_json::from_value(json!({
                    "category": {"sofa": {}},
                    "attributes": {"SofaType": sofa_type}
                }))
                .unwrap();
                s.objects.push(sofa);
            }
            s.objects.push(Object {
                category: ObjectCategory::Toilet,
                ..Default::default()
            });
        });

        let doors = door_open_counts(&scan);
        assert_eq!(doors["open"], 1);
        assert_eq!(doors["closed"], 1);

        let counts = object_counts(&scan);
        assert_eq!(counts["sofa"], 3);
        assert_eq!(counts["toilet"], 1);

        let attributes = object_attributes(&scan);
        assert_eq!(attributes["SofaType"]["lShaped"], 2);
        assert_eq!(attributes["SofaType"]["rectangular"], 1);
    }

    #[test]
    fn distinct_parent_walls() {
        let mut a = door_at("a", Transform::identity());
        a.parent_identifier = Some("w1".into());
        let mut b = door_at("b", Transform::identity());
        b.parent_identifier = Some("w1".into());
        let mut c = door_at("c", Transform::identity());
        c.parent_identifier = Some("w2".into());
        let orphan = door_at("d", Transform::identity());

        let doors = [a, b, c, orphan];
        assert_eq!(parent_walls(&doors).len(), 2);
        assert!(is_unparented(&doors[3]));
        assert!(!is_unparented(&doors[0]));
    }

    #[test]
    fn counts_low_confidence() {
        let scan = scan_with(|s| {
            let mut wall = wall_at("w", 1.0, Transform::identity());
            wall.confidence = Confidence::Low;
            s.walls.push(wall);
            let mut door = door_at("d", Transform::identity());
            door.confidence = Confidence::High;
            s.doors.push(door);
            let mut opening = door_at("o", Transform::identity());
            opening.confidence = Confidence::Low;
            s.openings.push(opening);
        });
        assert_eq!(low_confidence_count(&scan), 2);
        assert_eq!(low_confidence_count(&scan_with(|_| {})), 0);
    }
}
