// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end scenarios: scan JSON in, metadata out.

use scanlint_core::RawScan;
use scanlint_processing::checks::{check_door_blocking, check_tub_gaps, check_wall_gaps};
use scanlint_processing::{compute_raw_scan_metadata, load_or_compute, MemoryCache, VanityType};
use serde_json::{json, Value};

const INCH: f64 = 0.0254;

fn translation(x: f64, y: f64, z: f64) -> Value {
    json!([1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, x, y, z, 1])
}

fn scan(floors: Value, walls: Value, doors: Value, objects: Value) -> RawScan {
    RawScan::from_value(json!({
        "version": 2,
        "sections": [{"label": {"bathroom": {}}, "center": [0, 0, 0], "story": 0}],
        "coreModel": "",
        "story": 0,
        "floors": floors,
        "walls": walls,
        "objects": objects,
        "windows": [],
        "doors": doors,
        "openings": []
    }))
    .expect("scenario scan parses")
}

fn wall(id: &str, width: f64, x: f64, z: f64) -> Value {
    json!({
        "identifier": id,
        "dimensions": [width, 2.4, 0],
        "transform": translation(x, 1.2, z),
        "story": 0,
        "category": {"wall": {}}
    })
}

fn floor() -> Value {
    json!({
        "identifier": "floor",
        "dimensions": [4, 3, 0],
        "polygonCorners": [[-2, -1.5, 0], [2, -1.5, 0], [2, 1.5, 0], [-2, 1.5, 0]],
        "transform": translation(0.0, 0.0, 0.0),
        "story": 0,
        "category": {"floor": {}}
    })
}

fn object(id: &str, category: &str, dimensions: [f64; 3], x: f64, y: f64, z: f64) -> Value {
    json!({
        "identifier": id,
        "dimensions": dimensions,
        "transform": translation(x, y, z),
        "story": 0,
        "category": {category: {}},
        "attributes": {}
    })
}

#[test]
fn wall_gap_scenarios() {
    let at = |gap: f64| {
        scan(
            json!([]),
            json!([wall("a", 1.0, 0.5, 0.0), wall("b", 1.0, 1.5 + gap, 0.0)]),
            json!([]),
            json!([]),
        )
    };
    assert!(!check_wall_gaps(&at(0.0)));
    assert!(check_wall_gaps(&at(6.0 * INCH)));
    assert!(!check_wall_gaps(&at(13.0 * INCH)));
}

#[test]
fn malformed_wall_is_skipped() {
    let broken = json!({
        "identifier": "broken",
        "dimensions": [1.0, 2.4, null],
        "transform": null,
        "story": 0.0,
        "category": {"wall": {}}
    });
    let scan = scan(
        json!([]),
        json!([wall("a", 1.0, 0.5, 0.0), broken, wall("b", 1.0, 1.5 + 6.0 * INCH, 0.0)]),
        json!([]),
        json!([]),
    );
    assert_eq!(scan.walls.len(), 3);
    assert!(scan.walls[1].transform.is_empty());
    assert!(check_wall_gaps(&scan));

    let metadata = compute_raw_scan_metadata(&scan);
    assert_eq!(metadata.wall_count, 3);
    assert!(metadata.has_wall_gaps);
}

#[test]
fn door_blocking_scenarios() {
    let with_cube_at = |z: f64| {
        scan(
            json!([]),
            json!([]),
            json!([{
                "identifier": "door",
                "dimensions": [0.9, 2.1, 0],
                "transform": translation(0.0, 0.0, 0.0),
                "story": 0,
                "category": {"door": {"isOpen": false}}
            }]),
            json!([object("cube", "storage", [0.5, 0.5, 0.5], 0.0, 0.0, z)]),
        )
    };
    assert!(check_door_blocking(&with_cube_at(0.3)));
    assert!(!check_door_blocking(&with_cube_at(-0.3)));
}

#[test]
fn tub_gap_scenarios() {
    let with_wall_at = |offset: f64| {
        scan(
            json!([]),
            json!([wall("w", 2.0, 0.0, -0.375 - offset)]),
            json!([]),
            json!([object("tub", "bathtub", [1.5, 0.5, 0.75], 0.0, 0.25, 0.0)]),
        )
    };
    assert!(check_tub_gaps(&with_wall_at(3.0 * INCH)));
    assert!(!check_tub_gaps(&with_wall_at(0.0)));
    assert!(!check_tub_gaps(&with_wall_at(7.0 * INCH)));
}

#[test]
fn bathroom_metadata() {
    let scan = scan(
        json!([floor()]),
        json!([
            wall("south", 4.0, 0.0, -1.5),
            wall("north", 4.0, 0.0, 1.5),
        ]),
        json!([]),
        json!([
            object("toilet", "toilet", [0.4, 0.8, 0.7], -1.0, 0.4, -1.15),
            object("sink", "sink", [0.5, 0.2, 0.4], 1.0, 0.9, -1.3),
            object("cabinet", "storage", [0.8, 0.8, 0.5], 1.0, 0.4, -1.25),
        ]),
    );

    let metadata = compute_raw_scan_metadata(&scan);
    assert_eq!(metadata.section_labels, vec!["bathroom".to_string()]);
    assert!(metadata.has_toilet && metadata.has_sink && metadata.has_storage);
    assert!(!metadata.has_tub);
    assert!(!metadata.has_toilet_gaps);
    assert_eq!(metadata.vanity_type, VanityType::Normal);
    assert_eq!(metadata.vanity_lengths, vec![0.8]);
    assert_eq!(metadata.floor_areas, vec![12.0]);
    assert_eq!(metadata.object_counts.get("storage"), Some(&1));
    assert!(!metadata.has_invalid_floor_polygons);
    assert!(!metadata.intersections.has_wall_wall_intersection_errors);
}

#[test]
fn cached_metadata_is_reused() {
    let cache = MemoryCache::new();
    let key = std::path::Path::new("/scans/bathroom/scan.json");
    let empty = scan(json!([]), json!([]), json!([]), json!([]));
    let first = load_or_compute(&empty, key, &cache);
    let second = load_or_compute(&empty, key, &cache);
    assert_eq!(first, second);
    assert_eq!(cache.len(), 1);
}

#[test]
fn malformed_scans_are_rejected() {
    let err = RawScan::from_value(json!({"version": 2, "rooms": []})).unwrap_err();
    assert!(err.to_string().contains("rooms"));

    assert!(RawScan::from_value(json!("scan")).is_err());
}
