// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The metadata record: every check and measurement over one scan.

use std::collections::BTreeMap;

use scanlint_core::{ObjectCategory, Placed, RawScan, Surface};
use scanlint_geometry::check_polygon_integrity;
use serde::{Deserialize, Serialize};

use crate::checks::{self, IntersectionChecker, IntersectionFlags, SatIntersectionChecker};
use crate::extract::{self, Dimensions};
use crate::vanity::{self, VanityType};

/// Bumped whenever a field is added, removed or changes meaning. Cached
/// records carrying any other version are recomputed.
pub const SCHEMA_VERSION: u32 = 4;

/// Derived, self-contained description of a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScanMetadata {
    pub schema_version: u32,

    pub stories: Vec<i64>,
    pub section_labels: Vec<String>,
    pub floor_count: usize,
    pub wall_count: usize,
    pub door_count: usize,
    pub window_count: usize,
    pub opening_count: usize,
    pub object_count: usize,
    /// Surfaces and objects detected with low confidence.
    pub low_confidence_count: usize,

    pub has_non_rectangular_walls: bool,
    pub has_curved_walls: bool,
    pub has_non_rectangular_doors: bool,
    pub has_curved_doors: bool,
    pub has_unparented_doors: bool,
    pub has_non_rectangular_windows: bool,
    pub has_curved_windows: bool,
    pub has_unparented_windows: bool,
    pub has_non_rectangular_openings: bool,
    pub has_curved_openings: bool,
    pub has_unparented_openings: bool,

    pub has_low_ceiling: bool,
    pub min_ceiling_height: Option<f64>,

    pub has_toilet: bool,
    pub has_tub: bool,
    pub has_sink: bool,
    pub has_storage: bool,
    pub object_counts: BTreeMap<String, usize>,

    pub wall_heights: Vec<f64>,
    pub wall_widths: Vec<f64>,
    pub wall_perimeters: Vec<f64>,
    pub window_dimensions: Vec<Dimensions>,
    pub window_areas: Vec<f64>,
    pub door_dimensions: Vec<Dimensions>,
    pub door_areas: Vec<f64>,
    pub opening_dimensions: Vec<Dimensions>,
    pub opening_areas: Vec<f64>,
    pub floor_areas: Vec<f64>,
    pub floor_perimeters: Vec<f64>,
    pub tub_lengths: Vec<f64>,
    pub vanity_type: VanityType,
    pub vanity_lengths: Vec<f64>,

    pub door_is_open_counts: BTreeMap<String, usize>,
    pub object_attributes: BTreeMap<String, BTreeMap<String, usize>>,

    pub walls_with_windows: usize,
    pub walls_with_doors: usize,
    pub walls_with_openings: usize,
    pub wall_embedded_count: usize,

    pub has_invalid_floor_polygons: bool,
    pub has_invalid_wall_polygons: bool,

    pub has_wall_gaps: bool,
    pub has_colinear_walls: bool,
    pub has_nib_walls: bool,
    pub has_crooked_walls: bool,
    pub has_door_blocking: bool,
    pub has_door_floor_contact_errors: bool,
    pub has_external_openings: bool,
    pub has_toilet_gaps: bool,
    pub has_tub_gaps: bool,
    #[serde(flatten)]
    pub intersections: IntersectionFlags,
}

/// Computes the record with the default SAT intersection checker.
pub fn compute_raw_scan_metadata(scan: &RawScan) -> RawScanMetadata {
    compute_raw_scan_metadata_with(scan, &SatIntersectionChecker)
}

fn any_curved(surfaces: &[Surface]) -> bool {
    surfaces.iter().any(Surface::is_curved)
}

fn any_non_rectangular(surfaces: &[Surface]) -> bool {
    surfaces.iter().any(|s| !extract::is_rectangular(s))
}

fn any_unparented(surfaces: &[Surface]) -> bool {
    surfaces.iter().any(extract::is_unparented)
}

/// Outlines present but rejected by the integrity validator.
fn any_invalid_outline(surfaces: &[Surface]) -> bool {
    surfaces
        .iter()
        .filter(|s| !s.polygon_corners.is_empty())
        .any(|s| !check_polygon_integrity(&s.outline()))
}

fn collect<T>(surfaces: &[Surface], f: impl Fn(&Surface) -> Option<T>) -> Vec<T> {
    surfaces.iter().filter_map(f).collect()
}

fn has_category(scan: &RawScan, category: &ObjectCategory) -> bool {
    scan.objects.iter().any(|o| &o.category == category)
}

pub fn compute_raw_scan_metadata_with(
    scan: &RawScan,
    intersections: &impl IntersectionChecker,
) -> RawScanMetadata {
    let min_ceiling_height = extract::min_ceiling_height(scan);

    let walls_with_windows = extract::parent_walls(&scan.windows).len();
    let walls_with_doors = extract::parent_walls(&scan.doors).len();
    let walls_with_openings = extract::parent_walls(&scan.openings).len();
    let wall_embedded_count = extract::parent_walls(scan.embedded()).len();

    let metadata = RawScanMetadata {
        schema_version: SCHEMA_VERSION,

        stories: scan.stories(),
        section_labels: scan.sections.iter().map(|s| s.label.clone()).collect(),
        floor_count: scan.floors.len(),
        wall_count: scan.walls.len(),
        door_count: scan.doors.len(),
        window_count: scan.windows.len(),
        opening_count: scan.openings.len(),
        object_count: scan.objects.len(),
        low_confidence_count: extract::low_confidence_count(scan),

        has_non_rectangular_walls: any_non_rectangular(&scan.walls),
        has_curved_walls: any_curved(&scan.walls),
        has_non_rectangular_doors: any_non_rectangular(&scan.doors),
        has_curved_doors: any_curved(&scan.doors),
        has_unparented_doors: any_unparented(&scan.doors),
        has_non_rectangular_windows: any_non_rectangular(&scan.windows),
        has_curved_windows: any_curved(&scan.windows),
        has_unparented_windows: any_unparented(&scan.windows),
        has_non_rectangular_openings: any_non_rectangular(&scan.openings),
        has_curved_openings: any_curved(&scan.openings),
        has_unparented_openings: any_unparented(&scan.openings),

        has_low_ceiling: min_ceiling_height.is_some_and(|h| h < extract::LOW_CEILING_HEIGHT),
        min_ceiling_height,

        has_toilet: has_category(scan, &ObjectCategory::Toilet),
        has_tub: has_category(scan, &ObjectCategory::Bathtub),
        has_sink: has_category(scan, &ObjectCategory::Sink),
        has_storage: has_category(scan, &ObjectCategory::Storage),
        object_counts: extract::object_counts(scan),

        wall_heights: collect(&scan.walls, |w| w.height()),
        wall_widths: collect(&scan.walls, |w| w.width()),
        wall_perimeters: collect(&scan.walls, extract::wall_perimeter),
        window_dimensions: collect(&scan.windows, extract::dimensions),
        window_areas: collect(&scan.windows, extract::surface_area),
        door_dimensions: collect(&scan.doors, extract::dimensions),
        door_areas: collect(&scan.doors, extract::surface_area),
        opening_dimensions: collect(&scan.openings, extract::dimensions),
        opening_areas: collect(&scan.openings, extract::surface_area),
        floor_areas: collect(&scan.floors, extract::floor_area),
        floor_perimeters: collect(&scan.floors, extract::floor_perimeter_length),
        tub_lengths: scan
            .objects
            .iter()
            .filter(|o| o.category == ObjectCategory::Bathtub)
            .filter_map(|o| o.width())
            .filter(|w| *w > 0.0)
            .collect(),
        vanity_type: vanity::get_vanity_type(scan),
        vanity_lengths: vanity::get_vanity_lengths(scan),

        door_is_open_counts: extract::door_open_counts(scan),
        object_attributes: extract::object_attributes(scan),

        walls_with_windows,
        walls_with_doors,
        walls_with_openings,
        wall_embedded_count,

        has_invalid_floor_polygons: any_invalid_outline(&scan.floors),
        has_invalid_wall_polygons: any_invalid_outline(&scan.walls),

        has_wall_gaps: checks::check_wall_gaps(scan),
        has_colinear_walls: checks::check_colinear_walls(scan),
        has_nib_walls: checks::check_nib_walls(scan),
        has_crooked_walls: checks::check_crooked_walls(scan),
        has_door_blocking: checks::check_door_blocking(scan),
        has_door_floor_contact_errors: checks::check_door_floor_contact(scan),
        has_external_openings: checks::check_external_openings(scan),
        has_toilet_gaps: checks::check_toilet_gaps(scan),
        has_tub_gaps: checks::check_tub_gaps(scan),
        intersections: intersections.check_intersections(scan),
    };

    tracing::debug!(
        walls = metadata.wall_count,
        objects = metadata.object_count,
        stories = metadata.stories.len(),
        "computed scan metadata"
    );
    metadata
}
