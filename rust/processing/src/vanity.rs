// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vanity detection: which sink and storage objects form the bathroom vanity.

use scanlint_core::{Object, ObjectCategory, Placed, RawScan};
use scanlint_geometry::{do_polygons_intersect, Footprint};
use serde::{Deserialize, Serialize};

use crate::checks::intersections::OBJECT_INSET;
use crate::footprint::{object_footprint, stories_compatible};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VanityType {
    /// Storage cabinet with a sink on top.
    Normal,
    SinkOnly,
    StorageOnly,
    #[default]
    NoVanity,
}

/// The object chosen as the vanity and how it was classified.
#[derive(Debug, Clone, Copy)]
pub struct VanityCandidate<'a> {
    pub object: &'a Object,
    pub kind: VanityType,
}

fn boxes(scan: &RawScan, category: ObjectCategory) -> Vec<(&Object, Footprint)> {
    scan.objects
        .iter()
        .filter(|o| o.category == category)
        .filter_map(|o| Some((o, object_footprint(o, OBJECT_INSET)?)))
        .collect()
}

fn footprint_area(object: &Object) -> f64 {
    object.width().unwrap_or(0.0) * object.depth().unwrap_or(0.0)
}

/// Picks the vanity, in order of preference: storage under a sink on the
/// same story, any sink, the largest storage.
pub fn find_vanity_candidate(scan: &RawScan) -> Option<VanityCandidate<'_>> {
    let sinks = boxes(scan, ObjectCategory::Sink);
    let storage = boxes(scan, ObjectCategory::Storage);

    let under_sink = storage.iter().find(|(cabinet, cabinet_box)| {
        sinks.iter().any(|(sink, sink_box)| {
            stories_compatible(cabinet.story, sink.story) && do_polygons_intersect(cabinet_box, sink_box)
        })
    });
    if let Some((object, _)) = under_sink {
        return Some(VanityCandidate { object: *object, kind: VanityType::Normal });
    }

    if let Some((object, _)) = sinks.first() {
        return Some(VanityCandidate { object: *object, kind: VanityType::SinkOnly });
    }

    storage
        .iter()
        .max_by(|(a, _), (b, _)| footprint_area(a).total_cmp(&footprint_area(b)))
        .map(|(object, _)| VanityCandidate { object: *object, kind: VanityType::StorageOnly })
}

pub fn get_vanity_type(scan: &RawScan) -> VanityType {
    find_vanity_candidate(scan).map_or(VanityType::NoVanity, |c| c.kind)
}

/// Width of the vanity candidate, empty when there is none or its width is
/// not positive.
pub fn get_vanity_lengths(scan: &RawScan) -> Vec<f64> {
    find_vanity_candidate(scan)
        .and_then(|c| c.object.width())
        .filter(|w| *w > 0.0)
        .into_iter()
        .collect()
}
