// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The scan document root and its strict parser.
//!
//! The root is validated against a fixed key allow-list before anything is
//! decoded. There is no schema evolution: an unknown key, a missing array or a
//! mistyped root field rejects the document as a whole. Inside an entry only a
//! non-object entry is rejected; mistyped geometry is left for the checks to
//! skip.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::entity::{integral, Object, Section, Surface};
use crate::error::{json_kind, Error, Result};

/// Every key a scan document may carry.
pub const ALLOWED_KEYS: [&str; 11] = [
    "version",
    "sections",
    "coreModel",
    "story",
    "floors",
    "walls",
    "objects",
    "windows",
    "doors",
    "openings",
    "referenceOriginTransform",
];

/// A parsed room scan. Immutable once constructed.
#[derive(Debug, Clone, Default)]
pub struct RawScan {
    pub version: f64,
    pub sections: Vec<Section>,
    pub core_model: String,
    /// Story the scan was captured on.
    pub story: i64,
    pub floors: Vec<Surface>,
    pub walls: Vec<Surface>,
    pub objects: Vec<Object>,
    pub windows: Vec<Surface>,
    pub doors: Vec<Surface>,
    pub openings: Vec<Surface>,
    pub reference_origin_transform: Vec<f64>,
}

impl RawScan {
    /// Parses scan JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Validates and decodes an untyped JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut root = match value {
            Value::Object(map) => map,
            other => return Err(Error::NotAnObject(json_kind(&other))),
        };

        if let Some(key) = root.keys().find(|k| !ALLOWED_KEYS.contains(&k.as_str())) {
            return Err(Error::UnknownKey(key.clone()));
        }

        let version = take_number(&mut root, "version")?;
        let sections = take_array(&mut root, "sections")?;
        let core_model = match take(&mut root, "coreModel")? {
            Value::String(s) => s,
            other => return Err(invalid("coreModel", "string", &other)),
        };
        let story = take(&mut root, "story")?;
        let story = integral(&story).ok_or_else(|| invalid("story", "integer", &story))?;
        let floors = take_array(&mut root, "floors")?;
        let walls = take_array(&mut root, "walls")?;
        let objects = take_array(&mut root, "objects")?;
        let windows = take_array(&mut root, "windows")?;
        let doors = take_array(&mut root, "doors")?;
        let openings = take_array(&mut root, "openings")?;
        let reference_origin_transform = match root.remove("referenceOriginTransform") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(Value::as_f64)
                .collect::<Option<Vec<_>>>()
                .ok_or(Error::InvalidType {
                    field: "referenceOriginTransform",
                    expected: "array of numbers",
                    found: "array",
                })?,
            Some(other) => return Err(invalid("referenceOriginTransform", "array", &other)),
        };

        Ok(Self {
            version,
            sections: decode_entries("sections", sections)?,
            core_model,
            story,
            floors: decode_entries("floors", floors)?,
            walls: decode_entries("walls", walls)?,
            objects: decode_entries("objects", objects)?,
            windows: decode_entries("windows", windows)?,
            doors: decode_entries("doors", doors)?,
            openings: decode_entries("openings", openings)?,
            reference_origin_transform,
        })
    }

    /// Doors, windows and openings in that order.
    pub fn embedded(&self) -> impl Iterator<Item = &Surface> {
        self.doors.iter().chain(&self.windows).chain(&self.openings)
    }

    /// Distinct stories referenced anywhere in the scan, ascending.
    pub fn stories(&self) -> Vec<i64> {
        let mut stories: Vec<i64> = std::iter::once(Some(self.story))
            .chain(self.sections.iter().map(|s| s.story))
            .chain(self.floors.iter().map(|s| s.story))
            .chain(self.walls.iter().map(|s| s.story))
            .chain(self.embedded().map(|s| s.story))
            .chain(self.objects.iter().map(|o| o.story))
            .flatten()
            .collect();
        stories.sort_unstable();
        stories.dedup();
        stories
    }
}

fn take(root: &mut Map<String, Value>, field: &'static str) -> Result<Value> {
    root.remove(field).ok_or(Error::MissingField(field))
}

fn take_number(root: &mut Map<String, Value>, field: &'static str) -> Result<f64> {
    let value = take(root, field)?;
    value.as_f64().ok_or_else(|| invalid(field, "number", &value))
}

fn take_array(root: &mut Map<String, Value>, field: &'static str) -> Result<Vec<Value>> {
    match take(root, field)? {
        Value::Array(items) => Ok(items),
        other => Err(invalid(field, "array", &other)),
    }
}

fn invalid(field: &'static str, expected: &'static str, found: &Value) -> Error {
    Error::InvalidType {
        field,
        expected,
        found: json_kind(found),
    }
}

fn decode_entries<T: DeserializeOwned>(field: &'static str, items: Vec<Value>) -> Result<Vec<T>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(Error::InvalidEntry {
                    field,
                    index,
                    reason: format!("expected object, found {}", json_kind(&item)),
                });
            }
            serde_json::from_value(item).map_err(|e| Error::InvalidEntry {
                field,
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}
