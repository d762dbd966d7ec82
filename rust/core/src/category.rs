// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity categories.
//!
//! Scan documents encode a category as a presence-flag object with exactly
//! one key, e.g. `{"toilet": {}}` or `{"door": {"isOpen": true}}`. Older
//! exports use a bare string. Both decode into the tagged enums below.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Name of a presence-flag value: the single key of an object, or the string
/// itself.
pub fn flag_name(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map.keys().next().map(String::as_str),
        _ => None,
    }
}

/// Category of a floor, wall, door, window or opening.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SurfaceCategory {
    Floor,
    Wall,
    Door { is_open: bool },
    Window,
    Opening,
    #[default]
    Unknown,
}

impl SurfaceCategory {
    pub fn from_value(value: &Value) -> Self {
        match flag_name(value) {
            Some("floor") => Self::Floor,
            Some("wall") => Self::Wall,
            Some("door") => Self::Door {
                is_open: value
                    .get("door")
                    .and_then(|d| d.get("isOpen"))
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            },
            Some("window") => Self::Window,
            Some("opening") => Self::Opening,
            _ => Self::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for SurfaceCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Category of a furniture-like object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectCategory {
    Storage,
    Refrigerator,
    Stove,
    Bed,
    Sink,
    WasherDryer,
    Toilet,
    Bathtub,
    Oven,
    Dishwasher,
    Table,
    Sofa,
    Chair,
    Fireplace,
    Television,
    Stairs,
    Unknown(String),
}

impl ObjectCategory {
    pub fn from_name(name: &str) -> Self {
        match name {
            "storage" => Self::Storage,
            "refrigerator" => Self::Refrigerator,
            "stove" => Self::Stove,
            "bed" => Self::Bed,
            "sink" => Self::Sink,
            "washerDryer" => Self::WasherDryer,
            "toilet" => Self::Toilet,
            "bathtub" => Self::Bathtub,
            "oven" => Self::Oven,
            "dishwasher" => Self::Dishwasher,
            "table" => Self::Table,
            "sofa" => Self::Sofa,
            "chair" => Self::Chair,
            "fireplace" => Self::Fireplace,
            "television" => Self::Television,
            "stairs" => Self::Stairs,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Wire name, as used in histograms.
    pub fn name(&self) -> &str {
        match self {
            Self::Storage => "storage",
            Self::Refrigerator => "refrigerator",
            Self::Stove => "stove",
            Self::Bed => "bed",
            Self::Sink => "sink",
            Self::WasherDryer => "washerDryer",
            Self::Toilet => "toilet",
            Self::Bathtub => "bathtub",
            Self::Oven => "oven",
            Self::Dishwasher => "dishwasher",
            Self::Table => "table",
            Self::Sofa => "sofa",
            Self::Chair => "chair",
            Self::Fireplace => "fireplace",
            Self::Television => "television",
            Self::Stairs => "stairs",
            Self::Unknown(name) => name,
        }
    }
}

impl Default for ObjectCategory {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl<'de> Deserialize<'de> for ObjectCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_name(flag_name(&value).unwrap_or_default()))
    }
}

/// Detection confidence reported by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confidence {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match flag_name(&value) {
            Some("low") => Self::Low,
            Some("medium") => Self::Medium,
            Some("high") => Self::High,
            _ => Self::Unknown,
        })
    }
}
