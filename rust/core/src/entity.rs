// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scanned entities: surfaces (floors, walls, doors, windows, openings),
//! objects and sections.
//!
//! Per-entity geometry is decoded leniently: missing dimensions or a short
//! transform are kept as-is so that the checks can skip the entity instead of
//! rejecting the whole scan. Null or mistyped geometry fields decode as empty,
//! and a mistyped story as unknown.

use std::collections::BTreeMap;

use scanlint_geometry::{Point, Transform};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::category::{flag_name, Confidence, ObjectCategory, SurfaceCategory};

/// Arc description of a curved surface.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Curve {
    #[serde(default)]
    pub start_angle: f64,
    #[serde(default)]
    pub end_angle: f64,
    #[serde(default)]
    pub radius: f64,
}

/// A planar scanned element.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surface {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub parent_identifier: Option<String>,
    /// `[width X, height Y, depth Z]` in meters.
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub dimensions: Vec<f64>,
    /// Local outline; each corner is `[x, z, ...]`.
    #[serde(default, deserialize_with = "lenient_corners")]
    pub polygon_corners: Vec<Vec<f64>>,
    /// Raw column-major 4×4 placement.
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub transform: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_story")]
    pub story: Option<i64>,
    #[serde(default)]
    pub category: SurfaceCategory,
    #[serde(default)]
    pub confidence: Confidence,
    #[serde(default, deserialize_with = "lenient_curve")]
    pub curve: Option<Curve>,
}

/// A furniture-like scanned element.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Object {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub parent_identifier: Option<String>,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub dimensions: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub transform: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_story")]
    pub story: Option<i64>,
    #[serde(default)]
    pub category: ObjectCategory,
    #[serde(default)]
    pub confidence: Confidence,
    /// Furniture sub-type attributes, e.g. `{"SofaType": "lShaped"}`.
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

/// A labelled room section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Section {
    #[serde(default, deserialize_with = "deserialize_label")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub center: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_story")]
    pub story: Option<i64>,
}

fn deserialize_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(flag_name(&value).unwrap_or_default().to_string())
}

/// Integer value of a JSON number, accepting floats without a fraction.
pub fn integral(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        let f = value.as_f64()?;
        let in_range = f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64;
        in_range.then_some(f as i64)
    })
}

fn numbers(value: &Value) -> Option<Vec<f64>> {
    value.as_array()?.iter().map(Value::as_f64).collect()
}

/// Empty unless the value is an array of numbers.
fn lenient_numbers<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(numbers(&value).unwrap_or_default())
}

/// Empty unless every corner is an array of numbers.
fn lenient_corners<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<f64>>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let corners = value
        .as_array()
        .and_then(|items| items.iter().map(numbers).collect::<Option<Vec<_>>>());
    Ok(corners.unwrap_or_default())
}

fn lenient_story<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(integral(&value))
}

fn lenient_curve<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Curve>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Shared placement accessors for surfaces and objects.
pub trait Placed {
    fn identifier(&self) -> &str;
    fn parent_identifier(&self) -> Option<&str>;
    fn dimensions(&self) -> &[f64];
    fn raw_transform(&self) -> &[f64];
    fn story(&self) -> Option<i64>;

    /// Validated placement, `None` unless the raw transform has 16 slots.
    fn placement(&self) -> Option<Transform> {
        Transform::from_raw(self.raw_transform())
    }

    fn width(&self) -> Option<f64> {
        self.dimensions().first().copied()
    }

    fn height(&self) -> Option<f64> {
        self.dimensions().get(1).copied()
    }

    fn depth(&self) -> Option<f64> {
        self.dimensions().get(2).copied()
    }

    /// World `(bottom, top)` heights, centred on the placement origin.
    fn vertical_band(&self) -> Option<(f64, f64)> {
        let y = self.placement()?.translation_y;
        let half = self.height()? / 2.0;
        Some((y - half, y + half))
    }

    /// True when both stories are known and differ.
    fn on_other_story(&self, story: Option<i64>) -> bool {
        matches!((self.story(), story), (Some(a), Some(b)) if a != b)
    }
}

macro_rules! impl_placed {
    ($ty:ty) => {
        impl Placed for $ty {
            fn identifier(&self) -> &str {
                &self.identifier
            }
            fn parent_identifier(&self) -> Option<&str> {
                self.parent_identifier.as_deref()
            }
            fn dimensions(&self) -> &[f64] {
                &self.dimensions
            }
            fn raw_transform(&self) -> &[f64] {
                &self.transform
            }
            fn story(&self) -> Option<i64> {
                self.story
            }
        }
    };
}

impl_placed!(Surface);
impl_placed!(Object);

impl Surface {
    /// Local outline as floor-plane points. Corners with fewer than two
    /// components are dropped.
    pub fn outline(&self) -> Vec<Point> {
        self.polygon_corners
            .iter()
            .filter(|c| c.len() >= 2)
            .map(|c| Point::new(c[0], c[1]))
            .collect()
    }

    pub fn has_outline(&self) -> bool {
        self.polygon_corners.len() >= 3
    }

    pub fn is_curved(&self) -> bool {
        self.curve.is_some()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.category, SurfaceCategory::Door { is_open: true })
    }
}

impl Object {
    /// Attribute values rendered as labels; presence-flag objects render as
    /// their key.
    pub fn attribute_labels(&self) -> impl Iterator<Item = (&str, String)> {
        self.attributes.iter().map(|(key, value)| {
            let label = match value {
                Value::String(s) => s.clone(),
                Value::Object(_) => flag_name(value).unwrap_or_default().to_string(),
                other => other.to_string(),
            };
            (key.as_str(), label)
        })
    }
}
