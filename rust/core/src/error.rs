// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for scan parsing.

use thiserror::Error;

/// Result type alias for scan parsing.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a scan document is rejected. Parsing never yields a partial scan.
#[derive(Error, Debug)]
pub enum Error {
    /// The document root is not a JSON object.
    #[error("scan document must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// A root key outside the allow-list.
    #[error("unknown key in scan document: {0:?}")]
    UnknownKey(String),

    /// A required root field is absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A root field has the wrong JSON type.
    #[error("invalid field {field}: expected {expected}, found {found}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// An array element could not be decoded into its entity type.
    #[error("invalid entry {field}[{index}]: {reason}")]
    InvalidEntry {
        field: &'static str,
        index: usize,
        reason: String,
    },

    /// The text is not JSON at all.
    #[error("malformed scan JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON type name used in error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
