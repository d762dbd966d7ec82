// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for scan loading and the metadata cache.

use std::path::PathBuf;

/// Result type alias for processing operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scan document was rejected by the parser.
    #[error("invalid scan {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: scanlint_core::Error,
    },

    /// A metadata record could not be encoded.
    #[error("metadata serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The cache key has no parent directory to hold the sidecar file.
    #[error("no sidecar location for {0}")]
    NoSidecar(PathBuf),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
