// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cache-or-recompute for metadata records.
//!
//! Records are keyed by the scan's location. A cached record is only used
//! when it parses and carries the current [`SCHEMA_VERSION`]; everything
//! else is a miss. Failing to store a record never fails the computation.
//!
//! The sidecar file is shared by every scan in a directory, so it also names
//! the scan it was computed for. A record written for a sibling is a miss.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rustc_hash::FxHashMap;
use scanlint_core::RawScan;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metadata::{compute_raw_scan_metadata, RawScanMetadata, SCHEMA_VERSION};

/// Sidecar file written next to each scan.
pub const METADATA_FILE_NAME: &str = "rawScanMetadata.json";

/// Storage for computed metadata, keyed by scan location.
pub trait MetadataCache {
    /// A current-schema record for `key`, `None` on any failure.
    fn get(&self, key: &Path) -> Option<RawScanMetadata>;

    fn put(&self, key: &Path, metadata: &RawScanMetadata) -> Result<()>;
}

fn current(metadata: RawScanMetadata) -> Option<RawScanMetadata> {
    if metadata.schema_version != SCHEMA_VERSION {
        tracing::debug!(
            found = metadata.schema_version,
            expected = SCHEMA_VERSION,
            "cached metadata has a stale schema"
        );
        return None;
    }
    Some(metadata)
}

/// Decodes a cached record, rejecting stale schemas.
pub fn decode_cached(text: &str) -> Option<RawScanMetadata> {
    match serde_json::from_str(text) {
        Ok(metadata) => current(metadata),
        Err(e) => {
            tracing::debug!(error = %e, "cached metadata does not parse");
            None
        }
    }
}

/// On-disk sidecar: the record plus the file name of its scan.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SidecarRecord<M> {
    scan_file: String,
    #[serde(flatten)]
    metadata: M,
}

/// Stores `rawScanMetadata.json` in the directory holding the scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarCache;

impl SidecarCache {
    /// Sidecar path for the scan at `key`.
    pub fn sidecar_path(key: &Path) -> Option<PathBuf> {
        key.parent().map(|dir| dir.join(METADATA_FILE_NAME))
    }

    fn scan_file(key: &Path) -> Option<String> {
        key.file_name().map(|name| name.to_string_lossy().into_owned())
    }
}

impl MetadataCache for SidecarCache {
    fn get(&self, key: &Path) -> Option<RawScanMetadata> {
        let path = Self::sidecar_path(key)?;
        let scan_file = Self::scan_file(key)?;
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(error = %e, path = %path.display(), "no cached metadata");
                return None;
            }
        };
        let record: SidecarRecord<RawScanMetadata> = match serde_json::from_str(&text) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(error = %e, path = %path.display(), "cached metadata does not parse");
                return None;
            }
        };
        if record.scan_file != scan_file {
            tracing::debug!(
                path = %path.display(),
                cached = %record.scan_file,
                requested = %scan_file,
                "cached metadata belongs to another scan"
            );
            return None;
        }
        current(record.metadata)
    }

    fn put(&self, key: &Path, metadata: &RawScanMetadata) -> Result<()> {
        let no_sidecar = || Error::NoSidecar(key.to_path_buf());
        let path = Self::sidecar_path(key).ok_or_else(no_sidecar)?;
        let record = SidecarRecord {
            scan_file: Self::scan_file(key).ok_or_else(no_sidecar)?,
            metadata,
        };
        let data = serde_json::to_vec_pretty(&record)?;
        std::fs::write(&path, &data).map_err(|e| Error::io(&path, e))?;
        tracing::debug!(path = %path.display(), size = data.len(), "cached metadata");
        Ok(())
    }
}

/// In-process cache holding serialized records.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<FxHashMap<PathBuf, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw text under `key`, bypassing serialization.
    pub fn insert_raw(&self, key: impl Into<PathBuf>, text: impl Into<String>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.into(), text.into());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MetadataCache for MemoryCache {
    fn get(&self, key: &Path) -> Option<RawScanMetadata> {
        let entries = self.entries.lock().ok()?;
        decode_cached(entries.get(key)?)
    }

    fn put(&self, key: &Path, metadata: &RawScanMetadata) -> Result<()> {
        let text = serde_json::to_string(metadata)?;
        self.insert_raw(key, text);
        Ok(())
    }
}

/// Returns the cached record for `key` when it is current, otherwise
/// computes it from `scan` and stores it.
pub fn load_or_compute(scan: &RawScan, key: &Path, cache: &dyn MetadataCache) -> RawScanMetadata {
    if let Some(cached) = cache.get(key) {
        tracing::debug!(key = %key.display(), "using cached metadata");
        return cached;
    }

    let metadata = compute_raw_scan_metadata(scan);
    if let Err(e) = cache.put(key, &metadata) {
        tracing::warn!(error = %e, key = %key.display(), "failed to cache metadata");
    }
    metadata
}

/// Reads and parses the scan at `path`.
pub fn load_scan(path: &Path) -> Result<RawScan> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    RawScan::from_json_str(&text).map_err(|source| Error::Scan {
        path: path.to_path_buf(),
        source,
    })
}
