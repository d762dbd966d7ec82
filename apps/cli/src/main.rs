// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! scanlint - validate room-scan documents and print their metadata.
//!
//! Each scan is parsed, checked and summarised into one metadata record,
//! printed as a JSON line. Records are cached in `rawScanMetadata.json` next
//! to the scan unless caching is disabled. Scans that share a directory with
//! another input are never cached, since they would share one sidecar.
//!
//! # Environment
//!
//! - `SCANLINT_LOG` - log filter (default `warn,scanlint=info`)
//! - `SCANLINT_CACHE` - set to `0` to disable sidecar caching
//! - `SCANLINT_WORKER_THREADS` - scans processed in parallel

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use scanlint_processing::{compute_raw_scan_metadata, load_or_compute, load_scan, RawScanMetadata, SidecarCache};

mod config;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "scanlint", version, about = "Validate room-scan documents")]
struct Args {
    /// Ignore and do not write cached metadata.
    #[arg(long)]
    no_cache: bool,

    /// Pretty-print each record.
    #[arg(long)]
    pretty: bool,

    /// Scan documents to validate.
    #[arg(required = true)]
    scans: Vec<PathBuf>,
}

/// Directories holding more than one of the inputs.
fn shared_directories(scans: &[PathBuf]) -> FxHashSet<&Path> {
    let mut counts: FxHashMap<&Path, usize> = FxHashMap::default();
    for dir in scans.iter().filter_map(|p| p.parent()) {
        *counts.entry(dir).or_default() += 1;
    }
    counts.into_iter().filter(|(_, n)| *n > 1).map(|(dir, _)| dir).collect()
}

fn process(path: &Path, use_cache: bool) -> anyhow::Result<RawScanMetadata> {
    let scan = load_scan(path)?;
    let metadata = if use_cache {
        load_or_compute(&scan, path, &SidecarCache)
    } else {
        compute_raw_scan_metadata(&scan)
    };
    Ok(metadata)
}

fn render(metadata: &RawScanMetadata, pretty: bool) -> anyhow::Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(metadata)
    } else {
        serde_json::to_string(metadata)
    };
    text.context("failed to encode metadata")
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let use_cache = config.use_cache && !args.no_cache;
    tracing::info!(
        scans = args.scans.len(),
        worker_threads = config.worker_threads,
        use_cache,
        "validating scans"
    );

    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
    {
        tracing::warn!(error = %e, "using the default thread pool");
    }

    let shared = if use_cache { shared_directories(&args.scans) } else { FxHashSet::default() };
    for dir in &shared {
        tracing::warn!(dir = %dir.display(), "several scans share this directory, not caching them");
    }

    let results: Vec<_> = args
        .scans
        .par_iter()
        .map(|path| {
            let cache = use_cache && !path.parent().is_some_and(|dir| shared.contains(dir));
            process(path, cache).with_context(|| format!("failed to validate {}", path.display()))
        })
        .collect();

    let mut failed = 0usize;
    for result in results {
        match result.and_then(|metadata| render(&metadata, args.pretty)) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                failed += 1;
                tracing::error!("{e:#}");
            }
        }
    }

    if failed > 0 {
        tracing::warn!(failed, "some scans could not be validated");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
