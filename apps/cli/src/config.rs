// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Runtime configuration loaded from environment variables.

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Log filter directives, `tracing_subscriber::EnvFilter` syntax.
    pub log_filter: String,
    /// Read and write `rawScanMetadata.json` sidecars.
    pub use_cache: bool,
    /// Number of worker threads for batch processing.
    pub worker_threads: usize,
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            log_filter: std::env::var("SCANLINT_LOG").unwrap_or_else(|_| "warn,scanlint=info".into()),
            use_cache: std::env::var("SCANLINT_CACHE")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
            worker_threads: std::env::var("SCANLINT_WORKER_THREADS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or_else(num_cpus::get),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
