//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Run configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GatherConfig {
    /// Directory the `clusters/<id>` tree is created under
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Deadline for the whole run; unset means no deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// Log window, accepted for compatibility with the must-gather image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs_since_seconds: Option<u64>,

    /// Skip TLS verification of the API server
    #[serde(default)]
    pub skip_tls: bool,

    /// Upper bound on queries in flight at once
    #[serde(default = "default_max_concurrent_queries")]
    pub max_concurrent_queries: usize,

    /// Version printed in the summary header
    #[serde(default = "default_must_gather_version")]
    pub must_gather_version: String,
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            timeout_seconds: None,
            logs_since_seconds: None,
            skip_tls: false,
            max_concurrent_queries: default_max_concurrent_queries(),
            must_gather_version: default_must_gather_version(),
        }
    }
}

impl GatherConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("must-gather")
}

fn default_max_concurrent_queries() -> usize {
    8
}

fn default_must_gather_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
