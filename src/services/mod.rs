//! Service layer
//!
//! Ties the collector, artifact writer and report together into a run.

pub mod must_gather;

pub use must_gather::{GatherOutcome, MustGather, TIMEOUT_TEXT};

use std::path::PathBuf;

use crate::models::GatherKind;
use crate::report::ReportError;

/// Failures that abort a run
#[derive(Debug, thiserror::Error)]
pub enum GatherError {
    #[error("Unable to collect {kind}: {cause}")]
    Foundational { kind: GatherKind, cause: String },

    #[error("No {0} found in cluster")]
    Missing(GatherKind),

    #[error("Invalid cluster ID '{0}': expected at least 8 characters")]
    InvalidClusterId(String),

    #[error("Failed to create output directory {}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Report(#[from] ReportError),
}
