//! OADP must-gather library
//!
//! Collects the cluster resources relevant to OpenShift API for Data
//! Protection, writes them into a must-gather tree and synthesizes a Markdown
//! summary. The `gather` binary is a thin shell over [`services::MustGather`].

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod gather;
pub mod kube;
pub mod models;
pub mod report;
pub mod services;

// Re-export commonly used types for convenience
pub use artifacts::{ArtifactPath, ArtifactWriter, Bucket, WriteResult};
pub use config::GatherConfig;
pub use gather::{Collector, ResourceQuery, Snapshot};
pub use models::{GatherKind, Gvk, Resource, TaggedResource};
pub use report::{Placeholder, PlaceholderMap, ReportAccumulator, ReportEmitter, ReportError};
pub use services::{GatherError, GatherOutcome, MustGather};
