//! One must-gather run
//!
//! The run has two collection phases. Cluster identity, infrastructure and
//! nodes are collected first; if they cannot be, the run aborts before
//! anything is written. The remaining kinds are then collected concurrently
//! and folded into the report by this task alone.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::time::Instant;

use super::GatherError;
use crate::artifacts::ArtifactWriter;
use crate::artifacts::layout::{CLUSTER_ID_LEN, cluster_root};
use crate::config::GatherConfig;
use crate::gather::{Collector, ResourceQuery, Snapshot};
use crate::models::GatherKind;
use crate::report::{Placeholder, ReportAccumulator, ReportEmitter, sections};

/// Section text for anything the deadline cut off
pub const TIMEOUT_TEXT: &str = "❌ not collected (timeout)";

/// Where a successful run left its output
#[derive(Debug, Clone)]
pub struct GatherOutcome {
    pub cluster_id: String,
    pub root: PathBuf,
    pub summary: PathBuf,
    pub timed_out: bool,
}

/// Drives collection, artifact writing and report emission
pub struct MustGather {
    query: Arc<dyn ResourceQuery>,
    config: GatherConfig,
    emitter: ReportEmitter,
}

impl MustGather {
    pub fn new(query: Arc<dyn ResourceQuery>, config: GatherConfig) -> Self {
        Self {
            query,
            config,
            emitter: ReportEmitter::default(),
        }
    }

    pub async fn run(&self) -> Result<GatherOutcome, GatherError> {
        let deadline = self.config.timeout().map(|timeout| Instant::now() + timeout);
        let collector = Collector::new(Arc::clone(&self.query)).with_deadline(deadline);
        let max_concurrent = self.config.max_concurrent_queries;

        tracing::info!("Collecting cluster identity");
        let mut snapshots = collector
            .collect_all(&GatherKind::foundational(), max_concurrent)
            .await;
        let cluster_id = check_foundational(&snapshots)?;

        let root = cluster_root(&self.config.output_dir, &cluster_id);
        std::fs::create_dir_all(&root).map_err(|source| GatherError::OutputDir {
            path: root.clone(),
            source,
        })?;
        tracing::info!("Gathering cluster {} into {}", cluster_id, root.display());

        let remaining = GatherKind::non_foundational();
        tracing::info!("Collecting {} resource kinds", remaining.len());
        snapshots.extend(collector.collect_all(&remaining, max_concurrent).await);
        let timed_out = any_cut_by_deadline(&snapshots);

        let writer = ArtifactWriter::new(&root);
        let mut acc = ReportAccumulator::new();
        acc.set_section(
            Placeholder::MustGatherVersion,
            format!("`{}`", self.config.must_gather_version),
        );
        sections::build_sections(&cluster_id, &snapshots, &writer, &mut acc);

        if timed_out {
            let filled = acc.fill_unset(TIMEOUT_TEXT);
            tracing::warn!("Run deadline exceeded, {} sections not collected", filled.len());
            acc.append_error("Run deadline exceeded before every resource was collected");
        }

        let summary = self.emitter.emit(&acc.finalize(), &root)?;

        Ok(GatherOutcome {
            cluster_id,
            root,
            summary,
            timed_out,
        })
    }
}

/// Abort on unusable foundational snapshots, otherwise return the cluster ID prefix
///
/// An `Empty` ClusterVersion is fatal since no identity can be derived. The
/// other foundational kinds only abort on `Error`.
pub fn check_foundational(
    snapshots: &BTreeMap<GatherKind, Snapshot>,
) -> Result<String, GatherError> {
    let cluster_version = match snapshots.get(&GatherKind::ClusterVersion) {
        Some(Snapshot::Found(items)) => items.first(),
        Some(Snapshot::Empty) => None,
        Some(Snapshot::Error(cause)) => {
            return Err(GatherError::Foundational {
                kind: GatherKind::ClusterVersion,
                cause: cause.clone(),
            });
        }
        None => {
            return Err(GatherError::Foundational {
                kind: GatherKind::ClusterVersion,
                cause: "not collected".to_string(),
            });
        }
    };
    let Some(cluster_version) = cluster_version else {
        return Err(GatherError::Missing(GatherKind::ClusterVersion));
    };

    for kind in [GatherKind::Infrastructure, GatherKind::Node] {
        match snapshots.get(&kind) {
            Some(Snapshot::Error(cause)) => {
                return Err(GatherError::Foundational {
                    kind,
                    cause: cause.clone(),
                });
            }
            Some(Snapshot::Empty) => tracing::warn!("No {} found in cluster", kind),
            _ => {}
        }
    }

    let full_id = cluster_version
        .str_field(&["spec", "clusterID"])
        .unwrap_or_default();
    short_cluster_id(full_id)
}

/// Whether any kind went uncollected because the run deadline passed
pub fn any_cut_by_deadline(snapshots: &BTreeMap<GatherKind, Snapshot>) -> bool {
    snapshots.values().any(Snapshot::cut_by_deadline)
}

/// First 8 characters of the cluster ID
pub fn short_cluster_id(full_id: &str) -> Result<String, GatherError> {
    if full_id.chars().count() < CLUSTER_ID_LEN {
        return Err(GatherError::InvalidClusterId(full_id.to_string()));
    }
    Ok(full_id.chars().take(CLUSTER_ID_LEN).collect())
}
