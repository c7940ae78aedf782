//! Per-kind collection with three-state outcome classification
//!
//! The collector never fails: transport and API errors are captured in
//! `Snapshot::Error` so one broken kind cannot take down the run.

use anyhow::{Result, anyhow};
use futures::future::try_join_all;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::time::Instant;

use super::query::ResourceQuery;
use super::snapshot::Snapshot;
use crate::models::{GatherKind, Resource};

/// Recorded for kinds whose query was never issued because the run timed out
pub const NOT_ISSUED: &str = "run deadline exceeded, query not issued";

/// Recorded for queries still in flight when the run timed out
pub const DEADLINE_EXCEEDED: &str = "run deadline exceeded while waiting for the API server";

/// Collects snapshots through a `ResourceQuery`
#[derive(Clone)]
pub struct Collector {
    query: Arc<dyn ResourceQuery>,
    deadline: Option<Instant>,
    permits: Option<Arc<Semaphore>>,
}

impl Collector {
    pub fn new(query: Arc<dyn ResourceQuery>) -> Self {
        Self {
            query,
            deadline: None,
            permits: None,
        }
    }

    /// Stop issuing queries once `deadline` has passed
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn deadline_expired(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Collect one kind with a single query attempt
    pub async fn collect(&self, kind: GatherKind) -> Snapshot {
        if self.deadline_expired() {
            tracing::warn!("Skipping {}: {}", kind, NOT_ISSUED);
            return Snapshot::Error(NOT_ISSUED.to_string());
        }

        tracing::debug!("Collecting {}", kind);
        let snapshot = if kind == GatherKind::CustomResourceDefinition {
            self.collect_named(kind, &GatherKind::tracked_crd_names())
                .await
        } else {
            match self.issue(self.query.list(kind)).await {
                Ok(objects) => {
                    Snapshot::from_items(objects.into_iter().map(Resource::from_object).collect())
                }
                Err(e) => Snapshot::Error(format!("{:#}", e)),
            }
        };

        match &snapshot {
            Snapshot::Error(cause) => tracing::warn!("Failed to collect {}: {}", kind, cause),
            other => tracing::debug!("Collected {}: {}", kind, other.label()),
        }
        snapshot
    }

    /// Collect specific cluster-scoped objects by name
    ///
    /// Lookups run concurrently; items keep the order of `names`. Names that
    /// do not exist are left out, and the caller compares against the
    /// requested list to report them. A failed lookup fails the whole snapshot.
    pub async fn collect_named(&self, kind: GatherKind, names: &[String]) -> Snapshot {
        let lookups = names
            .iter()
            .map(|name| self.issue(self.query.get(kind, name)));

        match try_join_all(lookups).await {
            Ok(objects) => {
                let mut items = Vec::new();
                for (name, object) in names.iter().zip(objects) {
                    match object {
                        Some(object) => items.push(Resource::from_object(object)),
                        None => tracing::debug!("{} {} not found", kind, name),
                    }
                }
                Snapshot::from_items(items)
            }
            Err(e) => Snapshot::Error(format!("{:#}", e)),
        }
    }

    /// Collect several kinds concurrently
    ///
    /// Each kind runs as its own task. At most `max_concurrent` API requests
    /// are in flight at a time, counting each by-name lookup separately.
    /// Results flow back over a channel to this single caller, which owns the
    /// returned map.
    pub async fn collect_all(
        &self,
        kinds: &[GatherKind],
        max_concurrent: usize,
    ) -> BTreeMap<GatherKind, Snapshot> {
        let (tx, mut rx) = mpsc::channel(kinds.len().max(1));
        let bounded = Self {
            permits: Some(Arc::new(Semaphore::new(max_concurrent.max(1)))),
            ..self.clone()
        };

        for &kind in kinds {
            let collector = bounded.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let snapshot = collector.collect(kind).await;
                let _ = tx.send((kind, snapshot)).await;
            });
        }
        drop(tx);

        let mut results = BTreeMap::new();
        while let Some((kind, snapshot)) = rx.recv().await {
            results.insert(kind, snapshot);
        }

        // A panicked task never reports back
        for &kind in kinds {
            results.entry(kind).or_insert_with(|| {
                tracing::error!("Collection task for {} ended without a result", kind);
                Snapshot::Error("collection task ended without a result".to_string())
            });
        }

        results
    }

    /// Run one API request under a permit and the deadline
    async fn issue<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        self.within_deadline(async {
            let _permit = match &self.permits {
                Some(permits) => Some(permits.acquire().await?),
                None => None,
            };
            fut.await
        })
        .await
    }

    async fn within_deadline<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, fut)
                .await
                .map_err(|_| anyhow!(DEADLINE_EXCEEDED))?,
            None => fut.await,
        }
    }
}
