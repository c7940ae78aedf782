//! Typed resource query contract

use anyhow::Result;
use async_trait::async_trait;
use kube::core::DynamicObject;

use crate::models::GatherKind;

/// Read-only query capability against the cluster API
///
/// Implementations do a single attempt per call; retries and throttling
/// belong to the transport underneath.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceQuery: Send + Sync {
    /// List every object of `kind` across all namespaces
    async fn list(&self, kind: GatherKind) -> Result<Vec<DynamicObject>>;

    /// Fetch a single cluster-scoped object by name, `None` if it does not exist
    async fn get(&self, kind: GatherKind, name: &str) -> Result<Option<DynamicObject>>;
}
