//! kube-rs implementation of `ResourceQuery`
//!
//! All kinds are queried through `Api<DynamicObject>`, so no generated types
//! are needed for OpenShift, OLM, OADP or Velero APIs. A kind whose API is not
//! served by the cluster simply surfaces as a query error.

use anyhow::{Context, Result};
use async_trait::async_trait;
use kube::api::ListParams;
use kube::core::DynamicObject;
use kube::{Api, Client};

use crate::gather::ResourceQuery;
use crate::models::GatherKind;

/// Queries the live cluster
#[derive(Clone)]
pub struct KubeResourceQuery {
    client: Client,
}

impl KubeResourceQuery {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, kind: GatherKind) -> Api<DynamicObject> {
        Api::all_with(self.client.clone(), &kind.api_resource())
    }
}

#[async_trait]
impl ResourceQuery for KubeResourceQuery {
    async fn list(&self, kind: GatherKind) -> Result<Vec<DynamicObject>> {
        let list = self
            .api(kind)
            .list(&ListParams::default())
            .await
            .with_context(|| format!("Failed to list {}", kind.plural()))?;
        Ok(list.items)
    }

    async fn get(&self, kind: GatherKind, name: &str) -> Result<Option<DynamicObject>> {
        self.api(kind)
            .get_opt(name)
            .await
            .with_context(|| format!("Failed to get {} {}", kind, name))
    }
}
