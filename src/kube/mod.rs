//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server and provides the
//! kube-rs backed `ResourceQuery` used by the collector.

mod query;

pub use query::KubeResourceQuery;

use anyhow::{Context, Result};
use kube::{Client, Config};
use std::time::Duration;

/// Connection settings taken from the command line
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Accept invalid API server certificates
    pub skip_tls: bool,
    /// Per-request read timeout
    pub request_timeout: Option<Duration>,
}

/// Initialize and return a Kubernetes client
///
/// Uses the default kubeconfig loading strategy:
/// 1. In-cluster config (if running in a pod, which is how must-gather runs)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
pub async fn create_client(options: &ClientOptions) -> Result<Client> {
    let mut config = Config::infer()
        .await
        .context("Failed to infer Kubernetes configuration")?;

    tracing::debug!("Using API server {}", config.cluster_url);

    if options.skip_tls {
        tracing::warn!("TLS verification of the API server is disabled");
        config.accept_invalid_certs = true;
    }

    if let Some(timeout) = options.request_timeout {
        config.read_timeout = Some(timeout);
    }

    let client = Client::try_from(config).context("Failed to create Kubernetes client")?;
    Ok(client)
}
