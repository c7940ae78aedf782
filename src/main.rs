//! OADP must-gather - collect OADP related resources and summarize them
//!
//! Runs inside the must-gather image (or locally against a kubeconfig) and
//! leaves a `clusters/<id>` tree plus `oadp-must-gather-summary.md` behind.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use oadp_must_gather::cli::{self, Args, Command};
use oadp_must_gather::config::ConfigLoader;
use oadp_must_gather::kube::{ClientOptions, KubeResourceQuery, create_client};
use oadp_must_gather::services::MustGather;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Exiting OADP must-gather: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    // Handle config subcommand
    if let Some(Command::Config { subcommand }) = &args.command {
        return cli::handle_config_command(subcommand.clone(), args.config.as_deref());
    }

    cli::init_logging(args.debug, args.log_file.as_deref())?;

    let config = ConfigLoader::load(args.config.as_deref())
        .context("Failed to load configuration")?;
    let config = args.apply_overrides(config);
    ConfigLoader::validate(&config).context("Invalid configuration")?;

    tracing::debug!(
        "Configuration loaded: outputDir={}, timeoutSeconds={:?}, maxConcurrentQueries={}",
        config.output_dir.display(),
        config.timeout_seconds,
        config.max_concurrent_queries
    );
    if let Some(since) = config.logs_since_seconds {
        tracing::info!(
            "Logs since {}s requested; pod logs are not collected by this gather",
            since
        );
    }

    tracing::debug!("Initializing Kubernetes client");
    let client = create_client(&ClientOptions {
        skip_tls: config.skip_tls,
        request_timeout: config.timeout(),
    })
    .await?;

    let query = Arc::new(KubeResourceQuery::new(client));
    let outcome = MustGather::new(query, config).run().await?;

    if outcome.timed_out {
        tracing::warn!("Run deadline exceeded, summary is incomplete");
    }
    println!(
        "OADP must-gather summary written to {}",
        outcome.summary.display()
    );

    Ok(())
}
