//! CLI command handling module
//!
//! Argument parsing, subcommands and logging setup for the `gather` binary.

mod commands;
mod logging;

pub use commands::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::GatherConfig;

/// Collect OADP related resources and write a must-gather summary
#[derive(Parser, Debug)]
#[command(name = "gather")]
#[command(about = "Collect OADP related cluster resources and summarize them", long_about = None)]
#[command(version)]
pub struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory the clusters/<id> tree is written under
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Deadline for the whole run, in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Log window, in seconds
    #[arg(long, value_name = "SECONDS")]
    pub logs_since: Option<u64>,

    /// Skip TLS verification of the API server
    #[arg(long)]
    pub skip_tls: bool,

    /// Upper bound on API queries in flight at once
    #[arg(long, value_name = "N")]
    pub max_concurrent_queries: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

impl Args {
    /// Apply command-line flags on top of the loaded configuration
    pub fn apply_overrides(&self, mut config: GatherConfig) -> GatherConfig {
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_seconds = Some(timeout);
        }
        if let Some(logs_since) = self.logs_since {
            config.logs_since_seconds = Some(logs_since);
        }
        if self.skip_tls {
            config.skip_tls = true;
        }
        if let Some(max) = self.max_concurrent_queries {
            config.max_concurrent_queries = max;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "gather",
            "--output-dir",
            "/must-gather",
            "--timeout",
            "600",
            "--skip-tls",
            "--max-concurrent-queries",
            "2",
        ]);
        let config = args.apply_overrides(GatherConfig {
            timeout_seconds: Some(30),
            ..Default::default()
        });

        assert_eq!(config.output_dir, PathBuf::from("/must-gather"));
        assert_eq!(config.timeout_seconds, Some(600));
        assert!(config.skip_tls);
        assert_eq!(config.max_concurrent_queries, 2);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let args = Args::parse_from(["gather"]);
        let base = GatherConfig {
            skip_tls: true,
            logs_since_seconds: Some(3600),
            ..Default::default()
        };
        assert_eq!(args.apply_overrides(base.clone()), base);
    }

    #[test]
    fn test_config_subcommand() {
        let args = Args::parse_from(["gather", "config", "get", "outputDir"]);
        match args.command {
            Some(Command::Config { subcommand }) => assert_eq!(
                subcommand,
                ConfigSubcommand::Get {
                    key: "outputDir".to_string()
                }
            ),
            other => panic!("unexpected command: {:?}", other),
        }

        let args = Args::parse_from(["gather", "config", "list"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                subcommand: ConfigSubcommand::Show
            })
        ));
    }
}
