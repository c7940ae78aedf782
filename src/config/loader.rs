//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules. Command-line flags are applied on top by
//! the caller.

use super::{paths, schema::GatherConfig};
use anyhow::{Context, Result};
use std::path::Path;

pub const OUTPUT_DIR_ENV: &str = "OADP_MUST_GATHER_OUTPUT_DIR";
pub const TIMEOUT_ENV: &str = "OADP_MUST_GATHER_TIMEOUT";
pub const SKIP_TLS_ENV: &str = "OADP_MUST_GATHER_SKIP_TLS";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Config file (`path`, or the default config file if it exists)
    /// 3. Built-in defaults
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<GatherConfig> {
        let config = match path {
            Some(path) => Self::load_file(path)?,
            None => {
                let default_path = paths::config_file_path();
                if default_path.exists() {
                    Self::load_file(&default_path)?
                } else {
                    Self::load_defaults()
                }
            }
        };

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<GatherConfig> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: GatherConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> GatherConfig {
        GatherConfig::default()
    }

    /// Check values serde cannot reject on its own
    pub fn validate(config: &GatherConfig) -> Result<()> {
        if config.max_concurrent_queries == 0 {
            return Err(anyhow::anyhow!("maxConcurrentQueries must be at least 1"));
        }
        if config.output_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("outputDir must not be empty"));
        }
        if config.timeout_seconds == Some(0) {
            return Err(anyhow::anyhow!("timeoutSeconds must be greater than 0"));
        }
        Ok(())
    }

    /// Apply environment variable overrides
    ///
    /// Values that do not parse are ignored with a warning.
    fn apply_env_overrides(mut config: GatherConfig) -> GatherConfig {
        if let Ok(output_dir) = std::env::var(OUTPUT_DIR_ENV) {
            config.output_dir = output_dir.into();
        }

        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            match timeout.parse::<u64>() {
                Ok(seconds) => config.timeout_seconds = Some(seconds),
                Err(_) => tracing::warn!("Ignoring {}={}: not a number", TIMEOUT_ENV, timeout),
            }
        }

        if let Ok(skip_tls) = std::env::var(SKIP_TLS_ENV) {
            match skip_tls.parse::<bool>() {
                Ok(val) => config.skip_tls = val,
                Err(_) => tracing::warn!("Ignoring {}={}: not a boolean", SKIP_TLS_ENV, skip_tls),
            }
        }

        config
    }
}
