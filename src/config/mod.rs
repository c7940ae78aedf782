//! Configuration system
//!
//! Layers, lowest to highest precedence: built-in defaults, YAML config file,
//! `OADP_MUST_GATHER_*` environment variables, command-line flags.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::GatherConfig;

/// Get a configuration value by key
pub fn get_config_value(config: &GatherConfig, key: &str) -> anyhow::Result<String> {
    fn optional(value: Option<u64>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    match key {
        "outputDir" => Ok(config.output_dir.display().to_string()),
        "timeoutSeconds" => Ok(optional(config.timeout_seconds)),
        "logsSinceSeconds" => Ok(optional(config.logs_since_seconds)),
        "skipTls" => Ok(config.skip_tls.to_string()),
        "maxConcurrentQueries" => Ok(config.max_concurrent_queries.to_string()),
        "mustGatherVersion" => Ok(config.must_gather_version.clone()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_value() {
        let config = GatherConfig {
            timeout_seconds: Some(60),
            ..Default::default()
        };
        assert_eq!(get_config_value(&config, "timeoutSeconds").unwrap(), "60");
        assert_eq!(get_config_value(&config, "logsSinceSeconds").unwrap(), "");
        assert_eq!(get_config_value(&config, "skipTls").unwrap(), "false");
        assert!(get_config_value(&config, "ui.skin").is_err());
    }
}
