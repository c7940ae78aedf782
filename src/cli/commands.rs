//! CLI command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::Path;

use crate::config::{ConfigLoader, get_config_value, paths};

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "outputDir", "timeoutSeconds")
        key: String,
    },
    /// Print the merged configuration as YAML
    #[command(alias = "list")]
    Show,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Handle config subcommand
pub fn handle_config_command(cmd: ConfigSubcommand, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            let config =
                ConfigLoader::load(config_path).context("Failed to load configuration")?;
            println!("{}", get_config_value(&config, &key)?);
        }
        ConfigSubcommand::Show => {
            let config =
                ConfigLoader::load(config_path).context("Failed to load configuration")?;
            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Path => {
            let path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(paths::config_file_path);
            println!("{}", path.display());
        }
        ConfigSubcommand::Validate => {
            let config =
                ConfigLoader::load(config_path).context("Failed to load configuration")?;
            ConfigLoader::validate(&config).context("Configuration validation failed")?;
            println!("Configuration is valid");
        }
    }

    Ok(())
}
