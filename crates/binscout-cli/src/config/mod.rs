//! Configuration management.

use anyhow::Result;
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Per-command timeout in seconds.
    pub command_timeout_secs: Option<u64>,

    /// Extra directories for the unmanaged sweep, on top of the defaults.
    #[serde(default)]
    pub sweep_paths: Vec<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "binscout", "binscout")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file, defaulting when none exists.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            command_timeout_secs = 60
            sweep_paths = ["/opt/tools/bin"]
            output_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.command_timeout_secs, Some(60));
        assert_eq!(config.sweep_paths, vec!["/opt/tools/bin"]);
        assert_eq!(config.output_format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.command_timeout_secs, None);
        assert!(config.sweep_paths.is_empty());
        assert_eq!(config.output_format, None);
    }
}
