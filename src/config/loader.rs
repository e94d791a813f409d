//! Configuration loading
//!
//! Handles loading configuration from the config file and applying
//! environment overrides on top of it.

use super::{paths, schema::Config};
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers applied
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Config file
    /// 3. Built-in defaults
    ///
    /// Command-line flags are applied on top of this by the caller.
    pub fn load() -> Result<Config> {
        Self::load_from(&paths::root_config_path())
    }

    /// Load configuration using `path` as the config file
    pub fn load_from(path: &Path) -> Result<Config> {
        let config = if path.exists() {
            Self::load_file(path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::load_defaults()
        };

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration, falling back to defaults if the config file is broken
    pub fn load_lenient() -> Config {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring configuration file: {:#}", e);
            Self::apply_env_overrides(Self::load_defaults())
        })
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if contents.trim().is_empty() {
            return Ok(Self::load_defaults());
        }

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration by loading and checking for errors
    ///
    /// Fails on invalid YAML, invalid value types, file read errors and
    /// manifest names the resolver would reject.
    pub fn validate() -> Result<Config> {
        let config = Self::load().context("Failed to load configuration")?;
        config
            .resolve_options()
            .context("Invalid resolver settings")?;
        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        Config::default()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(config: Config) -> Config {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
        // KUSTDEPS_MANIFEST_NAMES override (comma-separated)
        if let Some(names) = lookup("KUSTDEPS_MANIFEST_NAMES") {
            let names: Vec<String> = names
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !names.is_empty() {
                config.manifest_names = names;
            }
        }

        // KUSTDEPS_OUTPUT override
        if let Some(output) = lookup("KUSTDEPS_OUTPUT") {
            match OutputFormat::parse_name(&output) {
                Some(format) => config.output = format,
                None => tracing::warn!("Ignoring unknown KUSTDEPS_OUTPUT value '{}'", output),
            }
        }

        // KUSTDEPS_DETECT_CYCLES override
        if let Some(detect) = lookup("KUSTDEPS_DETECT_CYCLES") {
            if let Ok(val) = detect.parse::<bool>() {
                config.detect_cycles = val;
            }
        }

        config
    }
}
