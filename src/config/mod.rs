//! Configuration system for kustdeps
//!
//! A single optional YAML file plus environment overrides. Command-line
//! flags take precedence over both.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::Config;

/// Get a configuration value by key
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "manifestNames" => Ok(config.manifest_names.join(",")),
        "output" => Ok(config.output.to_string()),
        "detectCycles" => Ok(config.detect_cycles.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}
