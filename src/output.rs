//! Rendering resolved dependency lists

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the dependency list is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One path per line
    #[default]
    Text,
    /// JSON array of paths
    Json,
    /// YAML sequence of paths
    Yaml,
    /// Single bracketed, space-separated line: `[a b c]`
    Go,
}

impl OutputFormat {
    /// Parse a format name, case-insensitively
    pub fn parse_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "yaml" => Some(OutputFormat::Yaml),
            "go" => Some(OutputFormat::Go),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Go => write!(f, "go"),
        }
    }
}

/// Render `paths` in `format`, newline-terminated unless empty text
pub fn render(paths: &[PathBuf], format: OutputFormat) -> Result<String> {
    let items: Vec<String> = paths
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();

    let rendered = match format {
        OutputFormat::Text => items
            .iter()
            .map(|item| format!("{}\n", item))
            .collect::<String>(),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&items).context("Failed to serialize paths to JSON")?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(&items).context("Failed to serialize paths to YAML")?
        }
        OutputFormat::Go => format!("[{}]\n", items.join(" ")),
    };

    Ok(rendered)
}
