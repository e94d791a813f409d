//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde for serialization.

use serde::{Deserialize, Serialize};

use crate::error::ResolveResult;
use crate::output::OutputFormat;
use crate::resolver::{DEFAULT_MANIFEST_NAME, ResolveOptions};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// File names probed, in order, inside nested kustomization directories
    #[serde(default = "default_manifest_names")]
    pub manifest_names: Vec<String>,

    /// Default output format
    #[serde(default)]
    pub output: OutputFormat,

    /// Fail on kustomizations that include themselves
    #[serde(default = "default_true")]
    pub detect_cycles: bool,
}

fn default_manifest_names() -> Vec<String> {
    vec![DEFAULT_MANIFEST_NAME.to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_names: default_manifest_names(),
            output: OutputFormat::default(),
            detect_cycles: default_true(),
        }
    }
}

impl Config {
    /// Resolver options described by this configuration
    pub fn resolve_options(&self) -> ResolveResult<ResolveOptions> {
        Ok(ResolveOptions::new(self.manifest_names.iter().cloned())?
            .with_cycle_detection(self.detect_cycles))
    }
}
