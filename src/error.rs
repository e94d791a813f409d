//! Resolution errors

use std::path::PathBuf;

/// Errors produced while resolving a kustomization
///
/// The first error at any depth aborts the whole resolution, so there is no
/// partial dependency list to go with any of these.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Failed to read manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Kustomization cycle detected at {}: {}", path.display(), format_chain(chain))]
    Cycle { path: PathBuf, chain: Vec<PathBuf> },

    #[error("Invalid resolver configuration: {0}")]
    Config(String),
}

impl ResolveError {
    /// The manifest the error was raised for, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ResolveError::Io { path, .. }
            | ResolveError::Parse { path, .. }
            | ResolveError::Cycle { path, .. } => Some(path),
            ResolveError::Config(_) => None,
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, ResolveError::Io { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ResolveError::Parse { .. })
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self, ResolveError::Cycle { .. })
    }
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type for resolver operations
pub type ResolveResult<T> = Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_chain() {
        let err = ResolveError::Cycle {
            path: PathBuf::from("a/kustomization.yml"),
            chain: vec![
                PathBuf::from("a/kustomization.yml"),
                PathBuf::from("b/kustomization.yml"),
                PathBuf::from("a/kustomization.yml"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Kustomization cycle detected at a/kustomization.yml: \
             a/kustomization.yml -> b/kustomization.yml -> a/kustomization.yml"
        );
        assert!(err.is_cycle());
        assert!(!err.is_io());
    }

    #[test]
    fn test_io_message_includes_path() {
        let err = ResolveError::Io {
            path: PathBuf::from("missing/kustomization.yml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.is_io());
        assert_eq!(
            err.to_string(),
            "Failed to read manifest missing/kustomization.yml: not found"
        );
        assert_eq!(err.path(), Some(&PathBuf::from("missing/kustomization.yml")));
    }

    #[test]
    fn test_config_error_has_no_path() {
        let err = ResolveError::Config("no manifest names".to_string());
        assert!(err.path().is_none());
        assert!(!err.is_parse());
    }
}
