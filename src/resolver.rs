//! Kustomization dependency resolution
//!
//! Walks a kustomization and every nested kustomization it references,
//! collecting the files it depends on. Dependencies are emitted in
//! declaration order:
//!
//! 1. `patches[].path` (empty paths skipped)
//! 2. `patchesStrategicMerge`
//! 3. `configMapGenerator[].files` / `envs`, then `secretGenerator[]`
//! 4. `resources`, with nested kustomizations spliced in place
//! 5. `components`, always nested
//!
//! The walk is depth-first and stops at the first read or parse failure.

use std::path::{Path, PathBuf};

use crate::error::{ResolveError, ResolveResult};
use crate::manifest::Manifest;
use crate::paths::{base_dir, clean, has_extension, join_clean};

/// File name looked up inside nested kustomization directories by default
pub const DEFAULT_MANIFEST_NAME: &str = "kustomization.yml";

/// Every spelling kustomize itself accepts, in its lookup order
pub const KUSTOMIZE_MANIFEST_NAMES: [&str; 3] =
    ["kustomization.yaml", "kustomization.yml", "Kustomization"];

/// Source of manifest bytes
#[cfg_attr(test, mockall::automock)]
pub trait ManifestReader {
    /// Read the whole manifest at `path`
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Whether a manifest exists at `path`
    fn exists(&self, path: &Path) -> bool;
}

/// Reads manifests from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl ManifestReader for FsReader {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Resolver behaviour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    manifest_names: Vec<String>,
    detect_cycles: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            manifest_names: vec![DEFAULT_MANIFEST_NAME.to_string()],
            detect_cycles: true,
        }
    }
}

impl ResolveOptions {
    /// Options probing `manifest_names`, in order, inside nested directories
    pub fn new<I, S>(manifest_names: I) -> ResolveResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let manifest_names: Vec<String> = manifest_names.into_iter().map(Into::into).collect();

        if manifest_names.is_empty() {
            return Err(ResolveError::Config(
                "at least one manifest name is required".to_string(),
            ));
        }
        if let Some(bad) = manifest_names
            .iter()
            .find(|name| name.is_empty() || name.contains(std::path::is_separator))
        {
            return Err(ResolveError::Config(format!(
                "manifest name must be a plain file name, got '{}'",
                bad
            )));
        }

        Ok(Self {
            manifest_names,
            detect_cycles: true,
        })
    }

    /// Enable or disable ancestor cycle detection
    ///
    /// Manifests are compared by their lexically cleaned path, without
    /// touching the filesystem. A loop that only closes through a symlink
    /// is therefore not detected and recurses until the stack overflows.
    pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    pub fn manifest_names(&self) -> &[String] {
        &self.manifest_names
    }

    pub fn detects_cycles(&self) -> bool {
        self.detect_cycles
    }
}

/// Recursive kustomization resolver
#[derive(Debug, Clone, Default)]
pub struct Resolver<R = FsReader> {
    options: ResolveOptions,
    reader: R,
}

impl Resolver<FsReader> {
    /// Resolver reading from the local filesystem
    pub fn new(options: ResolveOptions) -> Self {
        Self::with_reader(options, FsReader)
    }
}

impl<R: ManifestReader> Resolver<R> {
    /// Resolver reading manifests through `reader`
    pub fn with_reader(options: ResolveOptions, reader: R) -> Self {
        Self { options, reader }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Parse the manifest at `manifest_path` and collect every file it
    /// depends on, directly or through nested kustomizations
    ///
    /// Paths are joined onto each manifest's directory and cleaned lexically.
    /// Duplicates are kept.
    pub fn resolve(
        &self,
        manifest_path: impl AsRef<Path>,
    ) -> ResolveResult<(Manifest, Vec<PathBuf>)> {
        let mut ancestors = Vec::new();
        self.resolve_manifest(manifest_path.as_ref(), &mut ancestors)
    }

    fn resolve_manifest(
        &self,
        path: &Path,
        ancestors: &mut Vec<PathBuf>,
    ) -> ResolveResult<(Manifest, Vec<PathBuf>)> {
        let key = clean(path);
        if self.options.detect_cycles && ancestors.contains(&key) {
            let mut chain = ancestors.clone();
            chain.push(key);
            return Err(ResolveError::Cycle {
                path: path.to_path_buf(),
                chain,
            });
        }

        tracing::debug!("Resolving manifest: {}", path.display());
        let base = base_dir(path);

        let contents = self.reader.read(path).map_err(|source| ResolveError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest = Manifest::from_slice(&contents).map_err(|source| ResolveError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        ancestors.push(key);
        let dependencies = self.collect(&manifest, &base, ancestors);
        ancestors.pop();
        let dependencies = dependencies?;

        tracing::debug!(
            "Manifest {} has {} dependencies",
            path.display(),
            dependencies.len()
        );

        Ok((manifest, dependencies))
    }

    fn collect(
        &self,
        manifest: &Manifest,
        base: &Path,
        ancestors: &mut Vec<PathBuf>,
    ) -> ResolveResult<Vec<PathBuf>> {
        let mut dependencies: Vec<PathBuf> = manifest
            .patch_paths()
            .chain(manifest.patches_strategic_merge.iter().map(String::as_str))
            .chain(manifest.generator_inputs())
            .map(|entry| join_clean(base, entry))
            .collect();

        for resource in &manifest.resources {
            if has_extension(resource) {
                dependencies.push(join_clean(base, resource));
            } else {
                let nested = self.nested_manifest(&join_clean(base, resource));
                let (_, nested_dependencies) = self.resolve_manifest(&nested, ancestors)?;
                dependencies.extend(nested_dependencies);
            }
        }

        for component in &manifest.components {
            let nested = self.nested_manifest(&join_clean(base, component));
            let (_, nested_dependencies) = self.resolve_manifest(&nested, ancestors)?;
            dependencies.extend(nested_dependencies);
        }

        Ok(dependencies)
    }

    /// Manifest file to load for the kustomization directory `dir`
    ///
    /// With a single configured name the candidate is returned unprobed. With
    /// several, the first existing candidate wins; when none exists the first
    /// candidate is returned so reading it reports the missing file.
    fn nested_manifest(&self, dir: &Path) -> PathBuf {
        let candidates: Vec<PathBuf> = self
            .options
            .manifest_names
            .iter()
            .map(|name| join_clean(dir, name))
            .collect();

        if candidates.len() > 1 {
            if let Some(found) = candidates.iter().find(|c| self.reader.exists(c)) {
                tracing::trace!("Found nested manifest: {}", found.display());
                return found.clone();
            }
        }

        candidates
            .into_iter()
            .next()
            .unwrap_or_else(|| join_clean(dir, DEFAULT_MANIFEST_NAME))
    }
}

/// Resolve `manifest_path` with default options against the local filesystem
pub fn resolve(manifest_path: impl AsRef<Path>) -> ResolveResult<(Manifest, Vec<PathBuf>)> {
    Resolver::new(ResolveOptions::default()).resolve(manifest_path)
}
