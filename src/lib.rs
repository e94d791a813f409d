//! kustdeps library
//!
//! Resolves every file a kustomization depends on: patch files, generator
//! inputs and the contents of nested kustomization directories.
//!
//! ```no_run
//! let (_manifest, deps) = kustdeps::resolve("overlays/prod/kustomization.yml")?;
//! for dep in deps {
//!     println!("{}", dep.display());
//! }
//! # Ok::<(), kustdeps::ResolveError>(())
//! ```

pub mod config;
pub mod error;
pub mod manifest;
pub mod output;
pub mod paths;
pub mod resolver;

// Re-export commonly used types for convenience
pub use error::{ResolveError, ResolveResult};
pub use manifest::{Generator, Manifest, Patch};
pub use output::{OutputFormat, render};
pub use resolver::{
    DEFAULT_MANIFEST_NAME, FsReader, KUSTOMIZE_MANIFEST_NAMES, ManifestReader, ResolveOptions,
    Resolver, resolve,
};
