//! Lexical path helpers
//!
//! Dependency paths are never canonicalized against the filesystem. They are
//! built by joining an entry onto the manifest's directory and then cleaning
//! the result lexically, so `overlays/../base` becomes `base` whether or not
//! either directory exists.

use std::path::{Component, Path, PathBuf};

/// Clean a path without touching the filesystem
///
/// - `.` components are dropped
/// - `..` removes the preceding normal component
/// - `..` directly under the root is dropped
/// - leading `..` on a relative path is kept
/// - an empty result becomes `.`
pub fn clean(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                Some(Component::ParentDir) | Some(Component::CurDir) | None => {
                    components.push(component);
                }
            },
            other => components.push(other),
        }
    }

    if components.is_empty() {
        PathBuf::from(".")
    } else {
        components.iter().collect()
    }
}

/// Join `entry` onto `base` and clean the result
///
/// A rooted `entry` is still placed under `base`: entries in a kustomization
/// are always relative to the directory holding it.
pub fn join_clean(base: &Path, entry: impl AsRef<Path>) -> PathBuf {
    let mut joined = base.to_path_buf();
    for component in entry.as_ref().components() {
        match component {
            Component::Prefix(_) | Component::RootDir => continue,
            other => joined.push(other),
        }
    }
    clean(&joined)
}

/// Directory that relative entries in the manifest at `path` resolve against
pub fn base_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) => clean(parent),
        None => clean(path),
    }
}

/// Whether the last element of `entry` carries a file extension
///
/// Any `.` in the final element counts, so `deploy.yaml`, `.env` and `..`
/// are files while `base` and `base/` name directories.
pub fn has_extension(entry: &str) -> bool {
    entry
        .rsplit(std::path::is_separator)
        .next()
        .is_some_and(|name| name.contains('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_resolves_dots() {
        assert_eq!(
            clean(Path::new("/foo/bar/../baz")),
            PathBuf::from("/foo/baz")
        );
        assert_eq!(clean(Path::new("/foo/./bar")), PathBuf::from("/foo/bar"));
        assert_eq!(clean(Path::new("/foo/bar/../../baz")), PathBuf::from("/baz"));
    }

    #[test]
    fn test_clean_keeps_leading_parent_dirs() {
        assert_eq!(clean(Path::new("../a/../../b")), PathBuf::from("../../b"));
        assert_eq!(clean(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_clean_empty_is_current_dir() {
        assert_eq!(clean(Path::new("")), PathBuf::from("."));
        assert_eq!(clean(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn test_join_clean() {
        let base = Path::new("/proj/overlays");
        assert_eq!(
            join_clean(base, "patch1.yaml"),
            PathBuf::from("/proj/overlays/patch1.yaml")
        );
        assert_eq!(join_clean(base, "../base"), PathBuf::from("/proj/base"));
        assert_eq!(
            join_clean(base, "./cfg/app.properties"),
            PathBuf::from("/proj/overlays/cfg/app.properties")
        );
        assert_eq!(
            join_clean(base, "base/"),
            PathBuf::from("/proj/overlays/base")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_join_clean_rooted_entry_stays_under_base() {
        assert_eq!(
            join_clean(Path::new("/proj"), "/etc/app.yaml"),
            PathBuf::from("/proj/etc/app.yaml")
        );
    }

    #[test]
    fn test_join_clean_from_current_dir() {
        assert_eq!(join_clean(Path::new("."), "a.yaml"), PathBuf::from("a.yaml"));
    }

    #[test]
    fn test_base_dir() {
        assert_eq!(
            base_dir(Path::new("/proj/overlays/kustomization.yml")),
            PathBuf::from("/proj/overlays")
        );
        assert_eq!(base_dir(Path::new("kustomization.yml")), PathBuf::from("."));
        assert_eq!(
            base_dir(Path::new("./overlays/../base/kustomization.yml")),
            PathBuf::from("base")
        );
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension("deployment.yaml"));
        assert!(has_extension("configs/app.properties"));
        assert!(has_extension(".env"));
        assert!(has_extension(".."));
        assert!(!has_extension("base"));
        assert!(!has_extension("../base"));
        assert!(!has_extension("base/"));
        assert!(!has_extension("v1.2/base"));
    }
}
