//! Where kustdeps looks for its config file
//!
//! `KUSTDEPS_CONFIG_DIR` wins outright. Otherwise the XDG config home is used
//! when set, then the platform default from `directories`
//! (`~/.config/kustdeps` on Unix, `%APPDATA%\kustdeps\config` on Windows).

use std::path::PathBuf;

const APP_NAME: &str = "kustdeps";
const CONFIG_FILE: &str = "config.yaml";

/// Directory holding `config.yaml`, read from the process environment
pub fn config_dir() -> PathBuf {
    config_dir_from(|key| std::env::var(key).ok())
}

/// Full path of the config file
pub fn root_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Resolve the config directory with `lookup` standing in for the environment
///
/// Empty variables count as unset.
pub fn config_dir_from(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    let var = |key: &str| lookup(key).filter(|value| !value.is_empty()).map(PathBuf::from);

    if let Some(dir) = var("KUSTDEPS_CONFIG_DIR") {
        return dir;
    }
    if let Some(xdg) = var("XDG_CONFIG_HOME") {
        return xdg.join(APP_NAME);
    }

    platform_config_dir().unwrap_or_else(|| PathBuf::from(".config").join(APP_NAME))
}

#[cfg(not(windows))]
fn platform_config_dir() -> Option<PathBuf> {
    // ProjectDirs would pick ~/Library/Application Support on macOS
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".config").join(APP_NAME))
}

#[cfg(windows)]
fn platform_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}
