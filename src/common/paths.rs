//! Configuration file locations

use std::path::{Path, PathBuf};

/// Application name used for platform directories
const APP_NAME: &str = "suite-runner";

/// File name looked up in the current directory before the platform config dir
pub const LOCAL_CONFIG_FILE: &str = "suite-runner.toml";

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/suite-runner/`
/// - macOS: `~/Library/Application Support/suite-runner/`
/// - Windows: `%APPDATA%\suite-runner\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the user-level configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the path of a project-local configuration file in `dir`
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE)
}

/// Resolve `path` against `base` unless it is already absolute
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
