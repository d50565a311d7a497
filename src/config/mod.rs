//! Configuration management for playcmd.
//!
//! This module handles loading user settings and locating the play
//! installation the commands operate on.

mod settings;

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

pub use settings::Settings;

/// Environment variable naming the play root.
pub const PLAY_PATH_ENV: &str = "PLAY_PATH";

/// File holding the installed framework version, relative to the play root.
pub const VERSION_FILE: &str = "framework/VERSION";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no configuration directory.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// Reading a configuration file failed.
    #[error("Failed to read {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration file is not valid TOML for the settings format.
    #[error("Failed to parse {}: {source}", .path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A setting has an unusable value.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// The play root has no version file.
    #[error("No framework version found at {}", .0.display())]
    VersionNotFound(PathBuf),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Path of the user settings file.
///
/// - Linux: `~/.config/playcmd/config.toml`
/// - macOS: `~/Library/Application Support/playcmd/config.toml`
/// - Windows: `C:\Users\<User>\AppData\Roaming\playcmd\config.toml`
pub fn config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("playcmd").join("config.toml"))
}

/// Decide which play root to use.
///
/// The command-line flag wins, then `PLAY_PATH`, then the `play_path`
/// setting, then the current directory.
pub fn resolve_play_path(flag: Option<&Path>, settings: &Settings) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }

    if let Some(path) = env::var_os(PLAY_PATH_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(path);
    }

    if let Some(path) = &settings.play_path {
        return path.clone();
    }

    env::current_dir().unwrap_or_else(|e| {
        debug!("Cannot read current directory: {}", e);
        PathBuf::from(".")
    })
}

/// Read the installed framework version from the play root.
pub fn framework_version(play_path: &Path) -> Result<String> {
    let path = play_path.join(VERSION_FILE);
    let content = fs::read_to_string(&path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ConfigError::VersionNotFound(path.clone())
        } else {
            ConfigError::ReadError {
                path: path.clone(),
                source: e,
            }
        }
    })?;

    let version = content.trim();
    if version.is_empty() {
        return Err(ConfigError::VersionNotFound(path));
    }
    Ok(version.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_config_path_structure() {
        let path = config_path().unwrap();
        assert!(path.ends_with("playcmd/config.toml"));
    }

    #[test]
    #[serial]
    fn test_flag_wins() {
        env::set_var(PLAY_PATH_ENV, "/from/env");
        let settings = Settings {
            play_path: Some(PathBuf::from("/from/settings")),
            ..Settings::default()
        };
        let path = resolve_play_path(Some(Path::new("/from/flag")), &settings);
        env::remove_var(PLAY_PATH_ENV);
        assert_eq!(path, PathBuf::from("/from/flag"));
    }

    #[test]
    #[serial]
    fn test_env_before_settings() {
        env::set_var(PLAY_PATH_ENV, "/from/env");
        let settings = Settings {
            play_path: Some(PathBuf::from("/from/settings")),
            ..Settings::default()
        };
        let path = resolve_play_path(None, &settings);
        env::remove_var(PLAY_PATH_ENV);
        assert_eq!(path, PathBuf::from("/from/env"));
    }

    #[test]
    #[serial]
    fn test_settings_before_current_dir() {
        env::remove_var(PLAY_PATH_ENV);
        let settings = Settings {
            play_path: Some(PathBuf::from("/from/settings")),
            ..Settings::default()
        };
        assert_eq!(
            resolve_play_path(None, &settings),
            PathBuf::from("/from/settings")
        );
    }

    #[test]
    #[serial]
    fn test_falls_back_to_current_dir() {
        env::set_var(PLAY_PATH_ENV, "");
        let path = resolve_play_path(None, &Settings::default());
        env::remove_var(PLAY_PATH_ENV);
        assert_eq!(path, env::current_dir().unwrap());
    }

    #[test]
    fn test_framework_version() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("framework")).unwrap();
        fs::write(root.path().join(VERSION_FILE), "1.8.0\n").unwrap();
        assert_eq!(framework_version(root.path()).unwrap(), "1.8.0");
    }

    #[test]
    fn test_framework_version_missing() {
        let root = tempdir().unwrap();
        let err = framework_version(root.path()).unwrap_err();
        assert!(matches!(err, ConfigError::VersionNotFound(_)));
    }

    #[test]
    fn test_framework_version_blank() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("framework")).unwrap();
        fs::write(root.path().join(VERSION_FILE), "  \n").unwrap();
        assert!(matches!(
            framework_version(root.path()),
            Err(ConfigError::VersionNotFound(_))
        ));
    }
}
