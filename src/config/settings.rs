//! Application settings configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{config_path, ConfigError, Result};

/// Default endpoint listing framework release tags.
pub const DEFAULT_TAGS_URL: &str = "https://api.github.com/repos/playframework/play1/tags";

/// Default HTTP timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// The play root, when not given on the command line or in `PLAY_PATH`.
    pub play_path: Option<PathBuf>,
    /// External module directories loaded after the core commands.
    pub modules: Vec<PathBuf>,
    /// Endpoint listing release tags.
    pub tags_url: String,
    /// HTTP timeout in seconds.
    pub request_timeout_secs: u64,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
    /// Overrides the platform log directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            play_path: None,
            modules: Vec::new(),
            tags_url: DEFAULT_TAGS_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_filter: None,
            log_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from the user configuration file.
    ///
    /// A missing file, or a platform without a configuration directory,
    /// yields the defaults.
    pub fn load() -> Result<Self> {
        match config_path() {
            Ok(path) => Self::load_from(&path),
            Err(ConfigError::NoConfigDir) => {
                debug!("No configuration directory; using default settings");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Load settings from a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No settings file at {:?}; using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` if the tags URL is empty or
    /// not http(s), or the request timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.tags_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "tags_url cannot be empty".to_string(),
            ));
        }

        if !self.tags_url.starts_with("https://") && !self.tags_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "tags_url '{}' must start with http:// or https://",
                self.tags_url
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tags_url, DEFAULT_TAGS_URL);
        assert_eq!(settings.request_timeout_secs, 30);
        assert!(settings.play_path.is_none());
        assert!(settings.modules.is_empty());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "play_path = \"/opt/play\"\nmodules = [\"/opt/modules/crud\"]\nlog_filter = \"playcmd=debug\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.play_path, Some(PathBuf::from("/opt/play")));
        assert_eq!(settings.modules, vec![PathBuf::from("/opt/modules/crud")]);
        assert_eq!(settings.tags_url, DEFAULT_TAGS_URL);
        assert_eq!(settings.log_filter.as_deref(), Some("playcmd=debug"));
        assert!(settings.log_dir.is_none());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "modules = 3").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let settings = Settings {
            tags_url: "ftp://example.com/tags".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            tags_url: " ".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let settings = Settings {
            request_timeout_secs: 0,
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));
    }
}
