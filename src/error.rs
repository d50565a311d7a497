//! Centralized error types for playcmd.
//!
//! Registry construction never fails; these are the errors that can end an
//! invocation once a command has been chosen.

use thiserror::Error;

use crate::config::ConfigError;
use crate::releases::ReleaseError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Release server errors from `check`.
    #[error("{0}")]
    Release(#[from] ReleaseError),

    /// IO errors (spawning programs, writing output).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No module registered the command.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The module registered the command but gives nothing to run.
    #[error("Command {0} has no entry point")]
    NoEntryPoint(String),

    /// The command ran and failed.
    #[error("Command {command} failed: {message}")]
    CommandFailed { command: String, message: String },
}

impl AppError {
    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError { path, .. } => format!(
                    "Could not read {}. Please check the file is readable.",
                    path.display()
                ),
                ConfigError::ParseError { path, source } => {
                    format!("{} is invalid: {}", path.display(), source.message())
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                ConfigError::VersionNotFound(path) => format!(
                    "Cannot tell which framework version is installed ({} is missing).",
                    path.display()
                ),
            },
            AppError::Release(e) => match e {
                ReleaseError::Forbidden(msg) => format!("The release server refused the request: {}", msg),
                ReleaseError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                _ => "Could not fetch the list of releases.".to_string(),
            },
            AppError::Io(e) => format!("A file or process operation failed: {}", e),
            AppError::UnknownCommand(name) => format!("Unknown command: {}", name),
            AppError::NoEntryPoint(name) => {
                format!("Command '{}' is declared but has nothing to run.", name)
            }
            AppError::CommandFailed { command, message } => {
                format!("Command '{}' failed: {}", command, message)
            }
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::UnknownCommand(_) => Some("Run 'playcmd help' to list available commands."),
            AppError::Config(ConfigError::VersionNotFound(_)) => {
                Some("Pass --play-path, set PLAY_PATH, or give the version: 'playcmd check <version>'.")
            }
            AppError::Config(ConfigError::ParseError { .. })
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix the configuration file or remove it to use the defaults.")
            }
            AppError::Release(ReleaseError::Network(_)) => {
                Some("Check your internet connection and try again.")
            }
            _ => None,
        }
    }

    /// Process exit code for this error. Every failure exits with 1.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
