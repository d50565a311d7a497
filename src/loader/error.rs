//! Error types for module loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the load-by-name primitive.
///
/// The registry catches every one of these; nothing here is fatal to a
/// command-line invocation on its own.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No candidate file for the module exists in any search location.
    #[error("No module named '{name}' in {}", display_paths(.search_path))]
    NotFound {
        name: String,
        search_path: Vec<PathBuf>,
    },

    /// The module file was found but could not be read.
    #[error("Cannot read module file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source descriptor is not valid TOML for the descriptor format.
    #[error("Invalid command descriptor {}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A compiled descriptor is not valid JSON for the descriptor format.
    #[error("Invalid compiled descriptor {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The descriptor parsed but is inconsistent.
    #[error("Invalid module {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },

    /// The descriptor binds to a built-in command that does not exist.
    #[error("Module {} refers to unknown builtin '{builtin}'", .path.display())]
    UnknownBuiltin { path: PathBuf, builtin: String },

    /// Native libraries are recognized but cannot be loaded at runtime.
    #[error("Cannot load native module {}: native commands must be built into playcmd", .path.display())]
    Unsupported { path: PathBuf },
}

/// Result type for module loading.
pub type Result<T> = std::result::Result<T, LoadError>;

fn display_paths(paths: &[PathBuf]) -> String {
    let joined = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", joined)
}
