//! The declarative contract every command module satisfies.
//!
//! A module file is a descriptor: the command names it provides, the
//! namespace identifier it registers under, per-command help, and the entry
//! point the dispatcher runs. Every part is optional.
//!
//! ```toml
//! module = "docviewer"
//! commands = ["doc", "doc:export"]
//!
//! [help]
//! doc = "Open the documentation viewer"
//!
//! [exec]
//! program = "./bin/doc"
//! args = ["--quiet"]
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Parsed contents of a command module file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Command names this module implements. `None` when not declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,

    /// Namespace identifier other code can look the module up by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// One-line help text keyed by command name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub help: BTreeMap<String, String>,

    /// Name of a command built into the binary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builtin: Option<String>,

    /// External program run for this module's commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<ExecSpec>,
}

/// An external program entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecSpec {
    /// Program to spawn. Relative paths with a separator resolve against the
    /// module file's directory; bare names are looked up on `PATH`.
    pub program: String,
    /// Arguments placed before the user's own arguments.
    #[serde(default)]
    pub args: Vec<String>,
}

impl ModuleDescriptor {
    /// Parse a source (TOML) descriptor.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Parse a compiled (JSON) descriptor.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Check the descriptor for inconsistencies that make it unusable.
    ///
    /// Individual command names are not checked here; the registry reports
    /// bad names one at a time so the rest of the module still registers.
    pub fn validate(&self) -> Result<(), String> {
        if self.builtin.is_some() && self.exec.is_some() {
            return Err("a module cannot declare both 'builtin' and 'exec'".to_string());
        }

        if let Some(exec) = &self.exec {
            if exec.program.trim().is_empty() {
                return Err("exec program cannot be empty".to_string());
            }
        }

        if let Some(id) = &self.module {
            if id.trim().is_empty() {
                return Err("module identifier cannot be empty".to_string());
            }
        }

        Ok(())
    }

    /// Help text for a command, if the module provides one.
    pub fn help_for(&self, command: &str) -> Option<&str> {
        self.help.get(command).map(String::as_str)
    }
}
