//! Commands compiled into the binary.
//!
//! A command module binds to one of these with `builtin = "<name>"`. The
//! module still decides which command names point at it.

mod check;
mod help;

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

pub use check::{write_report, Check};
pub use help::Help;

use crate::commands::CommandLoader;
use crate::config::Settings;

/// Everything a command invocation can look at.
pub struct CommandContext<'a> {
    /// The command name as invoked.
    pub command: &'a str,
    /// Arguments following the command name.
    pub args: &'a [String],
    /// The play root.
    pub play_path: &'a Path,
    pub settings: &'a Settings,
    pub registry: &'a CommandLoader,
}

/// A command implemented in Rust.
#[async_trait]
pub trait BuiltinCommand: Send + Sync {
    /// Run the command, writing its output to `out`.
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        out: &mut (dyn Write + Send),
    ) -> anyhow::Result<()>;
}

/// Catalog of built-in commands by name.
#[derive(Clone)]
pub struct Builtins {
    commands: HashMap<String, Arc<dyn BuiltinCommand>>,
}

impl Builtins {
    /// A catalog with no commands.
    pub fn empty() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Add a command, replacing any previous one with the same name.
    pub fn register(&mut self, name: &str, command: Arc<dyn BuiltinCommand>) {
        self.commands.insert(name.to_string(), command);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn BuiltinCommand>> {
        self.commands.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Builtins {
    fn default() -> Self {
        let mut builtins = Self::empty();
        builtins.register("check", Arc::new(Check));
        builtins.register("help", Arc::new(Help));
        builtins
    }
}

impl fmt::Debug for Builtins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtins")
            .field("commands", &self.names())
            .finish()
    }
}
