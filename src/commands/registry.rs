//! Command registry built from command modules on disk.
//!
//! Core commands are scanned from `<play root>/framework/commands`; modules
//! contributed by third parties are picked up one directory at a time from a
//! `commands.toml` file. Loading is best effort: problems are reported on the
//! console and the scan moves on.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::console::{error_chain, Console};
use crate::loader::{ModuleCache, ModuleHandle};

/// Core commands directory, relative to the play root.
pub const CORE_COMMANDS_DIR: &str = "framework/commands";

/// Suffix of command module files picked up by the core scan.
pub const SOURCE_SUFFIX: &str = ".toml";

/// Package marker file in the core directory. Never loaded as a command.
pub const PACKAGE_INIT_FILE: &str = "mod.toml";

/// File an external module directory provides its commands in.
pub const EXTERNAL_COMMANDS_FILE: &str = "commands.toml";

/// Command and module lookup tables for one invocation.
pub struct CommandLoader {
    /// The core commands directory.
    path: PathBuf,
    /// Command name to the module implementing it.
    commands: BTreeMap<String, ModuleHandle>,
    /// Module identifier to module.
    modules: BTreeMap<String, ModuleHandle>,
    cache: ModuleCache,
    console: Console,
}

impl CommandLoader {
    /// Create a registry for the given play root and scan the core commands.
    pub fn new(play_path: &Path, cache: ModuleCache, console: Console) -> Self {
        let mut loader = Self::empty(play_path, cache, console);
        loader.load_core();
        loader
    }

    /// Create a registry without scanning anything.
    pub fn empty(play_path: &Path, cache: ModuleCache, console: Console) -> Self {
        Self {
            path: Self::core_path(play_path),
            commands: BTreeMap::new(),
            modules: BTreeMap::new(),
            cache,
            console,
        }
    }

    /// The core commands directory for a play root.
    pub fn core_path(play_path: &Path) -> PathBuf {
        play_path.join(CORE_COMMANDS_DIR)
    }

    /// Load every command module in the core directory.
    ///
    /// A file that fails to load is reported with its causes, followed by a
    /// warning naming the file. The scan always runs to the end.
    pub fn load_core(&mut self) {
        let filenames = match self.core_files() {
            Ok(names) => names,
            Err(e) => {
                self.console.error_with_causes(&e);
                self.console.warn(format!(
                    "!! Warning: could not read core commands directory {}",
                    self.path.display()
                ));
                return;
            }
        };

        let search_path = [self.path.clone()];
        for filename in filenames {
            let Some(name) = filename.strip_suffix(SOURCE_SUFFIX) else {
                continue;
            };
            match self.cache.load(name, &search_path) {
                Ok(module) => self.register(module),
                Err(e) => {
                    self.console.error_with_causes(&e);
                    self.console.warn(format!(
                        "!! Warning: could not load core command file {}",
                        filename
                    ));
                }
            }
        }

        info!(
            commands = self.commands.len(),
            modules = self.modules.len(),
            "Core commands loaded"
        );
    }

    /// Candidate file names in the core directory, in name order.
    fn core_files(&self) -> Result<Vec<String>, walkdir::Error> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name != PACKAGE_INIT_FILE && name.ends_with(SOURCE_SUFFIX) {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Load the `commands.toml` file of an external module directory.
    ///
    /// A directory without the file contributes nothing. Any failure is
    /// printed as a short diagnostic and otherwise ignored.
    pub fn load_play_module(&mut self, dir: &Path) {
        let commands = dir.join(EXTERNAL_COMMANDS_FILE);
        if !commands.exists() {
            debug!(dir = %dir.display(), "No commands file in module");
            return;
        }

        let leafname = module_leafname(dir);
        match self.cache.load_file(&leafname, &commands) {
            Ok(module) => self.register(module),
            Err(e) => {
                self.console.line("");
                self.console.line(&format!(
                    "!! Error while loading {}: {}",
                    commands.display(),
                    error_chain(&e)
                ));
                self.console.line("");
            }
        }
    }

    /// Record a loaded module's commands and identifier.
    ///
    /// A command name already taken is reassigned to this module after a
    /// conflict warning. A name that cannot be recorded is warned about and
    /// skipped. The identifier overwrites any previous holder silently.
    pub fn register(&mut self, module: ModuleHandle) {
        if let Some(names) = module.commands() {
            for name in names {
                if let Err(reason) = check_command_name(name) {
                    debug!(module = module.name(), "Rejected command name {:?}: {}", name, reason);
                    self.console
                        .warn(format!("Warning: error loading command {}", name));
                    continue;
                }
                if self.commands.contains_key(name) {
                    self.console
                        .warn(format!("Warning: conflict on command {}", name));
                }
                self.commands.insert(name.clone(), module.clone());
            }
        }

        if let Some(id) = module.identifier() {
            self.modules.insert(id.to_string(), module.clone());
        }
    }

    /// Look up the module implementing a command.
    pub fn command(&self, name: &str) -> Option<&ModuleHandle> {
        self.commands.get(name)
    }

    /// Look up a module by its identifier.
    pub fn module(&self, id: &str) -> Option<&ModuleHandle> {
        self.modules.get(id)
    }

    /// All registered commands, by name.
    pub fn commands(&self) -> &BTreeMap<String, ModuleHandle> {
        &self.commands
    }

    /// All registered modules, by identifier.
    pub fn modules(&self) -> &BTreeMap<String, ModuleHandle> {
        &self.modules
    }

    /// Command names with their help text, sorted by name.
    pub fn help_entries(&self) -> Vec<(&str, Option<&str>)> {
        self.commands
            .iter()
            .map(|(name, module)| (name.as_str(), module.descriptor().help_for(name)))
            .collect()
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn cache(&self) -> &ModuleCache {
        &self.cache
    }
}

/// Name an external module is cached under: the directory's last segment up
/// to its first dot.
fn module_leafname(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "commands".to_string())
}

fn check_command_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("command name cannot be empty");
    }
    if name.contains(char::is_whitespace) {
        return Err("command name cannot contain whitespace");
    }
    Ok(())
}
