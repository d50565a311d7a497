//! Load-once module cache.
//!
//! Modules are located on a search path by name, evaluated into a
//! [`ModuleDescriptor`] and cached. A second load of the same name returns the
//! cached handle without touching the filesystem.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use super::descriptor::{ExecSpec, ModuleDescriptor};
use super::error::{LoadError, Result};
use crate::commands::builtin::{BuiltinCommand, Builtins};

/// How a module file is evaluated, decided by its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// TOML descriptor text.
    Source,
    /// Pre-serialized JSON descriptor.
    Compiled,
    /// Platform shared library.
    Native,
}

impl ModuleKind {
    /// Lookup order when locating a module by name.
    pub const SEARCH_ORDER: [ModuleKind; 3] =
        [ModuleKind::Source, ModuleKind::Compiled, ModuleKind::Native];

    /// File extension (without the dot) for this kind.
    pub fn extension(self) -> &'static str {
        match self {
            ModuleKind::Source => "toml",
            ModuleKind::Compiled => "json",
            ModuleKind::Native => std::env::consts::DLL_EXTENSION,
        }
    }

    /// Determine the kind of a module file from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::SEARCH_ORDER
            .into_iter()
            .find(|kind| kind.extension() == ext)
    }
}

/// What the dispatcher runs for a module's commands.
#[derive(Clone)]
pub enum Entry {
    /// The module only declares names.
    None,
    /// A command compiled into the binary.
    Builtin {
        name: String,
        command: Arc<dyn BuiltinCommand>,
    },
    /// An external program.
    Exec(ExecSpec),
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::None => write!(f, "None"),
            Entry::Builtin { name, .. } => f.debug_tuple("Builtin").field(name).finish(),
            Entry::Exec(spec) => f.debug_tuple("Exec").field(spec).finish(),
        }
    }
}

/// A successfully evaluated module.
#[derive(Debug)]
pub struct LoadedModule {
    name: String,
    path: PathBuf,
    kind: ModuleKind,
    descriptor: ModuleDescriptor,
    entry: Entry,
}

/// Shared handle to a loaded module.
///
/// Handles compare by identity: two handles are equal only when they refer
/// to the same cached load.
#[derive(Debug, Clone)]
pub struct ModuleHandle(Arc<LoadedModule>);

impl ModuleHandle {
    /// The name the module was loaded under.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The directory containing the module file.
    pub fn dir(&self) -> &Path {
        self.0.path.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn kind(&self) -> ModuleKind {
        self.0.kind
    }

    pub fn descriptor(&self) -> &ModuleDescriptor {
        &self.0.descriptor
    }

    pub fn entry(&self) -> &Entry {
        &self.0.entry
    }

    /// Declared command names, if the module declares the capability.
    pub fn commands(&self) -> Option<&[String]> {
        self.0.descriptor.commands.as_deref()
    }

    /// Declared namespace identifier, if any.
    pub fn identifier(&self) -> Option<&str> {
        self.0.descriptor.module.as_deref()
    }
}

impl PartialEq for ModuleHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ModuleHandle {}

/// A module file opened during location. The handle is closed when this is
/// dropped, on success and error paths alike.
struct Located {
    file: File,
    path: PathBuf,
    kind: ModuleKind,
}

/// Cache of loaded modules keyed by name.
pub struct ModuleCache {
    modules: HashMap<String, ModuleHandle>,
    builtins: Builtins,
    executions: usize,
}

impl ModuleCache {
    /// Create an empty cache resolving `builtin = "..."` entries against
    /// the given catalog.
    pub fn new(builtins: Builtins) -> Self {
        Self {
            modules: HashMap::new(),
            builtins,
            executions: 0,
        }
    }

    /// Load a module by name from the first location that provides it.
    ///
    /// Returns the cached handle when the name was loaded before.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::NotFound` if no location provides the module, or
    /// the evaluation error of the located file.
    pub fn load(&mut self, name: &str, search_path: &[PathBuf]) -> Result<ModuleHandle> {
        if let Some(handle) = self.get(name) {
            trace!(module = name, "Module cache hit");
            return Ok(handle);
        }

        let located = locate(name, search_path)?;
        self.evaluate(name, located)
    }

    /// Load a module from a known file path, caching it under `name`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::NotFound` if the file does not exist, or the
    /// evaluation error of the file.
    pub fn load_file(&mut self, name: &str, path: &Path) -> Result<ModuleHandle> {
        if let Some(handle) = self.get(name) {
            trace!(module = name, "Module cache hit");
            return Ok(handle);
        }

        let file = File::open(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                LoadError::NotFound {
                    name: name.to_string(),
                    search_path: vec![path.to_path_buf()],
                }
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let located = Located {
            file,
            path: path.to_path_buf(),
            kind: ModuleKind::from_path(path).unwrap_or(ModuleKind::Source),
        };
        self.evaluate(name, located)
    }

    /// Get a previously loaded module.
    pub fn get(&self, name: &str) -> Option<ModuleHandle> {
        self.modules.get(name).cloned()
    }

    /// Number of module files evaluated so far, successful or not.
    pub fn executions(&self) -> usize {
        self.executions
    }

    /// Evaluate a located file into a module and cache it.
    fn evaluate(&mut self, name: &str, located: Located) -> Result<ModuleHandle> {
        self.executions += 1;
        let Located {
            mut file,
            path,
            kind,
        } = located;

        debug!(module = name, path = %path.display(), ?kind, "Evaluating module");

        let descriptor = match kind {
            ModuleKind::Source => {
                let text = read_text(&mut file, &path)?;
                ModuleDescriptor::from_toml(&text).map_err(|source| LoadError::Toml {
                    path: path.clone(),
                    source,
                })?
            }
            ModuleKind::Compiled => {
                let text = read_text(&mut file, &path)?;
                ModuleDescriptor::from_json(&text).map_err(|source| LoadError::Json {
                    path: path.clone(),
                    source,
                })?
            }
            ModuleKind::Native => return Err(LoadError::Unsupported { path }),
        };
        drop(file);

        descriptor
            .validate()
            .map_err(|reason| LoadError::Invalid {
                path: path.clone(),
                reason,
            })?;

        let entry = self.resolve_entry(&descriptor, &path)?;

        let handle = ModuleHandle(Arc::new(LoadedModule {
            name: name.to_string(),
            path,
            kind,
            descriptor,
            entry,
        }));
        self.modules.insert(name.to_string(), handle.clone());
        Ok(handle)
    }

    fn resolve_entry(&self, descriptor: &ModuleDescriptor, path: &Path) -> Result<Entry> {
        if let Some(name) = &descriptor.builtin {
            let command = self
                .builtins
                .get(name)
                .ok_or_else(|| LoadError::UnknownBuiltin {
                    path: path.to_path_buf(),
                    builtin: name.clone(),
                })?;
            return Ok(Entry::Builtin {
                name: name.clone(),
                command,
            });
        }

        Ok(match &descriptor.exec {
            Some(spec) => Entry::Exec(spec.clone()),
            None => Entry::None,
        })
    }
}

/// Find the first openable module file for `name`.
///
/// Within one location, candidates are tried in [`ModuleKind::SEARCH_ORDER`].
/// A candidate that exists but cannot be opened makes the search move on to
/// the next location.
fn locate(name: &str, search_path: &[PathBuf]) -> Result<Located> {
    'locations: for location in search_path {
        for kind in ModuleKind::SEARCH_ORDER {
            let path = location.join(format!("{}.{}", name, kind.extension()));
            if !path.is_file() {
                continue;
            }
            match File::open(&path) {
                Ok(file) => return Ok(Located { file, path, kind }),
                Err(e) => {
                    debug!("Skipping unreadable module file {:?}: {}", path, e);
                    continue 'locations;
                }
            }
        }
    }

    Err(LoadError::NotFound {
        name: name.to_string(),
        search_path: search_path.to_vec(),
    })
}

fn read_text(file: &mut File, path: &Path) -> Result<String> {
    let mut text = String::new();
    file.read_to_string(&mut text).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text)
}
