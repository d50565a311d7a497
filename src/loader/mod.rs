//! Module loading for command descriptors.
//!
//! This module provides:
//! - The descriptor format command modules are written in
//! - A load-once cache resolving modules by name on a search path
//! - The load error taxonomy

mod cache;
mod descriptor;
mod error;

pub use cache::{Entry, ModuleCache, ModuleHandle, ModuleKind};
pub use descriptor::{ExecSpec, ModuleDescriptor};
pub use error::{LoadError, Result};
