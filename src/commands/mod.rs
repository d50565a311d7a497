//! Command discovery and execution.
//!
//! This module provides:
//! - The command registry built from command modules on disk
//! - Commands built into the binary
//! - Running commands provided by external programs

pub mod builtin;
pub mod exec;
mod registry;

pub use registry::{
    CommandLoader, CORE_COMMANDS_DIR, EXTERNAL_COMMANDS_FILE, PACKAGE_INIT_FILE, SOURCE_SUFFIX,
};
