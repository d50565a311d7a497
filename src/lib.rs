//! playcmd - command loader and release checker for the Play framework
//! command line.
//!
//! Commands are declared by command modules: descriptor files scanned from
//! the framework's core commands directory, plus one `commands.toml` per
//! external module directory.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod loader;
pub mod logging;
pub mod releases;
