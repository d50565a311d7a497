//! Published framework releases.
//!
//! This module provides the client for the release tags endpoint and the
//! version ordering used by the `check` command.

mod client;
mod error;
mod release;
mod types;

pub use client::ReleaseClient;
pub use error::{ReleaseError, Result};
pub use release::{latest, Release};
pub use types::Tag;
