//! Diagnostic log output.
//!
//! The console belongs to `~` diagnostics and command output, so tracing
//! events go to a daily rotated file. The filter comes from `RUST_LOG`,
//! then the `log_filter` setting, then [`DEFAULT_LOG_FILTER`].

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::config::Settings;

/// Filter used when neither `RUST_LOG` nor the settings name one.
pub const DEFAULT_LOG_FILTER: &str = "playcmd=info,warn";

const LOG_FILE_PREFIX: &str = "playcmd.log";

/// Keeps the background log writer alive; drop it to flush.
#[must_use = "dropping the guard stops log output"]
pub struct LogGuard {
    _worker: WorkerGuard,
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails when the log directory cannot be determined or created, when the
/// configured filter does not parse, or when a subscriber is already set.
pub fn init(settings: &Settings) -> anyhow::Result<LogGuard> {
    let directory = match &settings.log_dir {
        Some(dir) => dir.clone(),
        None => default_log_directory()?,
    };
    std::fs::create_dir_all(&directory)
        .with_context(|| format!("cannot create log directory {}", directory.display()))?;

    let filter = build_filter(std::env::var("RUST_LOG").ok(), settings.log_filter.as_deref())?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &directory, LOG_FILE_PREFIX);
    let (writer, worker) = tracing_appender::non_blocking(appender);

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "playcmd starting");
    tracing::debug!(log_dir = %directory.display(), "Log directory");

    Ok(LogGuard { _worker: worker })
}

/// Pick the filter directive: environment first, then settings, then the
/// default. A blank value counts as unset.
fn build_filter(env: Option<String>, configured: Option<&str>) -> anyhow::Result<EnvFilter> {
    let directive = env
        .filter(|v| !v.trim().is_empty())
        .or_else(|| {
            configured
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    EnvFilter::try_new(&directive).with_context(|| format!("invalid log filter '{}'", directive))
}

/// `<local data dir>/playcmd/logs`.
///
/// - Linux: `~/.local/share/playcmd/logs/`
/// - macOS: `~/Library/Application Support/playcmd/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\playcmd\logs\`
pub fn default_log_directory() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;
    Ok(base.join("playcmd").join("logs"))
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("playcmd shutting down");
}
