//! Running commands provided by external programs.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use tokio::process::Command;
use tracing::{debug, instrument};

use super::builtin::CommandContext;
use crate::config::PLAY_PATH_ENV;
use crate::loader::{ExecSpec, ModuleHandle};

/// Environment variable holding the invoked command name.
pub const PLAY_COMMAND_ENV: &str = "PLAY_COMMAND";

/// Spawn the module's program and wait for it to finish.
///
/// The program runs in the module's directory with the descriptor's own
/// arguments followed by the user's.
#[instrument(skip_all, fields(command = %ctx.command, module = %module.name()))]
pub async fn run(
    spec: &ExecSpec,
    module: &ModuleHandle,
    ctx: &CommandContext<'_>,
) -> io::Result<ExitStatus> {
    let program = resolve_program(&spec.program, module.dir());
    debug!(program = %program.display(), "Spawning command");

    Command::new(&program)
        .args(&spec.args)
        .args(ctx.args)
        .current_dir(module.dir())
        .env(PLAY_PATH_ENV, ctx.play_path)
        .env(PLAY_COMMAND_ENV, ctx.command)
        .status()
        .await
}

/// Resolve relative program paths against the module directory. Bare names
/// are left for `PATH` lookup.
fn resolve_program(program: &str, dir: &Path) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative() && path.components().count() > 1 {
        dir.join(path)
    } else {
        path.to_path_buf()
    }
}
