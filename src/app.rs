//! Top-level invocation: build the registry and run one command.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::commands::builtin::{BuiltinCommand, Builtins, CommandContext, Help};
use crate::commands::{exec, CommandLoader};
use crate::config::Settings;
use crate::console::Console;
use crate::error::{AppError, Result};
use crate::loader::{Entry, ModuleCache};
use crate::releases::ReleaseError;

/// State for one command-line invocation.
pub struct App {
    settings: Settings,
    play_path: PathBuf,
    registry: CommandLoader,
}

impl App {
    /// Scan the core commands, then every configured module directory
    /// followed by `module_dirs`.
    pub fn new(
        settings: Settings,
        play_path: PathBuf,
        module_dirs: &[PathBuf],
        console: Console,
    ) -> Self {
        let cache = ModuleCache::new(Builtins::default());
        let mut registry = CommandLoader::new(&play_path, cache, console);
        for dir in settings.modules.iter().chain(module_dirs) {
            registry.load_play_module(dir);
        }

        info!(
            play_path = %play_path.display(),
            commands = registry.commands().len(),
            "Command registry ready"
        );

        Self {
            settings,
            play_path,
            registry,
        }
    }

    pub fn registry(&self) -> &CommandLoader {
        &self.registry
    }

    pub fn play_path(&self) -> &Path {
        &self.play_path
    }

    /// Run a command. Without a command name the help listing is shown.
    #[instrument(skip(self, args, out))]
    pub async fn run(
        &self,
        command: Option<&str>,
        args: &[String],
        out: &mut (dyn Write + Send),
    ) -> Result<()> {
        let Some(command) = command else {
            let ctx = self.context("help", args);
            return Help
                .execute(&ctx, out)
                .await
                .map_err(|e| command_failed("help", e));
        };

        let module = self
            .registry
            .command(command)
            .ok_or_else(|| AppError::UnknownCommand(command.to_string()))?;
        debug!(module = module.name(), entry = ?module.entry(), "Dispatching command");

        let ctx = self.context(command, args);
        match module.entry() {
            Entry::Builtin { command: builtin, .. } => builtin
                .execute(&ctx, out)
                .await
                .map_err(|e| command_failed(command, e)),
            Entry::Exec(spec) => {
                out.flush()?;
                let status = exec::run(spec, module, &ctx).await?;
                if status.success() {
                    Ok(())
                } else {
                    Err(AppError::CommandFailed {
                        command: command.to_string(),
                        message: status.to_string(),
                    })
                }
            }
            Entry::None => Err(AppError::NoEntryPoint(command.to_string())),
        }
    }

    fn context<'a>(&'a self, command: &'a str, args: &'a [String]) -> CommandContext<'a> {
        CommandContext {
            command,
            args,
            play_path: &self.play_path,
            settings: &self.settings,
            registry: &self.registry,
        }
    }
}

/// Keep release and configuration errors typed; everything else is reported
/// as a failure of the command.
fn command_failed(command: &str, err: anyhow::Error) -> AppError {
    let err = match err.downcast::<ReleaseError>() {
        Ok(e) => return AppError::Release(e),
        Err(err) => err,
    };
    match err.downcast::<crate::config::ConfigError>() {
        Ok(e) => AppError::Config(e),
        Err(err) => AppError::CommandFailed {
            command: command.to_string(),
            message: format!("{:#}", err),
        },
    }
}
