//! playcmd - run framework commands discovered from command modules.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use playcmd::app::App;
use playcmd::cli::Cli;
use playcmd::config::{self, Settings};
use playcmd::console::Console;
use playcmd::error::{AppError, Result};
use playcmd::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    settings.validate()?;

    let _guard = match logging::init(&settings) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("~ Logging disabled: {:#}", e);
            None
        }
    };

    let play_path = config::resolve_play_path(cli.play_path.as_deref(), &settings);
    let app = App::new(settings, play_path, &cli.modules, Console::stderr());

    let mut stdout = io::stdout();
    let result = app.run(cli.command.as_deref(), &cli.args, &mut stdout).await;
    if let Err(e) = &result {
        tracing::error!("{}", e);
    }
    logging::shutdown();
    result
}

fn report(e: &AppError) {
    eprintln!("~ {}", e.user_message());
    if let Some(action) = e.suggested_action() {
        eprintln!("~ {}", action);
    }
    eprintln!("~");
}
