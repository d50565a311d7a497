//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Run framework commands discovered from command modules.
#[derive(Debug, Parser)]
#[command(name = "playcmd", version, about)]
pub struct Cli {
    /// Framework installation to load core commands from.
    #[arg(long, value_name = "DIR")]
    pub play_path: Option<PathBuf>,

    /// Extra module directory to load a commands.toml from. Repeatable.
    #[arg(long = "module", value_name = "DIR")]
    pub modules: Vec<PathBuf>,

    /// Settings file to use instead of the user configuration.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Command to run. Lists the available commands when omitted.
    pub command: Option<String>,

    /// Arguments passed through to the command.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_command_with_args() {
        let cli = Cli::try_parse_from(["playcmd", "check", "1.5.0"]).unwrap();
        assert_eq!(cli.command.as_deref(), Some("check"));
        assert_eq!(cli.args, vec!["1.5.0"]);
        assert!(cli.play_path.is_none());
    }

    #[test]
    fn test_parse_options_before_command() {
        let cli = Cli::try_parse_from([
            "playcmd",
            "--play-path",
            "/opt/play",
            "--module",
            "/mods/a",
            "--module",
            "/mods/b",
            "doc",
        ])
        .unwrap();
        assert_eq!(cli.play_path, Some(PathBuf::from("/opt/play")));
        assert_eq!(
            cli.modules,
            vec![PathBuf::from("/mods/a"), PathBuf::from("/mods/b")]
        );
        assert_eq!(cli.command.as_deref(), Some("doc"));
        assert!(cli.args.is_empty());
    }

    #[test]
    fn test_hyphen_args_pass_through() {
        let cli = Cli::try_parse_from(["playcmd", "doc", "--quiet", "-x"]).unwrap();
        assert_eq!(cli.command.as_deref(), Some("doc"));
        assert_eq!(cli.args, vec!["--quiet", "-x"]);
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::try_parse_from(["playcmd"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.args.is_empty());
    }
}
