//! Command line definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{AppConfig, Verbosity};

/// padcalc: keypad calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "padcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write logs to this file
    #[arg(long, env = "PADCALC_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run (defaults to `tui`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The subcommand, falling back to the interactive calculator
    #[must_use]
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Tui)
    }

    /// Builds the runtime configuration from global flags
    #[must_use]
    pub fn config(&self) -> AppConfig {
        AppConfig::new()
            .with_verbosity(Verbosity::from_flags(self.quiet, self.verbose))
            .with_log_file(self.log_file.clone())
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive calculator
    Tui,

    /// Evaluate one expression and print the result
    Eval(EvalArgs),

    /// Replay button labels through a fresh calculator
    ///
    /// Labels: 0-9 . + - * / = C ⌫ (or bs) % √ (or sqrt) "Clear History" (or ch)
    Press(PressArgs),
}

/// Arguments for the eval command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EvalArgs {
    /// Expression, e.g. "12+8"
    #[arg(allow_hyphen_values = true)]
    pub expression: String,

    /// Print JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the press command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PressArgs {
    /// Button labels, pressed in order
    #[arg(required = true)]
    pub labels: Vec<String>,

    /// Print JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("padcalc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_command_is_tui() {
        let cli = parse(&[]);
        assert_eq!(cli.resolved_command(), Commands::Tui);
    }

    #[test]
    fn test_eval_args() {
        let cli = parse(&["eval", "12+8", "--json"]);
        assert_eq!(
            cli.resolved_command(),
            Commands::Eval(EvalArgs {
                expression: "12+8".to_string(),
                json: true,
            })
        );
    }

    #[test]
    fn test_eval_leading_minus() {
        let cli = parse(&["eval", "-5+10"]);
        assert!(matches!(cli.resolved_command(), Commands::Eval(args) if args.expression == "-5+10"));
    }

    #[test]
    fn test_press_labels() {
        let cli = parse(&["press", "1", "-", "2", "="]);
        let Commands::Press(args) = cli.resolved_command() else {
            panic!("expected press");
        };
        assert_eq!(args.labels, ["1", "-", "2", "="]);
        assert!(!args.json);
    }

    #[test]
    fn test_press_requires_labels() {
        assert!(Cli::try_parse_from(["padcalc", "press"]).is_err());
    }

    #[test]
    fn test_global_flags_build_config() {
        let cli = parse(&["-vv", "--log-file", "calc.log", "eval", "1"]);
        let config = cli.config();
        assert_eq!(config.verbosity, Verbosity::Debug);
        assert_eq!(config.log_file, Some(PathBuf::from("calc.log")));

        let cli = parse(&["eval", "1", "-q"]);
        assert_eq!(cli.config().verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        <Cli as CommandFactory>::command().debug_assert();
    }
}
