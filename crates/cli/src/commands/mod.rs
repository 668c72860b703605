//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.

use clap::{Parser, Subcommand};

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

mod completions;
mod config;
pub mod mb;

/// mcli - object storage client
///
/// Creates buckets on S3-compatible object storage and directories on the
/// local filesystem, using aliases and host credentials from the config file.
#[derive(Parser, Debug)]
#[command(name = "mcli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Make a bucket or folder
    #[command(after_help = mb::EXAMPLES)]
    Mb(mb::MbArgs),

    /// Generate and edit the configuration file
    #[command(subcommand)]
    Config(config::ConfigCommands),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Mb(args) => mb::execute(args, output_config).await,
        Commands::Config(cmd) => config::execute(cmd, output_config).await,
        Commands::Completions(args) => completions::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_mb_accepts_many_targets() {
        let cli = Cli::try_parse_from(["mcli", "mb", "play/a", "play/b", "/tmp/c"]).unwrap();
        match cli.command {
            Commands::Mb(args) => assert_eq!(args.targets, vec!["play/a", "play/b", "/tmp/c"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_mb_parses_without_targets() {
        let cli = Cli::try_parse_from(["mcli", "mb"]).unwrap();
        assert!(matches!(cli.command, Commands::Mb(ref args) if args.targets.is_empty()));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mcli", "mb", "play/a", "--json", "-q"]).unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
    }
}
