//! mb command - Make bucket
//!
//! Creates a bucket for every target. Targets are resolved and matched to
//! host records up front; a problem there aborts the whole command before
//! any request is sent. Failures while creating an individual bucket are
//! reported and the remaining targets are still processed.

use clap::{Args, CommandFactory};
use mcli_core::{ClientFactory, ConfigManager, make_buckets, plan_targets};
use serde::Serialize;

use super::Cli;
use crate::client::SchemeClientFactory;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Examples shown below the `mb` help text
pub const EXAMPLES: &str = "\
Examples:
  1. Create a bucket on Amazon S3 object storage.
     $ mcli mb https://s3.amazonaws.com/public-document-store

  2. Make a directory on the local filesystem, including its parent directories as needed.
     $ mcli mb ~/backups/2024

  3. Create a bucket through a configured alias.
     $ mcli mb play/mongodb-backup";

/// Create buckets
#[derive(Args, Debug)]
pub struct MbArgs {
    /// Targets: alias/bucket, a full bucket URL, or a local directory
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,
}

#[derive(Debug, Serialize)]
struct MbOutput {
    status: &'static str,
    target: String,
}

/// Execute the mb command
pub async fn execute(args: MbArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    if args.targets.first().is_none_or(|first| first == "help") {
        print_usage();
        return ExitCode::GeneralError;
    }

    let config_manager = match ConfigManager::new() {
        Ok(cm) => cm,
        Err(e) => {
            formatter.error_report(&e);
            return ExitCode::from_error(&e);
        }
    };

    run(&args.targets, &config_manager, &SchemeClientFactory, &formatter).await
}

/// Create every target's bucket using the given configuration and factory
pub async fn run(
    targets: &[String],
    config_manager: &ConfigManager,
    factory: &dyn ClientFactory,
    formatter: &Formatter,
) -> ExitCode {
    let config = match config_manager.load() {
        Ok(c) => c,
        Err(e) => {
            formatter.error_report(&e);
            return ExitCode::from_error(&e);
        }
    };

    let targets = match plan_targets(targets, &config, config_manager.config_path()) {
        Ok(t) => t,
        Err(e) => {
            formatter.error_report(&e);
            return ExitCode::from_error(&e);
        }
    };

    let summary = make_buckets(targets, factory, |target, result| match result {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&MbOutput {
                    status: "success",
                    target: target.to_string(),
                });
            } else {
                formatter.success(&format!("Bucket ‘{target}’ created successfully."));
            }
        }
        Err(e) => formatter.error_report(e),
    })
    .await;

    tracing::debug!(
        created = summary.created,
        failed = summary.failed,
        "mb finished"
    );
    ExitCode::Success
}

fn print_usage() {
    let mut cmd = Cli::command();
    cmd.build();
    if let Some(mb) = cmd.find_subcommand_mut("mb")
        && let Err(e) = mb.print_help()
    {
        tracing::warn!(error = %e, "Failed to print mb usage");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quiet_formatter() -> Formatter {
        Formatter::new(OutputConfig {
            quiet: true,
            no_color: true,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_usage_without_targets() {
        let code = execute(MbArgs { targets: vec![] }, OutputConfig::default()).await;
        assert_eq!(code, ExitCode::GeneralError);

        let code = execute(
            MbArgs {
                targets: vec!["help".into()],
            },
            OutputConfig::default(),
        )
        .await;
        assert_eq!(code, ExitCode::GeneralError);
    }

    #[tokio::test]
    async fn test_run_without_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("config.toml"));
        let target = temp_dir.path().join("never-created");

        let code = run(
            &[target.display().to_string()],
            &manager,
            &SchemeClientFactory,
            &quiet_formatter(),
        )
        .await;
        assert_eq!(code, ExitCode::GeneralError);
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_run_unsupported_scheme_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("config.toml"));
        manager.generate(false).unwrap();
        let local = temp_dir.path().join("first");

        let code = run(
            &[
                local.display().to_string(),
                "ftp://host/path".to_string(),
            ],
            &manager,
            &SchemeClientFactory,
            &quiet_formatter(),
        )
        .await;
        assert_eq!(code, ExitCode::UsageError);
        assert!(!local.exists());
    }

    #[tokio::test]
    async fn test_run_local_targets() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("config.toml"));
        manager.generate(false).unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();
        let good = temp_dir.path().join("data").join("bucket");

        let code = run(
            &[
                blocker.join("sub").display().to_string(),
                good.display().to_string(),
            ],
            &manager,
            &SchemeClientFactory,
            &quiet_formatter(),
        )
        .await;
        assert_eq!(code, ExitCode::Success);
        assert!(good.is_dir());
    }
}
