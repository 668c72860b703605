//! Configuration commands
//!
//! `config generate` writes the default configuration; `config alias` and
//! `config host` manage alias prefixes and host credentials.

use std::collections::BTreeMap;

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};
use mcli_core::{AliasManager, ConfigManager, HostConfig, HostManager};

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write the default configuration file
    Generate(GenerateArgs),

    /// Manage URL aliases
    #[command(subcommand)]
    Alias(AliasCommands),

    /// Manage host credentials
    #[command(subcommand)]
    Host(HostCommands),
}

/// Arguments for `config generate`
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Alias subcommands
#[derive(Subcommand, Debug)]
pub enum AliasCommands {
    /// Add or update an alias
    Set {
        /// Alias name (e.g., "play", "s3")
        name: String,
        /// URL prefix the alias expands to (e.g., "https://play.minio.io:9000")
        url: String,
    },

    /// Remove an alias
    Remove {
        /// Alias name
        name: String,
    },

    /// List all configured aliases
    List,
}

/// Host subcommands
#[derive(Subcommand, Debug)]
pub enum HostCommands {
    /// Add or update the credentials for a host pattern
    Set(HostSetArgs),

    /// Remove a host record
    Remove {
        /// Host pattern
        pattern: String,
    },

    /// List host records (secret keys are never shown)
    List,
}

/// Arguments for `config host set`
#[derive(Args, Debug)]
pub struct HostSetArgs {
    /// Glob over host[:port] (e.g., "localhost:*", "*.s3*.amazonaws.com")
    pub pattern: String,

    /// Access key ID (empty string for anonymous access)
    pub access_key: String,

    /// Secret access key (empty string for anonymous access)
    pub secret_key: String,

    /// Region used for signing and bucket placement
    #[arg(long, default_value = "us-east-1")]
    pub region: String,
}

/// JSON output for set/remove/generate operations
#[derive(Serialize)]
struct OperationOutput {
    success: bool,
    name: String,
    message: String,
}

/// Host record for listing (without the secret)
#[derive(Serialize)]
struct HostInfo {
    pattern: String,
    access_key: String,
    region: String,
}

impl HostInfo {
    fn new(pattern: &str, host: &HostConfig) -> Self {
        Self {
            pattern: pattern.to_string(),
            access_key: host.access_key.clone(),
            region: host.region.clone(),
        }
    }
}

/// Execute a config subcommand
pub async fn execute(cmd: ConfigCommands, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let config_manager = match ConfigManager::new() {
        Ok(cm) => cm,
        Err(e) => {
            formatter.error_report(&e);
            return ExitCode::from_error(&e);
        }
    };

    let result = match cmd {
        ConfigCommands::Generate(args) => execute_generate(args, &config_manager, &formatter),
        ConfigCommands::Alias(cmd) => execute_alias(
            cmd,
            AliasManager::with_config_manager(config_manager),
            &formatter,
        ),
        ConfigCommands::Host(cmd) => execute_host(
            cmd,
            HostManager::with_config_manager(config_manager),
            &formatter,
        ),
    };

    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            formatter.error_report(&e);
            ExitCode::from_error(&e)
        }
    }
}

fn execute_generate(
    args: GenerateArgs,
    manager: &ConfigManager,
    formatter: &Formatter,
) -> mcli_core::Result<()> {
    manager.generate(args.force)?;
    let path = manager.config_path().display().to_string();
    report(formatter, &path, format!("Configuration written to ‘{path}’"));
    Ok(())
}

fn execute_alias(
    cmd: AliasCommands,
    manager: AliasManager,
    formatter: &Formatter,
) -> mcli_core::Result<()> {
    match cmd {
        AliasCommands::Set { name, url } => {
            manager.set(&name, &url)?;
            report(formatter, &name, format!("Alias ‘{name}’ configured successfully"));
        }
        AliasCommands::Remove { name } => {
            manager.remove(&name)?;
            report(formatter, &name, format!("Alias ‘{name}’ removed successfully"));
        }
        AliasCommands::List => {
            let aliases = manager.list()?;
            if formatter.is_json() {
                formatter.json(&serde_json::json!({ "aliases": aliases }));
            } else if aliases.is_empty() {
                formatter.println("No aliases configured.");
            } else {
                for (name, url) in &aliases {
                    formatter.println(&format!("{name:<12} {url}"));
                }
            }
        }
    }
    Ok(())
}

fn execute_host(
    cmd: HostCommands,
    manager: HostManager,
    formatter: &Formatter,
) -> mcli_core::Result<()> {
    match cmd {
        HostCommands::Set(args) => {
            let host = HostConfig {
                region: args.region,
                ..HostConfig::new(args.access_key, args.secret_key)
            };
            manager.set(&args.pattern, host)?;
            report(
                formatter,
                &args.pattern,
                format!("Host ‘{}’ configured successfully", args.pattern),
            );
        }
        HostCommands::Remove { pattern } => {
            manager.remove(&pattern)?;
            report(formatter, &pattern, format!("Host ‘{pattern}’ removed successfully"));
        }
        HostCommands::List => {
            let hosts: BTreeMap<String, HostConfig> = manager.list()?;
            let infos: Vec<HostInfo> = hosts
                .iter()
                .map(|(pattern, host)| HostInfo::new(pattern, host))
                .collect();
            if formatter.is_json() {
                formatter.json(&serde_json::json!({ "hosts": infos }));
            } else if infos.is_empty() {
                formatter.println("No hosts configured.");
            } else {
                for info in &infos {
                    let key = if info.access_key.is_empty() {
                        "(anonymous)"
                    } else {
                        info.access_key.as_str()
                    };
                    formatter.println(&format!(
                        "{:<24} {key} (region: {})",
                        info.pattern, info.region
                    ));
                }
            }
        }
    }
    Ok(())
}

fn report(formatter: &Formatter, name: &str, message: String) {
    if formatter.is_json() {
        formatter.json(&OperationOutput {
            success: true,
            name: name.to_string(),
            message,
        });
    } else {
        formatter.success(&message);
    }
}
