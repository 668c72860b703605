//! mcli - object storage client
//!
//! A command-line interface for creating buckets on S3-compatible object
//! storage services and directories on the local filesystem.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod client;
mod commands;
mod exit_code;
mod output;

use commands::Cli;

// Targets are processed one after another, so one thread is enough
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
