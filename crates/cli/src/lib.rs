//! mcli CLI library
//!
//! This module exports the CLI components for use in integration tests.

pub mod client;
pub mod commands;
pub mod exit_code;
pub mod output;
