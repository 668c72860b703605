//! mcli-core: Core library for the mcli object storage client
//!
//! This crate provides the core functionality for the mcli CLI, including:
//! - Configuration management (aliases and host records)
//! - Argument resolution into target URLs
//! - Host configuration lookup
//! - The `Client` trait and its local filesystem variant
//! - Bucket creation orchestration helpers
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! so the orchestration can be tested against mocked clients.

pub mod alias;
pub mod config;
pub mod error;
pub mod fs;
pub mod host;
pub mod make_bucket;
pub mod path;
pub mod traits;

pub use alias::AliasManager;
pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use fs::FsClient;
pub use host::{HostConfig, HostManager};
pub use make_bucket::{MakeBucketSummary, TargetSet, make_buckets, plan_targets};
pub use path::{TargetUrl, resolve};
pub use traits::{Client, ClientFactory};
