//! Client traits
//!
//! A [`Client`] is bound to a single target and knows how to create the
//! bucket (or directory) it points at. A [`ClientFactory`] picks the client
//! variant for a target's scheme. Both can be mocked for testing.

use async_trait::async_trait;

use crate::error::Result;
use crate::host::HostConfig;
use crate::path::TargetUrl;

/// Storage client bound to one target
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Client: Send + Sync {
    /// Create the bucket this client is bound to
    ///
    /// Failures are returned as [`crate::Error::Remote`] without retrying.
    async fn make_bucket(&self) -> Result<()>;
}

/// Builds the client variant matching a target's scheme
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// Construct a client for `target` using its host record
    async fn new_client(&self, target: &TargetUrl, host: &HostConfig) -> Result<Box<dyn Client>>;
}
