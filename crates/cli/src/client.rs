//! Client factory
//!
//! Selects the client variant for a target: local paths get a filesystem
//! client, http/https URLs get an S3 client.

use async_trait::async_trait;
use mcli_core::{Client, ClientFactory, FsClient, HostConfig, Result, TargetUrl};
use mcli_s3::S3Client;

/// Factory keyed on the target's scheme
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemeClientFactory;

#[async_trait]
impl ClientFactory for SchemeClientFactory {
    async fn new_client(&self, target: &TargetUrl, host: &HostConfig) -> Result<Box<dyn Client>> {
        match target {
            TargetUrl::Local(path) => Ok(Box::new(FsClient::new(path.clone()))),
            TargetUrl::Remote(url) => Ok(Box::new(S3Client::new(url, host).await?)),
        }
    }
}
