//! Local filesystem client
//!
//! Making a "bucket" on a local path creates the directory along with any
//! missing parents.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::traits::Client;

/// Client for local filesystem targets
#[derive(Debug, Clone)]
pub struct FsClient {
    path: PathBuf,
}

impl FsClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Client for FsClient {
    async fn make_bucket(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.path)
            .await
            .map_err(|e| Error::Remote {
                url: self.path.display().to_string(),
                source: e.into(),
            })?;

        tracing::info!(path = %self.path.display(), "Created directory");
        Ok(())
    }
}
