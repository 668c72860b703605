//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the Client trait from mcli-core.

use async_trait::async_trait;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use url::Url;

use mcli_core::{Client, Error, HostConfig, Result};

use crate::bucket::locate_bucket;

/// Region that must not be sent as a location constraint
const DEFAULT_REGION: &str = "us-east-1";

/// S3 client bound to one bucket URL
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    url: Url,
    bucket: String,
    region: String,
}

impl S3Client {
    /// Create a new S3 client for a bucket URL and its host record
    pub async fn new(url: &Url, host: &HostConfig) -> Result<Self> {
        let location = locate_bucket(url).map_err(|reason| Error::ClientInit {
            url: url.to_string(),
            reason,
        })?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(host.region.clone()))
            .endpoint_url(&location.endpoint);

        loader = if host.is_anonymous() {
            loader.no_credentials()
        } else {
            loader.credentials_provider(aws_credential_types::Credentials::new(
                host.access_key.clone(),
                host.secret_key.clone(),
                None, // session token
                None, // expiry
                "mcli-static-credentials",
            ))
        };

        let config = loader.load().await;

        // Path-style addressing keeps the bucket out of the hostname
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();

        tracing::debug!(
            endpoint = %location.endpoint,
            bucket = %location.bucket,
            anonymous = host.is_anonymous(),
            "Initialized S3 client"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            url: url.clone(),
            bucket: location.bucket,
            region: host.region.clone(),
        })
    }

    /// Bucket this client creates
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Location constraint sent with CreateBucket, if any
    fn bucket_configuration(&self) -> Option<CreateBucketConfiguration> {
        if self.region == DEFAULT_REGION {
            return None;
        }
        Some(
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                .build(),
        )
    }
}

#[async_trait]
impl Client for S3Client {
    async fn make_bucket(&self) -> Result<()> {
        self.inner
            .create_bucket()
            .bucket(&self.bucket)
            .set_create_bucket_configuration(self.bucket_configuration())
            .send()
            .await
            .map_err(|e| remote_error(&self.url, e))?;

        tracing::info!(url = %self.url, "Created bucket");
        Ok(())
    }
}

/// Wrap an SDK failure, keeping it as the typed source
fn remote_error<E>(url: &Url, source: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::Remote {
        url: url.to_string(),
        source: Box::new(source),
    }
}
