//! mcli-s3: S3 SDK adapter for the mcli client
//!
//! This crate provides the S3 variant of the `Client` trait from mcli-core
//! using the aws-sdk-s3 crate. It is the only crate that directly
//! depends on the AWS SDK.

pub mod bucket;
pub mod client;

pub use client::S3Client;
