//! Bucket addressing
//!
//! Splits a path-style target URL (`https://host:port/bucket`) into the
//! endpoint the SDK talks to and the bucket name.

use url::Url;

/// Endpoint and bucket extracted from a target URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketLocation {
    /// `scheme://host[:port]`
    pub endpoint: String,
    pub bucket: String,
}

/// Split a target URL into endpoint and bucket
pub fn locate_bucket(url: &Url) -> Result<BucketLocation, String> {
    let mut segments = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter();

    let bucket = segments
        .next()
        .ok_or_else(|| "bucket name is missing".to_string())?;

    if segments.next().is_some() {
        return Err(format!(
            "‘{}’ points below bucket ‘{bucket}’, expected a bucket URL",
            url.path()
        ));
    }

    validate_bucket_name(bucket)?;

    Ok(BucketLocation {
        endpoint: url.origin().ascii_serialization(),
        bucket: bucket.to_string(),
    })
}

/// Check a bucket name against the S3 naming rules
pub fn validate_bucket_name(name: &str) -> Result<(), String> {
    if name.len() < 3 || name.len() > 63 {
        return Err(format!(
            "bucket name ‘{name}’ must be between 3 and 63 characters"
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
    {
        return Err(format!(
            "bucket name ‘{name}’ may only contain lowercase letters, digits, '.' and '-'"
        ));
    }

    let is_edge = |c: Option<char>| c.is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if !is_edge(name.chars().next()) || !is_edge(name.chars().last()) {
        return Err(format!(
            "bucket name ‘{name}’ must start and end with a letter or digit"
        ));
    }

    if name.contains("..") {
        return Err(format!(
            "bucket name ‘{name}’ cannot contain consecutive periods"
        ));
    }

    Ok(())
}
