//! Host configuration
//!
//! Host records hold the credentials used for an endpoint. They are keyed by a
//! glob pattern over `host[:port]`, e.g. `localhost:*` or `*.s3*.amazonaws.com`.

use std::collections::BTreeMap;
use std::net::Ipv6Addr;
use std::path::Path;

use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigManager};
use crate::error::{Error, Result};
use crate::path::TargetUrl;

/// Credentials and endpoint settings for one host pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Access key ID (empty for anonymous access)
    #[serde(default)]
    pub access_key: String,

    /// Secret access key (empty for anonymous access)
    #[serde(default)]
    pub secret_key: String,

    /// Region used for signing and bucket placement
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            secret_key: String::new(),
            region: default_region(),
        }
    }
}

impl HostConfig {
    /// Create a host record with the default region
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: default_region(),
        }
    }

    /// Whether requests should be sent unsigned
    pub fn is_anonymous(&self) -> bool {
        self.access_key.is_empty() && self.secret_key.is_empty()
    }

    /// Check that the record is usable
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.access_key.is_empty() != self.secret_key.is_empty() {
            return Err("access key and secret key must both be set or both be empty".into());
        }
        if self.region.trim().is_empty() {
            return Err("region cannot be empty".into());
        }
        Ok(())
    }
}

impl Config {
    /// Find the host record for a resolved target
    ///
    /// Local targets need no credentials. For remote targets an exact key
    /// match wins, otherwise the longest matching pattern.
    pub fn host_config(&self, target: &TargetUrl, config_path: &Path) -> Result<HostConfig> {
        let url = match target {
            TargetUrl::Local(_) => return Ok(HostConfig::default()),
            TargetUrl::Remote(url) => url,
        };

        let lookup_error = |reason: String| Error::HostConfigLookup {
            url: target.to_string(),
            path: config_path.to_path_buf(),
            reason,
        };

        let candidates = host_candidates(url);
        let (pattern, record) = find_host(&self.hosts, &candidates)
            .map_err(lookup_error)?
            .ok_or_else(|| lookup_error("no matching host entry".into()))?;

        record
            .validate()
            .map_err(|reason| lookup_error(format!("entry ‘{pattern}’ is malformed: {reason}")))?;

        tracing::debug!(%target, %pattern, "Matched host configuration");
        Ok(record.clone())
    }
}

/// Forms of the URL authority that host patterns are matched against
fn host_candidates(url: &url::Url) -> Vec<String> {
    let host = url.host_str().unwrap_or_default().to_string();
    match url.port_or_known_default() {
        Some(port) => vec![format!("{host}:{port}"), host],
        None => vec![host],
    }
}

fn find_host<'a>(
    hosts: &'a BTreeMap<String, HostConfig>,
    candidates: &[String],
) -> std::result::Result<Option<(&'a str, &'a HostConfig)>, String> {
    for candidate in candidates {
        if let Some((key, record)) = hosts.get_key_value(candidate) {
            return Ok(Some((key.as_str(), record)));
        }
    }

    let mut best: Option<(&str, &HostConfig)> = None;
    for (key, record) in hosts {
        let pattern =
            host_pattern(key).map_err(|e| format!("entry ‘{key}’ is not a valid pattern: {e}"))?;
        if !candidates.iter().any(|c| pattern.matches(c)) {
            continue;
        }
        if best.is_none_or(|(b, _)| key.len() > b.len()) {
            best = Some((key.as_str(), record));
        }
    }
    Ok(best)
}

/// Compile a host pattern key
///
/// A leading bracketed IPv6 address (`[::1]:*`) is taken literally rather
/// than as a character class, so it matches the authority form of the URL.
fn host_pattern(key: &str) -> std::result::Result<Pattern, glob::PatternError> {
    if let Some(end) = key.find(']')
        && key.starts_with('[')
        && key[1..end].parse::<Ipv6Addr>().is_ok()
    {
        let (address, rest) = key.split_at(end + 1);
        return Pattern::new(&format!("{}{rest}", Pattern::escape(address)));
    }
    Pattern::new(key)
}

/// Manager for host record operations
pub struct HostManager {
    config_manager: ConfigManager,
}

impl HostManager {
    /// Create a new HostManager with a specific ConfigManager
    pub fn with_config_manager(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// List all host records
    pub fn list(&self) -> Result<BTreeMap<String, HostConfig>> {
        Ok(self.config_manager.load()?.hosts)
    }

    /// Add or update a host record
    pub fn set(&self, pattern: &str, host: HostConfig) -> Result<()> {
        host_pattern(pattern)
            .map_err(|e| Error::InvalidValue(format!("host pattern ‘{pattern}’: {e}")))?;
        host.validate().map_err(Error::InvalidValue)?;

        let mut config = self.config_manager.load()?;
        config.hosts.insert(pattern.to_string(), host);
        self.config_manager.save(&config)
    }

    /// Remove a host record
    pub fn remove(&self, pattern: &str) -> Result<()> {
        let mut config = self.config_manager.load()?;
        if config.hosts.remove(pattern).is_none() {
            return Err(Error::HostNotFound(pattern.to_string()));
        }
        self.config_manager.save(&config)
    }
}
