//! Argument resolution
//!
//! Turns a command-line argument into a [`TargetUrl`]. Arguments may be:
//! - a full URL (`https://play.example.com:9000/photos`)
//! - an alias followed by a path (`play/photos`), expanded through the alias table
//! - anything else, which is treated as a local filesystem path

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::error::{Error, Result};

/// Schemes that have a remote client implementation
const SUPPORTED_SCHEMES: &[&str] = &["http", "https"];

/// A fully resolved target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetUrl {
    /// Object storage endpoint plus bucket path
    Remote(Url),
    /// Absolute local filesystem path
    Local(PathBuf),
}

impl TargetUrl {
    /// Check if this is a remote target
    pub fn is_remote(&self) -> bool {
        matches!(self, TargetUrl::Remote(_))
    }

    /// Check if this is a local target
    pub fn is_local(&self) -> bool {
        matches!(self, TargetUrl::Local(_))
    }

    /// Get the URL if this is a remote target
    pub fn as_remote(&self) -> Option<&Url> {
        match self {
            TargetUrl::Remote(u) => Some(u),
            TargetUrl::Local(_) => None,
        }
    }

    /// Get the path if this is a local target
    pub fn as_local(&self) -> Option<&Path> {
        match self {
            TargetUrl::Local(p) => Some(p),
            TargetUrl::Remote(_) => None,
        }
    }
}

impl std::fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetUrl::Remote(u) => write!(f, "{}", u.as_str()),
            TargetUrl::Local(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Resolve a command-line argument into a target
pub fn resolve(arg: &str, aliases: &BTreeMap<String, String>) -> Result<TargetUrl> {
    let trimmed = arg.trim();
    if trimmed.is_empty() {
        return Err(invalid(arg, "argument cannot be empty"));
    }

    if trimmed.contains("://") {
        return parse_remote(trimmed, arg).map(TargetUrl::Remote);
    }

    let (head, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));
    if let Some(prefix) = aliases.get(head) {
        let expanded = if rest.is_empty() {
            prefix.clone()
        } else {
            format!("{}/{}", prefix.trim_end_matches('/'), rest)
        };
        tracing::debug!(alias = head, %expanded, "Expanded alias");
        return parse_remote(&expanded, arg).map(TargetUrl::Remote);
    }

    resolve_local(trimmed, arg).map(TargetUrl::Local)
}

/// Parse a URL string and reject schemes without a client
fn parse_remote(s: &str, arg: &str) -> Result<Url> {
    let mut url = Url::parse(s).map_err(|e| invalid(arg, &e.to_string()))?;

    if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
        return Err(Error::UnsupportedScheme { url: s.to_string() });
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(arg, "URL has no host"));
    }

    // Buckets are named by the path alone
    url.set_query(None);
    url.set_fragment(None);

    // `alias/bucket/` and `alias/bucket` name the same target
    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_string();
        url.set_path(if trimmed.is_empty() { "/" } else { &trimmed });
    }

    Ok(url)
}

/// Make a local path absolute, expanding `~` and dropping `.`/`..` components
fn resolve_local(s: &str, arg: &str) -> Result<PathBuf> {
    let path = if s == "~" || s.starts_with("~/") {
        let home =
            dirs::home_dir().ok_or_else(|| invalid(arg, "could not determine home directory"))?;
        home.join(s.trim_start_matches('~').trim_start_matches('/'))
    } else {
        PathBuf::from(s)
    };

    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map_err(|e| invalid(arg, &format!("could not determine working directory: {e}")))?
            .join(path)
    };

    Ok(normalize(&absolute))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

fn invalid(arg: &str, reason: &str) -> Error {
    Error::InvalidArgument {
        arg: arg.to_string(),
        reason: reason.to_string(),
    }
}
