//! Error types for mcli-core
//!
//! Every variant carries the context needed to report it (argument, URL,
//! config path) and keeps the underlying cause reachable through
//! [`std::error::Error::source`].

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for mcli-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed cause attached to errors that wrap a foreign failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for mcli-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// No configuration file has been generated yet
    #[error("\"mcli\" is not configured. Please run \"mcli config generate\"")]
    ConfigMissing { path: PathBuf },

    /// Configuration file exists but cannot be read or parsed
    #[error("Unable to read config file ‘{}’", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// Refusing to overwrite an existing configuration
    #[error("Config file ‘{}’ already exists", .path.display())]
    ConfigExists { path: PathBuf },

    /// Argument resolved to a URL whose scheme has no client
    #[error("Unknown type of URL ‘{url}’")]
    UnsupportedScheme { url: String },

    /// Argument could not be parsed into a target
    #[error("Unable to parse argument ‘{arg}’: {reason}")]
    InvalidArgument { arg: String, reason: String },

    /// No usable host record for a resolved URL
    #[error("Unable to read host configuration for ‘{url}’ from config file ‘{}’: {reason}", .path.display())]
    HostConfigLookup {
        url: String,
        path: PathBuf,
        reason: String,
    },

    /// Client could not be constructed for a target
    #[error("Unable to initialize client for ‘{url}’: {reason}")]
    ClientInit { url: String, reason: String },

    /// The create-bucket request itself failed
    #[error("Failed to create bucket for URL ‘{url}’")]
    Remote {
        url: String,
        #[source]
        source: BoxError,
    },

    /// Invalid alias or host record supplied by the user
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// Alias not found
    #[error("Alias not found: {0}")]
    AliasNotFound(String),

    /// Host record not found
    #[error("Host not found: {0}")]
    HostNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::UnsupportedScheme { .. }
            | Error::InvalidArgument { .. }
            | Error::InvalidValue(_) => 2, // UsageError
            Error::HostConfigLookup { .. }
            | Error::AliasNotFound(_)
            | Error::HostNotFound(_) => 5, // NotFound
            Error::ConfigExists { .. } => 6, // Conflict
            _ => 1,                          // GeneralError
        }
    }

    /// Whether a failure stops the whole invocation or only its own target
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Error::ClientInit { .. } | Error::Remote { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        let path = PathBuf::from("/tmp/config.toml");
        assert_eq!(Error::ConfigMissing { path: path.clone() }.exit_code(), 1);
        assert_eq!(
            Error::UnsupportedScheme {
                url: "ftp://host".into()
            }
            .exit_code(),
            2
        );
        assert_eq!(
            Error::InvalidArgument {
                arg: "".into(),
                reason: "empty".into()
            }
            .exit_code(),
            2
        );
        assert_eq!(
            Error::HostConfigLookup {
                url: "https://x/b".into(),
                path: path.clone(),
                reason: "no match".into()
            }
            .exit_code(),
            5
        );
        assert_eq!(Error::AliasNotFound("x".into()).exit_code(), 5);
        assert_eq!(Error::ConfigExists { path }.exit_code(), 6);
        assert_eq!(Error::General("test".into()).exit_code(), 1);
    }

    #[test]
    fn test_fatal_classification() {
        assert!(
            Error::UnsupportedScheme {
                url: "ftp://host".into()
            }
            .is_fatal()
        );
        assert!(
            !Error::ClientInit {
                url: "https://x".into(),
                reason: "no bucket".into()
            }
            .is_fatal()
        );
        assert!(
            !Error::Remote {
                url: "https://x/b".into(),
                source: "boom".into()
            }
            .is_fatal()
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedScheme {
            url: "ftp://host/path".into(),
        };
        insta::assert_snapshot!(err.to_string(), @"Unknown type of URL ‘ftp://host/path’");

        let err = Error::ConfigRead {
            path: PathBuf::from("/home/u/.config/mcli/config.toml"),
            source: "expected `=`".into(),
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"Unable to read config file ‘/home/u/.config/mcli/config.toml’"
        );
    }

    #[test]
    fn test_remote_error_keeps_source() {
        use std::error::Error as _;

        let err = Error::Remote {
            url: "https://play.example.com/photos".into(),
            source: "BucketAlreadyOwnedByYou".into(),
        };
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("BucketAlreadyOwnedByYou".to_string())
        );
    }
}
