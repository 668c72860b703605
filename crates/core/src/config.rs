//! Configuration management
//!
//! This module handles loading and saving the mcli configuration file.
//! The configuration file is stored in TOML format at ~/.config/mcli/config.toml,
//! or under `$MCLI_CONFIG_DIR` when that variable is set.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::host::HostConfig;

/// Current configuration file version
pub const CONFIG_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "MCLI_CONFIG_DIR";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Public credentials of the MinIO playground
const PLAY_ACCESS_KEY: &str = "Q3AM3UQ867SPQQA43P2F";
const PLAY_SECRET_KEY: &str = "zuf+tfteSlswRu7BJ86wekitnifILbZam1KYY3TG";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// File version, checked on load
    pub version: u32,

    /// Alias name to URL prefix
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Host pattern to credentials
    #[serde(default)]
    pub hosts: BTreeMap<String, HostConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            aliases: BTreeMap::new(),
            hosts: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Configuration written by `mcli config generate`
    pub fn generated() -> Self {
        let mut config = Self::default();

        for (name, prefix) in [
            ("s3", "https://s3.amazonaws.com"),
            ("play", "https://play.minio.io:9000"),
            ("localhost", "http://localhost:9000"),
        ] {
            config.aliases.insert(name.to_string(), prefix.to_string());
        }

        for pattern in ["*.s3*.amazonaws.com", "s3.amazonaws.com", "localhost:*", "127.0.0.1:*"] {
            config
                .hosts
                .insert(pattern.to_string(), HostConfig::default());
        }
        config.hosts.insert(
            "play.minio.io:9000".to_string(),
            HostConfig::new(PLAY_ACCESS_KEY, PLAY_SECRET_KEY),
        );

        config
    }
}

/// Configuration manager handles loading and saving config
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .ok_or_else(|| Error::General("Could not determine config directory".into()))?
                .join("mcli"),
        };
        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Whether a configuration has been generated
    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Load configuration from disk
    pub fn load(&self) -> Result<Config> {
        if !self.exists() {
            return Err(Error::ConfigMissing {
                path: self.config_path.clone(),
            });
        }

        let read_error = |source: crate::error::BoxError| Error::ConfigRead {
            path: self.config_path.clone(),
            source,
        };

        let content = std::fs::read_to_string(&self.config_path).map_err(|e| read_error(e.into()))?;
        let config: Config = toml::from_str(&content).map_err(|e| read_error(e.into()))?;

        if config.version > CONFIG_VERSION {
            return Err(read_error(
                format!(
                    "configuration version {} is newer than supported version {}",
                    config.version, CONFIG_VERSION
                )
                .into(),
            ));
        }

        tracing::debug!(
            path = %self.config_path.display(),
            aliases = config.aliases.len(),
            hosts = config.hosts.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Save configuration to disk
    ///
    /// Creates parent directories if they don't exist.
    /// Sets file permissions to 600 (owner read/write only).
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.config_path, permissions)?;
        }

        Ok(())
    }

    /// Write the generated default configuration
    pub fn generate(&self, force: bool) -> Result<Config> {
        if self.exists() && !force {
            return Err(Error::ConfigExists {
                path: self.config_path.clone(),
            });
        }
        let config = Config::generated();
        self.save(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let manager = ConfigManager::with_path(config_path);
        (manager, temp_dir)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.aliases.is_empty());
        assert!(config.hosts.is_empty());
    }

    #[test]
    fn test_load_nonexistent_is_missing() {
        let (manager, _temp_dir) = temp_config_manager();
        assert!(!manager.exists());
        let err = manager.load().unwrap_err();
        assert!(matches!(err, Error::ConfigMissing { .. }));
    }

    #[test]
    fn test_generate_and_load() {
        let (manager, _temp_dir) = temp_config_manager();

        manager.generate(false).unwrap();
        assert!(manager.exists());

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.aliases["play"], "https://play.minio.io:9000");
        assert!(loaded.hosts.contains_key("localhost:*"));
        assert_eq!(loaded.hosts["play.minio.io:9000"].access_key, PLAY_ACCESS_KEY);
    }

    #[test]
    fn test_generate_refuses_overwrite() {
        let (manager, _temp_dir) = temp_config_manager();

        manager.generate(false).unwrap();
        let err = manager.generate(false).unwrap_err();
        assert!(matches!(err, Error::ConfigExists { .. }));
        assert!(manager.generate(true).is_ok());
    }

    #[test]
    fn test_load_garbage_is_read_error() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(manager.config_path(), "version = [not toml").unwrap();

        let err = manager.load().unwrap_err();
        match err {
            Error::ConfigRead { path, .. } => assert_eq!(path, manager.config_path()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_directory_at_config_path_is_read_error() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::create_dir(manager.config_path()).unwrap();

        assert!(manager.exists());
        let err = manager.load().unwrap_err();
        match err {
            Error::ConfigRead { path, .. } => assert_eq!(path, manager.config_path()),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = manager.generate(false).unwrap_err();
        assert!(matches!(err, Error::ConfigExists { .. }));
    }

    #[test]
    fn test_version_too_new() {
        let (manager, _temp_dir) = temp_config_manager();

        let content = format!("version = {}\n", CONFIG_VERSION + 1);
        std::fs::write(manager.config_path(), content).unwrap();

        let err = manager.load().unwrap_err();
        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert!(cause.contains("newer than supported"));
    }

    #[test]
    fn test_host_pattern_keys_round_trip() {
        let (manager, _temp_dir) = temp_config_manager();

        let mut config = Config::default();
        config
            .hosts
            .insert("*.s3*.amazonaws.com".into(), HostConfig::new("ak", "sk"));
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.hosts["*.s3*.amazonaws.com"].secret_key, "sk");
        assert_eq!(loaded.hosts["*.s3*.amazonaws.com"].region, "us-east-1");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (manager, _temp_dir) = temp_config_manager();
        manager.save(&Config::default()).unwrap();

        let mode = std::fs::metadata(manager.config_path())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
