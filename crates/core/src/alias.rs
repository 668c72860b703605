//! Alias management
//!
//! Aliases are short names that expand to a URL prefix, so `play/photos`
//! can stand for `https://play.minio.io:9000/photos`.

use std::collections::BTreeMap;

use crate::config::ConfigManager;
use crate::error::{Error, Result};
use crate::path::{TargetUrl, resolve};

/// Manager for alias operations
pub struct AliasManager {
    config_manager: ConfigManager,
}

impl AliasManager {
    /// Create a new AliasManager with a specific ConfigManager
    pub fn with_config_manager(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// List all configured aliases
    pub fn list(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.config_manager.load()?.aliases)
    }

    /// Get the URL prefix of an alias
    pub fn get(&self, name: &str) -> Result<String> {
        self.config_manager
            .load()?
            .aliases
            .remove(name)
            .ok_or_else(|| Error::AliasNotFound(name.to_string()))
    }

    /// Add or update an alias
    ///
    /// The prefix must be an absolute URL with a scheme that has a client.
    pub fn set(&self, name: &str, prefix: &str) -> Result<()> {
        if !is_valid_alias_name(name) {
            return Err(Error::InvalidValue(format!(
                "alias name ‘{name}’ may only contain letters, digits, '_' and '-'"
            )));
        }
        match resolve(prefix, &BTreeMap::new()) {
            Ok(TargetUrl::Remote(_)) => {}
            Ok(TargetUrl::Local(_)) => {
                return Err(Error::InvalidValue(format!(
                    "alias URL ‘{prefix}’ must be an absolute http or https URL"
                )));
            }
            Err(e) => return Err(Error::InvalidValue(e.to_string())),
        }

        let mut config = self.config_manager.load()?;
        config.aliases.insert(name.to_string(), prefix.to_string());
        self.config_manager.save(&config)
    }

    /// Remove an alias
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut config = self.config_manager.load()?;
        if config.aliases.remove(name).is_none() {
            return Err(Error::AliasNotFound(name.to_string()));
        }
        self.config_manager.save(&config)
    }
}

/// Check if a string is a valid alias name
pub fn is_valid_alias_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
