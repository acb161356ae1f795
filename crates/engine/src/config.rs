//! Data directory configuration via `ferry.toml`
//!
//! On first open a default `ferry.toml` is written into the data directory.
//! To change settings, edit the file and restart the console.

use std::path::{Path, PathBuf};

use ferry_storage::{StoreConfig, SyncMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file name placed in the data directory.
pub const CONFIG_FILE_NAME: &str = "ferry.toml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but cannot be read or written
    #[error("cannot access config file {}: {source}", .path.display())]
    Io {
        /// Config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `FerryConfig`
    #[error("cannot parse config file {}: {message}", .path.display())]
    Parse {
        /// Config file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// `sync` is neither "always" nor "never"
    #[error("invalid sync mode '{0}', expected \"always\" or \"never\"")]
    InvalidSync(String),
}

/// Settings loaded from `ferry.toml`.
///
/// ```toml
/// # "always" = fsync after every record write (default)
/// # "never"  = leave flushing to the operating system
/// sync = "always"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FerryConfig {
    /// Sync mode: `"always"` or `"never"`
    #[serde(default = "default_sync")]
    pub sync: String,
}

fn default_sync() -> String {
    "always".to_string()
}

impl Default for FerryConfig {
    fn default() -> Self {
        FerryConfig {
            sync: default_sync(),
        }
    }
}

impl FerryConfig {
    /// Parse the `sync` string.
    pub fn sync_mode(&self) -> Result<SyncMode, ConfigError> {
        match self.sync.as_str() {
            "always" => Ok(SyncMode::Always),
            "never" => Ok(SyncMode::Never),
            other => Err(ConfigError::InvalidSync(other.to_string())),
        }
    }

    /// Store configuration derived from this file.
    pub fn store_config(&self) -> Result<StoreConfig, ConfigError> {
        Ok(StoreConfig::new().with_sync(self.sync_mode()?))
    }

    /// Default file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# ferrydb data directory configuration
#
# Sync mode: "always" (default) or "never"
#   "always" = fsync after every record write, truncate and rewrite
#   "never"  = leave flushing to the operating system
sync = "always"
"#
    }

    /// Read and parse config from `path`, validating the sync mode.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: FerryConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.sync_mode()?;
        Ok(config)
    }

    /// Write the default config file unless one already exists.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Load `ferry.toml` from `dir`, creating the default first if missing.
    pub fn load_or_create(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        Self::write_default_if_missing(&path)?;
        Self::from_file(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_syncs() {
        let config = FerryConfig::default();
        assert_eq!(config.sync_mode().unwrap(), SyncMode::Always);
    }

    #[test]
    fn parse_never() {
        let config: FerryConfig = toml::from_str("sync = \"never\"").unwrap();
        assert_eq!(config.sync_mode().unwrap(), SyncMode::Never);
        assert_eq!(config.store_config().unwrap().sync, SyncMode::Never);
    }

    #[test]
    fn missing_key_uses_default() {
        let config: FerryConfig = toml::from_str("").unwrap();
        assert_eq!(config.sync, "always");
    }

    #[test]
    fn invalid_mode_rejected() {
        let config: FerryConfig = toml::from_str("sync = \"sometimes\"").unwrap();
        assert!(matches!(
            config.sync_mode(),
            Err(ConfigError::InvalidSync(mode)) if mode == "sometimes"
        ));
    }

    #[test]
    fn default_toml_parses() {
        let config: FerryConfig = toml::from_str(FerryConfig::default_toml()).unwrap();
        assert_eq!(config, FerryConfig::default());
    }

    #[test]
    fn load_or_create_writes_default() {
        let dir = TempDir::new().unwrap();
        let config = FerryConfig::load_or_create(dir.path()).unwrap();
        assert_eq!(config.sync, "always");
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn load_or_create_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "sync = \"never\"\n").unwrap();

        let config = FerryConfig::load_or_create(dir.path()).unwrap();
        assert_eq!(config.sync_mode().unwrap(), SyncMode::Never);
    }

    #[test]
    fn from_file_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "sync = [").unwrap();
        assert!(matches!(
            FerryConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
