//! Configuration management
//!
//! This module handles loading, saving, and migrating the dpath configuration file.
//! The configuration file is stored in TOML format at ~/.config/dpath/config.toml,
//! or under `$DPATH_CONFIG_DIR` when that variable is set.
//!
//! Changes to schema_version require migration support.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::encoding::TextEncoding;
use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "DPATH_CONFIG_DIR";

/// Google Cloud Storage XML API (S3-interoperable)
const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";

/// GCS ignores the region for signing purposes but the SDK requires one
const DEFAULT_REGION: &str = "auto";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,

    /// Object-storage connection settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Default settings for text operations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    /// Encoding used when a command does not name one
    #[serde(default)]
    pub encoding: TextEncoding,
}

/// Connection settings for the object-storage client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Signing region
    #[serde(default = "default_region")]
    pub region: String,

    /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`
    #[serde(default = "default_true")]
    pub force_path_style: bool,

    /// HMAC access key; the SDK default credential chain is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    /// HMAC secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    /// Timeout configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<TimeoutConfig>,
}

/// Timeouts applied by the object-storage client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_ms: u64,

    /// Whole-operation timeout in milliseconds
    #[serde(default = "default_operation_timeout")]
    pub operation_ms: u64,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_true() -> bool {
    true
}

fn default_connect_timeout() -> u64 {
    5000
}

fn default_operation_timeout() -> u64 {
    30000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            region: default_region(),
            force_path_style: true,
            access_key: None,
            secret_key: None,
            timeout: None,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: default_connect_timeout(),
            operation_ms: default_operation_timeout(),
        }
    }
}

impl StorageConfig {
    /// Get the effective timeout configuration
    pub fn timeout_config(&self) -> TimeoutConfig {
        self.timeout.clone().unwrap_or_default()
    }

    /// Static credentials, if both halves are configured
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key, &self.secret_key) {
            (Some(access), Some(secret)) => Some((access.as_str(), secret.as_str())),
            _ => None,
        }
    }

    /// Check the settings for mistakes the client would only report later
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Endpoint must use http or https: {}",
                self.endpoint
            )));
        }

        if self.access_key.is_some() != self.secret_key.is_some() {
            return Err(Error::Config(
                "access_key and secret_key must be set together".into(),
            ));
        }

        Ok(())
    }
}

/// Configuration manager handles loading and saving config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("dpath"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    /// If the schema version doesn't match, attempts migration.
    /// Storage settings are checked when the client is built, not here.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        if config.schema_version < SCHEMA_VERSION {
            config = self.migrate(config)?;
        } else if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade dpath.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(config)
    }

    /// Save configuration to disk
    ///
    /// Creates parent directories if they don't exist.
    /// Sets file permissions to 600 (owner read/write only) since it may hold keys.
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

    /// Migrate configuration from older schema version
    fn migrate(&self, config: Config) -> Result<Config> {
        let mut config = config;
        tracing::warn!(
            from = config.schema_version,
            to = SCHEMA_VERSION,
            "migrating configuration schema"
        );
        config.schema_version = SCHEMA_VERSION;
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
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert_eq!(config.defaults.encoding, TextEncoding::Utf8);
        assert_eq!(config.storage.endpoint, "https://storage.googleapis.com");
        assert!(config.storage.force_path_style);
        assert!(config.storage.static_credentials().is_none());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let (manager, _temp_dir) = temp_config_manager();
        let config = manager.load().unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_save_and_load() {
        let (manager, _temp_dir) = temp_config_manager();

        let mut config = Config::default();
        config.defaults.encoding = TextEncoding::Latin1;
        config.storage.endpoint = "http://localhost:4443".to_string();
        config.storage.access_key = Some("GOOG1EXAMPLE".to_string());
        config.storage.secret_key = Some("secret".to_string());
        config.storage.timeout = Some(TimeoutConfig {
            connect_ms: 1000,
            operation_ms: 2000,
        });

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.defaults.encoding, TextEncoding::Latin1);
        assert_eq!(loaded.storage.endpoint, "http://localhost:4443");
        assert_eq!(
            loaded.storage.static_credentials(),
            Some(("GOOG1EXAMPLE", "secret"))
        );
        assert_eq!(loaded.storage.timeout_config().operation_ms, 2000);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            "schema_version = 1\n[defaults]\nencoding = \"ascii\"\n",
        )
        .unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.defaults.encoding, TextEncoding::Ascii);
        assert_eq!(config.storage.region, "auto");
        assert_eq!(config.storage.timeout_config(), TimeoutConfig::default());
    }

    #[test]
    fn test_schema_version_too_new() {
        let (manager, _temp_dir) = temp_config_manager();

        let content = format!(
            r#"
            schema_version = {}
            "#,
            SCHEMA_VERSION + 1
        );
        std::fs::write(manager.config_path(), content).unwrap();

        let result = manager.load();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("newer than supported")
        );
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(manager.config_path(), "[defaults]\nencoding = \"ebcdic\"\n").unwrap();

        assert!(manager.load().is_err());
    }

    #[test]
    fn test_load_keeps_unchecked_storage_settings() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            "[storage]\nendpoint = \"ftp://example.com\"\n",
        )
        .unwrap();

        let config = manager.load().unwrap();
        assert!(matches!(config.storage.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_endpoint() {
        let mut storage = StorageConfig::default();
        assert!(storage.validate().is_ok());

        storage.endpoint = "not a url".to_string();
        assert!(matches!(storage.validate(), Err(Error::InvalidUrl(_))));

        storage.endpoint = "ftp://example.com".to_string();
        assert!(matches!(storage.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_half_credentials() {
        let storage = StorageConfig {
            access_key: Some("key".to_string()),
            ..Default::default()
        };
        assert!(matches!(storage.validate(), Err(Error::Config(_))));
    }
}
