//! # Application Configuration
//!
//! Where the order store lives and which pricing tables to use.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults          built-in catalog + financing, platform data dir  │
//! │  2. Config file       --config / ETERNO_CONFIG / platform config dir   │
//! │  3. Environment       ETERNO_DB_PATH                                   │
//! │  4. validate()        pricing tables checked once, then read-only      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example File
//! ```toml
//! [database]
//! path = "/var/lib/eterno/eterno.db"
//!
//! [[pricing.products]]
//! name = "Large"
//! dimensions = "94 x 152 cm"
//! price = 1575000
//!
//! [pricing.products.costs]
//! framing = 199000
//! printing = 88700
//!
//! [[pricing.financing]]
//! installments = 3
//! rate_bps = 575
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use eterno_core::{CoreError, PricingConfig};

/// Environment variable naming the database file.
pub const ENV_DB_PATH: &str = "ETERNO_DB_PATH";

/// Environment variable naming the config file.
pub const ENV_CONFIG: &str = "ETERNO_CONFIG";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Pricing(#[from] CoreError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. Created on first use.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

fn default_db_path() -> PathBuf {
    directories::ProjectDirs::from("com", "eterno", "eterno")
        .map(|dirs| dirs.data_dir().join("eterno.db"))
        .unwrap_or_else(|| PathBuf::from("eterno.db"))
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
        }
    }
}

/// Everything the CLI needs at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Catalog and financing tables; built-in tables when absent.
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` must exist. The platform default path is
    /// optional: when missing, defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file without applying overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path is empty".into()));
        }

        self.pricing.validate()?;
        Ok(())
    }

    /// Applies environment variable overrides read through `var`.
    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var(ENV_DB_PATH) {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "eterno", "eterno")
            .map(|dirs| dirs.config_dir().join("eterno.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pricing, PricingConfig::default());
        assert!(config.database.path.ends_with("eterno.db"));
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
            [database]
            path = "/tmp/studio.db"

            [[pricing.financing]]
            installments = 18
            rate_bps = 1100
            "#,
        );

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database.path, PathBuf::from("/tmp/studio.db"));
        assert_eq!(config.pricing.financing.rate(18).bps(), 1100);
        // products section absent: built-in catalog
        assert!(config.pricing.products.get("Small").is_some());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("[database]\n");
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_env_override_wins_over_file() {
        let file = write_config("[database]\npath = \"/tmp/from-file.db\"\n");
        let mut config = AppConfig::from_file(file.path()).unwrap();

        config.apply_env_overrides(|key| {
            (key == ENV_DB_PATH).then(|| "/tmp/from-env.db".to_string())
        });

        assert_eq!(config.database.path, PathBuf::from("/tmp/from-env.db"));
    }

    #[test]
    fn test_invalid_pricing_rejected() {
        let file = write_config(
            r#"
            [[pricing.financing]]
            installments = 0
            rate_bps = 100
            "#,
        );
        let config = AppConfig::from_file(file.path()).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Pricing(CoreError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = AppConfig::load(Some(PathBuf::from("/nonexistent/eterno.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let file = write_config("[database\npath = 3");
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
