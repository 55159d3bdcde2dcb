//! CLI configuration.

use std::collections::HashMap;

use anyhow::{Context, Result};
use ipswich_commerce::Currency;
use ipswich_observability::LoggingConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Store configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentConfig>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Get environment-specific config. Unknown environments are an error.
    pub fn for_environment(&self, env: &str) -> Result<CliConfig> {
        let env_config = self
            .environments
            .get(env)
            .with_context(|| format!("No [environments.{}] section in config", env))?;

        let mut config = self.clone();
        if let Some(ref store) = env_config.store {
            config.store = store.clone();
        }
        if let Some(logging) = env_config.logging {
            config.logging = logging;
        }
        Ok(config)
    }
}

/// Store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Shop name shown in headers.
    #[serde(default = "default_name")]
    pub name: String,

    /// Currency for new products and carts.
    #[serde(default)]
    pub currency: Currency,

    /// Snapshot file of the store database.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// File holding session carts.
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

fn default_name() -> String {
    "Ipswich Retail".to_string()
}

fn default_data_file() -> String {
    ".ipswich/store.json".to_string()
}

fn default_session_file() -> String {
    ".ipswich/sessions.json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            currency: Currency::default(),
            data_file: default_data_file(),
            session_file: default_session_file(),
        }
    }
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Store config override.
    #[serde(default)]
    pub store: Option<StoreConfig>,

    /// Logging config override.
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

/// Generate a default ipswich.toml config file.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# Ipswich Retail storefront configuration

[store]
name = "{name}"
currency = "GBP"
data_file = ".ipswich/store.json"
session_file = ".ipswich/sessions.json"

[logging]
level = "warn"
format = "human"

[environments.test]
[environments.test.store]
name = "{name} (test)"
currency = "GBP"
data_file = ".ipswich/test/store.json"
session_file = ".ipswich/test/sessions.json"

[environments.test.logging]
level = "debug"
format = "json"
"#,
        name = name
    )
}
