use crate::error::{Result, StratusError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StratusConfig {
    #[serde(default)]
    pub providers: ProviderConfigs,
}

impl StratusConfig {
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                return Self::from_file(&config_path);
            }
        }

        Self::from_env()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| StratusError::ConfigRead(path.to_path_buf(), e))?;

        toml::from_str(&contents).map_err(StratusError::ConfigParse)
    }

    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(account) = std::env::var("STRATUS_BRIGHTBOX_ACCOUNT") {
            config
                .providers
                .brightbox
                .get_or_insert_with(BrightboxConfig::default)
                .account = account;
        }

        if let Ok(endpoint) = std::env::var("STRATUS_BRIGHTBOX_ENDPOINT") {
            config
                .providers
                .brightbox
                .get_or_insert_with(BrightboxConfig::default)
                .endpoint = endpoint;
        }

        if let Ok(client_id) = std::env::var("STRATUS_BRIGHTBOX_CLIENT_ID") {
            config
                .providers
                .brightbox
                .get_or_insert_with(BrightboxConfig::default)
                .client_id = Some(client_id);
        }

        if let Ok(client_secret) = std::env::var("STRATUS_BRIGHTBOX_CLIENT_SECRET") {
            config
                .providers
                .brightbox
                .get_or_insert_with(BrightboxConfig::default)
                .client_secret = Some(client_secret);
        }

        Ok(config)
    }

    pub fn merge(mut self, other: Self) -> Self {
        if other.providers.brightbox.is_some() {
            self.providers.brightbox = other.providers.brightbox;
        }

        self
    }

    pub fn validate(&self) -> Result<()> {
        let Some(brightbox) = &self.providers.brightbox else {
            return Err(StratusError::ConfigError(
                "At least one cloud provider must be configured".to_string(),
            ));
        };

        if brightbox.account.is_empty() {
            return Err(StratusError::MissingConfig("brightbox.account".to_string()));
        }
        if brightbox.client_id.is_none() || brightbox.client_secret.is_none() {
            return Err(StratusError::MissingConfig(
                "brightbox.client_id / brightbox.client_secret".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| StratusError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_file_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".stratus").join("config.toml"))
    }

    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".stratus"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderConfigs {
    pub brightbox: Option<BrightboxConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrightboxConfig {
    /// Account identifier the adapter operates on, e.g. "acc-43ks4".
    pub account: String,
    /// API endpoint, one per region.
    pub endpoint: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl Default for BrightboxConfig {
    fn default() -> Self {
        Self {
            account: String::new(),
            endpoint: "https://api.gb1.brightbox.com".to_string(),
            client_id: None,
            client_secret: None,
        }
    }
}
