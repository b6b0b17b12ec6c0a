use thiserror::Error;

#[derive(Debug, Error)]
pub enum StratusError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to read config file at {0}: {1}")]
    ConfigRead(std::path::PathBuf, std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Authentication failed for {0}: {1}")]
    AuthenticationFailed(String, String),

    #[error("Provider error from {0}: {1}")]
    ProviderError(String, String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Invalid port range \"{0}\": {1}")]
    InvalidPortRange(String, String),

    #[error("Failed to translate {0}: {1}")]
    TranslationFailed(String, String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    #[error("{0}")]
    Other(String),
}

impl StratusError {
    pub fn auth(account: impl Into<String>, reason: impl Into<String>) -> Self {
        StratusError::AuthenticationFailed(account.into(), reason.into())
    }

    pub fn provider(name: impl Into<String>, reason: impl Into<String>) -> Self {
        StratusError::ProviderError(name.into(), reason.into())
    }

    pub fn unsupported(reason: impl Into<String>) -> Self {
        StratusError::UnsupportedOperation(reason.into())
    }

    pub fn translation(what: impl Into<String>, reason: impl Into<String>) -> Self {
        StratusError::TranslationFailed(what.into(), reason.into())
    }

    /// True for failures the transport reported as a rejected credential.
    /// The provider uses this to evict the cached token before propagating.
    pub fn is_auth(&self) -> bool {
        matches!(self, StratusError::AuthenticationFailed(_, _))
    }
}

pub type Result<T> = std::result::Result<T, StratusError>;
