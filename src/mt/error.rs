use thiserror::Error;

/// Error types for the Machine Translation module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// The provider could not translate the text (bad response, limits, language pair)
    #[error("Translation error: {0}")]
    TranslationError(String),
    /// Transport failure while talking to the provider
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Provider misconfiguration (missing key, rejected credentials)
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Locale code that cannot be sent to a provider
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        // The URL may carry credentials or the full query text
        let err = err.without_url();
        if err.is_timeout() {
            MtError::NetworkError(format!("Request timed out: {}", err))
        } else if err.is_decode() {
            MtError::TranslationError(format!("Failed to decode response: {}", err))
        } else {
            MtError::NetworkError(err.to_string())
        }
    }
}

impl MtError {
    /// The provider's message without the variant label
    pub fn message(&self) -> &str {
        match self {
            MtError::TranslationError(msg)
            | MtError::NetworkError(msg)
            | MtError::ConfigError(msg)
            | MtError::InvalidLocale(msg) => msg,
        }
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;
