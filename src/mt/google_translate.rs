//! Google Cloud Translation API (v2) provider
//!
//! The provider loads the API key from the `GOOGLE_TRANSLATE_API_KEY`
//! environment variable. Obtain a key from:
//! https://console.cloud.google.com/
//!
//! A source locale of `"auto"` omits the `source` field so the API detects
//! the language itself.

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{AUTO_LOCALE, MachineTranslator, normalize_locale, validate_locale};
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

/// Google Translate API v2 provider
#[derive(Clone)]
pub struct GoogleTranslateProvider {
    /// API key for authentication
    api_key: String,
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Base URL for Google Translate API
    base_url: String,
}

impl GoogleTranslateProvider {
    /// Environment variable holding the API key
    pub const API_KEY_VAR: &'static str = "GOOGLE_TRANSLATE_API_KEY";

    /// Maximum characters per string (Google Translate API limit)
    const MAX_CHARS_PER_STRING: usize = 30_000;

    /// Create a new GoogleTranslateProvider with an explicit API key
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(MtError)` - If API key is empty or HTTP client creation fails
    pub fn new(api_key: String) -> MtResult<Self> {
        if api_key.trim().is_empty() {
            return Err(MtError::ConfigError("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            client,
            base_url: "https://translation.googleapis.com/language/translate/v2".to_string(),
        })
    }

    /// Create a GoogleTranslateProvider from the `GOOGLE_TRANSLATE_API_KEY` environment variable
    pub fn from_env() -> MtResult<Self> {
        let api_key = std::env::var(Self::API_KEY_VAR).map_err(|_| {
            MtError::ConfigError(format!("{} environment variable not set", Self::API_KEY_VAR))
        })?;

        Self::new(api_key)
    }

    /// Build the JSON request body
    fn request_body(text: &str, source_locale: &str, target_locale: &str) -> serde_json::Value {
        let mut body = json!({
            "q": [text],
            "target": normalize_locale(target_locale),
            "format": "text"
        });

        let source = normalize_locale(source_locale);
        if source != AUTO_LOCALE {
            body["source"] = json!(source);
        }

        body
    }

    /// Extract the translated text from a v2 response body
    fn parse_response(json: &serde_json::Value) -> MtResult<String> {
        let translations = json["data"]["translations"].as_array().ok_or_else(|| {
            MtError::TranslationError(
                "Invalid API response: missing 'data.translations' array".to_string(),
            )
        })?;

        translations
            .first()
            .and_then(|t| t["translatedText"].as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                MtError::TranslationError(
                    "Invalid API response: missing 'translatedText' field".to_string(),
                )
            })
    }
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for GoogleTranslateProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        if text.is_empty() {
            return Ok(String::new());
        }

        if text.chars().count() > Self::MAX_CHARS_PER_STRING {
            return Err(MtError::TranslationError(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS_PER_STRING
            )));
        }

        let body = Self::request_body(text, source_locale, target_locale);

        debug!(
            chars = text.len(),
            source = source_locale,
            target = target_locale,
            "calling Cloud Translation API"
        );

        // Key goes in a header: request errors echo the URL back to the caller
        let response = self
            .client
            .post(&self.base_url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(if status.is_client_error() {
                MtError::ConfigError(format!("API client error ({}): {}", status, error_text))
            } else {
                MtError::TranslationError(format!("API server error ({}): {}", status, error_text))
            });
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            MtError::TranslationError(format!("Failed to parse API response: {}", e))
        })?;

        Self::parse_response(&json)
    }

    fn provider_name(&self) -> &str {
        "Google Translate"
    }
}
