//! Keyless Google Translate provider
//!
//! Talks to the public `translate_a/single` endpoint used by the Google
//! Translate web widgets (`client=gtx`). No API key is needed, which makes it
//! the default when `GOOGLE_TRANSLATE_API_KEY` is not set. The endpoint is
//! unofficial and rate limited; failures surface as `MtError`s.

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{MachineTranslator, normalize_locale, validate_locale};
use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Keyless Google Translate provider
#[derive(Debug, Clone)]
pub struct GoogleWebTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleWebTranslator {
    /// The web endpoint rejects longer payloads
    const MAX_CHARS: usize = 5_000;

    pub fn new() -> MtResult<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Point the provider at a different endpoint (proxies, test servers)
    pub fn with_endpoint(endpoint: &str) -> MtResult<Self> {
        Url::parse(endpoint)
            .map_err(|e| MtError::ConfigError(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    fn request_url(&self, text: &str, source_locale: &str, target_locale: &str) -> MtResult<Url> {
        let source = normalize_locale(source_locale);
        let target = normalize_locale(target_locale);
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", source.as_str()),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| MtError::ConfigError(format!("Failed to build request URL: {}", e)))
    }

    /// Join the translated sentence chunks of a `translate_a/single` response
    ///
    /// The body looks like `[[["Bonjour ","Hello ",...],["le monde","world",...]],null,"en",...]`.
    fn parse_response(json: &serde_json::Value) -> MtResult<String> {
        let chunks = match &json[0] {
            serde_json::Value::Null => return Ok(String::new()),
            serde_json::Value::Array(chunks) => chunks,
            _ => {
                return Err(MtError::TranslationError(
                    "Invalid response: expected an array of sentence chunks".to_string(),
                ));
            }
        };

        Ok(chunks
            .iter()
            .filter_map(|chunk| chunk[0].as_str())
            .collect::<String>())
    }
}

#[async_trait]
impl MachineTranslator for GoogleWebTranslator {
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

        if text.chars().count() > Self::MAX_CHARS {
            return Err(MtError::TranslationError(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS
            )));
        }

        let url = self.request_url(text, source_locale, target_locale)?;
        debug!(
            chars = text.len(),
            source = source_locale,
            target = target_locale,
            "calling Google web endpoint"
        );

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(MtError::TranslationError(format!(
                "Request failed ({}): {}",
                status, error_text
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| MtError::TranslationError(format!("Failed to parse response: {}", e)))?;

        Self::parse_response(&json)
    }

    fn provider_name(&self) -> &str {
        "Google Translate (web)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_url_encodes_text() {
        let provider = GoogleWebTranslator::new().unwrap();
        let url = provider
            .request_url("a & b __LATEX_0__", "auto", "zh-Hans")
            .unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("sl".to_string(), "auto".to_string())));
        assert!(pairs.contains(&("tl".to_string(), "zh-CN".to_string())));
        assert!(pairs.contains(&("q".to_string(), "a & b __LATEX_0__".to_string())));
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(matches!(
            GoogleWebTranslator::with_endpoint("not a url"),
            Err(MtError::ConfigError(_))
        ));
    }

    #[test]
    fn test_parse_response_joins_chunks() {
        let json = json!([
            [["Bonjour ", "Hello ", null, null, 10], ["__LATEX_0__ !", "__LATEX_0__!", null, null, 3]],
            null,
            "en"
        ]);
        assert_eq!(
            GoogleWebTranslator::parse_response(&json).unwrap(),
            "Bonjour __LATEX_0__ !"
        );
    }

    #[test]
    fn test_parse_response_null_body() {
        let json = json!([null, null, "en"]);
        assert_eq!(GoogleWebTranslator::parse_response(&json).unwrap(), "");
    }

    #[test]
    fn test_parse_response_unexpected_shape() {
        let json = json!({"error": "blocked"});
        // Indexing an object by position yields Null
        assert_eq!(GoogleWebTranslator::parse_response(&json).unwrap(), "");

        let json = json!(["oops"]);
        assert!(GoogleWebTranslator::parse_response(&json).is_err());
    }

    #[tokio::test]
    async fn test_translate_empty_text() {
        let provider = GoogleWebTranslator::new().unwrap();
        assert_eq!(provider.translate("", "auto", "en").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_translate_rejects_bad_locale() {
        let provider = GoogleWebTranslator::new().unwrap();
        let result = provider.translate("hello", "auto", "e n").await;
        assert!(matches!(result, Err(MtError::InvalidLocale(_))));
    }

    #[tokio::test]
    async fn test_translate_text_too_long() {
        let provider = GoogleWebTranslator::new().unwrap();
        let long_text = "é".repeat(GoogleWebTranslator::MAX_CHARS + 1);
        let result = provider.translate(&long_text, "auto", "en").await;
        assert!(matches!(result, Err(MtError::TranslationError(_))));
    }

    #[tokio::test]
    #[ignore] // Needs network access
    async fn test_real_endpoint_translation() {
        let provider = GoogleWebTranslator::new().unwrap();
        let result = provider
            .translate("Bonjour __LATEX_0__", "fr", "en")
            .await
            .unwrap();
        println!("Translated: {}", result);
        assert!(result.to_lowercase().contains("latex_0"));
    }
}
