//! Machine Translation trait and utilities
//!
//! `MachineTranslator` is the seam between the masking pipeline and whatever
//! actually translates the text (Google, a mock, ...). The pipeline only ever
//! hands it masked text, and must not assume the provider keeps tokens intact.
//!
//! # Example
//!
//! ```ignore
//! use latex_translate::mt::{MachineTranslator, provider_from_env};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = provider_from_env()?;
//!     let result = provider.translate("Hello, __LATEX_0__!", "auto", "fr").await?;
//!     println!("{}", result); // "Bonjour, __LATEX_0__ !"
//!     Ok(())
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::google_translate::GoogleTranslateProvider;
use crate::mt::google_web::GoogleWebTranslator;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Source locale asking the provider to detect the language
pub const AUTO_LOCALE: &str = "auto";

/// Generic trait for machine translation providers
///
/// Implementations handle the actual translation work, whether through an API
/// or deterministic logic (Mock). Methods are async to support network I/O.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate a single text string from source to target locale
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `source_locale` - Source language code (`"auto"` to detect)
    /// * `target_locale` - Target language code (e.g., "fr", "zh-CN")
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated text
    /// * `Err(MtError)` - Transport, quota or language-code failure
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String>;

    /// Get the name of this translation provider
    fn provider_name(&self) -> &str;
}

/// Pick a provider based on the environment
///
/// Uses the Cloud Translation API when `GOOGLE_TRANSLATE_API_KEY` is set and
/// the keyless public endpoint otherwise.
pub fn provider_from_env() -> MtResult<Arc<dyn MachineTranslator>> {
    if std::env::var(GoogleTranslateProvider::API_KEY_VAR).is_ok() {
        debug!("using Google Cloud Translation API");
        Ok(Arc::new(GoogleTranslateProvider::from_env()?))
    } else {
        debug!("using keyless Google web endpoint");
        Ok(Arc::new(GoogleWebTranslator::new()?))
    }
}

/// Normalize a locale code for Google's translation services
///
/// - `en-US` → `en`
/// - `pt_BR` → `pt`
/// - `zh-cn` → `zh-CN`, `zh-Hans` → `zh-CN`, `zh-Hant` → `zh-TW`
/// - `AUTO` → `auto`
///
/// Google distinguishes Chinese scripts, so those keep their region.
pub fn normalize_locale(locale: &str) -> String {
    let locale = locale.replace('_', "-");
    let mut parts = locale.split('-');
    let language = parts.next().unwrap_or_default().to_lowercase();

    if language == "zh" {
        return match parts.next().map(|p| p.to_lowercase()).as_deref() {
            Some("tw") | Some("hk") | Some("mo") | Some("hant") => "zh-TW".to_string(),
            Some(_) => "zh-CN".to_string(),
            None => language,
        };
    }

    language
}

/// Validate that a locale code is in acceptable format
///
/// Checks that the locale code contains only alphanumeric characters,
/// hyphens, and underscores (following ISO 639 conventions).
pub fn validate_locale(locale: &str) -> MtResult<()> {
    if locale.is_empty() {
        return Err(MtError::InvalidLocale("Locale code is empty".to_string()));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MtError::InvalidLocale(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale_with_region() {
        assert_eq!(normalize_locale("en-US"), "en");
        assert_eq!(normalize_locale("en-GB"), "en");
        assert_eq!(normalize_locale("fr-FR"), "fr");
        assert_eq!(normalize_locale("pt_BR"), "pt");
    }

    #[test]
    fn test_normalize_locale_chinese_keeps_script() {
        assert_eq!(normalize_locale("zh-Hans"), "zh-CN");
        assert_eq!(normalize_locale("zh-Hant"), "zh-TW");
        assert_eq!(normalize_locale("zh-cn"), "zh-CN");
        assert_eq!(normalize_locale("zh_TW"), "zh-TW");
        assert_eq!(normalize_locale("zh"), "zh");
    }

    #[test]
    fn test_normalize_locale_already_simple() {
        assert_eq!(normalize_locale("en"), "en");
        assert_eq!(normalize_locale("hi"), "hi");
        assert_eq!(normalize_locale("auto"), "auto");
    }

    #[test]
    fn test_normalize_locale_case_insensitive() {
        assert_eq!(normalize_locale("EN"), "en");
        assert_eq!(normalize_locale("EN-US"), "en");
        assert_eq!(normalize_locale("AUTO"), "auto");
    }

    #[test]
    fn test_validate_locale_valid_codes() {
        assert!(validate_locale("en").is_ok());
        assert!(validate_locale("auto").is_ok());
        assert!(validate_locale("en-US").is_ok());
        assert!(validate_locale("zh-Hans").is_ok());
        assert!(validate_locale("de_DE").is_ok());
    }

    #[test]
    fn test_validate_locale_invalid_codes() {
        assert!(validate_locale("").is_err());
        assert!(validate_locale("en@invalid").is_err());
        assert!(validate_locale("fr#bad").is_err());
        assert!(validate_locale("es es").is_err());
    }

    #[test]
    fn test_validate_locale_error_messages() {
        match validate_locale("en@US") {
            Err(MtError::InvalidLocale(msg)) => {
                assert!(msg.contains("Invalid characters"));
            }
            _ => panic!("Expected InvalidLocale error"),
        }
    }
}
