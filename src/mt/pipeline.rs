//! Protected translation pipeline: mask → translate → restore
//!
//! [`translate_protected`] is the user-facing entry point. It never fails:
//! provider errors come back as an `"Error: <message>"` string. Use
//! [`translate_with_outcome`] to get the intermediate masked text and the
//! restoration report instead.

use crate::mt::error::MtResult;
use crate::mt::masking::{MaskedText, mask};
use crate::mt::restoration::{RestorationReport, restore_with_report};
use crate::mt::translator::MachineTranslator;
use tracing::{debug, warn};

/// Default source locale: let the provider detect the language
pub const DEFAULT_SOURCE: &str = "auto";

/// Default target locale
pub const DEFAULT_TARGET: &str = "en";

/// Everything produced while translating one text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationOutcome {
    /// Input after masking, with the collected spans
    pub masked: MaskedText,
    /// Raw provider output, tokens still in place
    pub translated_text: String,
    /// Final text plus restoration diagnostics
    pub restoration: RestorationReport,
}

impl TranslationOutcome {
    /// The restored translation
    pub fn text(&self) -> &str {
        &self.restoration.restored_text
    }
}

/// Mask, translate and restore `text`
///
/// Blank input returns an empty outcome without calling the provider.
/// Provider failures are returned as-is; there is no retry.
pub async fn translate_with_outcome(
    translator: &dyn MachineTranslator,
    text: &str,
    source_locale: &str,
    target_locale: &str,
) -> MtResult<TranslationOutcome> {
    if text.trim().is_empty() {
        return Ok(TranslationOutcome::default());
    }

    let masked = mask(text);
    debug!(
        provider = translator.provider_name(),
        spans = masked.span_count(),
        "translating masked text"
    );

    let translated_text = translator
        .translate(&masked.text, source_locale, target_locale)
        .await?;

    let restoration = restore_with_report(&translated_text, &masked.spans);

    Ok(TranslationOutcome {
        masked,
        translated_text,
        restoration,
    })
}

/// Translate `text` while keeping its markup verbatim
///
/// Returns `""` for blank input and `"Error: <message>"` when the provider
/// fails.
pub async fn translate_protected(
    translator: &dyn MachineTranslator,
    text: &str,
    source_locale: &str,
    target_locale: &str,
) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    match translate_with_outcome(translator, text, source_locale, target_locale).await {
        Ok(outcome) => outcome.restoration.restored_text,
        Err(e) => {
            warn!(provider = translator.provider_name(), "translation failed: {}", e);
            format!("Error: {}", e.message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::mock::{MockMode, MockTranslator};

    const EXAMPLE: &str = r"Compute \(x^2 + y^2\) and see $E=mc^2$.";

    #[tokio::test]
    async fn test_identity_round_trip() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let result = translate_protected(&mock, EXAMPLE, "auto", "en").await;
        assert_eq!(result, EXAMPLE);
    }

    #[tokio::test]
    async fn test_outcome_exposes_masked_text() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let outcome = translate_with_outcome(&mock, EXAMPLE, "auto", "fr")
            .await
            .unwrap();
        assert_eq!(outcome.masked.text, "Compute __LATEX_0__ and see __LATEX_1__.");
        assert_eq!(outcome.masked.spans[0].original_text, r"\(x^2 + y^2\)");
        assert_eq!(outcome.masked.spans[1].original_text, "$E=mc^2$");
        assert_eq!(outcome.translated_text, outcome.masked.text);
        assert_eq!(outcome.text(), EXAMPLE);
        assert!(outcome.restoration.is_clean());
    }

    #[tokio::test]
    async fn test_blank_input_skips_provider() {
        let mock = MockTranslator::new(MockMode::Suffix);
        assert_eq!(translate_protected(&mock, "", "auto", "en").await, "");
        assert_eq!(translate_protected(&mock, "  \n ", "auto", "en").await, "");
        let outcome = translate_with_outcome(&mock, "\t", "auto", "en").await.unwrap();
        assert_eq!(outcome, TranslationOutcome::default());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_error_rendered_as_string() {
        let mock = MockTranslator::new(MockMode::Error("quota exceeded".to_string()));
        let result = translate_protected(&mock, "Hello $x$", "auto", "de").await;
        assert_eq!(result, "Error: quota exceeded");
    }

    #[tokio::test]
    async fn test_provider_error_propagates_from_outcome() {
        let mock = MockTranslator::new(MockMode::Error("down".to_string()));
        assert!(translate_with_outcome(&mock, "Hello", "auto", "de").await.is_err());
    }

    #[tokio::test]
    async fn test_provider_called_once_per_request() {
        let mock = MockTranslator::new(MockMode::NoOp);
        translate_protected(&mock, "a $b$ c", "auto", "en").await;
        assert_eq!(mock.call_count(), 1);
    }
}
