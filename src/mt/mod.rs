/// Machine Translation Module
///
/// Translates text with embedded LaTeX markup while keeping the markup
/// verbatim. Protected spans are swapped for opaque tokens before the text
/// reaches the provider and swapped back afterwards, even when the provider
/// changes the tokens' case or spacing.
///
/// # Overview
///
/// 1. **Pattern Rules** - Ordered regexes recognizing images, math and commands
/// 2. **Masking Engine** - Replaces protected spans with `__LATEX_<n>__` tokens
/// 3. **MT Trait & Providers** - Google (keyless web endpoint or Cloud API) and a mock
/// 4. **Restoration Engine** - Finds possibly mangled tokens and restores the markup
/// 5. **Pipeline** - Orchestrates the three steps and renders failures as strings
///
/// # Example
///
/// ```ignore
/// use latex_translate::mt::{provider_from_env, translate_protected};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let provider = provider_from_env()?;
///     let text = r"Calcule \(x^2 + y^2\) et $E=mc^2$.";
///     let translated = translate_protected(provider.as_ref(), text, "fr", "en").await;
///     println!("{}", translated);
///     Ok(())
/// }
/// ```
pub mod error;
pub mod google_translate;
pub mod google_web;
pub mod masking;
pub mod mock;
pub mod pipeline;
pub mod restoration;
pub mod rules;
pub mod translator;


pub use error::{MtError, MtResult};
pub use google_translate::GoogleTranslateProvider;
pub use google_web::GoogleWebTranslator;
pub use masking::{MaskedText, ProtectedSpan, SpanCollector, mask, mask_with_rules};
pub use mock::{MockMode, MockTranslator};
pub use pipeline::{
    DEFAULT_SOURCE, DEFAULT_TARGET, TranslationOutcome, translate_protected,
    translate_with_outcome,
};
pub use restoration::{RestorationReport, restore, restore_with_report};
pub use rules::{PatternRule, RuleKind, pattern_rules};
pub use translator::{MachineTranslator, normalize_locale, provider_from_env, validate_locale};
