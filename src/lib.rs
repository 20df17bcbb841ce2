//! Translation of text with embedded LaTeX markup
//!
//! Math (`$...$`, `\(...\)`, `\[...\]`), commands (`\textbf{...}`) and image
//! directives (`\includegraphics{...}`) are masked before the text is sent to
//! a machine translation provider and restored verbatim afterwards.
//!
//! ```ignore
//! use latex_translate::mt::{MockMode, MockTranslator, translate_protected};
//!
//! let mock = MockTranslator::new(MockMode::NoOp);
//! let text = r"Compute \(x^2 + y^2\) and see $E=mc^2$.";
//! assert_eq!(translate_protected(&mock, text, "auto", "en").await, text);
//! ```

pub mod input;
pub mod mt;

pub use input::{InputError, TranslationRequest};
pub use mt::{
    MachineTranslator, MtError, MtResult, provider_from_env, translate_protected,
    translate_with_outcome,
};
