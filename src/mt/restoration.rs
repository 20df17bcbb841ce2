//! Restoration of protected spans in translated text
//!
//! MT engines are not token-safe: `__LATEX_0__` may come back as `__Latex_0__`
//! or `__ LATEX_0 __`. Restoration scans for the tolerant token pattern and
//! substitutes the original markup by index.
//!
//! ```ignore
//! Masked:      "Compute __LATEX_0__ and see __LATEX_1__."
//! Translated:  "Calcule __Latex_0__ y mira __LATEX_1__."
//! Restored:    "Calcule \(x^2\) y mira $E=mc^2$."
//! ```
//!
//! Recovery is best effort. A token whose index has no span (the engine
//! invented or mangled it) is left in the output as literal text and reported
//! in the [`RestorationReport`]; it never fails the request.

use super::masking::ProtectedSpan;
use super::rules::token_rule;
use std::collections::BTreeSet;
use tracing::warn;

/// A token found in translated text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedToken {
    /// Parsed index, `None` when the digits do not fit in `usize`
    pub index: Option<usize>,
    /// Byte offset of the token in the text
    pub position: usize,
    /// Byte length of the token as it appears (mangled forms included)
    pub length: usize,
}

/// Outcome of restoring one translated text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestorationReport {
    /// Translated text with every resolvable token replaced
    pub restored_text: String,
    /// Number of token occurrences that were substituted
    pub restored_count: usize,
    /// Token-like strings left untouched because their index has no span
    pub unresolved: Vec<String>,
    /// Span indices that never appeared in the translation
    pub missing: Vec<usize>,
    /// Tokens came back in a different order than they were sent
    pub reordering_detected: bool,
}

impl RestorationReport {
    /// Every span was restored at least once and nothing was left unresolved
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty() && self.missing.is_empty()
    }

    /// Human-readable warnings about the restoration
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.unresolved.is_empty() {
            warnings.push(format!(
                "Left {} unresolved token(s) as literal text: {:?}",
                self.unresolved.len(),
                self.unresolved
            ));
        }
        if !self.missing.is_empty() {
            warnings.push(format!(
                "Protected spans dropped by the translation: {:?}",
                self.missing
            ));
        }
        if self.reordering_detected {
            warnings.push(
                "Tokens were reordered during translation, which may indicate word-order changes in the target language."
                    .to_string(),
            );
        }
        warnings
    }
}

/// Locate every token in `text`, in order of position
pub fn locate_tokens(text: &str) -> Vec<LocatedToken> {
    token_rule()
        .regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(LocatedToken {
                index: caps[1].parse().ok(),
                position: whole.start(),
                length: whole.len(),
            })
        })
        .collect()
}

/// Whether the in-range tokens appear out of ascending index order
///
/// Masking numbers spans left to right, so any descent means the engine moved
/// markup around.
pub fn detect_token_reordering(located: &[LocatedToken], span_count: usize) -> bool {
    let indices: Vec<usize> = located
        .iter()
        .filter_map(|t| t.index)
        .filter(|&i| i < span_count)
        .collect();
    indices.windows(2).any(|pair| pair[1] < pair[0])
}

/// Restore protected spans and return the restored text
pub fn restore(translated: &str, spans: &[ProtectedSpan]) -> String {
    restore_with_report(translated, spans).restored_text
}

/// Restore protected spans and report what could not be resolved
///
/// Single left-to-right pass. Substituted markup is never rescanned, so a
/// span whose original text contains a token-like string stays verbatim.
pub fn restore_with_report(translated: &str, spans: &[ProtectedSpan]) -> RestorationReport {
    let located = locate_tokens(translated);

    let mut restored = String::with_capacity(translated.len());
    let mut restored_count = 0;
    let mut unresolved = Vec::new();
    let mut seen = BTreeSet::new();
    let mut last = 0;

    for token in &located {
        let end = token.position + token.length;
        restored.push_str(&translated[last..token.position]);

        match token.index.and_then(|i| spans.get(i)) {
            Some(span) => {
                restored.push_str(&span.original_text);
                restored_count += 1;
                seen.insert(span.index);
            }
            None => {
                let literal = &translated[token.position..end];
                restored.push_str(literal);
                unresolved.push(literal.to_string());
            }
        }

        last = end;
    }
    restored.push_str(&translated[last..]);

    let missing: Vec<usize> = (0..spans.len()).filter(|i| !seen.contains(i)).collect();

    let report = RestorationReport {
        restored_text: restored,
        restored_count,
        unresolved,
        missing,
        reordering_detected: detect_token_reordering(&located, spans.len()),
    };

    for warning in report.warnings() {
        warn!("{}", warning);
    }

    report
}
