/// Masking engine: replaces protected markup with opaque tokens before MT
///
/// Each protected span becomes `__LATEX_<index>__`. Rules run in priority
/// order over the text that is still unprotected, so a later rule can never
/// match across a token produced by an earlier one. Indices are assigned once
/// all rules have run, left to right in the masked text.
///
/// ```ignore
/// let masked = mask(r"Compute \(x^2\) and $y$.");
/// assert_eq!(masked.text, "Compute __LATEX_0__ and __LATEX_1__.");
/// assert_eq!(masked.spans[0].original_text, r"\(x^2\)");
/// ```
use super::rules::{PatternRule, RuleKind, format_token, lookalike_rule, pattern_rules};
use tracing::debug;

/// A substring that must pass through translation unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedSpan {
    /// Index embedded in the token
    pub index: usize,
    /// The markup exactly as it appeared in the input
    pub original_text: String,
    /// Rule that protected this span
    pub rule: RuleKind,
}

impl ProtectedSpan {
    /// The token standing in for this span in the masked text
    pub fn token(&self) -> String {
        format_token(self.index)
    }
}

/// Result of masking one input text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskedText {
    /// Input with every protected span replaced by its token
    pub text: String,
    /// Spans in index order; `spans[i].index == i`
    pub spans: Vec<ProtectedSpan>,
}

impl MaskedText {
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Collects spans for a single `mask` call and hands out their tokens
#[derive(Debug, Default)]
pub struct SpanCollector {
    spans: Vec<ProtectedSpan>,
}

impl SpanCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a span and return its token. Indices only ever grow.
    pub fn protect(&mut self, original_text: &str, rule: RuleKind) -> String {
        let span = ProtectedSpan {
            index: self.spans.len(),
            original_text: original_text.to_string(),
            rule,
        };
        let token = span.token();
        self.spans.push(span);
        token
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn into_spans(self) -> Vec<ProtectedSpan> {
        self.spans
    }
}

/// Working representation between rule passes
#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Plain(&'a str),
    Protected(&'a str, RuleKind),
}

/// Split every plain segment around the matches of one rule
fn apply_rule<'a>(segments: Vec<Segment<'a>>, rule: &PatternRule) -> Vec<Segment<'a>> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        let plain = match segment {
            Segment::Plain(plain) => plain,
            protected => {
                result.push(protected);
                continue;
            }
        };

        let mut last = 0;
        for m in rule.regex().find_iter(plain) {
            if m.start() > last {
                result.push(Segment::Plain(&plain[last..m.start()]));
            }
            result.push(Segment::Protected(m.as_str(), rule.kind()));
            last = m.end();
        }
        if last < plain.len() {
            result.push(Segment::Plain(&plain[last..]));
        }
    }

    result
}

/// Mask `text` with the standard rule set
///
/// Blank input yields an empty `MaskedText` with no spans.
pub fn mask(text: &str) -> MaskedText {
    mask_with_rules(text, pattern_rules())
}

/// Mask `text` with an explicit ordered rule list
///
/// Text that already looks like a token is protected after the given rules,
/// so the restoration pass cannot confuse it with a real token.
pub fn mask_with_rules(text: &str, rules: &[PatternRule]) -> MaskedText {
    if text.trim().is_empty() {
        return MaskedText::default();
    }

    let mut segments = vec![Segment::Plain(text)];
    for rule in rules.iter().chain(std::iter::once(lookalike_rule())) {
        segments = apply_rule(segments, rule);
    }

    let mut collector = SpanCollector::new();
    let mut masked = String::with_capacity(text.len());
    for segment in segments {
        match segment {
            Segment::Plain(plain) => masked.push_str(plain),
            Segment::Protected(original, kind) => {
                masked.push_str(&collector.protect(original, kind));
            }
        }
    }

    debug!(spans = collector.len(), "masked input text");

    MaskedText {
        text: masked,
        spans: collector.into_spans(),
    }
}
