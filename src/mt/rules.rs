//! Pattern rules recognizing markup that must survive machine translation
//!
//! The rules are a lexical approximation of LaTeX, not a grammar. They are
//! applied in the order of [`pattern_rules`]; a later rule only sees text that
//! no earlier rule protected. The last rule is a catch-all for any `\command`
//! the others missed, so the order is part of the contract.

use regex::Regex;
use std::sync::LazyLock;

/// Which rule protected a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// `\includegraphics[opts]{path}`
    ImageDirective,
    /// `$...$`
    DollarMath,
    /// `\( ... \)`
    ParenMath,
    /// `\[ ... \]`
    BracketMath,
    /// `\command` or `\command{arg}`
    Command,
    /// Input text that already looks like a mask token
    TokenLookalike,
}

impl RuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::ImageDirective => "image",
            RuleKind::DollarMath => "dollar-math",
            RuleKind::ParenMath => "paren-math",
            RuleKind::BracketMath => "bracket-math",
            RuleKind::Command => "command",
            RuleKind::TokenLookalike => "token-lookalike",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A compiled rule: the regex plus the kind it reports
#[derive(Debug)]
pub struct PatternRule {
    kind: RuleKind,
    regex: Regex,
}

impl PatternRule {
    fn new(kind: RuleKind, pattern: &str) -> Self {
        Self {
            kind,
            regex: Regex::new(pattern).expect("pattern rules are valid regexes"),
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

static PATTERN_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        PatternRule::new(
            RuleKind::ImageDirective,
            r"\\includegraphics(?:\[[^\]]*\])?\{[^{}]+\}",
        ),
        PatternRule::new(RuleKind::DollarMath, r"\$[^$]+\$"),
        // Lazy body: stops at the first closing marker
        PatternRule::new(RuleKind::ParenMath, r"(?s)\\\(.+?\\\)"),
        PatternRule::new(RuleKind::BracketMath, r"(?s)\\\[.+?\\\]"),
        PatternRule::new(RuleKind::Command, r"\\[a-zA-Z]+(?:\{[^{}]*\})?"),
    ]
});

/// Case-insensitive on the literal text, exact on the digits. Tolerates
/// whitespace between the underscores and the token body.
static TOKEN_RULE: LazyLock<PatternRule> = LazyLock::new(|| {
    PatternRule::new(RuleKind::TokenLookalike, r"(?i)__\s*LATEX_([0-9]+)\s*__")
});

/// The five masking rules in priority order
pub fn pattern_rules() -> &'static [PatternRule] {
    &PATTERN_RULES
}

/// Input text that restoration would mistake for a token. Besides complete
/// look-alikes this covers an unterminated one at the end of an unprotected
/// segment, which would otherwise fuse with the leading underscores of the
/// token that follows it.
static LOOKALIKE_RULE: LazyLock<PatternRule> = LazyLock::new(|| {
    PatternRule::new(
        RuleKind::TokenLookalike,
        r"(?i)__\s*LATEX_[0-9]+\s*(?:__|_?\z)",
    )
});

/// Pattern matching a mask token, including the mangled forms MT engines produce
pub fn token_rule() -> &'static PatternRule {
    &TOKEN_RULE
}

/// Pattern protecting token look-alikes already present in the input
pub fn lookalike_rule() -> &'static PatternRule {
    &LOOKALIKE_RULE
}

/// Render the token for a span index
pub fn format_token(index: usize) -> String {
    format!("__LATEX_{}__", index)
}
