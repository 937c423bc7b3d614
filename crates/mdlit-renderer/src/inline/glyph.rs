//! Literal-to-glyph substitutions.

use regex::Regex;

use super::{InlineRule, RuleMatch};
use crate::node::MarkupNode;

/// Replaces a fixed character sequence with a glyph in a `<span>`.
#[derive(Debug, Clone)]
pub struct GlyphRule {
    pattern: Regex,
    glyph: String,
}

impl GlyphRule {
    /// Rule replacing every occurrence of `literal` with `glyph`.
    ///
    /// # Panics
    ///
    /// Panics if `literal` is empty.
    #[must_use]
    pub fn new(literal: &str, glyph: impl Into<String>) -> Self {
        assert!(!literal.is_empty(), "glyph literal must not be empty");
        Self {
            pattern: Regex::new(&regex::escape(literal)).unwrap(),
            glyph: glyph.into(),
        }
    }

    /// `->` to `→`.
    #[must_use]
    pub fn arrow() -> Self {
        Self::new("->", "→")
    }

    /// `--` to `—`.
    #[must_use]
    pub fn dash() -> Self {
        Self::new("--", "—")
    }

    #[must_use]
    pub fn glyph(&self) -> &str {
        &self.glyph
    }
}

impl InlineRule for GlyphRule {
    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    fn transform(&mut self, _m: &RuleMatch<'_>) -> MarkupNode {
        MarkupNode::new("span").with_child(self.glyph.as_str())
    }
}
