//! Inline rules: custom syntax recognized inside Markdown text.
//!
//! Each rule pairs a regular expression with a transform into a
//! [`MarkupNode`]. Rules only ever see literal paragraph text: code spans,
//! code blocks, link destinations, autolinks and backslash-escaped characters
//! are invisible to them.
//!
//! Rules run one after another: higher priority first, then in registration
//! order. Each rule sees only text earlier rules left alone, so `-->` becomes
//! `-→` when the arrow rule runs before the dash rule. A wrapping rule such
//! as [`ColorRule`] may enclose earlier replacements; what it wraps is not
//! scanned again by later rules.

mod color;
mod glyph;
mod mention;
pub(crate) mod regions;
mod registry;
pub(crate) mod scanner;

use std::ops::Range;

use regex::{Captures, Regex};

use crate::node::MarkupNode;

pub use color::ColorRule;
pub use glyph::GlyphRule;
pub use mention::MentionRule;
pub use registry::{InlineRegistry, RegistryError};

/// A custom inline syntax.
pub trait InlineRule: Send {
    /// Expression matched against raw Markdown source.
    fn pattern(&self) -> &Regex;

    /// Extra validation the pattern cannot express.
    ///
    /// A rejected match is skipped and scanning resumes one character after
    /// its start, so the text stays literal.
    fn accepts(&self, _m: &RuleMatch<'_>) -> bool {
        true
    }

    /// Source range whose content is kept and wrapped rather than replaced.
    ///
    /// When set, the node's opening tag replaces the text before this range
    /// and its closing tag replaces the text after it; the node's children
    /// are ignored. The kept content is still parsed as Markdown.
    fn inner(&self, _m: &RuleMatch<'_>) -> Option<Range<usize>> {
        None
    }

    /// Build the replacement for an accepted match.
    fn transform(&mut self, m: &RuleMatch<'_>) -> MarkupNode;
}

/// A match of an [`InlineRule`] pattern, in source coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleMatch<'s> {
    source: &'s str,
    groups: Vec<Option<Range<usize>>>,
}

impl<'s> RuleMatch<'s> {
    pub(crate) fn from_captures(source: &'s str, caps: &Captures<'s>) -> Self {
        Self {
            source,
            groups: caps.iter().map(|g| g.map(|m| m.range())).collect(),
        }
    }

    /// Byte offset where the match starts.
    #[must_use]
    pub fn start(&self) -> usize {
        self.range().start
    }

    /// Byte offset just past the match.
    #[must_use]
    pub fn end(&self) -> usize {
        self.range().end
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.groups
            .first()
            .cloned()
            .flatten()
            .unwrap_or_default()
    }

    /// Whole matched text.
    #[must_use]
    pub fn as_str(&self) -> &'s str {
        &self.source[self.range()]
    }

    /// Text of capture group `index` (0 is the whole match).
    #[must_use]
    pub fn group(&self, index: usize) -> Option<&'s str> {
        self.group_range(index).map(|r| &self.source[r])
    }

    /// Source range of capture group `index`.
    #[must_use]
    pub fn group_range(&self, index: usize) -> Option<Range<usize>> {
        self.groups.get(index).cloned().flatten()
    }

    /// Texts of the capture groups that participated, in order.
    pub fn captured(&self) -> impl Iterator<Item = &'s str> + '_ {
        self.groups
            .iter()
            .skip(1)
            .flatten()
            .map(|r| &self.source[r.clone()])
    }
}
