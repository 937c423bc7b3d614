//! `[color]text[/color]` spans.

use std::ops::Range;

use regex::Regex;

use super::{InlineRule, RuleMatch};
use crate::node::MarkupNode;
use crate::palette::Color;

/// Wraps text between matching color tags in a colored `<span>`.
///
/// The content is kept as Markdown source, so emphasis and code spans inside
/// still render. Open and close names must be identical.
#[derive(Debug, Clone)]
pub struct ColorRule {
    pattern: Regex,
}

impl ColorRule {
    #[must_use]
    pub fn new() -> Self {
        let names = Color::alternation();
        let pattern = Regex::new(&format!(r"\[({names})\]([^\[]+)\[/({names})\]")).unwrap();
        Self { pattern }
    }

    fn color(m: &RuleMatch<'_>) -> Option<Color> {
        m.group(1)?.parse().ok()
    }
}

impl Default for ColorRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InlineRule for ColorRule {
    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    fn accepts(&self, m: &RuleMatch<'_>) -> bool {
        m.group(1).is_some() && m.group(1) == m.group(3)
    }

    fn inner(&self, m: &RuleMatch<'_>) -> Option<Range<usize>> {
        m.group_range(2)
    }

    fn transform(&mut self, m: &RuleMatch<'_>) -> MarkupNode {
        let Some(color) = Self::color(m) else {
            unreachable!("pattern admits only palette names, got {:?}", m.group(1));
        };
        MarkupNode::new("span").with_attr("style", format!("color:{};", color.hex()))
    }
}
