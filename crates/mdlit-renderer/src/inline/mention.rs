//! `@(url)`, `@(label)(url)` and `@(icon)(label)(url)` mentions.

use std::sync::{Arc, LazyLock};

use mdlit_resolver::Resolver;
use regex::Regex;

use super::{InlineRule, RuleMatch};
use crate::mention::{MentionArgs, MentionOptions, MentionRenderer};
use crate::node::MarkupNode;

static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@\(([^)]+)\)(?:\(([^)]+)\))?(?:\(([^)]+)\))?").unwrap()
});

/// Style that keeps a mention flowing with the surrounding text.
const INLINE_STYLE: &str = "display: inline; color:inherit; text-decoration:inherit;";

/// Renders mentions, resolving missing icons and labels through a [`Resolver`].
#[derive(Debug)]
pub struct MentionRule {
    resolver: Arc<Resolver>,
    options: MentionOptions,
}

impl MentionRule {
    #[must_use]
    pub fn new(resolver: Arc<Resolver>, options: MentionOptions) -> Self {
        Self { resolver, options }
    }
}

impl InlineRule for MentionRule {
    fn pattern(&self) -> &Regex {
        &MENTION_RE
    }

    fn transform(&mut self, m: &RuleMatch<'_>) -> MarkupNode {
        let args = MentionArgs::from_groups(m.captured()).unwrap_or_else(|| MentionArgs::Url {
            url: m.as_str().to_owned(),
        });
        let spec = args.into_spec(&self.resolver, &self.options);
        let mut node = MentionRenderer::render(&spec);
        node.set_attr("style", INLINE_STYLE);
        node
    }
}
