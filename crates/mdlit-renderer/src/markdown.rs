//! Markdown to HTML conversion with registered extensions.

use std::borrow::Cow;
use std::collections::BTreeSet;

use pulldown_cmark::{Options, Parser, html};

use crate::details::DetailsPreprocessor;
use crate::extension::{BlockExtension, MarkdownExtension};
use crate::inline::regions::Regions;
use crate::inline::{InlineRegistry, InlineRule, RegistryError, scanner};

/// A configured Markdown converter.
///
/// Conversion runs in three steps:
///
/// 1. Block preprocessing (`???` details) when enabled.
/// 2. Inline rules rewrite custom syntax found in literal text into HTML.
/// 3. `pulldown-cmark` renders the result; the HTML from step 2 passes
///    through as inline HTML.
///
/// # Example
///
/// ```
/// use mdlit_renderer::{GlyphRule, Markdown};
///
/// let mut md = Markdown::new();
/// md.register_inline("arrow", 1000, GlyphRule::arrow()).unwrap();
///
/// assert_eq!(md.convert("a -> b"), "<p>a <span>→</span> b</p>\n");
/// assert_eq!(md.convert("`a -> b`"), "<p><code>a -&gt; b</code></p>\n");
/// ```
#[derive(Debug, Default)]
pub struct Markdown {
    inline: InlineRegistry,
    blocks: BTreeSet<BlockExtension>,
    warnings: Vec<String>,
}

impl Markdown {
    /// Converter with no extensions: plain `CommonMark`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an extension.
    pub fn extend(&mut self, extension: &dyn MarkdownExtension) -> Result<(), RegistryError> {
        tracing::debug!(extension = extension.name(), "Installing extension");
        extension.extend(self)
    }

    /// Register an inline rule under a unique name.
    pub fn register_inline(
        &mut self,
        name: impl Into<String>,
        priority: i32,
        rule: impl InlineRule + 'static,
    ) -> Result<(), RegistryError> {
        self.inline.register(name, priority, rule)
    }

    /// Enable a block feature. Enabling twice has no effect.
    pub fn enable(&mut self, block: BlockExtension) {
        self.blocks.insert(block);
    }

    #[must_use]
    pub fn is_enabled(&self, block: BlockExtension) -> bool {
        self.blocks.contains(&block)
    }

    #[must_use]
    pub fn inline_rules(&self) -> &InlineRegistry {
        &self.inline
    }

    /// Warnings from the most recent [`convert`](Self::convert).
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Convert `text` to HTML.
    pub fn convert(&mut self, text: &str) -> String {
        self.warnings.clear();

        let source = if self.is_enabled(BlockExtension::Details) {
            let mut details = DetailsPreprocessor::new();
            let expanded = details.process(text);
            for warning in details.warnings() {
                tracing::warn!(warning = %warning, "Malformed details block");
            }
            self.warnings.extend_from_slice(details.warnings());
            Cow::Owned(expanded)
        } else {
            Cow::Borrowed(text)
        };

        let options = self.parser_options();
        let rewritten = self.apply_inline_rules(&source, options);

        let mut output = String::with_capacity(rewritten.len() * 3 / 2);
        html::push_html(&mut output, Parser::new_ext(&rewritten, options));
        output
    }

    fn apply_inline_rules<'a>(&mut self, source: &'a str, options: Options) -> Cow<'a, str> {
        if self.inline.is_empty() {
            return Cow::Borrowed(source);
        }
        let regions = Regions::collect(source, options);
        let edits = scanner::scan(source, &regions, self.inline.entries_mut());
        if edits.is_empty() {
            Cow::Borrowed(source)
        } else {
            tracing::debug!(edits = edits.len(), "Applied inline rules");
            Cow::Owned(scanner::apply(source, &edits))
        }
    }

    fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.is_enabled(BlockExtension::TaskList) {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        if self.is_enabled(BlockExtension::Tables) {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.is_enabled(BlockExtension::Strikethrough) {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        options
    }
}
