//! Extensions that configure a [`Markdown`] converter.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use mdlit_resolver::Resolver;

use crate::inline::{ColorRule, GlyphRule, MentionRule, RegistryError};
use crate::markdown::Markdown;
use crate::mention::MentionOptions;

/// Priority of every rule registered by [`MarkdownLitExtension`].
pub const MARKDOWNLIT_PRIORITY: i32 = 1000;

/// Something that can be installed into a [`Markdown`] converter.
pub trait MarkdownExtension {
    /// Name used in configuration files and on the command line.
    fn name(&self) -> &'static str;

    /// Register rules and enable block features.
    fn extend(&self, md: &mut Markdown) -> Result<(), RegistryError>;
}

/// Block-level features of the converter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockExtension {
    /// `???` / `???+` collapsible blocks.
    Details,
    /// `- [ ]` / `- [x]` checkboxes.
    TaskList,
    /// Backtick and tilde code fences. Always parsed; enabling is declarative.
    FencedCode,
    /// GFM pipe tables.
    Tables,
    /// `~~strikethrough~~`.
    Strikethrough,
}

impl MarkdownExtension for BlockExtension {
    fn name(&self) -> &'static str {
        match self {
            Self::Details => "details",
            Self::TaskList => "tasklist",
            Self::FencedCode => "fenced_code",
            Self::Tables => "tables",
            Self::Strikethrough => "strikethrough",
        }
    }

    fn extend(&self, md: &mut Markdown) -> Result<(), RegistryError> {
        md.enable(*self);
        Ok(())
    }
}

/// Colored spans, mentions and glyph substitutions, plus the block features
/// documents using them rely on.
///
/// Registers, in order and at [`MARKDOWNLIT_PRIORITY`]: `arrow` (`->`),
/// `dash` (`--`), `mention` (`@(...)`) and `color` (`[red]...[/red]`).
/// Enables [`BlockExtension::Details`], [`BlockExtension::TaskList`] and
/// [`BlockExtension::FencedCode`].
#[derive(Debug, Clone)]
pub struct MarkdownLitExtension {
    resolver: Arc<Resolver>,
    mention: MentionOptions,
}

impl MarkdownLitExtension {
    #[must_use]
    pub fn new(resolver: Arc<Resolver>, mention: MentionOptions) -> Self {
        Self { resolver, mention }
    }
}

impl MarkdownExtension for MarkdownLitExtension {
    fn name(&self) -> &'static str {
        "markdownlit"
    }

    fn extend(&self, md: &mut Markdown) -> Result<(), RegistryError> {
        md.register_inline("arrow", MARKDOWNLIT_PRIORITY, GlyphRule::arrow())?;
        md.register_inline("dash", MARKDOWNLIT_PRIORITY, GlyphRule::dash())?;
        md.register_inline(
            "mention",
            MARKDOWNLIT_PRIORITY,
            MentionRule::new(Arc::clone(&self.resolver), self.mention.clone()),
        )?;
        md.register_inline("color", MARKDOWNLIT_PRIORITY, ColorRule::new())?;

        for block in [
            BlockExtension::Details,
            BlockExtension::TaskList,
            BlockExtension::FencedCode,
        ] {
            block.extend(md)?;
        }
        Ok(())
    }
}

/// Shared settings handed to extensions when they are built by name.
#[derive(Debug, Clone)]
pub struct ExtensionOptions {
    pub resolver: Arc<Resolver>,
    pub mention: MentionOptions,
}

impl ExtensionOptions {
    #[must_use]
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self {
            resolver,
            mention: MentionOptions::default(),
        }
    }
}

impl Default for ExtensionOptions {
    /// Offline resolver and the default fallback icon and label.
    fn default() -> Self {
        Self::new(Arc::new(Resolver::offline()))
    }
}

/// Error for an extension name nobody provides.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown extension '{0}' (expected one of: {names})", names = ExtensionName::ALL.map(ExtensionName::as_str).join(", "))]
pub struct UnknownExtension(pub String);

/// Extension selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExtensionName {
    MarkdownLit,
    Block(BlockExtension),
}

impl ExtensionName {
    pub const ALL: [Self; 6] = [
        Self::MarkdownLit,
        Self::Block(BlockExtension::Details),
        Self::Block(BlockExtension::TaskList),
        Self::Block(BlockExtension::FencedCode),
        Self::Block(BlockExtension::Tables),
        Self::Block(BlockExtension::Strikethrough),
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MarkdownLit => "markdownlit",
            Self::Block(block) => block.name(),
        }
    }

    /// Install the named extension into `md`.
    pub fn apply(self, md: &mut Markdown, options: &ExtensionOptions) -> Result<(), RegistryError> {
        match self {
            Self::MarkdownLit => {
                MarkdownLitExtension::new(Arc::clone(&options.resolver), options.mention.clone())
                    .extend(md)
            }
            Self::Block(block) => block.extend(md),
        }
    }
}

impl FromStr for ExtensionName {
    type Err = UnknownExtension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownExtension(s.to_owned()))
    }
}

impl fmt::Display for ExtensionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_markdownlit_registration_order() {
        let mut md = Markdown::new();
        MarkdownLitExtension::new(Arc::new(Resolver::offline()), MentionOptions::default())
            .extend(&mut md)
            .unwrap();

        assert_eq!(
            md.inline_rules().names().collect::<Vec<_>>(),
            vec!["arrow", "dash", "mention", "color"]
        );
        assert!(md.is_enabled(BlockExtension::Details));
        assert!(md.is_enabled(BlockExtension::TaskList));
        assert!(md.is_enabled(BlockExtension::FencedCode));
        assert!(!md.is_enabled(BlockExtension::Tables));
    }

    #[test]
    fn test_markdownlit_twice_is_rejected() {
        let mut md = Markdown::new();
        let options = ExtensionOptions::default();
        ExtensionName::MarkdownLit.apply(&mut md, &options).unwrap();

        let err = ExtensionName::MarkdownLit
            .apply(&mut md, &options)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::Duplicate {
                name: "arrow".to_owned()
            }
        );
    }

    #[test]
    fn test_block_extension_is_idempotent() {
        let mut md = Markdown::new();
        BlockExtension::Tables.extend(&mut md).unwrap();
        BlockExtension::Tables.extend(&mut md).unwrap();
        assert!(md.is_enabled(BlockExtension::Tables));
    }

    #[test]
    fn test_parse_names() {
        for name in ExtensionName::ALL {
            assert_eq!(name.as_str().parse::<ExtensionName>(), Ok(name));
            assert_eq!(name.to_string(), name.as_str());
        }
        assert_eq!(
            "fenced_code".parse::<ExtensionName>(),
            Ok(ExtensionName::Block(BlockExtension::FencedCode))
        );
    }

    #[test]
    fn test_unknown_name_lists_choices() {
        let err = "mermaid".parse::<ExtensionName>().unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("unknown extension 'mermaid'"));
        assert!(message.contains("markdownlit, details, tasklist"));
    }
}
