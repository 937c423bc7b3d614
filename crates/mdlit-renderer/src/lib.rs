//! Markdown rendering with colored text, link mentions and nicer glyphs.
//!
//! On top of `CommonMark` (via `pulldown-cmark`) the `markdownlit` extension
//! understands:
//!
//! | Syntax | Output |
//! |--------|--------|
//! | `->` | `<span>→</span>` |
//! | `--` | `<span>—</span>` |
//! | `[red]text[/red]` | `<span style="color:#ff4b4b;">text</span>` |
//! | `@(url)`, `@(label)(url)`, `@(icon)(label)(url)` | link mention with icon |
//!
//! Custom syntax is only recognized in literal text. Code spans, code
//! blocks, link destinations, autolinks and backslash escapes keep their
//! usual meaning:
//!
//! ```
//! use mdlit_renderer::{ExtensionOptions, HtmlBuffer, mdlit};
//!
//! let mut out = HtmlBuffer::new();
//! mdlit(r"`a -> b` and a \-> b", &ExtensionOptions::default(), &mut out).unwrap();
//! assert_eq!(out.as_str(), "<p><code>a -&gt; b</code> and a -&gt; b</p>\n");
//! ```
//!
//! # Architecture
//!
//! - [`InlineRule`]s live in an [`InlineRegistry`] owned by a [`Markdown`]
//!   converter; [`MarkdownExtension`]s install them.
//! - [`MentionRule`] resolves bare URLs through a shared
//!   [`Resolver`](mdlit_resolver::Resolver) and renders them with
//!   [`MentionRenderer`].
//! - [`render_markdown`] and [`mdlit`] build a converter per call and write
//!   to a [`DisplaySurface`].

mod details;
mod extension;
mod fence;
pub mod inline;
mod markdown;
mod mention;
mod node;
mod palette;
mod render;
mod surface;

pub use details::DetailsPreprocessor;
pub use extension::{
    BlockExtension, ExtensionName, ExtensionOptions, MARKDOWNLIT_PRIORITY, MarkdownExtension,
    MarkdownLitExtension, UnknownExtension,
};
pub use inline::{
    ColorRule, GlyphRule, InlineRegistry, InlineRule, MentionRule, RegistryError, RuleMatch,
};
pub use markdown::Markdown;
pub use mention::{MentionArgs, MentionOptions, MentionRenderer, MentionSpec};
pub use node::{Child, MarkupNode, escape_html};
pub use palette::{Color, UnknownColor};
pub use render::{DEFAULT_EXTENSIONS, RenderError, mdlit, render_markdown};
pub use surface::{DisplaySurface, HtmlBuffer, WriterSurface};
