//! Rendering entry points.

use std::io;

use crate::extension::{BlockExtension, ExtensionName, ExtensionOptions};
use crate::inline::RegistryError;
use crate::markdown::Markdown;
use crate::surface::DisplaySurface;

/// Extensions used by [`mdlit`].
pub const DEFAULT_EXTENSIONS: [ExtensionName; 4] = [
    ExtensionName::MarkdownLit,
    ExtensionName::Block(BlockExtension::Details),
    ExtensionName::Block(BlockExtension::TaskList),
    ExtensionName::Block(BlockExtension::FencedCode),
];

/// Error rendering a document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Extensions conflicted while setting up the converter.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The display surface rejected the output.
    #[error("failed to write to display surface: {0}")]
    Surface(#[from] io::Error),
}

/// Render `text` with the named extensions and write the HTML to `surface`.
///
/// Every call builds a fresh converter and parses from scratch. Unresolvable
/// mentions degrade to the fallback icon and label; they never fail a render.
///
/// # Example
///
/// ```
/// use mdlit_renderer::{ExtensionName, ExtensionOptions, HtmlBuffer, render_markdown};
///
/// let mut out = HtmlBuffer::new();
/// render_markdown(
///     "[red]hot[/red] -> cold",
///     &[ExtensionName::MarkdownLit],
///     &ExtensionOptions::default(),
///     &mut out,
/// )
/// .unwrap();
///
/// assert_eq!(
///     out.as_str(),
///     "<p><span style=\"color:#ff4b4b;\">hot</span> <span>→</span> cold</p>\n"
/// );
/// ```
pub fn render_markdown(
    text: &str,
    extensions: &[ExtensionName],
    options: &ExtensionOptions,
    surface: &mut dyn DisplaySurface,
) -> Result<(), RenderError> {
    let mut md = Markdown::new();
    for extension in extensions {
        extension.apply(&mut md, options)?;
    }
    let html = md.convert(text);
    surface.write_trusted_html(&html)?;
    Ok(())
}

/// Render with [`DEFAULT_EXTENSIONS`].
pub fn mdlit(
    text: &str,
    options: &ExtensionOptions,
    surface: &mut dyn DisplaySurface,
) -> Result<(), RenderError> {
    render_markdown(text, &DEFAULT_EXTENSIONS, options, surface)
}
