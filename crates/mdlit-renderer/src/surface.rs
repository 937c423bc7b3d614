//! Display surfaces that receive rendered HTML.

use std::io::{self, Write};

/// Destination for trusted HTML.
///
/// Implementations must write their input verbatim: the HTML already
/// contains markup produced by inline rules and must not be escaped again.
pub trait DisplaySurface {
    /// Write a trusted HTML fragment.
    fn write_trusted_html(&mut self, html: &str) -> io::Result<()>;
}

/// Surface that collects everything written into a string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HtmlBuffer {
    html: String,
}

impl HtmlBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// HTML written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.html
    }
}

impl DisplaySurface for HtmlBuffer {
    fn write_trusted_html(&mut self, html: &str) -> io::Result<()> {
        self.html.push_str(html);
        Ok(())
    }
}

/// Surface forwarding to any [`Write`] (stdout, a file, a socket).
#[derive(Debug)]
pub struct WriterSurface<W: Write> {
    writer: W,
}

impl<W: Write> WriterSurface<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplaySurface for WriterSurface<W> {
    fn write_trusted_html(&mut self, html: &str) -> io::Result<()> {
        self.writer.write_all(html.as_bytes())?;
        self.writer.flush()
    }
}
