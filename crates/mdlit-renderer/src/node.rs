//! Markup nodes built by inline rules and the mention renderer.

use std::fmt;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: [&str; 6] = ["br", "hr", "img", "input", "meta", "wbr"];

/// Child of a [`MarkupNode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Child {
    Text(String),
    Node(MarkupNode),
}

impl From<MarkupNode> for Child {
    fn from(node: MarkupNode) -> Self {
        Self::Node(node)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// An HTML element with unique attribute keys and ordered children.
///
/// Serialization always produces a balanced fragment: text and attribute
/// values are escaped, and void elements (`img`, `br`, ...) are written
/// without children or a closing tag.
///
/// # Example
///
/// ```
/// use mdlit_renderer::MarkupNode;
///
/// let node = MarkupNode::new("span")
///     .with_attr("style", "color:#ff4b4b;")
///     .with_child("a < b");
/// assert_eq!(node.to_html(), r#"<span style="color:#ff4b4b;">a &lt; b</span>"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupNode {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Child>,
}

impl MarkupNode {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`set_attr`](Self::set_attr).
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder form of [`push`](Self::push).
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.push(child);
        self
    }

    /// Set an attribute. An existing key keeps its position and gets the new value.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((key, value)),
        }
    }

    /// Append a child. Children of void elements are never serialized.
    pub fn push(&mut self, child: impl Into<Child>) {
        self.children.push(child.into());
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    #[must_use]
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Check if this is a void element.
    #[must_use]
    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS
            .iter()
            .any(|v| v.eq_ignore_ascii_case(&self.tag))
    }

    /// Opening tag with attributes, e.g. `<span style="...">`.
    #[must_use]
    pub fn open_tag(&self) -> String {
        let mut out = String::new();
        self.write_open(&mut out);
        out
    }

    /// Closing tag, or an empty string for void elements.
    #[must_use]
    pub fn close_tag(&self) -> String {
        if self.is_void() {
            String::new()
        } else {
            format!("</{}>", self.tag)
        }
    }

    /// Serialize the whole subtree.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, escape_html);
        out
    }

    /// Serialize for splicing into Markdown source.
    ///
    /// Same as [`to_html`](Self::to_html) except that text children also
    /// escape characters the Markdown parser would otherwise interpret.
    pub(crate) fn to_inline_source(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, escape_inline_source);
        out
    }

    fn write_html(&self, out: &mut String, escape_text: fn(&str) -> String) {
        self.write_open(out);
        if self.is_void() {
            return;
        }
        for child in &self.children {
            match child {
                Child::Text(text) => out.push_str(&escape_text(text)),
                Child::Node(node) => node.write_html(out, escape_text),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }

    fn write_open(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        out.push('>');
    }
}

impl fmt::Display for MarkupNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

/// Escape special HTML characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// HTML escaping plus numeric references for Markdown punctuation and newlines.
fn escape_inline_source(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            '*' | '_' | '`' | '[' | ']' | '\\' | '~' | '!' | '|' | '\n' => {
                result.push_str(&format!("&#{};", u32::from(c)));
            }
            _ => result.push(c),
        }
    }
    result
}
