//! Collapsible `???` blocks.
//!
//! ```text
//! ??? note "Read more"
//!     Indented content, rendered as Markdown.
//!
//! ???+ tip
//!     Starts expanded.
//! ```
//!
//! Each block becomes a `<details>` element with a `<summary>`, separated
//! from its content by blank lines so the Markdown parser keeps rendering
//! the body. Nested blocks are expanded recursively.

use std::sync::LazyLock;

use regex::Regex;

use crate::fence::FenceTracker;
use crate::node::MarkupNode;

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^ {0,3}\?\?\?(\+)?(?:[ \t]+([\w-]+(?:[ \t]+[\w-]+)*))?(?:[ \t]+"([^"]*)")?[ \t]*$"#)
        .unwrap()
});

/// A parsed `???` line.
#[derive(Debug, PartialEq, Eq)]
struct Marker {
    open: bool,
    classes: Vec<String>,
    title: Option<String>,
}

impl Marker {
    fn parse(line: &str) -> Option<Self> {
        let caps = MARKER_RE.captures(line)?;
        let classes: Vec<String> = caps
            .get(2)
            .map(|m| m.as_str().split_whitespace().map(str::to_owned).collect())
            .unwrap_or_default();
        let title = caps.get(3).map(|m| m.as_str().to_owned());
        if classes.is_empty() && title.is_none() {
            return None;
        }
        Some(Self {
            open: caps.get(1).is_some(),
            classes,
            title,
        })
    }

    fn summary(&self) -> String {
        match (&self.title, self.classes.first()) {
            (Some(title), _) if !title.is_empty() => title.clone(),
            (_, Some(class)) => capitalize(class),
            _ => "Details".to_owned(),
        }
    }

    fn opening_tag(&self) -> String {
        let mut details = MarkupNode::new("details");
        if !self.classes.is_empty() {
            details.set_attr("class", self.classes.join(" "));
        }
        if self.open {
            details.set_attr("open", "open");
        }
        details.open_tag()
    }
}

/// Expands `???` blocks into `<details>` HTML ahead of Markdown parsing.
///
/// # Example
///
/// ```
/// use mdlit_renderer::DetailsPreprocessor;
///
/// let mut preprocessor = DetailsPreprocessor::new();
/// let output = preprocessor.process("??? note \"More\"\n    Hidden text.\n");
///
/// assert!(output.starts_with("<details class=\"note\">\n<summary>More</summary>\n"));
/// assert!(output.contains("\nHidden text.\n"));
/// assert_eq!(preprocessor.block_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DetailsPreprocessor {
    warnings: Vec<String>,
    blocks: usize,
}

impl DetailsPreprocessor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand every block in `input`.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let lines: Vec<&str> = input.lines().collect();
        let mut out = Vec::with_capacity(lines.len());
        self.expand(&lines, 1, &mut out);

        let mut output = out.join("\n");
        if input.ends_with('\n') {
            output.push('\n');
        }
        output
    }

    /// Problems found while processing, with line numbers.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Number of blocks expanded, nested ones included.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks
    }

    fn expand(&mut self, lines: &[&str], first_line: usize, out: &mut Vec<String>) {
        let mut fence = FenceTracker::new();
        let mut idx = 0;

        while idx < lines.len() {
            let line = lines[idx];
            let fence_line = fence.update(line);
            let marker = if fence_line || fence.in_fence() {
                None
            } else {
                Marker::parse(line)
            };
            let Some(marker) = marker else {
                out.push(line.to_owned());
                idx += 1;
                continue;
            };

            let line_num = first_line + idx;
            let (body, consumed) = collect_body(&lines[idx + 1..]);
            if body.is_empty() {
                self.warnings.push(format!(
                    "line {line_num}: ??? block has no indented content"
                ));
            }

            self.blocks += 1;
            out.push(marker.opening_tag());
            out.push(
                MarkupNode::new("summary")
                    .with_child(marker.summary())
                    .to_html(),
            );
            out.push(String::new());
            self.expand(&body, line_num + 1, out);
            out.push(String::new());
            out.push("</details>".to_owned());

            idx += 1 + consumed;
            // The closing tag must not swallow the next paragraph.
            if lines.get(idx).is_some_and(|next| !next.trim().is_empty()) {
                out.push(String::new());
            }
        }
    }
}

/// Dedented body lines following a marker, and how many lines they span.
///
/// Trailing blank lines are left for the surrounding document.
fn collect_body<'a>(lines: &[&'a str]) -> (Vec<&'a str>, usize) {
    let mut body = Vec::new();
    let mut consumed = 0;
    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            body.push("");
            continue;
        }
        match dedent(line) {
            Some(rest) => {
                body.push(rest);
                consumed = idx + 1;
            }
            None => break,
        }
    }
    body.truncate(consumed);
    (body, consumed)
}

/// Strip one level of indentation: four spaces or a tab.
fn dedent(line: &str) -> Option<&str> {
    line.strip_prefix("    ").or_else(|| line.strip_prefix('\t'))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
