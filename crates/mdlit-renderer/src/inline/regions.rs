//! Literal text regions of a Markdown document.
//!
//! A region is a byte range whose parsed text equals its source text, so a
//! replacement inside it cannot disturb Markdown syntax. Each region records
//! the innermost element that contains it; a wrapping rule's opening and
//! closing tags must share that element.

use std::ops::Range;

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag};

/// A run of literal text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TextRegion {
    pub(crate) range: Range<usize>,
    /// Id of the innermost enclosing element.
    pub(crate) container: usize,
    /// The first character was backslash-escaped in the source.
    pub(crate) escaped_start: bool,
}

/// Sorted, non-overlapping text regions.
#[derive(Debug, Default)]
pub(crate) struct Regions {
    regions: Vec<TextRegion>,
}

impl Regions {
    /// Collect the literal text regions of `source`.
    pub(crate) fn collect(source: &str, options: Options) -> Self {
        let mut regions = Self::default();
        // (element id, text inside is off limits)
        let mut stack: Vec<(usize, bool)> = Vec::new();
        let mut next_id = 1;

        for (event, range) in Parser::new_ext(source, options).into_offset_iter() {
            match event {
                Event::Start(tag) => {
                    let parent_hidden = stack.last().is_some_and(|&(_, hidden)| hidden);
                    stack.push((next_id, parent_hidden || hides_text(&tag)));
                    next_id += 1;
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Text(text) => {
                    let (container, hidden) = stack.last().copied().unwrap_or((0, false));
                    if !hidden && source.get(range.clone()) == Some(text.as_ref()) {
                        regions.push(source, range, container);
                    }
                }
                _ => {}
            }
        }
        regions
    }

    fn push(&mut self, source: &str, range: Range<usize>, container: usize) {
        if range.is_empty() {
            return;
        }
        if let Some(last) = self.regions.last_mut()
            && last.range.end == range.start
            && last.container == container
        {
            last.range.end = range.end;
            return;
        }
        self.regions.push(TextRegion {
            escaped_start: is_escaped(source, range.start),
            range,
            container,
        });
    }

    /// Region containing byte offset `pos`.
    pub(crate) fn find(&self, pos: usize) -> Option<&TextRegion> {
        let idx = self.regions.partition_point(|r| r.range.end <= pos);
        self.regions
            .get(idx)
            .filter(|r| r.range.start <= pos && pos < r.range.end)
    }

    /// Check if `range` lies within one region and does not start on an
    /// escaped character. Returns that region.
    pub(crate) fn enclosing(&self, range: &Range<usize>) -> Option<&TextRegion> {
        let region = self.find(range.start)?;
        let escaped = region.escaped_start && region.range.start == range.start;
        (range.end <= region.range.end && !escaped).then_some(region)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn as_slice(&self) -> &[TextRegion] {
        &self.regions
    }
}

/// Elements whose text must never be rewritten.
fn hides_text(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::CodeBlock(_)
            | Tag::MetadataBlock(_)
            | Tag::Image { .. }
            | Tag::Link {
                link_type: LinkType::Autolink | LinkType::Email,
                ..
            }
    )
}

/// Check if the byte at `pos` follows an odd run of backslashes.
fn is_escaped(source: &str, pos: usize) -> bool {
    let backslashes = source.as_bytes()[..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count();
    backslashes % 2 == 1
}
