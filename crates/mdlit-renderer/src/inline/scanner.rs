//! Ordered inline rule matching.
//!
//! Rules run one pass each, in registry order. A pass only sees literal text
//! that no earlier pass consumed: a plain match may not overlap an earlier
//! edit, while a wrapping match may enclose earlier edits in its kept content
//! as long as its own opening and closing parts are untouched. Whatever a
//! pass matches, including a wrapper's content, is consumed for every later
//! pass.

use std::ops::Range;

use super::regions::Regions;
use super::registry::Entry;
use super::{InlineRule, RuleMatch};

/// Replacement of a source range by HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Edit {
    pub(crate) range: Range<usize>,
    pub(crate) replacement: String,
}

/// Sorted, disjoint source ranges already consumed by a pass.
#[derive(Debug, Default)]
struct Consumed {
    ranges: Vec<Range<usize>>,
}

impl Consumed {
    fn overlaps(&self, range: &Range<usize>) -> bool {
        let idx = self.ranges.partition_point(|r| r.end <= range.start);
        self.ranges.get(idx).is_some_and(|r| r.start < range.end)
    }

    /// Mark `range` consumed, absorbing ranges it encloses.
    fn insert(&mut self, range: Range<usize>) {
        let first = self.ranges.partition_point(|r| r.end <= range.start);
        let last = self.ranges.partition_point(|r| r.start < range.end);
        self.ranges.splice(first..last.max(first), [range]);
    }
}

/// Run every rule over `source` and return the edits in source order.
pub(crate) fn scan(source: &str, regions: &Regions, entries: &mut [Entry]) -> Vec<Edit> {
    let mut edits = Vec::new();
    if regions.is_empty() {
        return edits;
    }

    let mut consumed = Consumed::default();
    for entry in entries.iter_mut() {
        let mut cursor = 0;
        while let Some((m, inner)) =
            next_candidate(source, regions, &consumed, entry.rule.as_ref(), cursor)
        {
            let node = entry.rule.transform(&m);
            let range = m.range();
            tracing::trace!(rule = %entry.name, start = range.start, end = range.end, "Inline rule matched");

            match inner {
                Some(inner) => {
                    edits.push(Edit {
                        range: range.start..inner.start,
                        replacement: node.open_tag(),
                    });
                    edits.push(Edit {
                        range: inner.end..range.end,
                        replacement: node.close_tag(),
                    });
                }
                None => edits.push(Edit {
                    range: range.clone(),
                    replacement: node.to_inline_source(),
                }),
            }
            consumed.insert(range.clone());
            cursor = range.end;
        }
    }

    edits.sort_by_key(|e| e.range.start);
    edits
}

/// Earliest match of `rule` starting at or after `from` that sits in literal,
/// unconsumed text and passes [`InlineRule::accepts`].
fn next_candidate<'s>(
    source: &'s str,
    regions: &Regions,
    consumed: &Consumed,
    rule: &dyn InlineRule,
    from: usize,
) -> Option<(RuleMatch<'s>, Option<Range<usize>>)> {
    let mut at = from;
    while at < source.len() {
        let caps = rule.pattern().captures_at(source, at)?;
        let whole = caps.get(0)?;
        if !whole.is_empty() {
            let m = RuleMatch::from_captures(source, &caps);
            let inner = rule.inner(&m);
            if is_placeable(source, regions, consumed, &m, inner.as_ref()) && rule.accepts(&m) {
                return Some((m, inner));
            }
        }
        // Retry one character after the rejected start.
        let start = whole.start();
        at = start + source[start..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// A plain match must lie inside one text region and touch no earlier edit.
/// A wrapping match needs its opening and closing parts untouched, in text
/// regions of the same element, and an opening that would not stand alone on
/// its line.
fn is_placeable(
    source: &str,
    regions: &Regions,
    consumed: &Consumed,
    m: &RuleMatch<'_>,
    inner: Option<&Range<usize>>,
) -> bool {
    let range = m.range();
    let Some(inner) = inner else {
        return !consumed.overlaps(&range) && regions.enclosing(&range).is_some();
    };
    if inner.start <= range.start || inner.end >= range.end || inner.start > inner.end {
        return false;
    }
    let open = range.start..inner.start;
    let close = inner.end..range.end;
    if consumed.overlaps(&open) || consumed.overlaps(&close) {
        return false;
    }
    if opens_html_block(source, &open) {
        return false;
    }
    let open = regions.enclosing(&open);
    let close = regions.enclosing(&close);
    matches!((open, close), (Some(a), Some(b)) if a.container == b.container)
}

/// Check if an opening tag spliced over `open` would be the only thing on its
/// line, which the parser reads as the start of a raw HTML block.
fn opens_html_block(source: &str, open: &Range<usize>) -> bool {
    let line_start = source[..open.start].rfind('\n').map_or(0, |i| i + 1);
    let before = &source[line_start..open.start];
    let after = source[open.end..].split('\n').next().unwrap_or_default();
    // Container markers (quotes, list bullets, ordered list numbers).
    let only_markers = before.chars().all(|c| {
        c.is_whitespace() || c.is_ascii_digit() || matches!(c, '>' | '-' | '*' | '+' | '.' | ')')
    });
    only_markers && after.trim().is_empty()
}

/// Apply sorted, non-overlapping edits to `source`.
pub(crate) fn apply(source: &str, edits: &[Edit]) -> String {
    let extra: usize = edits.iter().map(|e| e.replacement.len()).sum();
    let mut out = String::with_capacity(source.len() + extra);
    let mut last = 0;
    for edit in edits {
        out.push_str(&source[last..edit.range.start]);
        out.push_str(&edit.replacement);
        last = edit.range.end;
    }
    out.push_str(&source[last..]);
    out
}
