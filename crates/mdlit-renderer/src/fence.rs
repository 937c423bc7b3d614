//! Fenced code tracking for line-based preprocessing.
//!
//! Block markers such as `???` must be ignored inside fenced code.

/// An open code fence: its character and run length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Fence {
    ch: char,
    len: usize,
}

/// Tracks whether the current line is inside a fenced code block.
///
/// Fences open with three or more backticks or tildes and close with a run
/// of the same character at least as long, followed only by whitespace.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line. Returns `true` if it opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        match self.open {
            Some(fence) => {
                let closes = fence_run(trimmed).is_some_and(|(ch, len)| {
                    ch == fence.ch && len >= fence.len && trimmed[len..].trim().is_empty()
                });
                if closes {
                    self.open = None;
                }
                closes
            }
            None => {
                self.open = fence_run(trimmed).map(|(ch, len)| Fence { ch, len });
                self.open.is_some()
            }
        }
    }
}

/// Leading run of three or more backticks or tildes.
fn fence_run(trimmed: &str) -> Option<(char, usize)> {
    let ch = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = trimmed.chars().take_while(|&c| c == ch).count();
    (len >= 3).then_some((ch, len))
}
