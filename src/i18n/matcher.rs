//! Simultaneous multi-template scan.
//!
//! One shared cursor walks the text byte by byte. Every live template keeps
//! its own [`ScanState`]: it either compares literal bytes or skips
//! placeholder content until the pattern byte following the placeholder
//! (the anchor byte) shows up again. A literal mismatch outside a
//! placeholder kills the template for good.
//!
//! Matching is anchored at text offset 0 and never restarts at a later
//! offset, so this is a prefix match rather than a substring search. A
//! template matches as soon as its whole pattern is consumed; any text
//! after that point is ignored.

use crate::i18n::pattern::{Pattern, Placeholder};

/// Scan state of a single template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Comparing literal pattern bytes at `pos`.
    Matching { pos: usize },
    /// Inside placeholder content; `pos` points at `anchor` in the pattern.
    Skipping { pos: usize, anchor: u8 },
    Dead,
}

/// What a single byte did to a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'p> {
    /// A literal pattern byte matched.
    Literal,
    /// The byte is the first byte of this placeholder's content.
    Entered(&'p Placeholder),
    /// The byte belongs to the current placeholder's content.
    Skipped,
    /// The byte did not fit the pattern; the template is out.
    Died,
}

/// Walks one pattern against text, one byte at a time.
#[derive(Debug, Clone)]
pub struct ScanCursor<'p> {
    pattern: &'p Pattern,
    state: ScanState,
}

impl<'p> ScanCursor<'p> {
    pub fn new(pattern: &'p Pattern) -> Self {
        Self {
            pattern,
            state: ScanState::Matching { pos: 0 },
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn is_dead(&self) -> bool {
        self.state == ScanState::Dead
    }

    /// True once the whole pattern has been consumed.
    pub fn is_complete(&self) -> bool {
        matches!(self.state, ScanState::Matching { pos } if pos == self.pattern.len())
    }

    /// Feed the next text byte.
    ///
    /// Entering a placeholder consumes the current byte as content, so a
    /// placeholder always covers at least one byte of text. A placeholder
    /// that ends the pattern has no anchor and completes the pattern on the
    /// spot; its content runs to the end of the text.
    ///
    /// A placeholder position is checked before the literal compare, so the
    /// bytes of a `{{ }}` marker are never matched against the text: a text
    /// byte that happens to equal the marker's `{` is placeholder content.
    ///
    /// Skipped content always ends on a character boundary. UTF-8
    /// continuation bytes stay in the current placeholder, which keeps the
    /// first of two adjacent placeholders from splitting a multibyte
    /// character.
    pub fn step(&mut self, byte: u8) -> Step<'p> {
        let (pos, anchor) = match self.state {
            ScanState::Dead => return Step::Died,
            ScanState::Matching { pos } => (pos, None),
            ScanState::Skipping { pos, anchor } => (pos, Some(anchor)),
        };
        debug_assert!(pos < self.pattern.len(), "step called on a completed cursor");

        if anchor.is_some() && is_continuation(byte) {
            return Step::Skipped;
        }

        // The anchor reappearing ends the skipped content.
        let anchor = anchor.filter(|&expected| expected != byte);

        if let Some(placeholder) = self.pattern.placeholder_at(pos) {
            let next = placeholder.end;
            self.state = match self.pattern.as_bytes().get(next) {
                Some(&anchor) => ScanState::Skipping { pos: next, anchor },
                None => ScanState::Matching { pos: next },
            };
            return Step::Entered(placeholder);
        }

        if self.pattern.as_bytes().get(pos) == Some(&byte) {
            self.state = ScanState::Matching { pos: pos + 1 };
            return Step::Literal;
        }

        match anchor {
            Some(anchor) => {
                self.state = ScanState::Skipping { pos, anchor };
                Step::Skipped
            }
            None => {
                self.state = ScanState::Dead;
                Step::Died
            }
        }
    }
}

fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

/// Find the first pattern (in iteration order) whose structure matches `text`.
///
/// Returns the pattern's position in `patterns`. Every pattern advances on
/// the same text byte before the next byte is read, and patterns are visited
/// in order within a byte, so the earliest-registered pattern wins a tie.
/// The scan stops at the end of the text; a pattern still mid-way at that
/// point does not match.
pub fn find_match<'p, I>(patterns: I, text: &str) -> Option<usize>
where
    I: IntoIterator<Item = &'p Pattern>,
{
    let mut cursors: Vec<ScanCursor<'p>> = patterns.into_iter().map(ScanCursor::new).collect();

    // An empty pattern is complete before any byte is read.
    if let Some(index) = cursors.iter().position(ScanCursor::is_complete) {
        return Some(index);
    }

    let mut alive = cursors.len();
    for &byte in text.as_bytes() {
        if alive == 0 {
            break;
        }

        for (index, cursor) in cursors.iter_mut().enumerate() {
            if cursor.is_dead() {
                continue;
            }
            if cursor.step(byte) == Step::Died {
                alive -= 1;
            } else if cursor.is_complete() {
                return Some(index);
            }
        }
    }

    None
}
