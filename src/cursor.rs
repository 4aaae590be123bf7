//! Line cursor for block-level scanning.
//!
//! The block parser never looks below line granularity on its own; every
//! construct is recognized by matching a pattern against the current line.

use memchr::memchr_iter;
use regex::{Captures, Regex};

/// A repositionable cursor over the lines of a normalized document.
///
/// # Example
/// ```
/// use xatena::cursor::LineCursor;
///
/// let mut cursor = LineCursor::new("first\nsecond");
/// assert_eq!(cursor.peek(), Some("first"));
/// assert_eq!(cursor.next_line(), Some("first"));
/// assert_eq!(cursor.peek(), Some("second"));
/// ```
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    matched: Option<Captures<'a>>,
}

impl<'a> LineCursor<'a> {
    /// Split `input` on `\n` and position the cursor on the first line.
    ///
    /// The input must already have its line endings normalized.
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: split_lines(input),
            pos: 0,
            matched: None,
        }
    }

    /// Current line index.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor back (or forward) to a previously observed position.
    #[inline]
    pub fn reset(&mut self, pos: usize) {
        debug_assert!(pos <= self.lines.len());
        self.pos = pos;
    }

    /// Total number of lines.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check whether the document has no lines at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Check if every line has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Current line without advancing.
    #[inline]
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Consume and return the current line.
    #[inline]
    pub fn next_line(&mut self) -> Option<&'a str> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }

    /// Match `re` against the current line.
    ///
    /// On success the line is consumed and the captures are kept for
    /// [`group`](Self::group). On failure nothing changes.
    pub fn scan(&mut self, re: &Regex) -> bool {
        let Some(line) = self.peek() else {
            return false;
        };
        match re.captures(line) {
            Some(caps) => {
                self.matched = Some(caps);
                self.pos += 1;
                true
            }
            None => false,
        }
    }

    /// Capture group `i` of the last successful scan, or `""` when absent.
    #[inline]
    pub fn group(&self, i: usize) -> &'a str {
        self.matched
            .as_ref()
            .and_then(|caps| caps.get(i))
            .map_or("", |m| m.as_str())
    }

    /// Consume lines until one matches `terminator`.
    ///
    /// The terminator line is included in the result. When input runs out
    /// first, everything up to the end is returned.
    pub fn scan_until(&mut self, terminator: &Regex) -> Vec<&'a str> {
        let mut lines = Vec::new();
        while let Some(line) = self.next_line() {
            lines.push(line);
            if terminator.is_match(line) {
                break;
            }
        }
        lines
    }
}

fn split_lines(input: &str) -> Vec<&str> {
    let mut lines = Vec::with_capacity(input.len() / 32 + 1);
    let mut start = 0;
    for nl in memchr_iter(b'\n', input.as_bytes()) {
        lines.push(&input[start..nl]);
        start = nl + 1;
    }
    lines.push(&input[start..]);
    lines
}
