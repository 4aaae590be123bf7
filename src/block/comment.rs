//! Block comments (`<!-- ... -->`), possibly spanning lines.

use lazy_static::lazy_static;
use memchr::memmem;
use regex::Regex;

use super::node::NodeKind;
use super::parser::BlockParser;

lazy_static! {
    static ref COMMENT_CLOSE: Regex = Regex::new(r"^-->$").unwrap();
}

impl BlockParser<'_> {
    /// Replace a comment with a placeholder node, keeping any text before it.
    ///
    /// A comment closed on its opening line with text after `-->` is left to
    /// the inline formatter. An unclosed comment runs to a line holding only
    /// `-->`, or to the end of input.
    pub(super) fn try_comment(&mut self) -> bool {
        let Some(line) = self.cursor.peek() else {
            return false;
        };
        let Some(open) = memmem::find(line.as_bytes(), b"<!--") else {
            return false;
        };

        let after = &line[open + 4..];
        let closed = match memmem::find(after.as_bytes(), b"-->") {
            Some(close) if !after[close + 3..].trim().is_empty() => return false,
            Some(_) => true,
            None => false,
        };

        self.cursor.next_line();
        let before = &line[..open];
        if !before.trim().is_empty() {
            self.attach(NodeKind::Text(before.to_owned()));
        }
        if !closed {
            self.cursor.scan_until(&COMMENT_CLOSE);
        }
        self.attach(NodeKind::Comment);
        true
    }
}
