//! Section headings (`*`, `**`, `***`).

use lazy_static::lazy_static;
use regex::Regex;

use crate::limits::{MAX_BLOCK_NESTING, MAX_SECTION_LEVEL};

use super::node::NodeKind;
use super::parser::BlockParser;

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"^(\*+)(.*)$").unwrap();
}

impl BlockParser<'_> {
    /// Open a section, closing sections at the same or a deeper level first.
    ///
    /// A level-1 heading also closes an open `====` fold, so the fold ends
    /// where the next top-level section begins.
    pub(super) fn try_section(&mut self) -> bool {
        let start = self.cursor.position();
        if !self.cursor.scan(&HEADING) {
            return false;
        }
        let (level, title) = heading(self.cursor.group(1), self.cursor.group(2));

        // The frames this heading closes free room under the nesting cap.
        let closed = self.closed_by_heading(level);
        if self.stack.len() - closed >= MAX_BLOCK_NESTING {
            self.cursor.reset(start);
            return false;
        }
        for _ in 0..closed {
            self.close();
        }
        self.open(NodeKind::Section { level, title });
        true
    }

    /// Number of innermost frames a heading at `level` closes.
    fn closed_by_heading(&self, level: u8) -> usize {
        self.stack[1..]
            .iter()
            .rev()
            .take_while(|&&id| heading_closes(self.tree.kind(id), level))
            .count()
    }
}

fn heading_closes(open: &NodeKind, level: u8) -> bool {
    match open {
        NodeKind::Section { level: open, .. } => *open >= level,
        NodeKind::SeeMore { is_super: false } => level == 1,
        _ => false,
    }
}

/// Level and title for a heading line split into its star run and the rest.
fn heading(stars: &str, rest: &str) -> (u8, String) {
    // `**` alone is a level-1 heading titled `*`.
    if rest.is_empty() {
        return (1, stars[1..].to_owned());
    }

    let title = rest.trim();
    match u8::try_from(stars.len()) {
        Ok(level) if level <= MAX_SECTION_LEVEL => (level, title.to_owned()),
        _ => (1, format!("{}{}", &stars[1..], title)),
    }
}
