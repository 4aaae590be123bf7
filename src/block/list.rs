//! Lists: runs of lines starting with `-` (unordered) or `+` (ordered).
//!
//! The marker run length is the nesting depth and its last character picks
//! the container kind at that depth, so `-+` is an ordered list nested in
//! an unordered one.

use lazy_static::lazy_static;
use regex::Regex;
use smallvec::SmallVec;

use crate::limits::MAX_LIST_DEPTH;

use super::node::{ListKind, NodeId, NodeKind};
use super::parser::BlockParser;

lazy_static! {
    static ref LIST_LINE: Regex = Regex::new(r"^([-+]+)\s*(.*)$").unwrap();
}

/// An open container; index `i` in the open stack is depth `i + 1`.
struct OpenList {
    container: NodeId,
    kind: ListKind,
}

impl BlockParser<'_> {
    /// Consume a run of list lines into one `List` node.
    ///
    /// The first line must carry text; once inside a list, a marker-only
    /// line is skipped. The list is attached to the current parent but not
    /// opened, since a list cannot contain other block constructs.
    pub(super) fn try_list(&mut self) -> bool {
        match self.cursor.peek().and_then(list_line) {
            Some((_, text)) if !text.trim().is_empty() => {}
            _ => return false,
        }

        let list = self.attach(NodeKind::List);
        let mut open: SmallVec<[OpenList; 8]> = SmallVec::new();

        while let Some((markers, text)) = self.cursor.peek().and_then(list_line) {
            self.cursor.next_line();
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            let depth = markers.len();
            let kind = ListKind::from_marker(markers.as_bytes()[depth - 1]);

            open.truncate(depth);
            if open.len() == depth && open[depth - 1].kind != kind {
                open.pop();
            }

            while open.len() < depth {
                let kind = ListKind::from_marker(markers.as_bytes()[open.len()]);
                let parent = match open.last() {
                    None => list,
                    Some(outer) => match self.tree.last_child(outer.container) {
                        Some(item) => item,
                        None => self.tree.append(outer.container, NodeKind::ListItem),
                    },
                };
                let container = self.tree.append(parent, NodeKind::ListContainer { kind });
                open.push(OpenList { container, kind });
            }

            let innermost = open[depth - 1].container;
            let item = self.tree.append(innermost, NodeKind::ListItem);
            self.tree.append(item, NodeKind::Text(text.to_owned()));
        }
        true
    }
}

/// Split a list line into its marker run and text.
fn list_line(line: &str) -> Option<(&str, &str)> {
    let caps = LIST_LINE.captures(line)?;
    let markers = caps.get(1)?.as_str();
    if markers.len() > MAX_LIST_DEPTH {
        return None;
    }
    Some((markers, caps.get(2).map_or("", |m| m.as_str())))
}
