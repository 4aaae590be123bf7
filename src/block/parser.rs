//! Block parser: line dispatch and the open-container stack.

use log::{debug, trace};

use crate::cursor::LineCursor;
use crate::limits::MAX_BLOCK_NESTING;

use super::node::{NodeId, NodeKind, Tree};

/// Block parser state for one document.
///
/// Each line is offered to the block constructs in a fixed priority order;
/// the first that recognizes it consumes one or more lines and updates the
/// stack of open containers. Unclaimed lines become text in the innermost
/// open container.
pub struct BlockParser<'a> {
    pub(super) cursor: LineCursor<'a>,
    pub(super) tree: Tree,
    /// Open containers, innermost last. `stack[0]` is always the root.
    pub(super) stack: Vec<NodeId>,
}

impl<'a> BlockParser<'a> {
    /// Create a parser over normalized input (`\n` line endings only).
    pub fn new(input: &'a str) -> Self {
        let tree = Tree::new();
        let root = tree.root();
        Self {
            cursor: LineCursor::new(input),
            tree,
            stack: vec![root],
        }
    }

    /// Parse every line and return the finished tree.
    pub fn parse(mut self) -> Tree {
        while !self.cursor.is_eof() {
            self.parse_line();
        }
        debug!(
            "parsed {} lines into {} nodes ({} containers left open)",
            self.cursor.len(),
            self.tree.len(),
            self.stack.len() - 1
        );
        self.tree
    }

    /// Parse a single line (or the multi-line construct it opens).
    fn parse_line(&mut self) {
        let start = self.cursor.position();

        // Earlier entries win on ambiguous prefixes such as `>|` or `><`.
        let parsers: [(&str, fn(&mut Self) -> bool); 10] = [
            ("seemore", Self::try_seemore),
            ("superpre", Self::try_superpre),
            ("stopp", Self::try_stopp),
            ("blockquote", Self::try_blockquote),
            ("pre", Self::try_pre),
            ("list", Self::try_list),
            ("definition list", Self::try_definition_list),
            ("table", Self::try_table),
            ("section", Self::try_section),
            ("comment", Self::try_comment),
        ];

        for (name, parse) in parsers {
            if parse(self) {
                debug_assert!(self.cursor.position() > start, "{name} matched without consuming");
                trace!("line {}: {} ({} lines)", start + 1, name, self.cursor.position() - start);
                return;
            }
            debug_assert_eq!(self.cursor.position(), start, "{name} declined but consumed input");
        }

        if let Some(line) = self.cursor.next_line() {
            let parent = self.parent();
            self.tree.append(parent, NodeKind::Text(line.to_owned()));
        }
    }

    /// Innermost open container; new nodes attach here.
    #[inline]
    pub(super) fn parent(&self) -> NodeId {
        self.stack[self.stack.len() - 1]
    }

    /// Kind of the innermost open container.
    #[inline]
    pub(super) fn top_kind(&self) -> &NodeKind {
        self.tree.kind(self.parent())
    }

    /// Whether another container may be opened without exceeding the limit.
    #[inline]
    pub(super) fn can_open(&self) -> bool {
        self.stack.len() < MAX_BLOCK_NESTING
    }

    /// Attach a container to the current parent and make it the new parent.
    pub(super) fn open(&mut self, kind: NodeKind) -> NodeId {
        let id = self.tree.append(self.parent(), kind);
        self.stack.push(id);
        id
    }

    /// Attach a node to the current parent without opening it.
    #[inline]
    pub(super) fn attach(&mut self, kind: NodeKind) -> NodeId {
        self.tree.append(self.parent(), kind)
    }

    /// Close the innermost container.
    ///
    /// # Panics
    /// Panics when only the root is left; block parsers check before popping.
    pub(super) fn close(&mut self) -> NodeId {
        assert!(self.stack.len() > 1, "attempted to close the root container");
        self.stack.pop().unwrap_or_else(|| unreachable!())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Tree {
        BlockParser::new(input).parse()
    }

    fn kinds(tree: &Tree, id: NodeId) -> Vec<&'static str> {
        tree.children(id).iter().map(|&c| tree.kind(c).name()).collect()
    }

    #[test]
    fn test_plain_lines_become_text() {
        let tree = parse("foo\nbar");
        let root = tree.root();
        assert_eq!(kinds(&tree, root), vec!["text", "text"]);
        assert_eq!(
            tree.kind(tree.children(root)[1]),
            &NodeKind::Text("bar".into())
        );
    }

    #[test]
    fn test_empty_input_is_one_empty_line() {
        let tree = parse("");
        assert_eq!(kinds(&tree, tree.root()), vec!["text"]);
    }

    #[test]
    fn test_seemore_beats_section() {
        let tree = parse("====\n* head");
        let root = tree.root();
        assert_eq!(kinds(&tree, root), vec!["seemore"]);
        let seemore = tree.children(root)[0];
        assert_eq!(kinds(&tree, seemore), vec!["section"]);
    }

    #[test]
    fn test_superpre_beats_pre_and_blockquote() {
        let tree = parse(">||\n>>\n||<");
        assert_eq!(kinds(&tree, tree.root()), vec!["superpre"]);
    }

    #[test]
    fn test_stopp_beats_blockquote() {
        let tree = parse("><div>\nx\n</div><");
        let root = tree.root();
        assert_eq!(kinds(&tree, root), vec!["stopp"]);
        let stopp = tree.children(root)[0];
        assert_eq!(kinds(&tree, stopp), vec!["text", "text", "text"]);
    }

    #[test]
    fn test_text_attaches_to_innermost_container() {
        let tree = parse(">>\n* head\nbody\n<<\nafter");
        let root = tree.root();
        assert_eq!(kinds(&tree, root), vec!["blockquote", "text"]);
        let quote = tree.children(root)[0];
        let section = tree.children(quote)[0];
        assert_eq!(kinds(&tree, section), vec!["text"]);
    }

    #[test]
    fn test_nesting_limit_degrades_to_text() {
        let input = ">>\n".repeat(MAX_BLOCK_NESTING + 4);
        let tree = parse(&input);
        let mut depth = 0;
        let mut id = tree.root();
        while let Some(&child) = tree.children(id).first() {
            if !matches!(tree.kind(child), NodeKind::Blockquote { .. }) {
                break;
            }
            depth += 1;
            id = child;
        }
        assert_eq!(depth, MAX_BLOCK_NESTING - 1);
        assert_eq!(
            tree.kind(tree.children(id)[0]),
            &NodeKind::Text(">>".into())
        );
    }
}
