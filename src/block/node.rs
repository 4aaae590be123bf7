//! Block node tree.
//!
//! Nodes live in a flat arena and refer to their children by index. The
//! parser only ever appends, so document order is insertion order and the
//! tree is acyclic by construction.

use smallvec::SmallVec;

/// Index of a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Ordered (`+`) or unordered (`-`) list container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    /// Kind selected by a single marker character.
    #[inline]
    pub fn from_marker(marker: u8) -> Self {
        if marker == b'+' {
            Self::Ordered
        } else {
            Self::Unordered
        }
    }

    /// HTML element name.
    #[inline]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// How a blockquote names its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Citation {
    /// `>http://example.com/>`
    Url(String),
    /// `>http://example.com/:title=Example>`
    UrlWithTitle { url: String, title: String },
    /// `>http://example.com/:title>`, display text comes from the title hook.
    UrlLookupTitle(String),
    /// `>anything else>`, run through the inline formatter.
    Text(String),
}

impl Citation {
    /// URL for the `cite` attribute, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) | Self::UrlLookupTitle(url) => Some(url),
            Self::UrlWithTitle { url, .. } => Some(url),
            Self::Text(_) => None,
        }
    }
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub header: bool,
    pub text: String,
}

/// A table row; most rows are narrow.
pub type Row = SmallVec<[Cell; 4]>;

/// A term and its descriptions, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub term: String,
    pub descriptions: Vec<String>,
}

/// Node variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Section {
        /// 1 for `*`, 2 for `**`, 3 for `***`.
        level: u8,
        title: String,
    },
    Blockquote {
        citation: Option<Citation>,
    },
    /// A run of list lines; children are `ListContainer`s.
    List,
    /// Children are `ListItem`s.
    ListContainer {
        kind: ListKind,
    },
    /// Children are `Text` and nested `ListContainer`s.
    ListItem,
    DefinitionList {
        items: Vec<Definition>,
    },
    Table {
        rows: Vec<Row>,
    },
    /// Block-parsed content rendered without paragraph wrapping.
    Pre,
    /// Raw content, escaped verbatim.
    SuperPre {
        lang: Option<String>,
        text: String,
    },
    /// Suppresses `<p>`/`<br />` insertion for its content.
    StopP,
    SeeMore {
        /// `=====` rather than `====`.
        is_super: bool,
    },
    Comment,
    Text(String),
}

impl NodeKind {
    /// Short name used in logs and render errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Section { .. } => "section",
            Self::Blockquote { .. } => "blockquote",
            Self::List => "list",
            Self::ListContainer { .. } => "list container",
            Self::ListItem => "list item",
            Self::DefinitionList { .. } => "definition list",
            Self::Table { .. } => "table",
            Self::Pre => "pre",
            Self::SuperPre { .. } => "superpre",
            Self::StopP => "stopp",
            Self::SeeMore { .. } => "seemore",
            Self::Comment => "comment",
            Self::Text(_) => "text",
        }
    }

    /// Whether nodes of this kind may own children.
    pub fn is_container(&self) -> bool {
        !matches!(
            self,
            Self::DefinitionList { .. }
                | Self::Table { .. }
                | Self::SuperPre { .. }
                | Self::Comment
                | Self::Text(_)
        )
    }
}

/// A node and its ordered children.
#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    children: Vec<NodeId>,
}

/// Arena holding every node of one document.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                children: Vec::new(),
            }],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new node as the last child of `parent`.
    ///
    /// # Panics
    /// Panics if `parent` is a leaf kind; only the parser creates nodes and
    /// it never attaches to leaves.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        assert!(
            self.nodes[parent.index()].kind.is_container(),
            "cannot attach a child to a {} node",
            self.nodes[parent.index()].kind.name()
        );
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Last child of `id`, if any.
    #[inline]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].children.last().copied()
    }

    /// Number of nodes, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
