//! Block-level parser for Hatena diary notation.
//!
//! The block parser is line-oriented and handles:
//! - Sections (`*`, `**`, `***`)
//! - Blockquotes, pre, superpre and stop-p regions
//! - Lists and definition lists
//! - Tables
//! - Fold markers and comments
//!
//! Anything else is text, assembled into paragraphs by the renderer.

mod comment;
mod list;
pub mod node;
mod parser;
mod quote;
mod seemore;
mod section;
mod table;

pub use node::{Cell, Citation, Definition, ListKind, NodeId, NodeKind, Row, Tree};
pub use parser::BlockParser;
