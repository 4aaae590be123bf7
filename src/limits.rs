//! Nesting limits.
//!
//! These keep pathological inputs (thousands of nested quotes or list
//! markers) from building arbitrarily deep trees, which the recursive
//! renderer would otherwise walk on the call stack.

/// Maximum number of open containers on the parse stack, root included.
pub const MAX_BLOCK_NESTING: usize = 64;

/// Maximum list depth; a longer marker run is not a list line.
pub const MAX_LIST_DEPTH: usize = 32;

/// Headings deeper than this fold their extra stars back into the title.
pub const MAX_SECTION_LEVEL: u8 = 3;
