//! Crate error type.

use thiserror::Error;

/// Errors surfaced to callers.
///
/// Converting a document never fails; these come from configuring the
/// converter (registering inline rules) and from the command-line front end.
#[derive(Debug, Error)]
pub enum Error {
    /// An inline rule pattern did not compile.
    #[error("invalid inline rule pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A node could not be rendered; the renderer substitutes a marker.
    #[error("cannot render {node}: {reason}")]
    Render { node: &'static str, reason: String },

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
