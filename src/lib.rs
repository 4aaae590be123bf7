//! xatena: Hatena diary notation to HTML converter
//!
//! Converts the line-oriented markup of the Hatena diary (sections, lists,
//! tables, quotes, preformatted blocks, definition lists, footnotes and
//! bracketed links) into HTML, reproducing the legacy dialect's paragraph
//! and line-break behavior.
//!
//! # Design
//! - Two passes: a line-oriented block parser builds an arena tree, then a
//!   recursive renderer writes HTML
//! - Leaf text goes through an ordered chain of regex rules; callers can
//!   extend the chain
//! - Conversion never fails: unknown lines are text, unclosed blocks are
//!   closed at end of input
//!
//! # Example
//! ```
//! let html = xatena::to_html("* Hello\nWorld");
//! assert_eq!(
//!     html,
//!     "<div class=\"section\">\n<h3>Hello</h3>\n<p>World</p>\n</div>"
//! );
//! ```

use std::borrow::Cow;

use log::debug;
use memchr::memchr;

pub mod block;
pub mod cursor;
pub mod error;
pub mod escape;
pub mod inline;
pub mod limits;
pub mod render;

pub use block::{BlockParser, NodeId, NodeKind, Tree};
pub use error::{Error, Result};
pub use inline::{
    render_footnotes, CachedTitles, FormatContext, Footnote, InlineFormatter, InlineRule,
    TitleResolver, UriAsTitle,
};
pub use render::{render_tree, HtmlWriter};

/// Conversion options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Emulate hatena.ne.jp output: every line break starts a paragraph and
    /// sections are bare headings without a wrapping `<div>`.
    pub hatena_compatible: bool,
    /// Append a footnote block after the document when it has footnotes.
    pub footnote_section: bool,
}

/// Reusable converter holding the inline formatter.
///
/// Footnotes are numbered per document; each [`to_html`](Self::to_html)
/// call starts again at 1 and leaves that document's footnotes readable
/// through [`footnotes`](Self::footnotes).
///
/// # Example
/// ```
/// let mut converter = xatena::Converter::new();
/// let html = converter.to_html("foo((bar))");
/// assert_eq!(html, "<p>foo<a href=\"#fn1\" title=\"bar\">*1</a></p>");
/// assert_eq!(converter.footnotes()[0].note, "bar");
/// ```
#[derive(Debug, Default)]
pub struct Converter {
    formatter: InlineFormatter,
    options: Options,
}

impl Converter {
    /// Converter with default options and the built-in inline rules.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        Self::with_formatter(InlineFormatter::new(), options)
    }

    /// Converter using a customized formatter (extra rules, title hook).
    pub fn with_formatter(formatter: InlineFormatter, options: Options) -> Self {
        Self { formatter, options }
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse `input` into a block tree without rendering it.
    pub fn parse(&self, input: &str) -> Tree {
        let input = normalize_newlines(input);
        BlockParser::new(&input).parse()
    }

    /// Convert one document to HTML.
    ///
    /// The result has no trailing newline.
    pub fn to_html(&mut self, input: &str) -> String {
        self.formatter.reset();
        let tree = self.parse(input);
        let mut html = render_tree(&tree, &mut self.formatter, self.options.hatena_compatible);

        if self.options.footnote_section && !self.formatter.footnotes().is_empty() {
            html.push_str(&render_footnotes(self.formatter.footnotes()));
        }

        let trimmed = html.trim_end_matches('\n').len();
        html.truncate(trimmed);
        debug!(
            "converted {} bytes into {} bytes of HTML ({} nodes, {} footnotes)",
            input.len(),
            html.len(),
            tree.len(),
            self.formatter.footnotes().len()
        );
        html
    }

    /// Footnotes of the last converted document.
    #[inline]
    pub fn footnotes(&self) -> &[Footnote] {
        self.formatter.footnotes()
    }

    #[inline]
    pub fn formatter(&self) -> &InlineFormatter {
        &self.formatter
    }

    #[inline]
    pub fn formatter_mut(&mut self) -> &mut InlineFormatter {
        &mut self.formatter
    }
}

/// Convert Hatena notation to HTML with default options.
///
/// # Example
/// ```
/// let html = xatena::to_html("- one\n- two");
/// assert_eq!(html, "<ul>\n<li>one</li>\n<li>two</li>\n</ul>");
/// ```
pub fn to_html(input: &str) -> String {
    Converter::new().to_html(input)
}

/// Convert Hatena notation to HTML with options.
pub fn to_html_with_options(input: &str, options: &Options) -> String {
    Converter::with_options(*options).to_html(input)
}

/// Turn `\r\n` and lone `\r` into `\n`.
fn normalize_newlines(input: &str) -> Cow<'_, str> {
    if memchr(b'\r', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }
    Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
}
