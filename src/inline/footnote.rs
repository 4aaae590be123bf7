//! Footnotes collected while formatting one document.

use std::fmt::Write;

use lazy_static::lazy_static;
use regex::Regex;

use crate::escape::escape_html_into;

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// One `((note))` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footnote {
    /// 1-based, in document order.
    pub number: usize,
    /// Note text as written, embedded tags included.
    pub note: String,
    /// Plain-text form of the note, used for the anchor's `title`.
    pub title: String,
}

impl Footnote {
    pub(crate) fn new(number: usize, note: &str) -> Self {
        Self {
            number,
            note: note.to_owned(),
            title: plain_title(note),
        }
    }
}

/// Strip tags and decode entities so the title can be escaped exactly once.
fn plain_title(note: &str) -> String {
    let stripped = TAG.replace_all(note, "");
    html_escape::decode_html_entities(&stripped).into_owned()
}

/// Render the footnote block appended after the document body.
///
/// Returns an empty string when there are no footnotes.
///
/// # Example
/// ```
/// use xatena::render_footnotes;
///
/// let mut converter = xatena::Converter::new();
/// converter.to_html("text((note))");
/// assert_eq!(
///     render_footnotes(converter.footnotes()),
///     "<div class=\"footnote\">\n<p class=\"footnote\"><a href=\"#fn1\" name=\"f1\">*1</a>: note</p>\n</div>"
/// );
/// ```
pub fn render_footnotes(footnotes: &[Footnote]) -> String {
    if footnotes.is_empty() {
        return String::new();
    }
    let mut out = String::from("<div class=\"footnote\">\n");
    for footnote in footnotes {
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "<p class=\"footnote\"><a href=\"#fn{n}\" name=\"f{n}\">*{n}</a>: ",
            n = footnote.number
        );
        out.push_str(&footnote.note);
        out.push_str("</p>\n");
    }
    out.push_str("</div>");
    out
}

/// Anchor emitted in place of `((note))`.
pub(crate) fn write_anchor(out: &mut String, footnote: &Footnote) {
    let _ = write!(out, "<a href=\"#fn{}\" title=\"", footnote.number);
    escape_html_into(out, &footnote.title);
    let _ = write!(out, "\">*{}</a>", footnote.number);
}
