//! HTML output: the writer buffer and the tree renderer.
//!
//! Rendering is a recursive walk. Each node writes its own decoration and
//! renders its children; runs of consecutive text children are joined,
//! passed once through the inline formatter and then split into
//! paragraphs on blank lines.

use log::warn;
use memchr::memchr;

use crate::block::{Citation, NodeId, NodeKind, Tree};
use crate::error::Error;
use crate::escape::escape_html_into;
use crate::inline::InlineFormatter;

/// HTML output writer backed by a `String`.
///
/// # Example
/// ```
/// use xatena::HtmlWriter;
///
/// let mut writer = HtmlWriter::new();
/// writer.paragraph_start();
/// writer.write_escaped("Hello <World>");
/// writer.paragraph_end();
///
/// assert_eq!(writer.into_string(), "<p>Hello &lt;World&gt;</p>\n");
/// ```
#[derive(Debug, Default)]
pub struct HtmlWriter {
    out: String,
}

impl HtmlWriter {
    #[inline]
    pub fn new() -> Self {
        Self {
            out: String::with_capacity(1024),
        }
    }

    /// Write raw markup without escaping.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Write text with HTML escaping.
    #[inline]
    pub fn write_escaped(&mut self, text: &str) {
        escape_html_into(&mut self.out, text);
    }

    #[inline]
    pub fn newline(&mut self) {
        self.out.push('\n');
    }

    /// Start a new line unless already at the start of one.
    #[inline]
    pub fn ensure_line_start(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Drop everything written after `len`.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.out.truncate(len);
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.out
    }

    // --- HTML Tag Helpers ---

    /// `<tag>\n`
    #[inline]
    pub fn open_tag_nl(&mut self, tag: &str) {
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    /// `</tag>\n`
    #[inline]
    pub fn close_tag_nl(&mut self, tag: &str) {
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    #[inline]
    pub fn paragraph_start(&mut self) {
        self.write_str("<p>");
    }

    #[inline]
    pub fn paragraph_end(&mut self) {
        self.write_str("</p>\n");
    }

    /// `<hN>`; callers keep `level` within 1..=6.
    #[inline]
    pub fn heading_start(&mut self, level: u8) {
        debug_assert!((1..=6).contains(&level));
        self.out.push_str("<h");
        self.out.push(char::from(b'0' + level));
        self.out.push('>');
    }

    /// `</hN>\n`
    #[inline]
    pub fn heading_end(&mut self, level: u8) {
        debug_assert!((1..=6).contains(&level));
        self.out.push_str("</h");
        self.out.push(char::from(b'0' + level));
        self.out.push_str(">\n");
    }

    /// `<br />\n`
    #[inline]
    pub fn line_break(&mut self) {
        self.write_str("<br />\n");
    }

    /// Visible placeholder for a node that could not be rendered.
    pub fn render_error(&mut self, err: &Error) {
        self.write_str("<div class=\"xatena-render-error\">render error: ");
        self.write_escaped(&err.to_string());
        self.write_str("</div>\n");
    }
}

/// Render a parsed tree to HTML.
///
/// The result keeps its trailing newline; [`Converter`](crate::Converter)
/// trims it.
pub fn render_tree(tree: &Tree, formatter: &mut InlineFormatter, hatena_compatible: bool) -> String {
    let mut writer = HtmlWriter::new();
    let mut renderer = Renderer {
        tree,
        formatter,
        hatena_compatible,
    };
    renderer.render_children(tree.root(), &mut writer, false);
    writer.into_string()
}

struct Renderer<'t, 'f> {
    tree: &'t Tree,
    formatter: &'f mut InlineFormatter,
    hatena_compatible: bool,
}

impl<'t> Renderer<'t, '_> {
    /// Render the children of `id`, grouping consecutive text nodes.
    fn render_children(&mut self, id: NodeId, w: &mut HtmlWriter, stopp: bool) {
        let tree = self.tree;
        let mut run: Vec<&'t str> = Vec::new();
        for &child in tree.children(id) {
            match tree.kind(child) {
                NodeKind::Text(text) => run.push(text),
                _ => {
                    self.flush_text(&mut run, w, stopp);
                    self.render_node(child, w, stopp);
                }
            }
        }
        self.flush_text(&mut run, w, stopp);
    }

    /// Render one node; a failure is replaced by an error marker.
    fn render_node(&mut self, id: NodeId, w: &mut HtmlWriter, stopp: bool) {
        let mark = w.len();
        if let Err(err) = self.write_node(id, w, stopp) {
            warn!("{err}");
            w.truncate(mark);
            w.render_error(&err);
        }
    }

    fn write_node(&mut self, id: NodeId, w: &mut HtmlWriter, stopp: bool) -> Result<(), Error> {
        let tree = self.tree;
        match tree.kind(id) {
            NodeKind::Text(_) => {
                unreachable!("text nodes are rendered through paragraph assembly")
            }
            NodeKind::Root => self.render_children(id, w, stopp),
            NodeKind::Section { level, title } => {
                let h = level
                    .checked_add(2)
                    .filter(|h| (3..=6).contains(h))
                    .ok_or_else(|| Error::Render {
                        node: "section",
                        reason: format!("heading level {level} is out of range"),
                    })?;
                if !self.hatena_compatible {
                    w.write_str("<div class=\"section\">\n");
                }
                w.heading_start(h);
                let title = self.formatter.format(title);
                w.write_str(&title);
                w.heading_end(h);
                self.render_children(id, w, stopp);
                if !self.hatena_compatible {
                    w.write_str("</div>\n");
                }
            }
            NodeKind::Blockquote { citation } => {
                match citation.as_ref().and_then(Citation::url) {
                    Some(url) => {
                        w.write_str("<blockquote cite=\"");
                        w.write_escaped(url);
                        w.write_str("\">\n");
                    }
                    None => w.open_tag_nl("blockquote"),
                }
                // The citation line precedes the body, so it is formatted first
                // to keep footnote numbers in document order.
                let cite = citation.as_ref().map(|citation| self.citation(citation));
                self.render_children(id, w, stopp);
                if let Some(cite) = cite {
                    w.write_str("<cite>");
                    w.write_str(&cite);
                    w.write_str("</cite>\n");
                }
                w.close_tag_nl("blockquote");
            }
            NodeKind::List => {
                for &container in tree.children(id) {
                    self.render_node(container, w, stopp);
                }
            }
            NodeKind::ListContainer { kind } => {
                w.open_tag_nl(kind.tag());
                for &item in tree.children(id) {
                    self.render_node(item, w, stopp);
                }
                w.close_tag_nl(kind.tag());
            }
            NodeKind::ListItem => {
                w.write_str("<li>");
                for &child in tree.children(id) {
                    match tree.kind(child) {
                        NodeKind::Text(text) => {
                            let text = self.formatter.format(text);
                            w.write_str(&text);
                        }
                        _ => {
                            w.ensure_line_start();
                            self.render_node(child, w, stopp);
                        }
                    }
                }
                w.write_str("</li>\n");
            }
            NodeKind::DefinitionList { items } => {
                w.open_tag_nl("dl");
                for item in items {
                    self.inline_element(w, "dt", &item.term);
                    for description in &item.descriptions {
                        self.inline_element(w, "dd", description);
                    }
                }
                w.close_tag_nl("dl");
            }
            NodeKind::Table { rows } => {
                w.open_tag_nl("table");
                for row in rows {
                    w.open_tag_nl("tr");
                    for cell in row {
                        let tag = if cell.header { "th" } else { "td" };
                        self.inline_element(w, tag, &cell.text);
                    }
                    w.close_tag_nl("tr");
                }
                w.close_tag_nl("table");
            }
            NodeKind::Pre => {
                w.open_tag_nl("pre");
                self.render_children(id, w, true);
                w.close_tag_nl("pre");
            }
            NodeKind::SuperPre { lang, text } => {
                w.write_str("<pre class=\"code");
                if let Some(lang) = lang {
                    w.write_str(" lang-");
                    w.write_escaped(lang);
                }
                w.write_str("\">");
                w.write_escaped(text);
                w.write_str("</pre>\n");
            }
            NodeKind::StopP => self.render_children(id, w, true),
            NodeKind::SeeMore { .. } => {
                w.write_str("<div class=\"seemore\">\n");
                self.render_children(id, w, stopp);
                w.write_str("</div>\n");
            }
            NodeKind::Comment => w.write_str("<!-- -->\n"),
        }
        Ok(())
    }

    /// `<tag>formatted text</tag>\n`
    fn inline_element(&mut self, w: &mut HtmlWriter, tag: &str, text: &str) {
        let text = self.formatter.format(text);
        w.write_str("<");
        w.write_str(tag);
        w.write_str(">");
        w.write_str(&text);
        w.close_tag_nl(tag);
    }

    fn citation(&mut self, citation: &Citation) -> String {
        match citation {
            Citation::Url(url) => link(url, url),
            Citation::UrlWithTitle { url, title } => link(url, title),
            Citation::UrlLookupTitle(url) => self.formatter.title_link(url),
            Citation::Text(text) => self.formatter.format(text),
        }
    }

    /// Join a buffered text run, format it once and write it out.
    fn flush_text(&mut self, run: &mut Vec<&str>, w: &mut HtmlWriter, stopp: bool) {
        if run.is_empty() {
            return;
        }
        let joined = run.join("\n");
        run.clear();
        if joined.is_empty() {
            return;
        }

        let formatted = self.formatter.format(&joined);
        if stopp {
            if !formatted.is_empty() {
                w.write_str(&formatted);
                w.newline();
            }
            return;
        }
        write_paragraphs(w, &formatted, self.hatena_compatible);
    }
}

fn link(href: &str, text: &str) -> String {
    let mut out = String::from("<a href=\"");
    escape_html_into(&mut out, href);
    out.push_str("\">");
    escape_html_into(&mut out, text);
    out.push_str("</a>");
    out
}

/// Piece of formatted text between newline runs.
#[derive(Debug, PartialEq, Eq)]
enum Piece<'a> {
    Text(&'a str),
    /// A run of at least the splitting threshold of newlines.
    Gap(usize),
}

/// Split `text` on runs of `min_run` or more newlines.
fn pieces(text: &str, min_run: usize) -> Vec<Piece<'_>> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut segment_start = 0;
    let mut pos = 0;
    while let Some(offset) = memchr(b'\n', &bytes[pos..]) {
        let run_start = pos + offset;
        let mut run_end = run_start;
        while run_end < bytes.len() && bytes[run_end] == b'\n' {
            run_end += 1;
        }
        let run = run_end - run_start;
        if run >= min_run {
            if run_start > segment_start {
                out.push(Piece::Text(&text[segment_start..run_start]));
            }
            out.push(Piece::Gap(run));
            segment_start = run_end;
        }
        pos = run_end;
    }
    if segment_start < text.len() {
        out.push(Piece::Text(&text[segment_start..]));
    }
    out
}

/// Wrap formatted text in paragraphs.
///
/// By default paragraphs break on blank lines and single newlines become
/// `<br />`. Compatible mode breaks on every newline. Either way each
/// newline beyond the second in a run adds a `<br />` between paragraphs.
fn write_paragraphs(w: &mut HtmlWriter, text: &str, hatena_compatible: bool) {
    let text = text.trim_matches('\n');
    if text.is_empty() {
        return;
    }
    let min_run = if hatena_compatible { 1 } else { 2 };
    for piece in pieces(text, min_run) {
        match piece {
            Piece::Text(segment) => {
                w.paragraph_start();
                for (i, line) in segment.split('\n').enumerate() {
                    if i > 0 {
                        w.line_break();
                    }
                    w.write_str(line);
                }
                w.paragraph_end();
            }
            Piece::Gap(run) => {
                for _ in 2..run {
                    w.line_break();
                }
            }
        }
    }
}
