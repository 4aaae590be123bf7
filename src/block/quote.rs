//! Bracketed blocks: blockquote (`>>`/`<<`), pre (`>|`/`|<`),
//! superpre (`>||`/`||<`) and stop-p (`><tag>`/`</tag><`).

use lazy_static::lazy_static;
use regex::Regex;

use super::node::{Citation, NodeKind};
use super::parser::BlockParser;

lazy_static! {
    static ref QUOTE_OPEN: Regex = Regex::new(r"^>([^>]*)>$").unwrap();
    static ref CITE_URL: Regex =
        Regex::new(r"^((?:https?|ftp)://\S+?)(:title(?:=(.+))?)?$").unwrap();
    static ref PRE_CLOSE: Regex = Regex::new(r"^(.*)\|<$").unwrap();
    static ref SUPERPRE_OPEN: Regex = Regex::new(r"^>\|([^|]*)\|$").unwrap();
    static ref SUPERPRE_CLOSE: Regex = Regex::new(r"^\|\|<$").unwrap();
    static ref STOPP_OPEN: Regex = Regex::new(r"^>(<.+>)(<)?$").unwrap();
    static ref STOPP_CLOSE: Regex = Regex::new(r"^(.+>)<$").unwrap();
}

impl BlockParser<'_> {
    pub(super) fn try_blockquote(&mut self) -> bool {
        if self.cursor.peek() == Some("<<") {
            return self.close_blockquote();
        }
        if !self.can_open() || !self.cursor.scan(&QUOTE_OPEN) {
            return false;
        }
        let citation = citation(self.cursor.group(1));
        self.open(NodeKind::Blockquote { citation });
        true
    }

    /// `<<` closes any sections opened inside the quote, then the quote.
    ///
    /// With nothing but sections above the root there is nothing to close,
    /// so the line is left for the other parsers.
    fn close_blockquote(&mut self) -> bool {
        let frame = self
            .stack
            .iter()
            .rposition(|&id| !matches!(self.tree.kind(id), NodeKind::Section { .. }))
            .unwrap_or(0);
        if frame == 0 {
            return false;
        }
        self.cursor.next_line();
        self.stack.truncate(frame);
        true
    }

    pub(super) fn try_pre(&mut self) -> bool {
        if self.cursor.peek() == Some(">|") {
            if !self.can_open() {
                return false;
            }
            self.cursor.next_line();
            self.open(NodeKind::Pre);
            return true;
        }

        if !matches!(self.top_kind(), NodeKind::Pre) || !self.cursor.scan(&PRE_CLOSE) {
            return false;
        }
        let last = self.cursor.group(1);
        if !last.is_empty() {
            self.attach(NodeKind::Text(last.to_owned()));
        }
        self.close();
        true
    }

    /// Everything up to `||<` is kept verbatim; nothing inside is parsed.
    pub(super) fn try_superpre(&mut self) -> bool {
        if !self.cursor.scan(&SUPERPRE_OPEN) {
            return false;
        }
        let lang = self.cursor.group(1).trim();
        let lang = (!lang.is_empty()).then(|| lang.to_owned());

        let mut lines = self.cursor.scan_until(&SUPERPRE_CLOSE);
        // The terminator, or the final line when input ran out first.
        lines.pop();

        self.attach(NodeKind::SuperPre {
            lang,
            text: lines.join("\n"),
        });
        true
    }

    /// `><tag>` opens a region without paragraph wrapping, closed by a line
    /// ending in `><`. A line that both opens and closes (`><tag><`) stands
    /// alone.
    pub(super) fn try_stopp(&mut self) -> bool {
        if self.can_open() && self.cursor.scan(&STOPP_OPEN) {
            let tag = self.cursor.group(1);
            let self_closing = !self.cursor.group(2).is_empty();
            let stopp = self.attach(NodeKind::StopP);
            self.tree.append(stopp, NodeKind::Text(tag.to_owned()));
            if !self_closing {
                self.stack.push(stopp);
            }
            return true;
        }

        if !matches!(self.top_kind(), NodeKind::StopP) || !self.cursor.scan(&STOPP_CLOSE) {
            return false;
        }
        let tag = self.cursor.group(1);
        self.attach(NodeKind::Text(tag.to_owned()));
        self.close();
        true
    }
}

/// Classify the text between `>` and `>` of a blockquote opener.
fn citation(text: &str) -> Option<Citation> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let Some(caps) = CITE_URL.captures(text) else {
        return Some(Citation::Text(text.to_owned()));
    };
    let url = caps[1].to_owned();
    Some(match (caps.get(2), caps.get(3)) {
        (None, _) => Citation::Url(url),
        (Some(_), Some(title)) => Citation::UrlWithTitle {
            url,
            title: title.as_str().to_owned(),
        },
        (Some(_), None) => Citation::UrlLookupTitle(url),
    })
}
