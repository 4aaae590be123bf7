//! Inline formatter for Hatena diary notation.
//!
//! Formatting is a single left-to-right pass over an ordered chain of
//! rules. At each step the leftmost match of any rule wins; when several
//! rules match at the same position the earliest rule in the chain wins.
//! Text between matches is copied through unchanged: leaf text may carry
//! raw HTML, which the tag rules pass along as-is.

mod footnote;
mod rules;
mod title;

pub use footnote::{render_footnotes, Footnote};
pub use title::{CachedTitles, TitleResolver, UriAsTitle};

use log::{debug, warn};
use regex::{Captures, Regex};

use crate::error::Result;

/// Replacement function of an [`InlineRule`].
pub type Handler = Box<dyn Fn(&Captures<'_>, &mut FormatContext<'_>) -> String + Send + Sync>;

/// A pattern and the function producing its replacement.
pub struct InlineRule {
    pattern: Regex,
    handler: Handler,
}

impl InlineRule {
    /// Compile `pattern` into a rule.
    ///
    /// # Example
    /// ```
    /// use xatena::{InlineFormatter, InlineRule};
    ///
    /// let mut formatter = InlineFormatter::new();
    /// let rule = InlineRule::new(r"\bTODO\b", |_, _| "<mark>TODO</mark>".to_owned())?;
    /// formatter.insert_rule(0, rule);
    /// assert_eq!(formatter.format("TODO: x"), "<mark>TODO</mark>: x");
    /// # Ok::<(), xatena::Error>(())
    /// ```
    pub fn new<F>(pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(&Captures<'_>, &mut FormatContext<'_>) -> String + Send + Sync + 'static,
    {
        Ok(Self::from_regex(Regex::new(pattern)?, handler))
    }

    /// Build a rule from an already compiled pattern.
    pub fn from_regex<F>(pattern: Regex, handler: F) -> Self
    where
        F: Fn(&Captures<'_>, &mut FormatContext<'_>) -> String + Send + Sync + 'static,
    {
        Self {
            pattern,
            handler: Box::new(handler),
        }
    }

    #[inline]
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl std::fmt::Debug for InlineRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InlineRule")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Per-document state handed to rule handlers.
pub struct FormatContext<'f> {
    footnotes: &'f mut Vec<Footnote>,
    titles: &'f mut (dyn TitleResolver + Send),
}

impl FormatContext<'_> {
    /// Record a footnote and return it; numbering continues the document's
    /// existing footnotes.
    pub fn add_footnote(&mut self, note: &str) -> &Footnote {
        let number = self.footnotes.len() + 1;
        self.footnotes.push(Footnote::new(number, note));
        &self.footnotes[number - 1]
    }

    /// Footnotes recorded so far in this document.
    #[inline]
    pub fn footnotes(&self) -> &[Footnote] {
        self.footnotes
    }

    /// Ask the title hook for a link's display text.
    #[inline]
    pub fn resolve_title(&mut self, uri: &str) -> String {
        self.titles.resolve_title(uri)
    }
}

/// Alternation of every rule pattern, rebuilt lazily after the chain changes.
enum Combined {
    Stale,
    Ready(Regex),
    /// The alternation did not compile; rules are scanned one by one.
    Unavailable,
}

/// Ordered inline rule chain plus the per-document footnote list and the
/// title hook.
///
/// One formatter serves one document at a time: footnote numbering carries
/// on across [`format`](Self::format) calls until [`reset`](Self::reset).
///
/// # Example
/// ```
/// use xatena::InlineFormatter;
///
/// let mut formatter = InlineFormatter::new();
/// assert_eq!(
///     formatter.format("((note))"),
///     "<a href=\"#fn1\" title=\"note\">*1</a>"
/// );
/// assert_eq!(formatter.footnotes()[0].note, "note");
/// ```
pub struct InlineFormatter {
    rules: Vec<InlineRule>,
    combined: Combined,
    footnotes: Vec<Footnote>,
    titles: Box<dyn TitleResolver + Send>,
}

impl InlineFormatter {
    /// Formatter with the built-in rules and the URI-as-title hook.
    pub fn new() -> Self {
        Self::with_title_resolver(UriAsTitle)
    }

    /// Formatter with the built-in rules and a custom title hook.
    pub fn with_title_resolver<R>(titles: R) -> Self
    where
        R: TitleResolver + Send + 'static,
    {
        Self {
            rules: rules::builtin(),
            combined: Combined::Stale,
            footnotes: Vec::new(),
            titles: Box::new(titles),
        }
    }

    /// Replace the title hook.
    pub fn set_title_resolver<R>(&mut self, titles: R)
    where
        R: TitleResolver + Send + 'static,
    {
        self.titles = Box::new(titles);
    }

    /// Append a rule at the lowest priority.
    pub fn add_rule(&mut self, rule: InlineRule) {
        self.rules.push(rule);
        self.combined = Combined::Stale;
    }

    /// Insert a rule at `index` in the chain; an index past the end appends.
    pub fn insert_rule(&mut self, index: usize, rule: InlineRule) {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule);
        self.combined = Combined::Stale;
    }

    #[inline]
    pub fn rules(&self) -> &[InlineRule] {
        &self.rules
    }

    /// Footnotes collected since the last [`reset`](Self::reset).
    #[inline]
    pub fn footnotes(&self) -> &[Footnote] {
        &self.footnotes
    }

    /// Forget collected footnotes so numbering restarts at 1.
    pub fn reset(&mut self) {
        self.footnotes.clear();
    }

    /// Apply the rule chain to `text`.
    ///
    /// One leading newline is dropped first.
    pub fn format(&mut self, text: &str) -> String {
        let text = text.strip_prefix('\n').unwrap_or(text);
        if self.rules.is_empty() {
            return text.to_owned();
        }
        self.ensure_combined();

        let Self {
            rules,
            combined,
            footnotes,
            titles,
        } = self;
        let combined = match combined {
            Combined::Ready(re) => Some(&*re),
            _ => None,
        };
        let mut cx = FormatContext {
            footnotes,
            titles: &mut **titles,
        };

        let mut out = String::with_capacity(text.len() + text.len() / 4);
        let mut pos = 0;
        while pos < text.len() {
            let Some((index, caps)) = next_match(rules, combined, text, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            out.push_str(&text[pos..whole.start()]);

            if whole.is_empty() {
                // A rule that matches nothing would stall the scan.
                let ch_len = text[whole.start()..].chars().next().map_or(1, char::len_utf8);
                out.push_str(&text[whole.start()..whole.start() + ch_len]);
                pos = whole.start() + ch_len;
                continue;
            }

            out.push_str(&(rules[index].handler)(&caps, &mut cx));
            pos = whole.end();
        }
        if pos < text.len() {
            out.push_str(&text[pos..]);
        }
        out
    }

    /// A `[uri:title]` link, resolved through the title hook.
    pub fn title_link(&mut self, uri: &str) -> String {
        let mut cx = FormatContext {
            footnotes: &mut self.footnotes,
            titles: &mut *self.titles,
        };
        rules::title_link(uri, &mut cx)
    }

    fn ensure_combined(&mut self) {
        if !matches!(self.combined, Combined::Stale) {
            return;
        }
        let alternation = self
            .rules
            .iter()
            .map(|rule| format!("(?:{})", rule.pattern.as_str()))
            .collect::<Vec<_>>()
            .join("|");
        self.combined = match Regex::new(&alternation) {
            Ok(re) => {
                debug!("compiled combined inline pattern for {} rules", self.rules.len());
                Combined::Ready(re)
            }
            Err(err) => {
                warn!("combined inline pattern failed to compile, scanning rules one by one: {err}");
                Combined::Unavailable
            }
        };
    }
}

impl Default for InlineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InlineFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InlineFormatter")
            .field("rules", &self.rules)
            .field("footnotes", &self.footnotes)
            .finish_non_exhaustive()
    }
}

/// Leftmost match at or after `pos`; ties go to the earliest rule.
fn next_match<'t>(
    rules: &[InlineRule],
    combined: Option<&Regex>,
    text: &'t str,
    pos: usize,
) -> Option<(usize, Captures<'t>)> {
    if let Some(combined) = combined {
        let start = combined.find_at(text, pos)?.start();
        let found = rules.iter().enumerate().find_map(|(i, rule)| {
            rule.pattern
                .captures_at(text, start)
                .filter(|caps| caps.get(0).is_some_and(|m| m.start() == start))
                .map(|caps| (i, caps))
        });
        if found.is_some() {
            return found;
        }
    }

    let mut best: Option<(usize, Captures<'t>)> = None;
    for (i, rule) in rules.iter().enumerate() {
        let Some(caps) = rule.pattern.captures_at(text, pos) else {
            continue;
        };
        let start = caps.get(0).map_or(usize::MAX, |m| m.start());
        let better = match &best {
            None => true,
            Some((_, prev)) => start < prev.get(0).map_or(usize::MAX, |m| m.start()),
        };
        if better {
            best = Some((i, caps));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        let mut formatter = InlineFormatter::new();
        assert_eq!(formatter.format("a & b < c"), "a & b < c");
    }

    #[test]
    fn test_leading_newline_dropped_once() {
        let mut formatter = InlineFormatter::new();
        assert_eq!(formatter.format("\nfoo"), "foo");
        assert_eq!(formatter.format("\n\nfoo"), "\nfoo");
    }

    #[test]
    fn test_earlier_rule_wins_at_same_position() {
        let mut formatter = InlineFormatter::new();
        // The unlink rule comes before every link rule.
        assert_eq!(formatter.format("[][http://a/][]"), "[http://a/]");
    }

    #[test]
    fn test_leftmost_match_wins_over_priority() {
        let mut formatter = InlineFormatter::new();
        assert_eq!(
            formatter.format("http://a/ ((n))"),
            "<a href=\"http://a/\">http://a/</a> <a href=\"#fn1\" title=\"n\">*1</a>"
        );
    }

    #[test]
    fn test_add_rule_runs_last() {
        let mut formatter = InlineFormatter::new();
        let rule = InlineRule::new(r"<b>", |_, _| "BOLD".to_owned()).unwrap();
        formatter.add_rule(rule);
        // The raw-tag rule claims `<b>` first.
        assert_eq!(formatter.format("<b>x"), "<b>x");
    }

    #[test]
    fn test_insert_rule_takes_priority() {
        let mut formatter = InlineFormatter::new();
        let rule = InlineRule::new(r"<b>", |_, _| "BOLD".to_owned()).unwrap();
        formatter.insert_rule(0, rule);
        assert_eq!(formatter.format("<b>x"), "BOLDx");
    }

    #[test]
    fn test_insert_after_format_rebuilds_pattern() {
        let mut formatter = InlineFormatter::new();
        assert_eq!(formatter.format("<b>x"), "<b>x");
        assert!(matches!(formatter.combined, Combined::Ready(_)));

        let rule = InlineRule::new(r"<b>", |_, _| "BOLD".to_owned()).unwrap();
        formatter.insert_rule(0, rule);
        assert!(matches!(formatter.combined, Combined::Stale));
        assert_eq!(formatter.format("<b>x"), "BOLDx");

        let rule = InlineRule::new(r"x", |_, _| "Y".to_owned()).unwrap();
        formatter.add_rule(rule);
        assert_eq!(formatter.format("<b>x"), "BOLDY");
    }

    #[test]
    fn test_insert_past_end_appends() {
        let mut formatter = InlineFormatter::new();
        let count = formatter.rules().len();
        let rule = InlineRule::new(r"zzz", |_, _| "Z".to_owned()).unwrap();
        formatter.insert_rule(count + 10, rule);
        assert_eq!(formatter.rules().len(), count + 1);
        assert_eq!(formatter.rules()[count].pattern().as_str(), "zzz");
        assert_eq!(formatter.format("zzz"), "Z");
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let err = InlineRule::new(r"(unclosed", |_, _| String::new()).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidPattern(_)));
    }

    #[test]
    fn test_empty_match_does_not_stall() {
        let mut formatter = InlineFormatter::new();
        formatter.insert_rule(0, InlineRule::new(r"x*", |_, _| "X".to_owned()).unwrap());
        assert_eq!(formatter.format("ab"), "ab");
        assert_eq!(formatter.format("axb"), "aXb");
    }

    #[test]
    fn test_footnotes_accumulate_until_reset() {
        let mut formatter = InlineFormatter::new();
        formatter.format("((a))");
        formatter.format("((b))");
        assert_eq!(formatter.footnotes().len(), 2);
        assert_eq!(formatter.footnotes()[1].number, 2);
        formatter.reset();
        assert_eq!(
            formatter.format("((c))"),
            "<a href=\"#fn1\" title=\"c\">*1</a>"
        );
    }

    #[test]
    fn test_handler_sees_context() {
        let mut formatter = InlineFormatter::new();
        formatter.insert_rule(
            0,
            InlineRule::new(r"#count", |_, cx| cx.footnotes().len().to_string()).unwrap(),
        );
        assert_eq!(formatter.format("((a)) #count"), "<a href=\"#fn1\" title=\"a\">*1</a> 1");
    }

    #[test]
    fn test_per_rule_scan_matches_combined() {
        let rules = rules::builtin();
        let text = "see [http://a/:title=A] and ((n)) <b>x</b>";
        let mut pos = 0;
        let combined_re = Regex::new(
            &rules
                .iter()
                .map(|r| format!("(?:{})", r.pattern.as_str()))
                .collect::<Vec<_>>()
                .join("|"),
        )
        .unwrap();
        while let Some((i, caps)) = next_match(&rules, Some(&combined_re), text, pos) {
            let (j, slow) = next_match(&rules, None, text, pos).unwrap();
            assert_eq!(i, j);
            assert_eq!(caps.get(0).unwrap().range(), slow.get(0).unwrap().range());
            pos = caps.get(0).unwrap().end();
        }
    }

    #[test]
    fn test_title_link_uses_resolver() {
        let mut formatter = InlineFormatter::with_title_resolver(|_: &str| "A & B".to_owned());
        assert_eq!(
            formatter.title_link("http://a/"),
            "<a href=\"http://a/\">A &amp; B</a>"
        );
    }
}
