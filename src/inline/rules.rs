//! Built-in inline rules, highest priority first.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::escape::{encode_query_value, escape_html_into};

use super::footnote::write_anchor;
use super::{FormatContext, InlineRule};

const CHART_API: &str = "http://chart.apis.google.com/chart";

lazy_static! {
    static ref UNLINK: Regex = Regex::new(r"\[\]([\s\S]*?)\[\]").unwrap();
    static ref ESCAPED_FOOTNOTE: Regex = Regex::new(r"\(\(\(.*?\)\)\)").unwrap();
    static ref ESCAPED_FOOTNOTE_ALT: Regex = Regex::new(r"\)\(\(.*?\)\)\(").unwrap();
    static ref FOOTNOTE: Regex = Regex::new(r"\(\((.+?)\)\)").unwrap();
    static ref ANCHOR: Regex = Regex::new(r"(?i)<a[^>]+>[\s\S]*?</a>").unwrap();
    static ref COMMENT: Regex = Regex::new(r"<!--[\s\S]*?-->").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref HTTP_LINK: Regex = Regex::new(
        r"\[((?:https?|ftp)://[^\s:]+(?::\d+)?[^\s:]+)(:(?:title(?:=([^\]]+))?|barcode))?\]"
    )
    .unwrap();
    static ref BRACKETED_URL: Regex = Regex::new(r"\[((?:https?|ftp):[^\s<>\]]+)\]").unwrap();
    static ref MAILTO: Regex =
        Regex::new(r"\[mailto:([^\s@:?]+@[^\s@:?]+(?:\?[^\s]+)?)\]").unwrap();
    static ref TEX: Regex = Regex::new(r"\[tex:([^\]]+)\]").unwrap();
    static ref BARE_URL: Regex = Regex::new(r#"((?:https?|ftp):[^\s<>"]+)"#).unwrap();
}

/// The default rule chain.
pub(super) fn builtin() -> Vec<InlineRule> {
    vec![
        InlineRule::from_regex(UNLINK.clone(), |caps, _| group(caps, 1).to_owned()),
        InlineRule::from_regex(ESCAPED_FOOTNOTE.clone(), strip_outer),
        InlineRule::from_regex(ESCAPED_FOOTNOTE_ALT.clone(), strip_outer),
        InlineRule::from_regex(FOOTNOTE.clone(), footnote),
        InlineRule::from_regex(ANCHOR.clone(), keep),
        InlineRule::from_regex(COMMENT.clone(), |_, _| "<!-- -->".to_owned()),
        InlineRule::from_regex(TAG.clone(), keep),
        InlineRule::from_regex(HTTP_LINK.clone(), http_link),
        InlineRule::from_regex(BRACKETED_URL.clone(), autolink),
        InlineRule::from_regex(MAILTO.clone(), mailto),
        InlineRule::from_regex(TEX.clone(), tex),
        InlineRule::from_regex(BARE_URL.clone(), autolink),
    ]
}

#[inline]
fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str())
}

fn keep(caps: &Captures<'_>, _: &mut FormatContext<'_>) -> String {
    group(caps, 0).to_owned()
}

/// `(((x)))` becomes `((x))`; the bracket characters are ASCII.
fn strip_outer(caps: &Captures<'_>, _: &mut FormatContext<'_>) -> String {
    let whole = group(caps, 0);
    whole[1..whole.len() - 1].to_owned()
}

fn footnote(caps: &Captures<'_>, cx: &mut FormatContext<'_>) -> String {
    let footnote = cx.add_footnote(group(caps, 1));
    let mut out = String::new();
    write_anchor(&mut out, footnote);
    out
}

fn http_link(caps: &Captures<'_>, cx: &mut FormatContext<'_>) -> String {
    let uri = group(caps, 1);
    let option = group(caps, 2);
    let title = group(caps, 3);

    if option == ":barcode" {
        let mut out = format!(
            "<img src=\"{CHART_API}?chs=150x150&cht=qr&chl={}\" title=\"",
            encode_query_value(uri)
        );
        escape_html_into(&mut out, uri);
        out.push_str("\"/>");
        return out;
    }
    if option.starts_with(":title") {
        if title.is_empty() {
            return title_link(uri, cx);
        }
        return anchor(uri, title);
    }
    anchor(uri, uri)
}

/// Bracketed or bare URL; a `:barcode` leftover that the stricter link rule
/// rejected is left alone.
fn autolink(caps: &Captures<'_>, _: &mut FormatContext<'_>) -> String {
    let uri = group(caps, 1);
    if uri.ends_with(":barcode") || uri.starts_with(":title") {
        return group(caps, 0).to_owned();
    }
    anchor(uri, uri)
}

fn mailto(caps: &Captures<'_>, _: &mut FormatContext<'_>) -> String {
    let address = group(caps, 1);
    let mut out = String::from("<a href=\"mailto:");
    escape_html_into(&mut out, address);
    out.push_str("\">");
    escape_html_into(&mut out, address);
    out.push_str("</a>");
    out
}

fn tex(caps: &Captures<'_>, _: &mut FormatContext<'_>) -> String {
    let expr = group(caps, 1);
    let mut out = format!(
        "<img src=\"{CHART_API}?cht=tx&chl={}\" alt=\"",
        encode_query_value(expr)
    );
    escape_html_into(&mut out, expr);
    out.push_str("\"/>");
    out
}

/// Anchor whose text comes from the title hook.
pub(super) fn title_link(uri: &str, cx: &mut FormatContext<'_>) -> String {
    let title = cx.resolve_title(uri);
    anchor(uri, &title)
}

fn anchor(href: &str, text: &str) -> String {
    let mut out = String::with_capacity(href.len() + text.len() + 15);
    out.push_str("<a href=\"");
    escape_html_into(&mut out, href);
    out.push_str("\">");
    escape_html_into(&mut out, text);
    out.push_str("</a>");
    out
}
