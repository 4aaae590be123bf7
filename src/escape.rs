//! HTML escaping and query-value encoding.
//!
//! Fast path: scan for the first escapable byte with memchr and bulk-copy
//! the clean prefix; most leaf text in diary markup contains none.

use memchr::{memchr2, memchr3};

/// Lookup table for bytes that must be escaped in text and attribute values.
const ESCAPE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'<' as usize] = true;
    table[b'>' as usize] = true;
    table[b'&' as usize] = true;
    table[b'"' as usize] = true;
    table[b'\'' as usize] = true;
    table
};

/// Escape `<`, `>`, `&`, `"` and `'` into `out`.
///
/// # Example
/// ```
/// let mut out = String::new();
/// xatena::escape::escape_html_into(&mut out, "<a href=\"x\">");
/// assert_eq!(out, "&lt;a href=&quot;x&quot;&gt;");
/// ```
#[inline]
pub fn escape_html_into(out: &mut String, input: &str) {
    if input.is_empty() {
        return;
    }

    let bytes = input.as_bytes();
    let mut pos = match first_escape(bytes) {
        Some(p) => p,
        None => {
            out.push_str(input);
            return;
        }
    };

    out.reserve(input.len() + input.len() / 8);
    out.push_str(&input[..pos]);

    while pos < bytes.len() {
        let scan_start = pos;
        while pos < bytes.len() && !ESCAPE_TABLE[bytes[pos] as usize] {
            pos += 1;
        }

        // Escapable bytes are ASCII, so these are char boundaries.
        if pos > scan_start {
            out.push_str(&input[scan_start..pos]);
        }

        if pos < bytes.len() {
            out.push_str(match bytes[pos] {
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'&' => "&amp;",
                b'"' => "&quot;",
                b'\'' => "&#39;",
                _ => unreachable!(),
            });
            pos += 1;
        }
    }
}

/// Percent-encode a value for use inside a URL query string.
///
/// Everything outside the unreserved set (`A-Z a-z 0-9 - _ . ~`) is encoded,
/// so the result is also safe inside a double-quoted attribute.
#[inline]
pub fn encode_query_value(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

#[inline]
fn first_escape(input: &[u8]) -> Option<usize> {
    let a = memchr3(b'<', b'>', b'&', input);
    let b = memchr2(b'"', b'\'', input);
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escape_html(input: &str) -> String {
        let mut out = String::new();
        escape_html_into(&mut out, input);
        out
    }

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape_html("Hello, World!"), "Hello, World!");
    }

    #[test]
    fn test_escape_tags() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
    }

    #[test]
    fn test_escape_amp() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_html("\"it's\""), "&quot;it&#39;s&quot;");
    }

    #[test]
    fn test_escape_mixed() {
        assert_eq!(
            escape_html("<a href=\"foobar\">foobar</a>"),
            "&lt;a href=&quot;foobar&quot;&gt;foobar&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_empty() {
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_escape_at_boundaries() {
        assert_eq!(escape_html("<"), "&lt;");
        assert_eq!(escape_html("hello<"), "hello&lt;");
        assert_eq!(escape_html("<hello"), "&lt;hello");
    }

    #[test]
    fn test_escape_multibyte() {
        assert_eq!(escape_html("日本語 <タグ>"), "日本語 &lt;タグ&gt;");
    }

    #[test]
    fn test_escape_into_appends() {
        let mut out = String::from("<p>");
        escape_html_into(&mut out, "1 > 0");
        assert_eq!(out, "<p>1 &gt; 0");
    }

    #[test]
    fn test_encode_query_value() {
        assert_eq!(encode_query_value("E=mc^2"), "E%3Dmc%5E2");
        assert_eq!(
            encode_query_value("http://example.com/"),
            "http%3A%2F%2Fexample.com%2F"
        );
        assert_eq!(encode_query_value("a b"), "a%20b");
    }
}
