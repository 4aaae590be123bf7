//! Property tests over generated documents.

use proptest::prelude::*;
use xatena::{to_html, to_html_with_options, Converter, Options};

const LINES: &[&str] = &[
    "", "text", "more text", "* head", "** sub", "*** subsub", "**** deep", "*", "- item",
    "-- nested", "-+ ordered", "+ first", "-", ">>", ">http://example.com/>", ">a book>", "<<",
    ">|", "end|<", "|<", ">||", ">|perl|", "||<", "><div>", "</div><", "><ins><", "|*h|c|",
    ":term:desc", "::more", "====", "=====", "<!--", "-->", "x<!-- c -->", "((note))",
    "(((escaped)))", "[http://example.com/:title]", "[]raw[]", "http://example.com/",
    "[tex:x^2]", "<b>", "\r",
];

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(LINES), 0..40).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn conversion_never_panics(doc in document(), compatible in any::<bool>()) {
        let options = Options { hatena_compatible: compatible, footnote_section: true };
        let html = to_html_with_options(&doc, &options);
        prop_assert!(!html.ends_with('\n'));
    }

    #[test]
    fn conversion_is_deterministic(doc in document()) {
        prop_assert_eq!(to_html(&doc), to_html(&doc));
    }

    #[test]
    fn headings_stay_within_h3_to_h5(doc in document()) {
        let html = to_html(&doc);
        for tag in ["<h1>", "<h2>", "<h6>"] {
            prop_assert!(!html.contains(tag));
        }
    }

    #[test]
    fn footnotes_are_gapless_and_reset(words in prop::collection::vec("[a-z]{1,8}", 1..12)) {
        let doc: String = words.iter().map(|w| format!("{w}(({w}))\n")).collect();
        let mut converter = Converter::new();
        for _ in 0..2 {
            converter.to_html(&doc);
            let numbers: Vec<_> = converter.footnotes().iter().map(|f| f.number).collect();
            let expected: Vec<_> = (1..=words.len()).collect();
            prop_assert_eq!(numbers, expected);
        }
    }
}

#[test]
fn deep_nesting_is_bounded() {
    let doc = ">>\n".repeat(10_000) + "deep";
    let html = to_html(&doc);
    assert!(html.ends_with("</blockquote>"));
    // Openers past the nesting limit stay as raw text.
    assert!(html.contains("<p>>><br />\n>>"));
}

#[test]
fn long_marker_runs_are_text() {
    let doc = format!("{} x", "-".repeat(1000));
    assert_eq!(to_html(&doc), format!("<p>{} x</p>", "-".repeat(1000)));
}
