//! Fold marker tests.

use pretty_assertions::assert_eq;
use xatena::to_html;

#[test]
fn seemore_wraps_rest() {
    assert_eq!(
        to_html("a\n====\nb"),
        "<p>a</p>\n<div class=\"seemore\">\n<p>b</p>\n</div>"
    );
}

#[test]
fn seemore_ends_at_top_level_section() {
    assert_eq!(
        to_html("====\n* a\nx\n* b"),
        "<div class=\"seemore\">\n<div class=\"section\">\n<h3>a</h3>\n<p>x</p>\n</div>\n</div>\n\
         <div class=\"section\">\n<h3>b</h3>\n</div>"
    );
}

#[test]
fn super_seemore_runs_to_end() {
    assert_eq!(
        to_html("=====\n* a\n* b"),
        "<div class=\"seemore\">\n<div class=\"section\">\n<h3>a</h3>\n</div>\n\
         <div class=\"section\">\n<h3>b</h3>\n</div>\n</div>"
    );
}
