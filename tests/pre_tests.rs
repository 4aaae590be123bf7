//! Pre, superpre and stop-p tests.

use pretty_assertions::assert_eq;
use xatena::to_html;

#[test]
fn pre_keeps_lines_without_paragraphs() {
    assert_eq!(to_html(">|\nfoo\nbar\n|<"), "<pre>\nfoo\nbar\n</pre>");
}

#[test]
fn pre_close_after_text() {
    assert_eq!(to_html(">|\nfoo\nbar|<"), "<pre>\nfoo\nbar\n</pre>");
}

#[test]
fn pre_content_is_inline_formatted() {
    assert_eq!(
        to_html(">|\nhttp://a/\n|<"),
        "<pre>\n<a href=\"http://a/\">http://a/</a>\n</pre>"
    );
}

#[test]
fn pre_content_is_block_parsed() {
    assert_eq!(
        to_html(">|\n- a\n|<"),
        "<pre>\n<ul>\n<li>a</li>\n</ul>\n</pre>"
    );
}

#[test]
fn pre_followed_by_paragraph() {
    assert_eq!(to_html(">|\nx\n|<\ny"), "<pre>\nx\n</pre>\n<p>y</p>");
}

#[test]
fn superpre_escapes_raw_content() {
    assert_eq!(
        to_html(">||\n<b>x</b>\n* y\n||<"),
        "<pre class=\"code\">&lt;b&gt;x&lt;/b&gt;\n* y</pre>"
    );
}

#[test]
fn superpre_with_language() {
    assert_eq!(
        to_html(">|perl|\nmy $x;\n||<"),
        "<pre class=\"code lang-perl\">my $x;</pre>"
    );
}

#[test]
fn superpre_does_not_inline_format() {
    assert_eq!(
        to_html(">||\nhttp://a/ ((not a note))\n||<"),
        "<pre class=\"code\">http://a/ ((not a note))</pre>"
    );
}

#[test]
fn unterminated_superpre_drops_final_line() {
    assert_eq!(to_html(">||\na\nb"), "<pre class=\"code\">a</pre>");
}

#[test]
fn stopp_block_has_no_paragraphs() {
    assert_eq!(
        to_html("><blockquote>\n<p>test</p>\n</blockquote><"),
        "<blockquote>\n<p>test</p>\n</blockquote>"
    );
}

#[test]
fn stopp_single_lines_wrap_paragraph() {
    assert_eq!(
        to_html("><ins><\nfoo\n></ins><"),
        "<ins>\n<p>foo</p>\n</ins>"
    );
}

#[test]
fn stopp_close_outside_stopp_is_text() {
    assert_eq!(to_html("</div><"), "<p></div><</p>");
}
