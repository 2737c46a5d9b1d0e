use super::*;

#[test]
fn new_card_text_renders_heading() {
    assert_eq!(render_markdown_html("# new card"), "<h1>new card</h1>\n");
}

#[test]
fn fenced_code_keeps_language_class() {
    let out = render_markdown_html("```rust\nfn main() {}\n```");
    assert!(out.contains("<code class=\"language-rust\">"));
    assert!(out.contains("fn main() {}"));
}

#[test]
fn raw_html_is_dropped() {
    let out = render_markdown_html("hi <script>alert(1)</script>\n\n<div>block</div>");
    assert!(!out.contains("<script>"));
    assert!(!out.contains("<div>"));
    assert!(out.contains("hi"));
}

#[test]
fn script_links_are_neutralized() {
    let out = render_markdown_html("[click](javascript:alert(document.cookie))");
    assert_eq!(out, "<p><a href=\"#\">click</a></p>\n");

    let out = render_markdown_html("[x](JavaScript:alert(1)) [y](vbscript:msgbox) <javascript:alert(2)>");
    assert_eq!(out.matches("href=\"#\"").count(), 3);
    assert!(!out.to_ascii_lowercase().contains("href=\"javascript"));
    assert!(!out.to_ascii_lowercase().contains("href=\"vbscript"));
}

#[test]
fn data_images_are_neutralized() {
    let out = render_markdown_html("![pic](data:text/html;base64,PHNjcmlwdD4=)");
    assert!(out.contains("src=\"#\""));
    assert!(!out.contains("data:"));
}

#[test]
fn web_mail_and_relative_links_are_kept() {
    let out = render_markdown_html(
        "[a](https://example.com/x?q=1) [b](http://localhost:3000) [c](mailto:me@example.com) [d](docs/a:b) [e](#top)",
    );
    assert!(out.contains("href=\"https://example.com/x?q=1\""));
    assert!(out.contains("href=\"http://localhost:3000\""));
    assert!(out.contains("href=\"mailto:me@example.com\""));
    assert!(out.contains("href=\"docs/a:b\""));
    assert!(out.contains("href=\"#top\""));
}

#[test]
fn tables_and_tasklists_are_enabled() {
    let out = render_markdown_html("| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done");
    assert!(out.contains("<table>"));
    assert!(out.contains("type=\"checkbox\""));
}

#[test]
fn empty_input_renders_nothing() {
    assert_eq!(render_markdown_html(""), "");
}
