//! Markdown to HTML for card bodies.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;

/// URL schemes a rendered link or image may use. Scheme-less (relative)
/// URLs are always allowed.
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Render card markdown as HTML.
///
/// Raw HTML is dropped and link/image URLs outside [`ALLOWED_SCHEMES`]
/// become `#`; card text and model output are both untrusted.
pub fn render_markdown_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Link { link_type, dest_url: safe_url(dest_url), title, id }))
        }
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Image { link_type, dest_url: safe_url(dest_url), title, id }))
        }
        other => Some(other),
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_allowed_url(&url) { url } else { CowStr::Borrowed("#") }
}

/// Whether `url` is relative or uses an allowed scheme.
///
/// A colon only starts a scheme when it comes before any `/`, `?` or `#`;
/// `docs/a:b` and `#x:y` stay relative.
fn is_allowed_url(url: &str) -> bool {
    let Some(colon) = url.find(':') else {
        return true;
    };
    if url[..colon].contains(['/', '?', '#']) {
        return true;
    }
    let scheme = &url[..colon];
    ALLOWED_SCHEMES.iter().any(|allowed| scheme.eq_ignore_ascii_case(allowed))
}
