//! HTML rendering of view state. Every function here is pure: it takes an
//! already built model and returns markup.

use reqwest::Url;
use std::fmt::Write;

pub mod card;
pub mod page;
pub mod search;
pub mod summary;

pub use card::render_card;
pub use page::render_page;
pub use search::render_search_form;
pub use summary::render_summary;

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Resolves a manifest-relative link against the site root when one is known.
pub fn resolve_link(link: &str, site_root: Option<&Url>) -> String {
    if link.is_empty() {
        return String::new();
    }
    // Root-relative locations are relative to the site, not the host.
    let relative = match link.strip_prefix('/') {
        Some(rest) if !rest.starts_with('/') => rest,
        _ => link,
    };
    match site_root {
        Some(root) => root
            .join(relative)
            .map(String::from)
            .unwrap_or_else(|_| link.to_string()),
        None => link.to_string(),
    }
}

fn push_tag(out: &mut String, tag: &str, class: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    let _ = write!(out, r#"<{tag} class="{class}">{}</{tag}>"#, escape_html(text));
}

#[test]
fn test_escape_html() {
    assert_eq!(escape_html("plain"), "plain");
    assert_eq!(
        escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
    );
}

#[test]
fn test_resolve_link() {
    let root = Url::parse("https://example.org/docs/").unwrap();
    assert_eq!(
        resolve_link("pages/a/index.html", Some(&root)),
        "https://example.org/docs/pages/a/index.html"
    );
    assert_eq!(resolve_link("/a", Some(&root)), "https://example.org/docs/a");
    assert_eq!(
        resolve_link("https://cdn.example.com/x.png", Some(&root)),
        "https://cdn.example.com/x.png"
    );
    assert_eq!(resolve_link("/a", None), "/a");
    assert_eq!(resolve_link("", Some(&root)), "");
}
