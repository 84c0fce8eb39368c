use std::fmt::Write;

use super::escape_html;

/// Search field and submit button. Submits `url` to `/` with GET.
pub fn render_search_form(query: &str, header: &str, button_label: &str) -> String {
    let mut out = String::from(r#"<div class="wrapper">"#);
    if !header.is_empty() {
        let _ = write!(out, "<h5>{}</h5>", escape_html(header));
    }
    let _ = write!(
        out,
        concat!(
            r#"<form class="search" method="get" action="/">"#,
            r#"<input type="text" id="input" name="url" placeholder="Enter URL here" value="{}">"#,
            r#"<button class="submit" type="submit">{}</button>"#,
            "</form></div>"
        ),
        escape_html(query),
        escape_html(button_label)
    );
    out
}
