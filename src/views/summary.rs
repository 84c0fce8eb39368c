use reqwest::Url;
use std::fmt::Write;

use super::{escape_html, push_tag, resolve_link};
use crate::cards::SiteSummaryModel;

pub fn render_summary(summary: &SiteSummaryModel, site_root: Option<&Url>) -> String {
    let mut out = String::from(r#"<section class="site-info">"#);

    if !summary.logo.is_empty() {
        let _ = write!(
            out,
            r#"<img class="logo" src="{}" alt="{}">"#,
            escape_html(&resolve_link(&summary.logo, site_root)),
            escape_html(&summary.name)
        );
    }

    out.push_str(r#"<div class="details">"#);
    let _ = write!(out, r#"<h1 class="name">{}</h1>"#, escape_html(&summary.name));
    push_tag(&mut out, "p", "description", &summary.description);

    if !summary.theme.is_empty() {
        // The theme colour is rendered as text; it never reaches a style attribute.
        let _ = write!(
            out,
            r#"<p class="theme">Theme: <span class="swatch">{}</span></p>"#,
            escape_html(&summary.theme)
        );
    }
    push_tag(&mut out, "p", "icon", &summary.icon);
    if !summary.creation_date.is_empty() {
        let _ = write!(
            out,
            r#"<p class="created">Created: {}</p>"#,
            escape_html(&summary.creation_date)
        );
    }
    if !summary.last_updated.is_empty() {
        let _ = write!(
            out,
            r#"<p class="updated">Last Updated: {}</p>"#,
            escape_html(&summary.last_updated)
        );
    }
    let _ = write!(out, r#"<p class="count">{} items</p>"#, summary.item_count);

    out.push_str("</div></section>");
    out
}
