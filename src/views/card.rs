use reqwest::Url;
use std::fmt::Write;

use super::{escape_html, push_tag, resolve_link};
use crate::cards::ItemCardModel;

pub fn render_card(card: &ItemCardModel, site_root: Option<&Url>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<article class="page-item" data-slug="{}">"#,
        escape_html(&card.slug)
    );

    if !card.source.is_empty() {
        let _ = write!(
            out,
            r#"<img class="thumbnail" src="{}" alt="{}">"#,
            escape_html(&resolve_link(&card.source, site_root)),
            escape_html(&card.heading)
        );
    }

    out.push_str(r#"<div class="details">"#);
    let _ = write!(out, "<h2>{}</h2>", escape_html(&card.heading));
    if !card.last_updated.is_empty() {
        let _ = write!(
            out,
            r#"<p class="updated">Last Updated: {}</p>"#,
            escape_html(&card.last_updated)
        );
    }
    push_tag(&mut out, "p", "description", &card.description);

    link(&mut out, "content-link", "Content Link", &card.content_link, site_root);
    link(&mut out, "index-link", "Index Link", &card.index_link, site_root);
    link(&mut out, "media-link", "Media", &card.additional_info, site_root);

    out.push_str("</div></article>");
    out
}

fn link(out: &mut String, class: &str, label: &str, target: &str, site_root: Option<&Url>) {
    if target.is_empty() {
        return;
    }
    let _ = write!(
        out,
        r#"<a class="{class}" href="{}" target="_blank" rel="noopener">{label}</a>"#,
        escape_html(&resolve_link(target, site_root))
    );
}
