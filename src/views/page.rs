use std::fmt::Write;

use super::{escape_html, render_card, render_search_form, render_summary};
use crate::config::UiConfig;
use crate::controller::{ResultViewState, Status};

const STYLE: &str = "\
body{font-family:sans-serif;margin:0;text-align:center}\
.wrapper{margin:auto;padding:16px}\
.site-info{display:inline-flex;max-width:480px;margin:auto;text-align:left}\
.site-info .logo{width:120px;height:120px;object-fit:contain}\
.results{display:flex;flex-wrap:wrap;justify-content:center}\
.page-item{width:240px;margin:20px;text-align:left}\
.page-item .thumbnail{display:block;width:240px;height:200px;object-fit:cover}\
.error{color:#b00020}";

/// Full results page: search form, then status, summary and item grid.
pub fn render_page(state: &ResultViewState, ui: &UiConfig) -> String {
    let mut body = render_search_form(&state.query, &ui.header, &ui.button_label);

    match state.status {
        Status::Idle | Status::Loaded => {}
        Status::Loading => body.push_str(r#"<p class="loading">Loading…</p>"#),
        Status::Error => {
            let message = state.error_message.as_deref().unwrap_or_default();
            let _ = write!(
                body,
                r#"<p class="error" role="alert">{}</p>"#,
                escape_html(message)
            );
        }
    }

    let site_root = state.site_root.as_ref();
    if let Some(summary) = state.summary(&ui.default_logo) {
        body.push_str(&render_summary(&summary, site_root));
        body.push_str(r#"<div class="results">"#);
        for card in state.cards() {
            body.push_str(&render_card(&card, site_root));
        }
        body.push_str("</div>");
    }

    let title = state
        .manifest
        .as_ref()
        .map(|m| m.title.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or(ui.header.as_str());

    format!(
        concat!(
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
            "<title>{}</title><style>{}</style></head><body>{}</body></html>"
        ),
        escape_html(title),
        STYLE,
        body
    )
}
