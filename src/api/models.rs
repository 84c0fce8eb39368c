use serde::{Deserialize, Serialize};

use crate::cards::{ItemCardModel, SiteSummaryModel};
use crate::controller::{ResultViewState, Status};

#[derive(Debug, Default, Deserialize)]
pub struct SiteQuery {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SiteResponse {
    pub query: String,
    pub status: Status,
    pub error_message: Option<String>,
    pub site_root: Option<String>,
    pub summary: Option<SiteSummaryModel>,
    pub items: Vec<ItemCardModel>,
    pub processing_time_ms: u128,
}

impl SiteResponse {
    pub fn from_state(state: &ResultViewState, default_logo: &str, processing_time_ms: u128) -> Self {
        SiteResponse {
            query: state.query.clone(),
            status: state.status,
            error_message: state.error_message.clone(),
            site_root: state.site_root.as_ref().map(|u| u.to_string()),
            summary: state.summary(default_logo),
            items: state.cards(),
            processing_time_ms,
        }
    }
}
