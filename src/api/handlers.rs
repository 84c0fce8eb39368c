use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use std::time::Instant;

use crate::controller::{Msg, ResultViewState, ResultsController};
use crate::fetcher::ManifestSource;
use crate::views::render_page;

use super::AppState;
use super::models::{SiteQuery, SiteResponse};

async fn run_query<S>(app: &AppState<S>, query: &str) -> ResultViewState
where
    S: ManifestSource + Send + Sync + 'static,
{
    let mut controller = ResultsController::new(app.source.clone());
    controller.dispatch(Msg::Search(query.to_string())).await.clone()
}

pub async fn page_handler<S>(
    State(app): State<AppState<S>>,
    Query(params): Query<SiteQuery>,
) -> Html<String>
where
    S: ManifestSource + Send + Sync + 'static,
{
    let state = match params.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => run_query(&app, url).await,
        _ => ResultViewState::default(),
    };
    Html(render_page(&state, &app.ui))
}

pub async fn site_handler<S>(
    State(app): State<AppState<S>>,
    Query(params): Query<SiteQuery>,
) -> Result<Json<SiteResponse>, (StatusCode, String)>
where
    S: ManifestSource + Send + Sync + 'static,
{
    let start = Instant::now();

    let url = params.url.unwrap_or_default();
    if url.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "url parameter cannot be empty".to_string(),
        ));
    }

    let state = run_query(&app, url.trim()).await;
    let processing_time_ms = start.elapsed().as_millis();

    Ok(Json(SiteResponse::from_state(
        &state,
        &app.ui.default_logo,
        processing_time_ms,
    )))
}

pub async fn health_handler() -> &'static str {
    "ok"
}
