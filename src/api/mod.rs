use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::UiConfig;
use crate::fetcher::ManifestSource;

pub mod handlers;
pub mod models;

/// Shared by every request; each request builds its own controller on top.
pub struct AppState<S> {
    pub source: Arc<S>,
    pub ui: Arc<UiConfig>,
}

impl<S> AppState<S> {
    pub fn new(source: S, ui: UiConfig) -> AppState<S> {
        AppState {
            source: Arc::new(source),
            ui: Arc::new(ui),
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        AppState {
            source: self.source.clone(),
            ui: self.ui.clone(),
        }
    }
}

/// Registers every route and view. Called once at start-up.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: ManifestSource + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::page_handler::<S>))
        .route("/api/site", get(handlers::site_handler::<S>))
        .route("/health", get(handlers::health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
