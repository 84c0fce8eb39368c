use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header},
    routing::get,
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::time::Duration;

use siteview::controller::{LOAD_FAILED_MESSAGE, Msg, ResultsController, Status};
use siteview::fetcher::{FetchError, ManifestFetcher};

mod common;

async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn manifest_router() -> Router {
    Router::new()
        .route("/site.json", get(|| async { Json(common::demo_manifest()) }))
        .route(
            "/docs/site.json",
            get(|| async { Json(common::full_manifest()) }),
        )
        .route(
            "/html/site.json",
            get(|| async { ([(header::CONTENT_TYPE, "text/html")], "<html>oops</html>") }),
        )
        .route(
            "/broken/site.json",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/agent/site.json",
            get(|headers: HeaderMap| async move {
                let agent = headers
                    .get(header::USER_AGENT)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "title": agent, "items": [] }))
            }),
        )
}

fn fetcher() -> ManifestFetcher {
    ManifestFetcher::new(Duration::from_secs(5), "siteview-tests").unwrap()
}

#[tokio::test]
async fn test_fetch_appends_manifest_file() {
    let addr = spawn_server(manifest_router()).await;

    let fetched = fetcher().fetch(&format!("http://{addr}")).await.unwrap();
    assert_eq!(fetched.endpoint.as_str(), format!("http://{addr}/site.json"));
    assert_eq!(fetched.body["title"], "Demo");

    let fetched = fetcher().fetch(&format!("http://{addr}/docs/")).await.unwrap();
    assert_eq!(
        fetched.endpoint.as_str(),
        format!("http://{addr}/docs/site.json")
    );
    assert_eq!(fetched.body["title"], "Course Site");
}

#[tokio::test]
async fn test_fetch_uses_manifest_url_verbatim() {
    let addr = spawn_server(manifest_router()).await;

    let url = format!("http://{addr}/docs/site.json");
    let fetched = fetcher().fetch(&url).await.unwrap();
    assert_eq!(fetched.endpoint.as_str(), url);
    assert!(fetched.body["items"].is_array());
}

#[tokio::test]
async fn test_fetch_error_kinds() {
    let addr = spawn_server(manifest_router()).await;
    let fetcher = fetcher();

    match fetcher.fetch(&format!("http://{addr}/missing")).await {
        Err(FetchError::Unreachable { status, url }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(url.path(), "/missing/site.json");
        }
        other => panic!("expected Unreachable, got {other:?}"),
    }

    match fetcher.fetch(&format!("http://{addr}/broken")).await {
        Err(FetchError::Unreachable { status, .. }) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
        }
        other => panic!("expected Unreachable, got {other:?}"),
    }

    match fetcher.fetch(&format!("http://{addr}/html")).await {
        Err(FetchError::InvalidBody { .. }) => {}
        other => panic!("expected InvalidBody, got {other:?}"),
    }

    match fetcher.fetch("not a url").await {
        Err(FetchError::InvalidUrl { .. }) => {}
        other => panic!("expected InvalidUrl, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_network_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    match fetcher().fetch(&format!("http://{addr}")).await {
        Err(FetchError::NetworkFailure { url, .. }) => {
            assert_eq!(url.as_str(), format!("http://{addr}/site.json"))
        }
        other => panic!("expected NetworkFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let addr = spawn_server(manifest_router()).await;
    let fetched = fetcher()
        .fetch(&format!("http://{addr}/agent"))
        .await
        .unwrap();
    assert_eq!(fetched.body["title"], Value::from("siteview-tests"));
}

#[tokio::test]
async fn test_controller_over_http() {
    let addr = spawn_server(manifest_router()).await;
    let mut controller = ResultsController::new(fetcher());

    let state = controller
        .dispatch(Msg::Search(format!("http://{addr}/docs")))
        .await;
    assert_eq!(state.status, Status::Loaded);
    assert_eq!(state.cards().len(), 2);
    assert_eq!(
        state.site_root.as_ref().map(|u| u.to_string()),
        Some(format!("http://{addr}/docs/"))
    );

    let state = controller
        .dispatch(Msg::Search(format!("http://{addr}/missing")))
        .await;
    assert_eq!(state.status, Status::Error);
    assert_eq!(state.error_message.as_deref(), Some(LOAD_FAILED_MESSAGE));
    assert!(state.cards().is_empty());
}
