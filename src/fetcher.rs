use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::config::CONFIG;

pub const MANIFEST_FILE: &str = "site.json";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{input:?} is not a valid absolute URL: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("network failure while fetching {url}: {source}")]
    NetworkFailure {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with {status}")]
    Unreachable { url: Url, status: StatusCode },

    #[error("{url} did not return a JSON document: {source}")]
    InvalidBody {
        url: Url,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw manifest plus the endpoint it was read from.
#[derive(Debug, Clone)]
pub struct FetchedManifest {
    pub endpoint: Url,
    pub body: Value,
}

/// Anything that can produce a raw manifest for an already validated base URL.
pub trait ManifestSource {
    fn fetch_manifest(
        &self,
        base: &Url,
    ) -> impl Future<Output = Result<FetchedManifest, FetchError>> + Send;
}

impl<T: ManifestSource + ?Sized> ManifestSource for Arc<T> {
    fn fetch_manifest(
        &self,
        base: &Url,
    ) -> impl Future<Output = Result<FetchedManifest, FetchError>> + Send {
        (**self).fetch_manifest(base)
    }
}

/// Parses user input into an absolute http(s) URL with a host.
pub fn parse_base_url(input: &str) -> Result<Url, FetchError> {
    let trimmed = input.trim();
    let invalid = |reason: String| FetchError::InvalidUrl {
        input: input.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(invalid("missing host".to_string())),
    }
}

/// `base` verbatim if it already points at the manifest, `base/site.json` otherwise.
pub fn manifest_endpoint(base: &Url) -> Url {
    let mut endpoint = base.clone();
    endpoint.set_fragment(None);

    let points_at_manifest = endpoint
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .is_some_and(|last| last == MANIFEST_FILE);
    if points_at_manifest {
        return endpoint;
    }

    let path = format!("{}/{}", endpoint.path().trim_end_matches('/'), MANIFEST_FILE);
    endpoint.set_path(&path);
    endpoint
}

/// Directory containing the manifest; item locations are relative to it.
pub fn site_root(endpoint: &Url) -> Url {
    let mut root = endpoint.join("./").unwrap_or_else(|_| endpoint.clone());
    root.set_query(None);
    root
}

pub struct ManifestFetcher {
    client: reqwest::Client,
}

impl ManifestFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> reqwest::Result<ManifestFetcher> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(ManifestFetcher { client })
    }

    pub fn from_config() -> reqwest::Result<ManifestFetcher> {
        Self::new(CONFIG.request_timeout, &CONFIG.user_agent)
    }

    /// Validates `base_url`, then performs a single GET against its manifest endpoint.
    pub async fn fetch(&self, base_url: &str) -> Result<FetchedManifest, FetchError> {
        let base = parse_base_url(base_url)?;
        self.fetch_manifest(&base).await
    }
}

impl ManifestSource for ManifestFetcher {
    async fn fetch_manifest(&self, base: &Url) -> Result<FetchedManifest, FetchError> {
        let endpoint = manifest_endpoint(base);
        log::info!("fetching manifest: {endpoint}");

        let res = self
            .client
            .get(endpoint.clone())
            .send()
            .await
            .map_err(|source| FetchError::NetworkFailure {
                url: endpoint.clone(),
                source,
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Unreachable {
                url: endpoint,
                status,
            });
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|source| FetchError::NetworkFailure {
                url: endpoint.clone(),
                source,
            })?;
        let body = serde_json::from_slice(&bytes).map_err(|source| FetchError::InvalidBody {
            url: endpoint.clone(),
            source,
        })?;

        Ok(FetchedManifest { endpoint, body })
    }
}

#[test]
fn test_manifest_endpoint() {
    let cases = [
        ("https://example.org", "https://example.org/site.json"),
        ("https://example.org/", "https://example.org/site.json"),
        ("https://example.org/docs", "https://example.org/docs/site.json"),
        ("https://example.org/docs/", "https://example.org/docs/site.json"),
        (
            "https://example.org/docs/site.json",
            "https://example.org/docs/site.json",
        ),
        ("http://localhost:8080/site.json", "http://localhost:8080/site.json"),
        (
            "https://example.org/mysite.json",
            "https://example.org/mysite.json/site.json",
        ),
    ];
    for (input, expected) in cases {
        let base = Url::parse(input).unwrap();
        assert_eq!(manifest_endpoint(&base).as_str(), expected, "input {input}");
    }
}

#[test]
fn test_site_root() {
    let endpoint = Url::parse("https://example.org/docs/site.json").unwrap();
    assert_eq!(site_root(&endpoint).as_str(), "https://example.org/docs/");

    let endpoint = Url::parse("https://example.org/site.json?v=2").unwrap();
    assert_eq!(site_root(&endpoint).as_str(), "https://example.org/");
}

#[test]
fn test_parse_base_url() {
    assert!(parse_base_url("https://example.org").is_ok());
    assert!(parse_base_url("  http://example.org/x  ").is_ok());

    for bad in ["not a url", "", "example.org", "ftp://example.org", "mailto:a@b.c"] {
        match parse_base_url(bad) {
            Err(FetchError::InvalidUrl { input, .. }) => assert_eq!(input, bad),
            other => panic!("expected InvalidUrl for {bad:?}, got {other:?}"),
        }
    }
}
