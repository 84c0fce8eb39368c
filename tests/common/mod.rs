#![allow(dead_code)]

use reqwest::{StatusCode, Url};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use siteview::fetcher::{FetchError, FetchedManifest, ManifestSource, manifest_endpoint};

pub enum FakeResponse {
    Json(Value),
    Status(u16),
    InvalidBody,
}

/// In-memory manifest source keyed by endpoint URL. Unknown endpoints answer 404.
#[derive(Default)]
pub struct FakeSource {
    responses: HashMap<String, FakeResponse>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, endpoint: &str, response: FakeResponse) -> Self {
        self.responses.insert(endpoint.to_string(), response);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl ManifestSource for FakeSource {
    async fn fetch_manifest(&self, base: &Url) -> Result<FetchedManifest, FetchError> {
        let endpoint = manifest_endpoint(base);
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(endpoint.to_string());

        match self.responses.get(endpoint.as_str()) {
            Some(FakeResponse::Json(body)) => Ok(FetchedManifest {
                endpoint,
                body: body.clone(),
            }),
            Some(FakeResponse::Status(code)) => Err(FetchError::Unreachable {
                url: endpoint,
                status: StatusCode::from_u16(*code).unwrap(),
            }),
            Some(FakeResponse::InvalidBody) => Err(FetchError::InvalidBody {
                url: endpoint,
                source: serde_json::from_str::<Value>("<html></html>").unwrap_err(),
            }),
            None => Err(FetchError::Unreachable {
                url: endpoint,
                status: StatusCode::NOT_FOUND,
            }),
        }
    }
}

pub fn demo_manifest() -> Value {
    json!({
        "title": "Demo",
        "items": [
            {
                "title": "A",
                "metadata": { "images": ["x.png"] },
                "location": "/a"
            }
        ]
    })
}

/// Shape of a manifest as published by the CMS, with nested metadata.
pub fn full_manifest() -> Value {
    json!({
        "id": "site-1",
        "title": "Course Site",
        "description": "Lecture notes and media",
        "metadata": {
            "site": {
                "name": "course-site",
                "created": 1_700_000_000,
                "updated": "2024-02-01T12:00:00Z",
                "logo": "files/logo.png"
            },
            "theme": {
                "element": "clean-one",
                "variables": {
                    "hexCode": "#1e407c",
                    "icon": "icons:book"
                }
            }
        },
        "items": [
            {
                "id": "item-1",
                "slug": "welcome",
                "title": "Welcome",
                "description": "Start here",
                "location": "pages/welcome/index.html",
                "metadata": {
                    "updated": 1_706_788_800,
                    "images": ["files/welcome.jpg"],
                    "videos": ["https://video.example.com/intro"],
                    "files": ["files/syllabus.pdf"]
                }
            },
            {
                "id": "item-2",
                "title": "Week 1",
                "description": "",
                "location": "pages/week-1/index.html",
                "metadata": {}
            }
        ]
    })
}
