//! In-memory fetcher and page builders shared by unit tests.

use crate::client::{FetchResponse, PageFetcher};
use crate::error::{HubTagsError, Result};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

pub(crate) const REGISTRY: &str = "https://hub.test";

/// Serves canned responses by URL and records every request.
#[derive(Default)]
pub(crate) struct ScriptedFetcher {
    responses: HashMap<String, FetchResponse>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(mut self, url: &str, body: String) -> Self {
        self.responses
            .insert(url.to_string(), FetchResponse::new(200, body));
        self
    }

    pub(crate) fn status(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), FetchResponse::new(status, body));
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| HubTagsError::network(format!("no route to {}", url)))
    }
}

/// First page URL for a repository on the test registry.
pub(crate) fn start_url(repository: &str) -> String {
    crate::client::tags_url(REGISTRY, repository)
}

/// URL of page `n` (1-based) for a repository on the test registry.
pub(crate) fn page_url(repository: &str, n: usize) -> String {
    if n == 1 {
        start_url(repository)
    } else {
        format!("{}?page={}", start_url(repository), n)
    }
}

/// Builds a tags page body with rows given as `(name, full_size)`.
pub(crate) fn page_body(count: u64, next: Option<&str>, rows: &[(&str, u64)]) -> String {
    let results: Vec<serde_json::Value> = rows
        .iter()
        .map(|(name, size)| {
            json!({
                "name": name,
                "full_size": size,
                "last_updated": "2024-02-03T04:05:06Z",
                "images": [
                    {"architecture": "amd64", "variant": null, "os": "linux", "os_version": null, "size": size}
                ]
            })
        })
        .collect();

    json!({"count": count, "next": next, "previous": null, "results": results}).to_string()
}
