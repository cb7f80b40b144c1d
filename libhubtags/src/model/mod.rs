//! Tags page data model.
//!
//! These types mirror the JSON returned by the Docker Hub tags endpoint.
//! Fields the registry sends but hubtags does not interpret are kept in
//! `extra` so the raw and aggregate reports can re-serialize a page without
//! losing anything.

use crate::error::{HubTagsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};


/// One page of tags for a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Total number of tags in the repository (only reliable on page one)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    /// URL of the following page, `None` on the last page
    #[serde(default)]
    pub next: Option<String>,

    /// Tags on this page, in registry order
    pub results: Vec<ResultRow>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// The response body this page was decoded from
    #[serde(skip)]
    pub body: Vec<u8>,
}

impl Page {
    /// Decodes a page from a response body, keeping the bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubtags::model::Page;
    ///
    /// let body = br#"{"count": 1, "next": null, "results": [{"name": "latest"}]}"#;
    /// let page = Page::from_bytes(body.to_vec()).unwrap();
    /// assert_eq!(page.count, Some(1));
    /// assert_eq!(page.results[0].name, "latest");
    /// assert!(page.next.is_none());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `MalformedPage` when the body is not JSON or lacks `results`.
    pub fn from_bytes(body: Vec<u8>) -> Result<Self> {
        let mut page: Page = serde_json::from_slice(&body).map_err(|e| {
            HubTagsError::malformed_with_source("Failed to parse tags page", e)
        })?;
        page.body = body;
        Ok(page)
    }

    /// Returns the continuation URL, treating an empty string as absent.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// A single published tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Tag name
    pub name: String,

    /// Compressed size of the tag in bytes
    #[serde(default)]
    pub full_size: Option<u64>,

    /// RFC 3339 timestamp of the last push
    #[serde(default)]
    pub last_updated: Option<String>,

    /// Per-platform images, absent for some legacy tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageVariant>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Human-readable `full_size`, filled in by the enricher
    #[serde(skip)]
    pub size_display: String,

    /// Surviving architectures, filled in by the enricher
    #[serde(skip)]
    pub architectures: Vec<Architecture>,
}

impl ResultRow {
    /// Creates a bare row, mostly useful in tests and fixtures.
    pub fn new<S: Into<String>>(name: S, full_size: Option<u64>) -> Self {
        Self {
            name: name.into(),
            full_size,
            last_updated: None,
            images: None,
            extra: Map::new(),
            size_display: String::new(),
            architectures: Vec::new(),
        }
    }

    /// Sets the image list.
    pub fn with_images(mut self, images: Vec<ImageVariant>) -> Self {
        self.images = Some(images);
        self
    }

    /// Sets the last-updated timestamp.
    pub fn with_last_updated<S: Into<String>>(mut self, timestamp: S) -> Self {
        self.last_updated = Some(timestamp.into());
        self
    }

    /// Returns the architecture labels sorted ascending.
    pub fn sorted_architectures(&self) -> Vec<&Architecture> {
        let mut archs: Vec<&Architecture> = self.architectures.iter().collect();
        archs.sort_by(|a, b| a.label.cmp(&b.label));
        archs
    }
}

/// A platform-specific image inside a tag.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageVariant {
    #[serde(default)]
    pub architecture: String,

    #[serde(default)]
    pub variant: Option<String>,

    #[serde(default)]
    pub os: Option<String>,

    #[serde(default)]
    pub os_version: Option<String>,

    #[serde(default)]
    pub size: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImageVariant {
    /// Creates a variant for the given architecture.
    pub fn new<S: Into<String>>(architecture: S, size: Option<u64>) -> Self {
        Self {
            architecture: architecture.into(),
            size,
            ..Self::default()
        }
    }

    /// Normalized label: `{arch}[/{variant}][:{os initial}][-{os major}]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubtags::model::ImageVariant;
    ///
    /// let mut image = ImageVariant::new("arm", None);
    /// image.variant = Some("v7".to_string());
    /// image.os = Some("linux".to_string());
    /// assert_eq!(image.label(), "arm/v7:l");
    ///
    /// let mut win = ImageVariant::new("amd64", None);
    /// win.os = Some("windows".to_string());
    /// win.os_version = Some("10.0.20348.2340".to_string());
    /// assert_eq!(win.label(), "amd64:w-10");
    /// ```
    pub fn label(&self) -> String {
        let mut label = self.architecture.clone();

        if let Some(variant) = non_empty(&self.variant) {
            label.push('/');
            label.push_str(variant);
        }
        if let Some(initial) = non_empty(&self.os).and_then(|os| os.chars().next()) {
            label.push(':');
            label.push(initial);
        }
        if let Some(version) = non_empty(&self.os_version) {
            let major = version.split('.').next().unwrap_or(version);
            label.push('-');
            label.push_str(major);
        }

        label
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A normalized architecture label with the size of its image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Architecture {
    pub label: String,
    pub size: Option<u64>,
}

impl Architecture {
    pub fn new<S: Into<String>>(label: S, size: Option<u64>) -> Self {
        Self {
            label: label.into(),
            size,
        }
    }
}

/// Where a page sits in a run: which repository, and which page of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext<'a> {
    /// Zero-based position of the repository in the run
    pub repo_index: usize,
    /// Repository name as given by the user
    pub repo: &'a str,
    /// Zero-based page number within the repository
    pub page_index: usize,
}
