//! HTTP access to the registry tags endpoint.
//!
//! The paginator only needs "GET this URL and hand back status and body",
//! expressed by the [`PageFetcher`] trait. [`HttpFetcher`] is the reqwest
//! implementation used by the CLI; tests substitute an in-memory fetcher.

use crate::error::{HubTagsError, Result};
use reqwest::Client as ReqwestClient;
use std::future::Future;
use std::time::Duration;

#[cfg(test)]
mod tests;

/// Namespace used for repositories given without one (`alpine`).
pub const DEFAULT_NAMESPACE: &str = "library";

/// Raw outcome of a single GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, untouched
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for statuses in 200-299.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text for diagnostics.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Fetches one page by URL.
///
/// Implementations return `Ok` for any HTTP response, successful or not;
/// interpreting the status is the paginator's job. `Err` is reserved for
/// transport failures where no response arrived.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchResponse>> + Send;
}

/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use libhubtags::client::ClientConfig;
///
/// let config = ClientConfig::new().with_timeout(60);
/// assert_eq!(config.timeout_seconds, 60);
/// assert_eq!(config.max_idle_per_host, 10);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
    /// Maximum idle connections per host (default: 10)
    pub max_idle_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_idle_per_host: 10,
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the maximum idle connections per host.
    pub fn with_max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }
}

/// reqwest-backed [`PageFetcher`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http_client: ReqwestClient,
    timeout_seconds: u64,
}

impl HttpFetcher {
    /// Creates a fetcher with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a fetcher with a custom configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubtags::client::{ClientConfig, HttpFetcher};
    ///
    /// let fetcher = HttpFetcher::with_config(ClientConfig::new().with_timeout(5)).unwrap();
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .user_agent(concat!("hubtags/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HubTagsError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            http_client,
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Translates a reqwest error into a HubTagsError.
    fn translate_reqwest_error(&self, error: reqwest::Error, url: &str) -> HubTagsError {
        if error.is_timeout() {
            HubTagsError::network_with_source(
                format!(
                    "Request to {} timed out after {} seconds",
                    url, self.timeout_seconds
                ),
                error,
            )
        } else if error.is_connect() {
            HubTagsError::network_with_source(format!("Failed to connect to {}", url), error)
        } else if error.is_request() {
            HubTagsError::network_with_source(format!("Failed to send request to {}", url), error)
        } else {
            HubTagsError::network_with_source(
                format!("Network error communicating with {}", url),
                error,
            )
        }
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let response = self
            .http_client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.translate_reqwest_error(e, url))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| HubTagsError::network_with_source("Failed to read response body", e))?;

        Ok(FetchResponse::new(status, body.to_vec()))
    }
}

/// Normalizes a registry URL by ensuring it has a scheme and removing
/// trailing slashes.
///
/// # Examples
///
/// ```
/// use libhubtags::client::normalize_registry_url;
///
/// assert_eq!(
///     normalize_registry_url("registry.hub.docker.com/").unwrap(),
///     "https://registry.hub.docker.com"
/// );
/// ```
pub fn normalize_registry_url(url: &str) -> Result<String> {
    let url = url.trim();

    if url.is_empty() {
        return Err(HubTagsError::config("Registry URL cannot be empty", None));
    }

    let url = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{}", url)
    } else {
        url.to_string()
    };

    let url = url.trim_end_matches('/').to_string();
    url::Url::parse(&url).map_err(|e| {
        HubTagsError::config_with_source(format!("Invalid registry URL '{}'", url), None, e)
    })?;

    Ok(url)
}

/// Builds the first tags page URL for a repository.
///
/// Names without a `/` live in the `library` namespace.
///
/// # Examples
///
/// ```
/// use libhubtags::client::tags_url;
///
/// assert_eq!(
///     tags_url("https://hub", "alpine"),
///     "https://hub/v2/repositories/library/alpine/tags/"
/// );
/// assert_eq!(
///     tags_url("https://hub", "grafana/loki"),
///     "https://hub/v2/repositories/grafana/loki/tags/"
/// );
/// ```
pub fn tags_url(registry_url: &str, repository: &str) -> String {
    if repository.contains('/') {
        format!("{}/v2/repositories/{}/tags/", registry_url, repository)
    } else {
        format!(
            "{}/v2/repositories/{}/{}/tags/",
            registry_url, DEFAULT_NAMESPACE, repository
        )
    }
}

/// Resolves a continuation link against the URL of the page it came from.
///
/// Absolute links are returned unchanged; relative links are joined.
pub fn resolve_next(current_url: &str, next: &str) -> Result<String> {
    let base = url::Url::parse(current_url).map_err(|e| {
        HubTagsError::malformed_with_source(format!("Invalid page URL '{}'", current_url), e)
    })?;
    let resolved = base.join(next).map_err(|e| {
        HubTagsError::malformed_with_source(format!("Invalid next link '{}'", next), e)
    })?;
    Ok(resolved.to_string())
}
