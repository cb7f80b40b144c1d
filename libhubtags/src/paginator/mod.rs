//! Cursor over the pages of a repository's tag listing.
//!
//! The tags endpoint returns a `next` URL with every page. [`Paginator`]
//! follows that chain one page at a time: a page is only requested when the
//! caller asks for it, so at most one page is alive and a caller that stops
//! early never triggers another request.

use crate::client::{PageFetcher, resolve_next};
use crate::error::{HubTagsError, Result};
use crate::model::Page;
use tracing::debug;

#[cfg(test)]
mod tests;

/// Pull-based cursor over a chain of pages.
///
/// # Examples
///
/// ```no_run
/// use libhubtags::client::{HttpFetcher, tags_url};
/// use libhubtags::paginator::Paginator;
///
/// # async fn example() -> libhubtags::Result<()> {
/// let fetcher = HttpFetcher::new()?;
/// let mut pages = Paginator::new(&fetcher, tags_url("https://registry.hub.docker.com", "alpine"));
/// while let Some(page) = pages.next_page().await {
///     for row in page?.results {
///         println!("{}", row.name);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct Paginator<'a, F: PageFetcher> {
    fetcher: &'a F,
    next_url: Option<String>,
    pending_error: Option<HubTagsError>,
    pages_fetched: usize,
}

impl<'a, F: PageFetcher> Paginator<'a, F> {
    /// Creates a cursor positioned before the page at `start_url`.
    pub fn new<S: Into<String>>(fetcher: &'a F, start_url: S) -> Self {
        Self {
            fetcher,
            next_url: Some(start_url.into()),
            pending_error: None,
            pages_fetched: 0,
        }
    }

    /// URL the next call to [`Paginator::next_page`] will fetch, if any.
    pub fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref()
    }

    /// Number of pages successfully yielded so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetches and decodes the next page.
    ///
    /// Returns `None` once the chain is exhausted. The first failure is
    /// returned as `Some(Err(_))` and ends the chain: every later call
    /// returns `None` without touching the network.
    pub async fn next_page(&mut self) -> Option<Result<Page>> {
        if let Some(err) = self.pending_error.take() {
            return Some(Err(err));
        }
        let url = self.next_url.take()?;

        debug!(url = %url, page = self.pages_fetched, "fetching page");
        let response = match self.fetcher.fetch(&url).await {
            Ok(response) => response,
            Err(err) => return Some(Err(err)),
        };

        if !response.is_success() {
            let body = response.body_text();
            return Some(Err(HubTagsError::fetch_failed(url, response.status, body)));
        }

        let page = match Page::from_bytes(response.body) {
            Ok(page) => page,
            Err(err) => return Some(Err(err)),
        };

        if let Some(next) = page.next_url() {
            match resolve_next(&url, next) {
                Ok(next_url) if next_url == url => {
                    self.pending_error = Some(HubTagsError::malformed(format!(
                        "Next link of {} points back to the same page",
                        url
                    )));
                }
                Ok(next_url) => self.next_url = Some(next_url),
                Err(err) => self.pending_error = Some(err),
            }
        }

        self.pages_fetched += 1;
        Some(Ok(page))
    }
}

/// Convenience constructor mirroring [`Paginator::new`].
pub fn pages<'a, F: PageFetcher, S: Into<String>>(fetcher: &'a F, start_url: S) -> Paginator<'a, F> {
    Paginator::new(fetcher, start_url)
}
