//! Drives a run: repositories in order, pages in order, one report.

use crate::client::{PageFetcher, tags_url};
use crate::enrich::Enricher;
use crate::error::{HubTagsError, Result};
use crate::model::{Page, PageContext};
use crate::paginator::Paginator;
use crate::report::Report;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};


/// Shared flag set when the user asks the run to stop.
pub type CancelFlag = Arc<AtomicBool>;

/// What a finished run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Repositories the report was started for
    pub repositories: usize,
    pub pages: usize,
    pub rows: usize,
    /// Repositories aborted by a fetch-side error
    pub failures: usize,
    pub cancelled: bool,
}

/// Per-run hook bookkeeping.
#[derive(Debug, Default)]
struct RenderSession {
    started: bool,
}

impl RenderSession {
    fn begin_repository(&mut self, report: &mut dyn Report, out: &mut dyn Write) -> Result<()> {
        if self.started {
            report.on_separator(out)
        } else {
            self.started = true;
            report.on_start(out)
        }
    }
}

enum RepositoryOutcome {
    Completed,
    Cancelled,
}

/// Runs a report over the tags of a list of repositories.
pub struct Orchestrator<F: PageFetcher> {
    fetcher: F,
    registry_url: String,
    enricher: Enricher,
    side_channel: Option<Box<dyn Write + Send>>,
    cancel: CancelFlag,
}

impl<F: PageFetcher> Orchestrator<F> {
    /// Creates an orchestrator for an already normalized registry URL.
    pub fn new<S: Into<String>>(fetcher: F, registry_url: S) -> Self {
        Self {
            fetcher,
            registry_url: registry_url.into(),
            enricher: Enricher::default(),
            side_channel: None,
            cancel: CancelFlag::default(),
        }
    }

    pub fn with_enricher(mut self, enricher: Enricher) -> Self {
        self.enricher = enricher;
        self
    }

    /// Every fetched page body is copied to `sink`, one per line.
    pub fn with_side_channel(mut self, sink: Box<dyn Write + Send>) -> Self {
        self.side_channel = Some(sink);
        self
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle that stops the run when set.
    pub fn cancel_flag(&self) -> CancelFlag {
        Arc::clone(&self.cancel)
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Runs `report` over every repository in order, writing to `out`.
    ///
    /// A repository whose fetch fails is logged and skipped; the run goes
    /// on with the next one. Template and output errors abort the run.
    /// Cancellation stops before the next fetch and still closes the report.
    ///
    /// # Errors
    ///
    /// Returns `TemplateName` or `Io` errors raised by the report or the
    /// side channel.
    pub async fn run(
        &mut self,
        repositories: &[String],
        report: &mut dyn Report,
        out: &mut dyn Write,
    ) -> Result<RunSummary> {
        let mut session = RenderSession::default();
        let mut summary = RunSummary::default();

        for (index, repository) in repositories.iter().enumerate() {
            if self.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            session.begin_repository(report, out)?;
            summary.repositories += 1;

            match self
                .run_repository(index, repository, report, out, &mut summary)
                .await
            {
                Ok(RepositoryOutcome::Completed) => {}
                Ok(RepositoryOutcome::Cancelled) => {
                    summary.cancelled = true;
                    break;
                }
                Err(err) if err.is_repository_scoped() => {
                    error!(repository = %repository, "{}", err);
                    summary.failures += 1;
                }
                Err(err) => return Err(err),
            }
        }

        if session.started {
            if summary.cancelled {
                info!("Run interrupted");
                report.on_interrupt(out)?;
            }
            report.on_finish(out)?;
        }
        out.flush()
            .map_err(|e| HubTagsError::io("Failed to flush report output", e))?;
        if let Some(sink) = self.side_channel.as_mut() {
            sink.flush()
                .map_err(|e| HubTagsError::io("Failed to flush JSON output", e))?;
        }

        info!(
            repositories = summary.repositories,
            pages = summary.pages,
            rows = summary.rows,
            failures = summary.failures,
            cancelled = summary.cancelled,
            "Run finished"
        );
        Ok(summary)
    }

    async fn run_repository(
        &mut self,
        repo_index: usize,
        repository: &str,
        report: &mut dyn Report,
        out: &mut dyn Write,
        summary: &mut RunSummary,
    ) -> Result<RepositoryOutcome> {
        let start_url = tags_url(&self.registry_url, repository);
        debug!(repository, url = %start_url, "Listing tags");

        let mut pages = Paginator::new(&self.fetcher, start_url);
        let mut page_index = 0;

        loop {
            if self.cancel.load(Ordering::SeqCst) {
                return Ok(RepositoryOutcome::Cancelled);
            }

            let page = match pages.next_page().await {
                Some(page) => page?,
                None => return Ok(RepositoryOutcome::Completed),
            };

            if let Some(sink) = self.side_channel.as_mut() {
                write_side_channel(sink.as_mut(), &page)?;
            }

            let page = Page {
                results: page
                    .results
                    .into_iter()
                    .map(|row| self.enricher.enrich(row))
                    .collect(),
                ..page
            };

            let ctx = PageContext {
                repo_index,
                repo: repository,
                page_index,
            };
            report.on_page(out, &ctx, &page)?;

            summary.pages += 1;
            summary.rows += page.results.len();
            page_index += 1;
        }
    }
}

fn write_side_channel(sink: &mut (dyn Write + Send), page: &Page) -> Result<()> {
    sink.write_all(&page.body)
        .and_then(|()| sink.write_all(b"\n"))
        .map_err(|e| HubTagsError::io("Failed to write JSON output", e))
}
