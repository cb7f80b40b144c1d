use crate::context::AppContext;
use crate::format;
use libhubtags::client::{ClientConfig, HttpFetcher, normalize_registry_url};
use libhubtags::{CancelFlag, Enricher, ExclusionSet, Orchestrator, RunSummary, build_report};
use std::fs::File;
use std::future::Future;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing::{info, warn};

/// Exit status after a user interrupt
pub const EXIT_INTERRUPTED: i32 = 130;

/// Arguments of a tag listing run
#[derive(Debug, Clone, Default)]
pub struct TagsArgs {
    pub repositories: Vec<String>,
    /// Keep every architecture, ignoring the exclusion list
    pub all_archs: bool,
    /// Copy every fetched page to this file
    pub json: Option<PathBuf>,
}

/// Handle a tag listing run and return the process exit status
pub async fn handle_tags(ctx: &AppContext, args: &TagsArgs, cancel: CancelFlag) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match list_tags(ctx, args, cancel, &mut out).await {
        Ok(summary) => {
            if summary.failures > 0 {
                format::warning(
                    ctx.color,
                    &format!(
                        "{} of {} repositories could not be listed",
                        summary.failures, summary.repositories
                    ),
                );
            }
            if summary.cancelled {
                EXIT_INTERRUPTED
            } else {
                0
            }
        }
        Err(e) => {
            format::error(ctx.color, &e);
            1
        }
    }
}

/// Waits for interrupt signals.
///
/// The first one sets `cancel` so the run stops after the current page.
/// Returns `true` on the second one, when the caller should exit at once;
/// returns `false` if the signal source fails.
pub async fn watch_interrupts<S, F>(cancel: CancelFlag, mut next_signal: S) -> bool
where
    S: FnMut() -> F,
    F: Future<Output = io::Result<()>>,
{
    if next_signal().await.is_err() {
        return false;
    }
    info!("Interrupt received, stopping after the current page");
    cancel.store(true, Ordering::SeqCst);

    if next_signal().await.is_err() {
        return false;
    }
    warn!("Second interrupt received, exiting");
    true
}

/// Exclusion list for the run; empty with `--all-archs`.
pub fn build_enricher(ctx: &AppContext, all_archs: bool) -> Enricher {
    if all_archs {
        return Enricher::new(ExclusionSet::empty());
    }
    Enricher::new(
        ctx.config
            .output
            .exclude_architectures
            .iter()
            .cloned()
            .collect(),
    )
}

/// Runs the configured report over `args.repositories`, writing to `out`.
///
/// The report selector is resolved before anything is fetched, so a bad
/// template fails fast.
pub async fn list_tags(
    ctx: &AppContext,
    args: &TagsArgs,
    cancel: CancelFlag,
    out: &mut dyn Write,
) -> Result<RunSummary, String> {
    let mut report = build_report(&ctx.config.output.report).map_err(|e| e.to_string())?;
    let registry_url = normalize_registry_url(&ctx.config.registry.url).map_err(|e| e.to_string())?;

    let fetcher = HttpFetcher::with_config(
        ClientConfig::new().with_timeout(ctx.config.network.timeout),
    )
    .map_err(|e| e.to_string())?;

    let mut runner = Orchestrator::new(fetcher, registry_url)
        .with_enricher(build_enricher(ctx, args.all_archs))
        .with_cancel_flag(cancel);

    if let Some(path) = &args.json {
        let file = File::create(path)
            .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
        runner = runner.with_side_channel(Box::new(BufWriter::new(file)));
    }

    runner
        .run(&args.repositories, report.as_mut(), out)
        .await
        .map_err(|e| e.to_string())
}

#[cfg(test)]
#[path = "tags_tests.rs"]
mod tests;
