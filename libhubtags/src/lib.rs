//! hubtags - Docker Hub tag lister library
//!
//! Lists every published tag of one or more Docker Hub repositories by
//! following the paginated tags endpoint, and renders the result through a
//! pluggable report: raw pages, one aggregated JSON document, brief or
//! detailed text summaries, or a user template.
//!
//! # Quick Start
//!
//! ```no_run
//! use libhubtags::{HttpFetcher, Orchestrator, build_report};
//!
//! # async fn example() -> libhubtags::Result<()> {
//! let fetcher = HttpFetcher::new()?;
//! let mut runner = Orchestrator::new(fetcher, "https://registry.hub.docker.com");
//! let mut report = build_report("brief")?;
//!
//! let repositories = vec!["alpine".to_string(), "bitnami/redis".to_string()];
//! let mut stdout = std::io::stdout();
//! let summary = runner.run(&repositories, report.as_mut(), &mut stdout).await?;
//! println!("{} tags", summary.rows);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`paginator`] - lazy cursor over the `next` chain of a repository
//! - [`enrich`] - size formatting and architecture labels for each row
//! - [`template`] - `P:`/`L:` report templates
//! - [`report`] - the report strategies and their selector registry
//! - [`runner`] - drives reports over a list of repositories

#![warn(clippy::all)]

/// Returns the libhubtags crate version.
///
/// # Examples
///
/// ```
/// let version = libhubtags::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use client::{HttpFetcher, PageFetcher};
pub use config::Config;
pub use enrich::{Enricher, ExclusionSet};
pub use error::{HubTagsError, Result};
pub use model::{Page, PageContext, ResultRow};
pub use report::{Report, build_report};
pub use runner::{CancelFlag, Orchestrator, RunSummary};
pub use template::{Template, compile};

pub mod client;
pub mod config;
pub mod enrich;
pub mod error;
pub mod format;
pub mod model;
pub mod paginator;
pub mod report;
pub mod runner;
pub mod template;

#[cfg(test)]
mod test_support;
