//! Report strategies.
//!
//! A report consumes the pages of every requested repository through four
//! hooks driven by the runner:
//!
//! 1. [`Report::on_start`] once, before the first repository
//! 2. [`Report::on_separator`] before every repository except the first
//! 3. [`Report::on_page`] once per fetched page, in fetch order
//! 4. [`Report::on_finish`] once at the end, only if a repository was processed
//!
//! Every hook writes straight to the output sink; no report keeps more than
//! the page it is currently handed.

mod aggregate;
mod custom;
mod raw;
mod summary;

pub use aggregate::AggregateReport;
pub use custom::CustomReport;
pub use raw::RawReport;
pub use summary::{BriefReport, DetailedReport};

use crate::error::{HubTagsError, Result};
use crate::model::{Page, PageContext};
use crate::template;
use std::io::Write;


/// Lifecycle hooks shared by every report.
pub trait Report {
    /// Called before the first repository.
    fn on_start(&mut self, _out: &mut dyn Write) -> Result<()> {
        Ok(())
    }

    /// Called between two repositories.
    fn on_separator(&mut self, _out: &mut dyn Write) -> Result<()> {
        Ok(())
    }

    /// Called for every page, rows already enriched.
    fn on_page(&mut self, out: &mut dyn Write, ctx: &PageContext<'_>, page: &Page) -> Result<()>;

    /// Called when the user interrupts the run, before `on_finish`.
    ///
    /// Line-oriented reports end the current line so the shell prompt does
    /// not land in the middle of the output.
    fn on_interrupt(&mut self, out: &mut dyn Write) -> Result<()> {
        write_str(out, "\n")
    }

    /// Called once after the last page of the last repository.
    fn on_finish(&mut self, _out: &mut dyn Write) -> Result<()> {
        Ok(())
    }
}

type Constructor = fn() -> Box<dyn Report>;

fn raw() -> Box<dyn Report> {
    Box::new(RawReport::new())
}

fn aggregate() -> Box<dyn Report> {
    Box::new(AggregateReport::new())
}

fn brief() -> Box<dyn Report> {
    Box::new(BriefReport::new())
}

fn detailed() -> Box<dyn Report> {
    Box::new(DetailedReport::new())
}

/// Built-in reports by selector.
const REPORTS: &[(&str, Constructor)] = &[
    ("raw", raw),
    ("json", aggregate),
    ("aggregate", aggregate),
    ("brief", brief),
    ("detailed", detailed),
];

/// Names accepted by [`build_report`] besides templates.
pub fn report_names() -> impl Iterator<Item = &'static str> {
    REPORTS.iter().map(|(name, _)| *name)
}

/// Builds the report for a selector.
///
/// Built-in names are matched case-insensitively; anything else is compiled
/// as a `<scope>:<template>` string.
///
/// # Examples
///
/// ```
/// use libhubtags::report::build_report;
///
/// assert!(build_report("brief").is_ok());
/// assert!(build_report("L:{name}").is_ok());
/// assert!(build_report("fancy").is_err());
/// ```
///
/// # Errors
///
/// Returns `BadTemplate` when the selector is neither a built-in report nor
/// a valid template.
pub fn build_report(selector: &str) -> Result<Box<dyn Report>> {
    let wanted = selector.trim().to_lowercase();
    if let Some((_, constructor)) = REPORTS.iter().find(|(name, _)| *name == wanted) {
        return Ok(constructor());
    }

    let template = template::compile(selector).map_err(|err| match err {
        HubTagsError::BadTemplate { message } if !selector.contains(':') => {
            HubTagsError::bad_template(format!(
                "'{}' is not a report ({}) and not a template: {}",
                selector,
                report_names().collect::<Vec<_>>().join(", "),
                message
            ))
        }
        other => other,
    })?;
    Ok(Box::new(CustomReport::new(template)))
}

pub(crate) fn write_str(out: &mut dyn Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .map_err(|e| HubTagsError::io("Failed to write report", e))
}
