use super::{Report, write_str};
use crate::error::{HubTagsError, Result};
use crate::model::{Page, PageContext};
use std::io::Write;

/// Stitches every page of every repository into one JSON document.
///
/// The document is `{"results":[...],"count":N}` where `results` is the flat
/// list of rows in fetch order and `count` the sum of each repository's
/// first-page count. Rows are streamed as they arrive; only the flags
/// below survive between pages.
#[derive(Debug, Default)]
pub struct AggregateReport {
    list_opened: bool,
    rows_written: bool,
    total_count: u64,
}

impl AggregateReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn open_list(&mut self, out: &mut dyn Write) -> Result<()> {
        if !self.list_opened {
            write_str(out, "\"results\":[")?;
            self.list_opened = true;
        }
        Ok(())
    }
}

impl Report for AggregateReport {
    fn on_start(&mut self, out: &mut dyn Write) -> Result<()> {
        write_str(out, "{")
    }

    fn on_page(&mut self, out: &mut dyn Write, ctx: &PageContext<'_>, page: &Page) -> Result<()> {
        self.open_list(out)?;
        if ctx.page_index == 0 {
            self.total_count += page.count.unwrap_or(0);
        }

        for row in &page.results {
            let json = serde_json::to_string(row)
                .map_err(|e| HubTagsError::malformed_with_source("Failed to serialize row", e))?;
            if self.rows_written {
                write_str(out, ",")?;
            }
            write_str(out, &json)?;
            self.rows_written = true;
        }
        Ok(())
    }

    /// No trailing newline; `on_finish` closes the document instead.
    fn on_interrupt(&mut self, _out: &mut dyn Write) -> Result<()> {
        Ok(())
    }

    fn on_finish(&mut self, out: &mut dyn Write) -> Result<()> {
        self.open_list(out)?;
        write_str(out, &format!("],\"count\":{}}}\n", self.total_count))
    }
}
