use super::{Report, write_str};
use crate::error::{HubTagsError, Result};
use crate::model::{Page, PageContext};
use std::io::Write;

/// Writes every page as its own pretty-printed JSON document.
#[derive(Debug, Default)]
pub struct RawReport;

impl RawReport {
    pub fn new() -> Self {
        Self
    }
}

impl Report for RawReport {
    fn on_page(&mut self, out: &mut dyn Write, _ctx: &PageContext<'_>, page: &Page) -> Result<()> {
        let json = serde_json::to_string_pretty(page)
            .map_err(|e| HubTagsError::malformed_with_source("Failed to serialize page", e))?;
        write_str(out, &json)?;
        write_str(out, "\n")
    }
}
