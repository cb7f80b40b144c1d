use super::{Report, write_str};
use crate::error::Result;
use crate::format::{format_optional_size, format_timestamp, parse_timestamp};
use crate::model::{Page, PageContext, ResultRow};
use std::io::Write;

const RULE_WIDTH: usize = 40;

/// `repo:tag  size  [arch1, arch2]`
fn summary_line(repo: &str, row: &ResultRow) -> String {
    let labels: Vec<&str> = row
        .sorted_architectures()
        .into_iter()
        .map(|a| a.label.as_str())
        .collect();
    format!(
        "{}:{}  {}  [{}]\n",
        repo,
        row.name,
        row.size_display,
        labels.join(", ")
    )
}

fn write_rule(out: &mut dyn Write) -> Result<()> {
    write_str(out, &format!("{}\n", "-".repeat(RULE_WIDTH)))
}

/// One line per tag.
#[derive(Debug, Default)]
pub struct BriefReport;

impl BriefReport {
    pub fn new() -> Self {
        Self
    }
}

impl Report for BriefReport {
    fn on_separator(&mut self, out: &mut dyn Write) -> Result<()> {
        write_rule(out)
    }

    fn on_page(&mut self, out: &mut dyn Write, ctx: &PageContext<'_>, page: &Page) -> Result<()> {
        for row in &page.results {
            write_str(out, &summary_line(ctx.repo, row))?;
        }
        Ok(())
    }
}

/// The brief line plus one indented line per architecture and the push date.
#[derive(Debug, Default)]
pub struct DetailedReport;

impl DetailedReport {
    pub fn new() -> Self {
        Self
    }

    fn updated_line(timestamp: &str) -> String {
        match parse_timestamp(timestamp) {
            Some(dt) => format!(
                "    updated: {} ({})\n",
                dt.format("%Y-%m-%d %H:%M"),
                format_timestamp(&dt)
            ),
            None => "    updated: \n".to_string(),
        }
    }
}

impl Report for DetailedReport {
    fn on_separator(&mut self, out: &mut dyn Write) -> Result<()> {
        write_rule(out)
    }

    fn on_page(&mut self, out: &mut dyn Write, ctx: &PageContext<'_>, page: &Page) -> Result<()> {
        for row in &page.results {
            write_str(out, &summary_line(ctx.repo, row))?;
            for arch in row.sorted_architectures() {
                write_str(
                    out,
                    &format!("    {}  {}\n", arch.label, format_optional_size(arch.size)),
                )?;
            }
            if let Some(timestamp) = row.last_updated.as_deref() {
                write_str(out, &Self::updated_line(timestamp))?;
            }
        }
        Ok(())
    }
}
