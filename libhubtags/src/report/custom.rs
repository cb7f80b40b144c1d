use super::{Report, write_str};
use crate::error::Result;
use crate::model::{Page, PageContext};
use crate::template::{Template, TemplateScope};
use std::io::Write;

/// Renders pages through a user template.
#[derive(Debug)]
pub struct CustomReport {
    template: Template,
}

impl CustomReport {
    pub fn new(template: Template) -> Self {
        Self { template }
    }
}

impl Report for CustomReport {
    fn on_page(&mut self, out: &mut dyn Write, ctx: &PageContext<'_>, page: &Page) -> Result<()> {
        let rendered = self.template.render(ctx, page)?;

        // A line template over an empty page has nothing to say
        if self.template.scope() == TemplateScope::Row && page.results.is_empty() {
            return Ok(());
        }
        write_str(out, &rendered)?;
        write_str(out, "\n")
    }
}
