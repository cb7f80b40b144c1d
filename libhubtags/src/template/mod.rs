//! User-supplied report templates.
//!
//! A template is written `<scope>:<body>`. Scope `P` renders the body once per
//! page, scope `L` once per tag row. The body is parsed once by [`compile`]
//! and then rendered against a fixed table of variables; anything outside
//! that table is an error rather than a lookup into program state.
//!
//! | scope | variables |
//! |-------|-----------|
//! | `P`   | `repo`, `repo_index`, `page`, `count`, `next`, `rows` |
//! | `L`   | `repo`, `name`, `full_size`, `size`, `last_updated`, `archs`, `arch_count` |
//!
//! Helpers available in both scopes: `formatSize`, `formatDate`, `upper`,
//! `lower`.

mod parser;

use crate::error::{HubTagsError, Result};
use crate::format::{format_date, format_size};
use crate::model::{Page, PageContext, ResultRow};
use parser::{Expr, Segment, parse_body};
use std::fmt;


/// Evaluation scope of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateScope {
    /// Rendered once per page
    Page,
    /// Rendered once per row; row outputs are joined by newlines
    Row,
}

impl TemplateScope {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "P" => Some(Self::Page),
            "L" => Some(Self::Row),
            _ => None,
        }
    }
}

/// A value produced while rendering a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Int(u64),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<Option<u64>> for Value {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Value::Null, Value::Int)
    }
}

impl From<Option<&str>> for Value {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Value::Null, |s| Value::Str(s.to_string()))
    }
}

/// Variable table a template is rendered against.
trait Variables {
    fn lookup(&self, name: &str) -> Option<Value>;
}

struct PageVariables<'a> {
    ctx: &'a PageContext<'a>,
    page: &'a Page,
}

impl Variables for PageVariables<'_> {
    fn lookup(&self, name: &str) -> Option<Value> {
        let value = match name {
            "repo" => Value::Str(self.ctx.repo.to_string()),
            "repo_index" => Value::Int(self.ctx.repo_index as u64),
            "page" => Value::Int(self.ctx.page_index as u64),
            "count" => self.page.count.into(),
            "next" => self.page.next_url().into(),
            "rows" => Value::Int(self.page.results.len() as u64),
            _ => return None,
        };
        Some(value)
    }
}

struct RowVariables<'a> {
    repo: &'a str,
    row: &'a ResultRow,
}

impl Variables for RowVariables<'_> {
    fn lookup(&self, name: &str) -> Option<Value> {
        let value = match name {
            "repo" => Value::Str(self.repo.to_string()),
            "name" => Value::Str(self.row.name.clone()),
            "full_size" => self.row.full_size.into(),
            "size" => Value::Str(self.row.size_display.clone()),
            "last_updated" => self.row.last_updated.as_deref().into(),
            "archs" => Value::Str(
                self.row
                    .sorted_architectures()
                    .iter()
                    .map(|a| a.label.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            "arch_count" => Value::Int(self.row.architectures.len() as u64),
            _ => return None,
        };
        Some(value)
    }
}

fn call_helper(helper: &str, arg: Value) -> Result<Value> {
    let value = match helper {
        "formatSize" => Value::Str(match arg {
            Value::Int(n) => format_size(n),
            Value::Str(s) => s.trim().parse().map(format_size).unwrap_or_else(|_| "?".into()),
            Value::Null => format_size(0),
        }),
        "formatDate" => Value::Str(match arg {
            Value::Str(s) => format_date(&s),
            _ => String::new(),
        }),
        "upper" => Value::Str(arg.to_string().to_uppercase()),
        "lower" => Value::Str(arg.to_string().to_lowercase()),
        _ => return Err(HubTagsError::template_name(helper)),
    };
    Ok(value)
}

/// A compiled template, ready to render any number of pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    scope: TemplateScope,
    segments: Vec<Segment>,
    source: String,
}

impl Template {
    pub fn scope(&self) -> TemplateScope {
        self.scope
    }

    /// The text this template was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Renders one page.
    ///
    /// A page-scope template produces exactly one string. A row-scope
    /// template produces one line per row, joined with `\n`; a page with no
    /// rows renders as an empty string.
    ///
    /// # Errors
    ///
    /// Returns `TemplateName` if the body references a name or helper
    /// outside the scope's table.
    pub fn render(&self, ctx: &PageContext<'_>, page: &Page) -> Result<String> {
        match self.scope {
            TemplateScope::Page => self.render_with(&PageVariables { ctx, page }),
            TemplateScope::Row => {
                let lines = page
                    .results
                    .iter()
                    .map(|row| self.render_with(&RowVariables { repo: ctx.repo, row }))
                    .collect::<Result<Vec<_>>>()?;
                Ok(lines.join("\n"))
            }
        }
    }

    fn render_with(&self, vars: &dyn Variables) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { expr, align } => {
                    let text = evaluate(expr, vars)?.to_string();
                    match align {
                        Some(align) => out.push_str(&align.apply(&text)),
                        None => out.push_str(&text),
                    }
                }
            }
        }
        Ok(out)
    }
}

fn evaluate(expr: &Expr, vars: &dyn Variables) -> Result<Value> {
    match expr {
        Expr::Name(name) => vars
            .lookup(name)
            .ok_or_else(|| HubTagsError::template_name(name.as_str())),
        Expr::Call { helper, arg } => call_helper(helper, evaluate(arg, vars)?),
    }
}

/// Compiles a `<scope>:<body>` template.
///
/// # Examples
///
/// ```
/// use libhubtags::template::{TemplateScope, compile};
///
/// let template = compile("L:{name} {formatSize(full_size)}").unwrap();
/// assert_eq!(template.scope(), TemplateScope::Row);
///
/// assert!(compile("X:{name}").is_err());
/// ```
///
/// # Errors
///
/// Returns `BadTemplate` for a missing or unknown scope tag and for a body
/// that does not parse.
pub fn compile(spec: &str) -> Result<Template> {
    let (tag, body) = spec.split_once(':').ok_or_else(|| {
        HubTagsError::bad_template(format!(
            "'{}' is not of the form <scope>:<template>",
            spec
        ))
    })?;

    let scope = TemplateScope::from_tag(tag).ok_or_else(|| {
        HubTagsError::bad_template(format!(
            "unknown scope '{}' (expected 'P' for pages or 'L' for lines)",
            tag
        ))
    })?;

    Ok(Template {
        scope,
        segments: parse_body(body)?,
        source: spec.to_string(),
    })
}
