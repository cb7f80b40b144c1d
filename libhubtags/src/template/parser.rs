//! Parser for the template body.
//!
//! A body is literal text with `{...}` fields. `{{` and `}}` produce literal
//! braces. A field is `expr` or `expr:align`, where `expr` is a name or a
//! helper call `helper(expr)` and `align` is `<N`, `>N`, `^N` or `N`.

use crate::error::{HubTagsError, Result};

/// One piece of a parsed template body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Field { expr: Expr, align: Option<Align> },
}

/// Expression inside a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Expr {
    Name(String),
    Call { helper: String, arg: Box<Expr> },
}

/// Widest padding a field may ask for.
const MAX_ALIGN_WIDTH: usize = 1024;

/// Padding applied to a rendered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left(usize),
    Right(usize),
    Center(usize),
}

impl Align {
    pub(crate) fn apply(self, text: &str) -> String {
        match self {
            Align::Left(width) => format!("{:<width$}", text),
            Align::Right(width) => format!("{:>width$}", text),
            Align::Center(width) => format!("{:^width$}", text),
        }
    }
}

/// Splits a template body into literal and field segments.
pub(crate) fn parse_body(body: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = body.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                literal.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut field = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    if inner == '{' {
                        return Err(HubTagsError::bad_template(format!(
                            "nested '{{' in field starting at {}",
                            pos
                        )));
                    }
                    field.push(inner);
                }
                if !closed {
                    return Err(HubTagsError::bad_template(format!(
                        "unterminated field starting at {}",
                        pos
                    )));
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(parse_field(&field, pos)?);
            }
            '}' => {
                return Err(HubTagsError::bad_template(format!(
                    "unmatched '}}' at {}",
                    pos
                )));
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

fn parse_field(field: &str, pos: usize) -> Result<Segment> {
    let (expr_text, align) = match field.rsplit_once(':') {
        Some((expr, spec)) => (expr, Some(parse_align(spec.trim(), pos)?)),
        None => (field, None),
    };

    let mut parser = ExprParser {
        input: expr_text.as_bytes(),
        cursor: 0,
        field_pos: pos,
    };
    let expr = parser.expr()?;
    parser.skip_whitespace();
    if parser.cursor != parser.input.len() {
        return Err(parser.error("unexpected trailing characters"));
    }

    Ok(Segment::Field { expr, align })
}

fn parse_align(spec: &str, pos: usize) -> Result<Align> {
    let (kind, digits) = match spec.chars().next() {
        Some('<') => ('<', &spec[1..]),
        Some('>') => ('>', &spec[1..]),
        Some('^') => ('^', &spec[1..]),
        _ => ('<', spec),
    };
    let width: usize = digits.parse().map_err(|_| {
        HubTagsError::bad_template(format!(
            "invalid alignment '{}' in field starting at {}",
            spec, pos
        ))
    })?;
    if width > MAX_ALIGN_WIDTH {
        return Err(HubTagsError::bad_template(format!(
            "alignment width {} in field starting at {} exceeds {}",
            width, pos, MAX_ALIGN_WIDTH
        )));
    }

    Ok(match kind {
        '>' => Align::Right(width),
        '^' => Align::Center(width),
        _ => Align::Left(width),
    })
}

struct ExprParser<'a> {
    input: &'a [u8],
    cursor: usize,
    field_pos: usize,
}

impl ExprParser<'_> {
    fn expr(&mut self) -> Result<Expr> {
        self.skip_whitespace();
        let name = self.identifier()?;
        self.skip_whitespace();

        if self.peek() == Some(b'(') {
            self.cursor += 1;
            let arg = self.expr()?;
            self.skip_whitespace();
            if self.peek() != Some(b')') {
                return Err(self.error("expected ')'"));
            }
            self.cursor += 1;
            return Ok(Expr::Call {
                helper: name,
                arg: Box::new(arg),
            });
        }

        Ok(Expr::Name(name))
    }

    fn identifier(&mut self) -> Result<String> {
        let start = self.cursor;
        while let Some(b) = self.peek() {
            let valid = b == b'_'
                || b.is_ascii_alphabetic()
                || (self.cursor > start && b.is_ascii_digit());
            if !valid {
                break;
            }
            self.cursor += 1;
        }

        if self.cursor == start {
            return Err(self.error("expected a name"));
        }
        // Only ASCII bytes were consumed, so this slice is valid UTF-8
        Ok(String::from_utf8_lossy(&self.input[start..self.cursor]).into_owned())
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.cursor += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.cursor).copied()
    }

    fn error(&self, message: &str) -> HubTagsError {
        HubTagsError::bad_template(format!(
            "{} in field starting at {} (offset {})",
            message, self.field_pos, self.cursor
        ))
    }
}
