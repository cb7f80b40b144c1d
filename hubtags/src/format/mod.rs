//! Diagnostics on stderr.
//!
//! Reports go to stdout untouched; everything meant for the person at the
//! terminal (fatal errors, failed repositories) goes through here.

use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Color preference from `--color`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl From<&str> for ColorChoice {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "always" | "yes" | "true" => ColorChoice::Always,
            "never" | "no" | "false" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

/// Check if we should use colors on stderr
pub fn should_color(choice: ColorChoice) -> bool {
    resolve_color(
        choice,
        std::env::var_os("NO_COLOR").is_some(),
        std::io::stderr().is_terminal(),
    )
}

fn resolve_color(choice: ColorChoice, no_color: bool, is_terminal: bool) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => is_terminal && !no_color,
    }
}

fn error_line(message: &str, color: bool) -> String {
    if color {
        format!("{} {}", "✗".red().bold(), message)
    } else {
        format!("✗ {}", message)
    }
}

fn warning_line(message: &str, color: bool) -> String {
    if color {
        format!("{} {}", "⚠".yellow().bold(), message)
    } else {
        format!("⚠ {}", message)
    }
}

/// Print an error message
pub fn error(choice: ColorChoice, message: &str) {
    eprintln!("{}", error_line(message, should_color(choice)));
}

/// Print a warning message
pub fn warning(choice: ColorChoice, message: &str) {
    eprintln!("{}", warning_line(message, should_color(choice)));
}
