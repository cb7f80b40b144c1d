//! Application context that holds resolved configuration
//!
//! The context is built following the precedence order:
//! 1. Default values
//! 2. Config file values
//! 3. Environment variables
//! 4. CLI flags
//!
//! Once built, the context is passed as read-only throughout the application.

use crate::format::ColorChoice;
use libhubtags::config::Config;
use std::env;
use std::path::{Path, PathBuf};

/// Verbosity from the number of `-v` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum VerbosityLevel {
    /// Warnings and errors only
    #[default]
    Normal,
    /// `-v`: run summary and progress
    Verbose,
    /// `-vv`: every request
    Debug,
    /// `-vvv` and beyond
    Trace,
}

impl VerbosityLevel {
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => VerbosityLevel::Normal,
            1 => VerbosityLevel::Verbose,
            2 => VerbosityLevel::Debug,
            _ => VerbosityLevel::Trace,
        }
    }
}

/// Settings given on the command line; `None` means not given.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub registry: Option<String>,
    pub report: Option<String>,
    pub color: ColorChoice,
    pub verbosity: VerbosityLevel,
}

/// Application context with resolved configuration and runtime state
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Resolved configuration
    pub config: Config,
    /// Config file that was loaded, if any
    pub config_path: Option<PathBuf>,
    pub color: ColorChoice,
    pub verbosity: VerbosityLevel,
}

impl AppContext {
    /// Build context with precedence: defaults > config file > env vars > CLI flags
    pub fn build(cli: CliOverrides) -> Result<Self, String> {
        Self::build_with_env(cli, |key| env::var(key).ok())
    }

    /// Same as [`AppContext::build`] with an explicit environment lookup.
    pub fn build_with_env<E>(cli: CliOverrides, env: E) -> Result<Self, String>
    where
        E: Fn(&str) -> Option<String>,
    {
        // 1 + 2. Defaults, then the config file if there is one
        let config_path = cli
            .config_path
            .clone()
            .or_else(|| env("HUBTAGS_CONFIG").map(PathBuf::from))
            .or_else(default_config_path);
        let mut config = load_config(config_path.as_deref())?;

        // 3. Environment variable overrides
        if let Some(registry) = env("HUBTAGS_REGISTRY") {
            config.registry.url = registry;
        }
        if let Some(report) = env("HUBTAGS_REPORT") {
            config.output.report = report;
        }
        if let Some(timeout) = env("HUBTAGS_TIMEOUT") {
            config.network.timeout = timeout
                .trim()
                .parse()
                .map_err(|_| format!("Invalid HUBTAGS_TIMEOUT '{}': expected seconds", timeout))?;
        }

        // 4. CLI flag overrides (highest priority)
        if let Some(registry) = cli.registry {
            config.registry.url = registry;
        }
        if let Some(report) = cli.report {
            config.output.report = report;
        }

        config.validate().map_err(|e| e.to_string())?;

        Ok(Self {
            config,
            config_path,
            color: cli.color,
            verbosity: cli.verbosity,
        })
    }
}

/// `<config dir>/hubtags/config.yaml`, when that file exists.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("hubtags").join("config.yaml"))
        .filter(|path| path.is_file())
}

fn load_config(path: Option<&Path>) -> Result<Config, String> {
    Config::load(path).map_err(|e| match path {
        Some(p) => format!("{} ({})", e, p.display()),
        None => e.to_string(),
    })
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
