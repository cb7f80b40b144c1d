//! Tracing subscriber setup.
//!
//! Log lines go to stderr so they never mix with a report on stdout.
//! `HUBTAGS_LOG` takes any `EnvFilter` directive and wins over `-v`.

use crate::context::VerbosityLevel;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV: &str = "HUBTAGS_LOG";

/// Filter directive used when `HUBTAGS_LOG` is unset.
pub fn default_directive(verbosity: VerbosityLevel) -> &'static str {
    match verbosity {
        VerbosityLevel::Normal => "warn",
        VerbosityLevel::Verbose => "info",
        VerbosityLevel::Debug => "debug",
        VerbosityLevel::Trace => "trace",
    }
}

pub fn init(verbosity: VerbosityLevel, ansi: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false);

    // A subscriber may already be installed (tests)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
