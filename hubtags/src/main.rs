use clap::Parser;
use libhubtags::CancelFlag;
use std::path::PathBuf;

mod commands;
mod context;
mod format;
mod logging;

/// hubtags - list the tags of Docker Hub repositories
///
/// Follows the paginated tags endpoint of each repository and prints the
/// result as a brief or detailed summary, raw pages, one aggregated JSON
/// document, or a custom template (`P:...` per page, `L:...` per tag).
#[derive(Parser, Debug)]
#[command(name = "hubtags")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Repositories to list, e.g. `alpine` or `bitnami/redis`
    #[arg(required = true, value_name = "REPOSITORY")]
    repositories: Vec<String>,

    /// Report: raw, json, aggregate, brief, detailed, or a template
    #[arg(short, long)]
    report: Option<String>,

    /// Show every architecture, including the usually hidden ones
    #[arg(short, long)]
    all_archs: bool,

    /// Also write every received page to FILE
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Configuration file (default: <config dir>/hubtags/config.yaml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Registry base URL
    #[arg(long, value_name = "URL")]
    registry: Option<String>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Control colored output: auto, always, never
    #[arg(long, default_value = "auto")]
    color: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let color = format::ColorChoice::from(cli.color.as_str());
    let verbosity = context::VerbosityLevel::from_count(cli.verbose);
    logging::init(verbosity, format::should_color(color));

    // Build context with precedence: defaults > config file > env vars > CLI flags
    let ctx = match context::AppContext::build(context::CliOverrides {
        config_path: cli.config,
        registry: cli.registry,
        report: cli.report,
        color,
        verbosity,
    }) {
        Ok(ctx) => ctx,
        Err(e) => {
            format::error(color, &e);
            std::process::exit(1);
        }
    };

    tracing::debug!(
        config = ?ctx.config_path,
        verbosity = ?ctx.verbosity,
        registry = %ctx.config.registry.url,
        report = %ctx.config.output.report,
        "Configuration resolved"
    );

    let cancel = CancelFlag::default();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if commands::tags::watch_interrupts(on_interrupt, tokio::signal::ctrl_c).await {
            std::process::exit(commands::tags::EXIT_INTERRUPTED);
        }
    });

    let args = commands::tags::TagsArgs {
        repositories: cli.repositories,
        all_archs: cli.all_archs,
        json: cli.json,
    };
    let status = commands::tags::handle_tags(&ctx, &args, cancel).await;
    std::process::exit(status);
}
