// Slugfest entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to stderr, keep stdout for the report)
// 2. Parse CLI arguments
// 3. Load config and tables, build the report
// 4. Print the report as JSON

use anyhow::Context;
use clap::Parser;
use tracing::info;

use slugfest_app::app;
use slugfest_app::cli::Cli;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();
    info!("Slugfest starting up");

    // 3. Build the report
    let report = app::run(&cli)?;

    // 4. Print as JSON
    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("failed to serialize report")?;
    println!("{json}");

    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("slugfest=info,slugfest_app=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
