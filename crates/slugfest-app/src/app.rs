// Application flow: config, tables, report.

use anyhow::Context;
use tracing::info;

use slugfest_baseball::{build_report, AnalysisReport, StatStore, TableSource};

use crate::cli::Cli;
use crate::config;

/// Load configuration and both tables, then build the combined report.
///
/// `--batting` and `--master` take precedence over the config's data paths.
pub fn run(cli: &Cli) -> anyhow::Result<AnalysisReport> {
    let base_dir = cli
        .base_dir()
        .context("failed to determine working directory")?;
    let mut config = config::load_config(&base_dir).context("failed to load configuration")?;

    if let Some(path) = &cli.batting {
        config.data_paths.batting = path.clone();
    }
    if let Some(path) = &cli.master {
        config.data_paths.master = path.clone();
    }
    info!(
        "Config loaded: improvement {}-{}, team {} {}, triple crown {}",
        config.request.first_year,
        config.request.second_year,
        config.request.team,
        config.request.team_year,
        config.request.triple_crown_year
    );

    let mut store = StatStore::new();
    let batting = store
        .load_batting(&TableSource::from(config.data_paths.batting.clone()))
        .with_context(|| {
            format!(
                "failed to load batting table from {}",
                config.data_paths.batting.display()
            )
        })?;
    info!("Loaded {} batting rows", batting.len());

    let master = store
        .load_master(&TableSource::from(config.data_paths.master.clone()))
        .with_context(|| {
            format!(
                "failed to load master table from {}",
                config.data_paths.master.display()
            )
        })?;
    info!("Loaded {} players", master.len());

    let report =
        build_report(&store, &config.request).context("failed to build analysis report")?;
    info!(?report, "Analysis result");
    Ok(report)
}
