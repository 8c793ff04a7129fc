//! Command-line arguments for the `slugfest` binary.

use std::path::PathBuf;

use clap::Parser;

/// Run the combined batting analysis and print it as JSON.
#[derive(Debug, Default, Parser)]
#[clap(name = "slugfest", version, about)]
pub struct Cli {
    /// Directory holding `config/` and `defaults/` (defaults to the cwd).
    #[clap(long, short = 'c')]
    pub config_dir: Option<PathBuf>,

    /// Batting CSV, overriding `data.batting` from the config.
    #[clap(long, short = 'b')]
    pub batting: Option<PathBuf>,

    /// Master (player names) CSV, overriding `data.master` from the config.
    #[clap(long, short = 'm')]
    pub master: Option<PathBuf>,

    /// Pretty-print the JSON report.
    #[clap(long, short = 'p')]
    pub pretty: bool,
}

impl Cli {
    /// Base directory for config resolution.
    pub fn base_dir(&self) -> std::io::Result<PathBuf> {
        match &self.config_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}
