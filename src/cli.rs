use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};

use crate::{
    config::{DEFAULT_DATA_DIR, PipelineConfig},
    source::{DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT_SECS},
};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Download NASA exoplanet data and produce sorted, unit-converted reports",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Directory holding snapshots, reports, and the database
    #[arg(long = "data-dir", global = true, env = "EXOPLANETS_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
    /// CSV endpoint of the exoplanet archive
    #[arg(long = "url", global = true, env = "EXOPLANETS_SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
    pub url: String,
    /// HTTP timeout in seconds
    #[arg(long = "timeout", global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl GlobalArgs {
    pub fn config(&self) -> PipelineConfig {
        PipelineConfig {
            data_dir: self.data_dir.clone(),
            source_url: self.url.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch, snapshot, deduplicate, and write every report
    Run(RunArgs),
    /// Download the raw CSV snapshot only
    Fetch,
    /// Render a single report from the key snapshot
    Report(ReportArgs),
    /// Create the SQLite schema
    CreateDb,
    /// Load the raw snapshot into the SQLite store
    Load,
    /// List stored planets sorted by a field
    View(ViewArgs),
    /// Re-download the source and load it into the store
    Refresh,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Read this local CSV export instead of downloading
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Report category (distance, discovery_year, publication_date, size,
    /// orbital_period, mass, star_mass, insolation)
    #[arg(short = 'c', long = "category")]
    pub category: String,
    /// Output file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Sort option (name, distance, size, insolation, mass, orbital_period,
    /// discovery_year, publication_date, star_mass)
    #[arg(long = "order", default_value = "name")]
    pub order: String,
    /// Maximum rows to display
    #[arg(long)]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_options_apply_after_subcommand() {
        let cli = Cli::try_parse_from([
            "exoplanet-reports",
            "view",
            "--order",
            "distance",
            "--data-dir",
            "/tmp/exo",
            "--timeout",
            "5",
        ])
        .expect("parse");
        let config = cli.global.config();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/exo"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        match cli.command {
            Commands::View(args) => assert_eq!(args.order, "distance"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn report_requires_category() {
        assert!(Cli::try_parse_from(["exoplanet-reports", "report"]).is_err());
    }
}
