pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod io_utils;
pub mod loader;
pub mod pipeline;
pub mod projection;
pub mod record;
pub mod report;
pub mod snapshot;
pub mod source;
pub mod store;
pub mod table;
pub mod view;

use std::{env, io::Write, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::{
    cli::{Cli, Commands},
    config::PipelineConfig,
    report::{REPORT_RULES, find_rule},
    source::{CsvSource, FileSource},
    store::ExoplanetStore,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("exoplanet_reports", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = cli.global.config();
    debug!("Configuration: {config:?}");
    match cli.command {
        Commands::Run(args) => handle_run(&config, &args),
        Commands::Fetch => handle_fetch(&config),
        Commands::Report(args) => handle_report(&config, &args),
        Commands::CreateDb => handle_create_db(&config),
        Commands::Load => handle_load(&config),
        Commands::View(args) => handle_view(&config, &args),
        Commands::Refresh => handle_refresh(&config),
    }
}

fn handle_run(config: &PipelineConfig, args: &cli::RunArgs) -> Result<()> {
    let paths = config.paths();
    let source: Box<dyn CsvSource> = match &args.input {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(config.http_source()),
    };
    info!(
        "Running pipeline from {} into {:?}",
        source.describe(),
        paths.root()
    );
    let summary = pipeline::run(source.as_ref(), &paths, REPORT_RULES)
        .with_context(|| format!("Running pipeline from {}", source.describe()))?;
    info!(
        "{} row(s) fetched, {} unique planet(s), {} report(s) written",
        summary.fetched,
        summary.unique,
        summary.reports.len()
    );
    Ok(())
}

fn handle_fetch(config: &PipelineConfig) -> Result<()> {
    let paths = config.paths();
    pipeline::fetch_raw(&config.http_source(), &paths)
        .with_context(|| format!("Fetching {}", config.source_url))?;
    Ok(())
}

fn handle_report(config: &PipelineConfig, args: &cli::ReportArgs) -> Result<()> {
    let paths = config.paths();
    let rule = find_rule(REPORT_RULES, &args.category)?;
    let lines = pipeline::render_report(&paths, rule)
        .with_context(|| format!("Rendering '{}' report from {:?}", rule.name, paths.key_json()))?;
    io_utils::write_to_path_or_stdout(args.output.as_deref(), |sink| {
        sink.write_all(report::to_text(&lines).as_bytes())?;
        Ok(())
    })
    .context("Writing report")?;
    if let Some(output) = &args.output {
        info!("Report '{}' written to {:?}", rule.name, output);
    }
    Ok(())
}

fn handle_create_db(config: &PipelineConfig) -> Result<()> {
    let path = config.paths().database();
    ExoplanetStore::open(&path).with_context(|| format!("Creating database {path:?}"))?;
    info!("Database schema ready at {:?}", path);
    Ok(())
}

fn handle_load(config: &PipelineConfig) -> Result<()> {
    let paths = config.paths();
    pipeline::load_store(&paths)
        .with_context(|| format!("Loading {:?} into {:?}", paths.raw_csv(), paths.database()))?;
    Ok(())
}

fn handle_view(config: &PipelineConfig, args: &cli::ViewArgs) -> Result<()> {
    let path = config.paths().database();
    let store = ExoplanetStore::open_existing(&path)
        .with_context(|| format!("Opening database {path:?}"))?;
    let rendered = view::render_listing(&store, &args.order, args.limit)?;
    print!("{rendered}");
    Ok(())
}

fn handle_refresh(config: &PipelineConfig) -> Result<()> {
    let paths = config.paths();
    let summary = pipeline::refresh(&config.http_source(), &paths)
        .with_context(|| format!("Refreshing from {}", config.source_url))?;
    info!(
        "Store updated: {} new planet(s), {} already present",
        summary.inserted, summary.ignored
    );
    Ok(())
}
