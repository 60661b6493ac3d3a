//! Orchestration of a full run.
//!
//! Nothing here runs until a caller invokes it. A run is all-or-nothing per
//! stage: the source is fetched and parsed before any file is written, and
//! every report is rendered in memory before the first report file is
//! replaced.

use std::{io::Write, path::PathBuf};

use log::info;

use crate::{
    config::OutputPaths,
    dedup,
    error::Result,
    io_utils, loader,
    projection::{self, KEY_FIELDS},
    record::Dataset,
    report::{self, ReportRule},
    snapshot,
    source::CsvSource,
    store::{ExoplanetStore, LoadSummary},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub unique: usize,
    pub reports: Vec<PathBuf>,
}

/// Fetches the source CSV, checks that it parses, and stores it verbatim as
/// the raw snapshot.
pub fn fetch_raw(source: &dyn CsvSource, paths: &OutputPaths) -> Result<Dataset> {
    let text = source.fetch()?;
    let dataset = loader::parse_csv(&text)?;
    io_utils::write_atomic(&paths.raw_csv(), |sink| {
        sink.write_all(text.as_bytes())?;
        Ok(())
    })?;
    info!(
        "Fetched {} row(s) from {} into {:?}",
        dataset.len(),
        source.describe(),
        paths.raw_csv()
    );
    Ok(dataset)
}

/// Writes the raw, deduplicated, and key-field snapshots for `raw`.
pub fn write_snapshots(raw: &Dataset, paths: &OutputPaths) -> Result<Dataset> {
    snapshot::write_json(raw, &paths.raw_json())?;

    let unique = dedup::dedup(raw);
    snapshot::write_csv(&unique, &paths.unique_csv())?;
    snapshot::write_json(&unique, &paths.unique_json())?;
    info!(
        "{} unique planet(s) out of {} row(s)",
        unique.len(),
        raw.len()
    );

    let key = projection::project(&unique, KEY_FIELDS)?;
    snapshot::write_csv(&key, &paths.key_csv())?;
    snapshot::write_json(&key, &paths.key_json())?;
    Ok(key)
}

/// Renders one report from the key snapshot on disk.
pub fn render_report(paths: &OutputPaths, rule: &ReportRule) -> Result<Vec<String>> {
    let key = snapshot::read_json(&paths.key_json())?;
    report::generate(key.records(), rule)
}

/// Renders every rule from the key snapshot, then writes all report files.
pub fn write_reports(paths: &OutputPaths, rules: &[ReportRule]) -> Result<Vec<PathBuf>> {
    let key = snapshot::read_json(&paths.key_json())?;
    let rendered = rules
        .iter()
        .map(|rule| Ok((paths.report(rule), report::generate(key.records(), rule)?)))
        .collect::<Result<Vec<_>>>()?;

    let mut written = Vec::with_capacity(rendered.len());
    for (path, lines) in rendered {
        report::write_report(&lines, &path)?;
        info!("Report written to {:?}", path);
        written.push(path);
    }
    Ok(written)
}

pub fn run(source: &dyn CsvSource, paths: &OutputPaths, rules: &[ReportRule]) -> Result<RunSummary> {
    let raw = fetch_raw(source, paths)?;
    let key = write_snapshots(&raw, paths)?;
    let reports = write_reports(paths, rules)?;
    Ok(RunSummary {
        fetched: raw.len(),
        unique: key.len(),
        reports,
    })
}

/// Loads the raw snapshot on disk into the SQLite store.
pub fn load_store(paths: &OutputPaths) -> Result<LoadSummary> {
    let raw = snapshot::read_csv(&paths.raw_csv())?;
    let mut store = ExoplanetStore::open(&paths.database())?;
    store.load(&raw)
}

/// Re-fetches the source and loads it into the store.
pub fn refresh(source: &dyn CsvSource, paths: &OutputPaths) -> Result<LoadSummary> {
    let raw = fetch_raw(source, paths)?;
    let mut store = ExoplanetStore::open(&paths.database())?;
    store.load(&raw)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{error::ExoplanetError, report::REPORT_RULES};

    struct StubSource(std::result::Result<String, u16>);

    impl CsvSource for StubSource {
        fn describe(&self) -> String {
            "stub".into()
        }

        fn fetch(&self) -> Result<String> {
            self.0.clone().map_err(|status| ExoplanetError::HttpStatus {
                url: "stub".into(),
                status,
            })
        }
    }

    const HEADER: &str = "pl_name,hostname,disc_year,disc_pubdate,sy_dist,discoverymethod,pl_orbper,pl_orbsmax,pl_rade,pl_masse,pl_eqt,pl_insol,st_teff,st_mass,st_rad";

    fn csv(rows: &[&str]) -> String {
        let mut text = format!("{HEADER}\n");
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    #[test]
    fn run_writes_snapshots_and_all_reports() {
        let dir = tempfile::tempdir().expect("temp dir");
        let paths = OutputPaths::new(dir.path());
        let source = StubSource(Ok(csv(&[
            "B,S1,2010,2010-01,,Transit,,,,,,,,,",
            "A,S2,2012,2012-03,5,Transit,3,,1,,,,,1,",
            "B,S1,2011,2011-01,1,Transit,,,,,,,,,",
        ])));
        let summary = run(&source, &paths, REPORT_RULES).expect("run");
        assert_eq!(summary.fetched, 3);
        assert_eq!(summary.unique, 2);
        assert_eq!(summary.reports.len(), 8);

        let distance = fs::read_to_string(dir.path().join("exoplanets_distance.txt")).expect("read");
        let lines = distance.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "List of Exoplanets Distance From Earth");
        assert_eq!(lines[2], "1) Name: A:");
        assert!(lines.contains(&"2) Name: B:"));
        assert_eq!(lines.last().copied(), Some("\tNo data"));

        let key = snapshot::read_json(&paths.key_json()).expect("key json");
        assert_eq!(key.headers().len(), KEY_FIELDS.len());
        assert!(!key.has_field("hostname"));
    }

    #[test]
    fn failed_fetch_writes_nothing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let paths = OutputPaths::new(dir.path());
        let err = run(&StubSource(Err(503)), &paths, REPORT_RULES).unwrap_err();
        assert!(matches!(err, ExoplanetError::HttpStatus { status: 503, .. }));
        assert_eq!(fs::read_dir(dir.path()).expect("list").count(), 0);
    }

    #[test]
    fn failed_fetch_leaves_missing_data_dir_absent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = dir.path().join("data");
        let paths = OutputPaths::new(&root);
        assert!(run(&StubSource(Err(500)), &paths, REPORT_RULES).is_err());
        assert!(refresh(&StubSource(Err(500)), &paths).is_err());
        assert!(!root.exists());

        let source = StubSource(Ok(csv(&["A,S,2012,2012-03,5,Transit,,,,,,,,,"])));
        run(&source, &paths, REPORT_RULES).expect("run creates the data dir");
        assert!(paths.raw_csv().exists());
    }

    #[test]
    fn malformed_value_blocks_every_report_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let paths = OutputPaths::new(dir.path());
        let source = StubSource(Ok(csv(&["A,S,2012,2012-03,far,Transit,,,,,,,,,"])));
        let err = run(&source, &paths, REPORT_RULES).unwrap_err();
        assert!(matches!(err, ExoplanetError::InvalidValue { .. }));
        assert!(paths.key_json().exists());
        assert!(REPORT_RULES.iter().all(|rule| !paths.report(rule).exists()));
    }

    #[test]
    fn refresh_loads_store_once_per_planet() {
        let dir = tempfile::tempdir().expect("temp dir");
        let paths = OutputPaths::new(dir.path());
        let source = StubSource(Ok(csv(&[
            "A,S,2012,2012-03,5,Transit,,,,,,,,,",
            "A,S,2013,2013-03,6,Transit,,,,,,,,,",
        ])));
        let first = refresh(&source, &paths).expect("refresh");
        assert_eq!(first, LoadSummary { inserted: 1, ignored: 1 });
        let second = load_store(&paths).expect("load");
        assert_eq!(second.inserted, 0);
    }
}
