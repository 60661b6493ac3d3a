//! Sorted, unit-converted text reports.
//!
//! Every report category runs the same skeleton:
//!
//! 1. extract a [`SortKey`] per record, with [`SortKey::Missing`] for empty
//!    values so that unknowns sort after every known value;
//! 2. stable sort ascending, so ties keep their input order;
//! 3. drop repeated planet names again (first in sorted order wins);
//! 4. render a 1-based entry per record, or `No data` for unknowns.
//!
//! The categories themselves live in [`rules`] as a table of
//! [`ReportRule`]s that differ only in field, key kind, and renderer.

pub mod format;
pub mod rules;

use std::{cmp::Ordering, io::Write, path::Path};

use chrono::NaiveDate;
use log::debug;

use crate::{
    dedup,
    error::{ExoplanetError, Result},
    io_utils,
    record::Record,
};

pub use rules::{REPORT_RULES, ReportRule, Renderer, find_rule};

/// Placeholder entry line for a record whose report field is unknown.
pub const NO_DATA: &str = "No data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Numeric,
    Date,
}

/// Sort key with a built-in sentinel: `Missing` orders after every known
/// value regardless of magnitude.
#[derive(Debug, Clone)]
pub enum SortKey {
    Number(f64),
    Date(String),
    Missing,
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Date(_) => 1,
            SortKey::Missing => 2,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, SortKey::Missing)
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Parses a known numeric value. Non-numeric and non-finite content is
/// rejected rather than treated as unknown.
pub fn parse_number(field: &str, record: &Record, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ExoplanetError::invalid_value(field, record.name(), raw))
}

/// Validates a `YYYY-MM-DD` or `YYYY-MM` date and returns it zero-padded in
/// the same precision, so lexical order matches chronological order.
pub fn parse_date(field: &str, record: &Record, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.format("%Y-%m-%d").to_string());
    }
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .map(|date| date.format("%Y-%m").to_string())
        .map_err(|_| ExoplanetError::invalid_value(field, record.name(), raw))
}

pub fn extract_key(record: &Record, field: &str, kind: KeyKind) -> Result<SortKey> {
    let Some(raw) = record.value(field) else {
        return Ok(SortKey::Missing);
    };
    match kind {
        KeyKind::Numeric => parse_number(field, record, raw).map(SortKey::Number),
        KeyKind::Date => parse_date(field, record, raw).map(SortKey::Date),
    }
}

/// Stable ascending sort by `key`, followed by a first-seen dedup on the
/// planet name.
pub fn sort_records<K, F>(records: &[Record], key: F) -> Result<Vec<Record>>
where
    K: Ord,
    F: Fn(&Record) -> Result<K>,
{
    let mut keyed = records
        .iter()
        .map(|record| Ok((key(record)?, record)))
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dedup::dedup_records(keyed.into_iter().map(|(_, record)| record)))
}

/// Renders `title`, a blank line, then one block per record with its 1-based
/// rank.
pub fn render_report<F>(title: &str, records: &[Record], render: F) -> Result<Vec<String>>
where
    F: Fn(usize, &Record) -> Result<Vec<String>>,
{
    let mut lines = vec![title.to_string(), String::new()];
    for (idx, record) in records.iter().enumerate() {
        lines.extend(render(idx + 1, record)?);
    }
    Ok(lines)
}

/// Runs the full sort and render skeleton for one rule.
pub fn generate(records: &[Record], rule: &ReportRule) -> Result<Vec<String>> {
    let sorted = sort_records(records, |record| rule.key(record))?;
    let missing = sorted
        .iter()
        .filter(|record| record.value(rule.field).is_none())
        .count();
    debug!(
        "Report '{}': {} planet(s), {} without {}",
        rule.name,
        sorted.len(),
        missing,
        rule.field
    );
    render_report(rule.title, &sorted, |rank, record| rule.render_entry(rank, record))
}

pub fn to_text(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

pub fn write_report(lines: &[String], path: &Path) -> Result<()> {
    io_utils::write_atomic(path, |sink| {
        sink.write_all(to_text(lines).as_bytes())?;
        Ok(())
    })
}
