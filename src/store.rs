//! SQLite store for the key exoplanet fields.
//!
//! One table, `exoplanets`, keyed by the unique planet name. Loading uses
//! `INSERT OR IGNORE`, so the first row seen for a planet is the one kept,
//! matching the snapshot deduplication. Empty values are stored as `NULL`.
//!
//! Sorted listings only accept order options from [`ORDER_OPTIONS`]; the
//! column name placed in the SQL text always comes from that table.

use std::path::Path;

use itertools::Itertools;
use log::{debug, info, warn};
use rusqlite::{Connection, OpenFlags, params_from_iter, types::Value as SqlValue};

use crate::{
    error::{ExoplanetError, Result},
    io_utils,
    projection::{self, KEY_FIELDS},
    record::{Dataset, Record},
};

/// Placeholder shown for `NULL` columns in listings.
pub const NULL_PLACEHOLDER: &str = "No value";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS exoplanets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        pl_name TEXT UNIQUE,
        disc_year INTEGER,
        disc_pubdate TEXT,
        sy_dist REAL,
        discoverymethod TEXT,
        pl_orbper REAL,
        pl_orbsmax REAL,
        pl_rade REAL,
        pl_masse REAL,
        pl_eqt REAL,
        pl_insol REAL,
        st_teff REAL,
        st_mass REAL,
        st_rad REAL
    );
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Affinity {
    Text,
    Integer,
    Real,
}

fn affinity(column: &str) -> Affinity {
    match column {
        "pl_name" | "disc_pubdate" | "discoverymethod" => Affinity::Text,
        "disc_year" => Affinity::Integer,
        _ => Affinity::Real,
    }
}

/// Short option names accepted by sorted listings, mapped to their column.
pub const ORDER_OPTIONS: &[(&str, &str)] = &[
    ("name", "pl_name"),
    ("distance", "sy_dist"),
    ("size", "pl_rade"),
    ("insolation", "pl_insol"),
    ("mass", "pl_masse"),
    ("orbital_period", "pl_orbper"),
    ("discovery_year", "disc_year"),
    ("publication_date", "disc_pubdate"),
    ("star_mass", "st_mass"),
];

/// Columns shown by listings, with their display headings.
pub const VIEW_COLUMNS: &[(&str, &str)] = &[
    ("pl_name", "Name"),
    ("sy_dist", "Distance (pc)"),
    ("pl_rade", "Radius (R⊕)"),
    ("pl_insol", "Insolation (S⊕)"),
    ("pl_masse", "Mass (M⊕)"),
    ("st_mass", "Stellar Mass (M☉)"),
    ("pl_orbper", "Orbital Period"),
    ("disc_year", "Discovery Year"),
    ("disc_pubdate", "Publication Date"),
];

pub fn resolve_order(options: &[(&'static str, &'static str)], name: &str) -> Result<&'static str> {
    let wanted = name.trim();
    options
        .iter()
        .find(|(option, _)| option.eq_ignore_ascii_case(wanted))
        .map(|(_, column)| *column)
        .ok_or_else(|| ExoplanetError::UnknownOrder(name.to_string()))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub inserted: usize,
    pub ignored: usize,
}

pub struct ExoplanetStore {
    conn: Connection,
}

impl ExoplanetStore {
    /// Opens (creating if needed) the database at `path` and its schema.
    pub fn open(path: &Path) -> Result<Self> {
        io_utils::ensure_parent_dir(path)?;
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.create_schema()?;
        Ok(store)
    }

    /// Opens an existing database without creating it.
    pub fn open_existing(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ExoplanetError::StoreNotFound(path.display().to_string()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let store = Self { conn };
        store.create_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.create_schema()?;
        Ok(store)
    }

    pub fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM exoplanets", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Inserts every record inside one transaction, ignoring planets that
    /// are already stored.
    pub fn load(&mut self, dataset: &Dataset) -> Result<LoadSummary> {
        let projected = projection::project(dataset, KEY_FIELDS)?;
        let sql = format!(
            "INSERT OR IGNORE INTO exoplanets ({}) VALUES ({})",
            KEY_FIELDS.join(", "),
            (1..=KEY_FIELDS.len()).map(|idx| format!("?{idx}")).join(", ")
        );

        let mut summary = LoadSummary::default();
        let tx = self.conn.transaction()?;
        {
            let mut statement = tx.prepare(&sql)?;
            for record in projected.records() {
                let values = sql_values(record)?;
                if statement.execute(params_from_iter(values))? > 0 {
                    summary.inserted += 1;
                } else {
                    summary.ignored += 1;
                }
            }
        }
        tx.commit()?;
        if summary.ignored > 0 {
            warn!(
                "Ignored {} row(s) for planets already in the store",
                summary.ignored
            );
        }
        info!(
            "Loaded {} planet(s) into store ({} already present)",
            summary.inserted, summary.ignored
        );
        Ok(summary)
    }

    /// Rows for [`VIEW_COLUMNS`], ordered by `column` with `NULL`s last.
    ///
    /// `column` must come from [`ORDER_OPTIONS`].
    pub fn list_sorted(&self, column: &str, limit: Option<usize>) -> Result<Vec<Vec<Option<String>>>> {
        if !ORDER_OPTIONS.iter().any(|(_, allowed)| *allowed == column) {
            return Err(ExoplanetError::UnknownOrder(column.to_string()));
        }
        let mut sql = format!(
            "SELECT {} FROM exoplanets ORDER BY {column} IS NULL, {column}, id",
            VIEW_COLUMNS.iter().map(|(name, _)| *name).join(", ")
        );
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        debug!("Listing query: {sql}");

        let mut statement = self.conn.prepare(&sql)?;
        let rows = statement.query_map([], |row| {
            (0..VIEW_COLUMNS.len())
                .map(|idx| row.get::<_, SqlValue>(idx).map(display_sql_value))
                .collect::<rusqlite::Result<Vec<_>>>()
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

fn sql_values(record: &Record) -> Result<Vec<SqlValue>> {
    KEY_FIELDS
        .iter()
        .map(|field| {
            let Some(raw) = record.value(field) else {
                return Ok(SqlValue::Null);
            };
            let raw = raw.trim();
            let invalid = || ExoplanetError::invalid_value(field, record.name(), raw);
            match affinity(field) {
                Affinity::Text => Ok(SqlValue::Text(raw.to_string())),
                Affinity::Integer => raw.parse::<i64>().map(SqlValue::Integer).map_err(|_| invalid()),
                Affinity::Real => raw
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .map(SqlValue::Real)
                    .ok_or_else(invalid),
            }
        })
        .collect()
}

fn display_sql_value(value: SqlValue) -> Option<String> {
    match value {
        SqlValue::Null => None,
        SqlValue::Integer(i) => Some(i.to_string()),
        SqlValue::Real(f) => Some(f.to_string()),
        SqlValue::Text(s) => Some(s),
        SqlValue::Blob(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
    }
}
