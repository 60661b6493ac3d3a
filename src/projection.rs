//! Narrowing records to the key field allow-list.

use std::sync::Arc;

use crate::{
    error::{ExoplanetError, Result},
    record::{Dataset, FieldIndex, Record},
};

/// Fields kept in the key snapshot and the SQLite store, in output order.
pub const KEY_FIELDS: &[&str] = &[
    "pl_name",
    "disc_year",
    "disc_pubdate",
    "sy_dist",
    "discoverymethod",
    "pl_orbper",
    "pl_orbsmax",
    "pl_rade",
    "pl_masse",
    "pl_eqt",
    "pl_insol",
    "st_teff",
    "st_mass",
    "st_rad",
];

/// Projects every record onto `fields`.
///
/// A field missing from the dataset header is a schema mismatch with the
/// source and fails the whole projection. A field that is present in the
/// header but not in an individual record becomes an empty value.
pub fn project(dataset: &Dataset, fields: &[&str]) -> Result<Dataset> {
    if let Some(missing) = fields.iter().find(|field| !dataset.has_field(field)) {
        return Err(ExoplanetError::MissingField(missing.to_string()));
    }
    let index = Arc::new(FieldIndex::new(fields.iter().copied()));
    let records = dataset
        .records()
        .iter()
        .map(|record| Record::from_row(Arc::clone(&index), project_values(record, fields)))
        .collect();
    Ok(Dataset::new(
        fields.iter().map(|field| field.to_string()).collect(),
        records,
    ))
}

fn project_values(record: &Record, fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .map(|field| record.raw(field).unwrap_or("").to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(headers: &[&str], rows: &[&[(&str, &str)]]) -> Dataset {
        Dataset::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| Record::from_pairs(row.iter().copied()))
                .collect(),
        )
    }

    #[test]
    fn projection_keeps_only_requested_fields_in_order() {
        let source = dataset(
            &["pl_name", "hostname", "sy_dist"],
            &[&[("pl_name", "A"), ("hostname", "Star"), ("sy_dist", "4.2")]],
        );
        let projected = project(&source, &["sy_dist", "pl_name"]).expect("project");
        assert_eq!(projected.headers(), ["sy_dist", "pl_name"]);
        let record = &projected.records()[0];
        assert_eq!(record.len(), 2);
        assert_eq!(record.raw("hostname"), None);
        assert_eq!(record.value("sy_dist"), Some("4.2"));
    }

    #[test]
    fn header_field_absent_from_record_becomes_empty() {
        let source = dataset(&["pl_name", "sy_dist"], &[&[("pl_name", "A")]]);
        let projected = project(&source, &["pl_name", "sy_dist"]).expect("project");
        assert_eq!(projected.records()[0].raw("sy_dist"), Some(""));
    }

    #[test]
    fn projected_rows_share_one_field_index() {
        let source = dataset(
            &["pl_name", "sy_dist"],
            &[&[("pl_name", "A")], &[("pl_name", "B"), ("sy_dist", "1")]],
        );
        let projected = project(&source, &["pl_name", "sy_dist"]).expect("project");
        let records = projected.records();
        assert!(records[0].shares_fields(&records[1]));
    }

    #[test]
    fn missing_schema_field_is_fatal() {
        let source = dataset(&["pl_name"], &[&[("pl_name", "A")]]);
        let err = project(&source, KEY_FIELDS).unwrap_err();
        assert!(matches!(err, ExoplanetError::MissingField(ref field) if field == "disc_year"));
    }
}
