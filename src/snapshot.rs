//! CSV and JSON snapshots of a [`Dataset`].
//!
//! Both formats keep values as strings. The JSON form is a pretty-printed
//! array of objects whose keys follow the dataset header order; reading it
//! back yields the same string-valued records.

use std::{fs::File, io::BufReader, io::Write, path::Path};

use serde_json::{Map, Value};

use crate::{
    error::Result,
    io_utils,
    record::{Dataset, Record},
};

pub use crate::loader::read_csv;

pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    io_utils::write_atomic(path, |sink| write_csv_to(dataset, sink))
}

pub fn write_csv_to(dataset: &Dataset, sink: &mut dyn Write) -> Result<()> {
    let mut writer = io_utils::csv_writer(sink);
    writer.write_record(dataset.headers())?;
    for record in dataset.records() {
        writer.write_record(
            dataset
                .headers()
                .iter()
                .map(|field| record.raw(field).unwrap_or("")),
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json(dataset: &Dataset, path: &Path) -> Result<()> {
    io_utils::write_atomic(path, |sink| write_json_to(dataset, sink))
}

pub fn write_json_to(dataset: &Dataset, sink: &mut dyn Write) -> Result<()> {
    let rows = dataset
        .records()
        .iter()
        .map(|record| {
            dataset
                .headers()
                .iter()
                .map(|field| {
                    (
                        field.clone(),
                        Value::String(record.raw(field).unwrap_or("").to_string()),
                    )
                })
                .collect::<Map<String, Value>>()
        })
        .collect::<Vec<_>>();
    serde_json::to_writer_pretty(&mut *sink, &rows)?;
    writeln!(sink)?;
    Ok(())
}

pub fn read_json(path: &Path) -> Result<Dataset> {
    let file = File::open(path)?;
    let rows: Vec<Map<String, Value>> = serde_json::from_reader(BufReader::new(file))?;
    Ok(dataset_from_json_rows(rows))
}

pub fn parse_json(text: &str) -> Result<Dataset> {
    let rows: Vec<Map<String, Value>> = serde_json::from_str(text)?;
    Ok(dataset_from_json_rows(rows))
}

fn dataset_from_json_rows(rows: Vec<Map<String, Value>>) -> Dataset {
    let mut headers: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let mut record = Record::new();
        for (field, value) in row {
            if !headers.contains(&field) {
                headers.push(field.clone());
            }
            record.insert(field, json_value_to_raw(value));
        }
        records.push(record);
    }
    Dataset::new(headers, records)
}

fn json_value_to_raw(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            vec!["name".into(), "age".into(), "city".into()],
            vec![
                Record::from_pairs([("name", "Alice"), ("age", "30"), ("city", "New York")]),
                Record::from_pairs([("name", "Bob"), ("age", "25"), ("city", "Los Angeles")]),
            ],
        )
    }

    #[test]
    fn json_snapshot_round_trips_and_keeps_header_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("output.json");
        write_json(&sample(), &path).expect("write json");
        let text = std::fs::read_to_string(&path).expect("read json");
        assert!(text.starts_with("[\n  {\n    \"name\": \"Alice\",\n    \"age\": \"30\""));
        let reloaded = read_json(&path).expect("reload");
        assert_eq!(reloaded, sample());
    }

    #[test]
    fn csv_snapshot_writes_header_then_rows() {
        let mut buffer = Vec::new();
        write_csv_to(&sample(), &mut buffer).expect("write csv");
        let text = String::from_utf8(buffer).expect("utf8");
        assert_eq!(text, "name,age,city\nAlice,30,New York\nBob,25,Los Angeles\n");
    }

    #[test]
    fn json_nulls_and_numbers_read_as_strings() {
        let dataset = parse_json(r#"[{"pl_name": "A", "sy_dist": null, "disc_year": 2014}]"#)
            .expect("parse");
        let record = &dataset.records()[0];
        assert_eq!(record.raw("sy_dist"), Some(""));
        assert_eq!(record.raw("disc_year"), Some("2014"));
    }

    #[test]
    fn empty_dataset_writes_empty_array() {
        let mut buffer = Vec::new();
        write_json_to(&Dataset::new(vec!["pl_name".into()], Vec::new()), &mut buffer)
            .expect("write json");
        assert_eq!(String::from_utf8(buffer).expect("utf8"), "[]\n");
    }
}
