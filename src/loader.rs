//! Parsing CSV text into a [`Dataset`].

use std::{fs::File, io::BufReader, io::Read, path::Path, sync::Arc};

use log::debug;

use crate::{
    error::Result,
    io_utils,
    record::{Dataset, FieldIndex, Record},
};

/// Reads headed CSV from `reader`; every row becomes one [`Record`] over a
/// field index shared by the whole dataset.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = io_utils::open_csv_reader(reader);
    let headers = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();
    let fields = Arc::new(FieldIndex::new(headers.iter().cloned()));
    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        records.push(Record::from_row(
            Arc::clone(&fields),
            row.iter().map(str::to_string).collect(),
        ));
    }
    debug!("Parsed {} row(s) across {} column(s)", records.len(), headers.len());
    Ok(Dataset::new(headers, records))
}

pub fn parse_csv(text: &str) -> Result<Dataset> {
    read_dataset(text.as_bytes())
}

pub fn read_csv(path: &Path) -> Result<Dataset> {
    let file = File::open(path)?;
    read_dataset(BufReader::new(file))
}
