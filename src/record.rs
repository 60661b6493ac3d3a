//! In-memory record model shared by every pipeline stage.
//!
//! A [`Record`] holds the raw strings of one row, positioned by a
//! [`FieldIndex`] that every row read from the same header shares. An empty
//! or absent value means "unknown"; nothing is coerced at this layer. A
//! [`Dataset`] pairs records with the ordered header list that snapshot
//! writers use for column order.

use std::{collections::HashMap, sync::Arc};

/// Field that identifies a planet across the whole dataset.
pub const IDENTITY_FIELD: &str = "pl_name";

/// Field names and their column positions, shared between rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl FieldIndex {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::default();
        for name in names {
            index.push(name.into());
        }
        index
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn push(&mut self, name: String) -> usize {
        let position = self.names.len();
        self.positions.insert(name.clone(), position);
        self.names.push(name);
        position
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Arc<FieldIndex>,
    values: Vec<String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row against a shared field index. Missing trailing values
    /// read as empty.
    pub fn from_row(fields: Arc<FieldIndex>, mut values: Vec<String>) -> Self {
        values.resize(fields.len(), String::new());
        Self { fields, values }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (field, value) in pairs {
            record.insert(field, value);
        }
        record
    }

    /// Sets `field`, appending it to this row's own field index when new.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        match self.fields.position(&field) {
            Some(position) => self.values[position] = value.into(),
            None => {
                Arc::make_mut(&mut self.fields).push(field);
                self.values.push(value.into());
            }
        }
    }

    /// Raw value as read, including empty strings. `None` only when the
    /// field is not present at all.
    pub fn raw(&self, field: &str) -> Option<&str> {
        self.fields
            .position(field)
            .and_then(|position| self.values.get(position))
            .map(String::as_str)
    }

    /// Known value of `field`; empty and absent both map to `None`.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.raw(field).filter(|value| !value.is_empty())
    }

    /// Identity key of the record, empty when the planet has no name.
    pub fn name(&self) -> &str {
        self.raw(IDENTITY_FIELD).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether this row shares its field index with `other`.
    pub fn shares_fields(&self, other: &Record) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }
}

/// Ordered collection of records plus the header order they were read with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.headers.iter().any(|header| header == field)
    }

    /// New dataset sharing this header order but holding `records`.
    pub fn with_records(&self, records: Vec<Record>) -> Self {
        Self {
            headers: self.headers.clone(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
