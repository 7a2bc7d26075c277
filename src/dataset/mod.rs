mod io;

use std::{path::Path, sync::Arc};

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::types::IntersectionRecord;

#[cfg(feature = "csv")]
pub use io::{import_spreadsheet_csv, import_spreadsheet_csv_str};
pub use io::DropReason;

/// A row of the input that did not become a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    pub row: usize,
    pub reason: DropReason,
}

/// Outcome of loading a dataset: malformed rows are dropped and counted, never defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows: usize,
    pub dropped: Vec<DroppedRow>,
}

impl LoadReport {
    #[inline] pub fn loaded(&self) -> usize { self.rows - self.dropped.len() }
    #[inline] pub fn dropped_count(&self) -> usize { self.dropped.len() }
}

impl Serialize for LoadReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("LoadReport", 3)?;
        s.serialize_field("rows", &self.rows)?;
        s.serialize_field("loaded", &self.loaded())?;
        s.serialize_field("dropped", &self.dropped.iter()
            .map(|d| (d.row, d.reason.to_string()))
            .collect::<Vec<_>>())?;
        s.end()
    }
}

/// The immutable, ordered list of intersection records loaded once at startup.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[IntersectionRecord]>,
    report: LoadReport,
}

impl Dataset {
    /// Build a dataset from already-parsed JSON rows, dropping malformed ones.
    pub fn from_rows(rows: Vec<Value>) -> Self {
        let mut report = LoadReport { rows: rows.len(), dropped: Vec::new() };
        let mut records = Vec::with_capacity(rows.len());

        for (row, value) in rows.iter().enumerate() {
            match io::parse_row(value) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    tracing::debug!(row, %reason, "dropping malformed record");
                    report.dropped.push(DroppedRow { row, reason });
                }
            }
        }

        if !report.dropped.is_empty() {
            tracing::warn!(dropped = report.dropped.len(), rows = report.rows, "dropped malformed records while loading dataset");
        }
        tracing::info!(records = records.len(), "loaded intersection dataset");

        Self { records: records.into(), report }
    }

    /// Parse a JSON array of records from a string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json_bytes(json.as_bytes())
    }

    /// Parse a JSON array of records from bytes (WASM-friendly).
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_rows(io::read_rows_from_bytes(bytes)?))
    }

    /// Read a JSON array of records from a file.
    pub fn read_json(path: &Path) -> Result<Self> {
        Ok(Self::from_rows(io::read_rows_from_file(path)?))
    }

    /// Wrap records that were built in memory (nothing is dropped).
    pub fn from_records(records: Vec<IntersectionRecord>) -> Self {
        let report = LoadReport { rows: records.len(), dropped: Vec::new() };
        Self { records: records.into(), report }
    }

    #[inline] pub fn records(&self) -> &[IntersectionRecord] { &self.records }
    #[inline] pub fn len(&self) -> usize { self.records.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.records.is_empty() }
    #[inline] pub fn get(&self, index: usize) -> Option<&IntersectionRecord> { self.records.get(index) }
    #[inline] pub fn iter(&self) -> std::slice::Iter<'_, IntersectionRecord> { self.records.iter() }
    #[inline] pub fn report(&self) -> &LoadReport { &self.report }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a IntersectionRecord;
    type IntoIter = std::slice::Iter<'a, IntersectionRecord>;

    fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}
