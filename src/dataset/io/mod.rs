//! Dataset input formats.

#[cfg(feature = "csv")]
mod csv;
mod json;

#[cfg(feature = "csv")]
pub use csv::{import_spreadsheet_csv, import_spreadsheet_csv_str};
pub use json::DropReason;
pub(crate) use json::*;
