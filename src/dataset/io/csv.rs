//! Import of the source spreadsheet, exported as CSV with the spreadsheet column headers.

use std::{fs::File, io::Cursor, path::Path};

use anyhow::{Context, Result, ensure};
use polars::{frame::DataFrame, io::SerReader, prelude::CsvReadOptions};
use serde_json::{Map, Value, json};

/// Spreadsheet header -> record key.
pub(crate) const COLUMN_MAPPING: [(&str, &str); 18] = [
    ("id", "id"),
    ("Lat", "lat"),
    ("Lng", "lng"),
    ("Intersection", "intersection"),
    ("TxDOT District", "txdotDistrict"),
    ("City, State", "cityState"),
    ("County", "county"),
    ("On-System/Off-System", "onSystem"),
    ("Type", "type"),
    ("Status", "status"),
    ("Year Completed", "yearCompleted"),
    ("Previous Control Type", "previousControlType"),
    ("Approaches", "approaches"),
    ("Lane Type", "laneType"),
    ("ICD (ft)", "icdFt"),
    ("ICD (m)", "icdM"),
    ("Other Control Type", "otherControlType"),
    ("Comments", "comments"),
];

#[derive(Clone, Copy)]
enum ColumnKind { Text, Year, Measure }

fn column_kind(key: &str) -> ColumnKind {
    match key {
        "yearCompleted" => ColumnKind::Year,
        "icdFt" | "icdM" => ColumnKind::Measure,
        _ => ColumnKind::Text,
    }
}

/// Reads a spreadsheet CSV export at `path` into JSON record rows.
pub fn import_spreadsheet_csv(path: &Path) -> Result<Vec<Value>> {
    let file = File::open(path)
        .with_context(|| format!("[dataset::io::csv] Failed to open CSV file: {}", path.display()))?;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(file)
        .finish()
        .with_context(|| format!("[dataset::io::csv] Failed to read CSV from {:?}", path))?;
    rows_from_frame(&df)
}

/// Reads a spreadsheet CSV export from a string.
pub fn import_spreadsheet_csv_str(csv: &str) -> Result<Vec<Value>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(csv.as_bytes()))
        .finish()
        .context("[dataset::io::csv] Failed to read CSV from string")?;
    rows_from_frame(&df)
}

/// Convert an all-string DataFrame into record rows, renaming headers and
/// normalizing blanks (text -> null, year/measure -> -1).
fn rows_from_frame(df: &DataFrame) -> Result<Vec<Value>> {
    let present = COLUMN_MAPPING.iter()
        .filter(|(header, _)| df.column(header).is_ok())
        .collect::<Vec<_>>();
    ensure!(!present.is_empty(), "[dataset::io::csv] CSV has none of the expected spreadsheet headers");

    let mut rows = vec![Map::new(); df.height()];
    for (header, key) in present {
        let column = df.column(header)?;
        let values = column.str()
            .with_context(|| format!("[dataset::io::csv] Column {header:?} is not text"))?;
        let kind = column_kind(key);

        for (row, cell) in rows.iter_mut().zip(values.into_iter()) {
            let cell = cell.map(str::trim).filter(|s| !s.is_empty() && *s != "NaN");
            row.insert((*key).to_string(), convert_cell(kind, cell));
        }
    }

    Ok(rows.into_iter().map(Value::Object).collect())
}

fn convert_cell(kind: ColumnKind, cell: Option<&str>) -> Value {
    match kind {
        ColumnKind::Text => cell.map_or(Value::Null, |s| json!(s)),
        ColumnKind::Year => match cell.and_then(|s| s.parse::<f64>().ok()) {
            Some(y) => json!(y.trunc() as i64),
            None => json!(-1),
        },
        ColumnKind::Measure => match cell.and_then(|s| s.parse::<f64>().ok()) {
            Some(v) if v.fract() == 0.0 => json!(v as i64),
            Some(v) => json!(v),
            None => json!(-1),
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::import_spreadsheet_csv_str;

    const SHEET: &str = "\
id,Lat,Lng,Intersection,TxDOT District,\"City, State\",County,On-System/Off-System,Type,Status,Year Completed,Previous Control Type,Approaches,Lane Type,ICD (ft),ICD (m),Other Control Type,Comments
1,30.1,-97.2,Main at 1st,Austin,\"Austin, TX\",Travis,On-System,Roundabout,Completed,2015,Stop,4,Single,120,36.6,,
2,,,Elm at 2nd,,,,,Signal,Planned,,,3,Multi,,,,Left turn lanes
";

    #[test]
    fn renames_headers_and_normalizes_blanks() {
        let rows = import_spreadsheet_csv_str(SHEET).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0]["cityState"], json!("Austin, TX"));
        assert_eq!(rows[0]["yearCompleted"], json!(2015));
        assert_eq!(rows[0]["icdFt"], json!(120));
        assert_eq!(rows[0]["icdM"], json!(36.6));
        assert_eq!(rows[0]["comments"], json!(null));

        assert_eq!(rows[1]["lat"], json!(null));
        assert_eq!(rows[1]["yearCompleted"], json!(-1));
        assert_eq!(rows[1]["icdFt"], json!(-1));
        assert_eq!(rows[1]["comments"], json!("Left turn lanes"));
    }

    #[test]
    fn rejects_unrelated_csv() {
        assert!(import_spreadsheet_csv_str("a,b\n1,2\n").is_err());
    }
}
