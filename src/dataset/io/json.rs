use std::{fmt, fs::File, io::BufReader, path::Path, sync::Arc};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Number, Value};

use crate::types::IntersectionRecord;

/// Why a row of the input was left out of the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    NotAnObject,
    MissingField(&'static str),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::NotAnObject => f.write_str("row is not a JSON object"),
            DropReason::MissingField(key) => write!(f, "required field {key:?} is missing or blank"),
        }
    }
}

/// Reads the top-level JSON array of rows from a file at `path`.
pub(crate) fn read_rows_from_file(path: &Path) -> Result<Vec<Value>> {
    let file = File::open(path)
        .with_context(|| format!("[dataset::io::json] Failed to open JSON file: {}", path.display()))?;
    let value: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("[dataset::io::json] Failed to parse JSON from {}", path.display()))?;
    into_rows(value)
}

/// Reads the top-level JSON array of rows from bytes (WASM-friendly).
pub(crate) fn read_rows_from_bytes(bytes: &[u8]) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_slice(bytes)
        .context("[dataset::io::json] Failed to parse JSON from bytes")?;
    into_rows(value)
}

fn into_rows(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(rows) => Ok(rows),
        other => bail!("[dataset::io::json] Expected a JSON array of records, found {}", kind_of(&other)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Convert one JSON row into a record, or report why it has to be dropped.
pub(crate) fn parse_row(row: &Value) -> Result<IntersectionRecord, DropReason> {
    let obj = row.as_object().ok_or(DropReason::NotAnObject)?;

    Ok(IntersectionRecord {
        id: required_text(obj, "id")?,
        lat: number(obj, "lat"),
        lng: number(obj, "lng"),
        intersection: required_text(obj, "intersection")?,
        txdot_district: text(obj, "txdotDistrict"),
        city_state: text(obj, "cityState"),
        county: text(obj, "county"),
        on_system: text(obj, "onSystem"),
        kind: required_text(obj, "type")?,
        status: required_text(obj, "status")?,
        year_completed: number(obj, "yearCompleted")
            .filter(|y| y.fract() == 0.0 && *y >= i32::MIN as f64 && *y <= i32::MAX as f64)
            .map_or(0, |y| y as i32),
        previous_control_type: text(obj, "previousControlType"),
        approaches: required_text(obj, "approaches")?,
        lane_type: required_text(obj, "laneType")?,
        icd_ft: number(obj, "icdFt").unwrap_or(0.0),
        icd_m: number(obj, "icdM").unwrap_or(0.0),
        other_control_type: text(obj, "otherControlType"),
        comments: text(obj, "comments"),
    })
}

/// Text field, kept verbatim; numbers are kept in their integer form when integral.
/// Empty or all-whitespace strings count as absent.
fn text(obj: &Map<String, Value>, key: &str) -> Option<Arc<str>> {
    match obj.get(key)? {
        Value::String(s) => (!s.trim().is_empty()).then(|| Arc::from(s.as_str())),
        Value::Number(n) => Some(Arc::from(number_text(n))),
        Value::Bool(b) => Some(Arc::from(b.to_string())),
        _ => None,
    }
}

fn required_text(obj: &Map<String, Value>, key: &'static str) -> Result<Arc<str>, DropReason> {
    text(obj, key).ok_or(DropReason::MissingField(key))
}

/// Numeric field, accepting numbers or numeric strings. Non-finite values count as absent.
fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{DropReason, parse_row};

    fn full_row() -> serde_json::Value {
        json!({
            "id": 17,
            "lat": "30.2672",
            "lng": -97.7431,
            "intersection": "FM 1626 at Manchaca Rd",
            "txdotDistrict": "Austin",
            "cityState": "Austin, TX",
            "county": "Travis",
            "onSystem": "On-System",
            "type": "Roundabout",
            "status": "Completed",
            "yearCompleted": 2019,
            "previousControlType": null,
            "approaches": 4,
            "laneType": "Single",
            "icdFt": 130,
            "icdM": 39.6,
            "otherControlType": "",
            "comments": "  "
        })
    }

    #[test]
    fn parses_mixed_scalar_kinds() {
        let record = parse_row(&full_row()).unwrap();
        assert_eq!(&*record.id, "17");
        assert_eq!(record.lat, Some(30.2672));
        assert_eq!(record.lng, Some(-97.7431));
        assert_eq!(&*record.approaches, "4");
        assert_eq!(record.year(), Some(2019));
        assert_eq!(record.icd_ft, 130.0);
        assert_eq!(record.previous_control_type, None);
        assert_eq!(record.other_control_type, None);
        assert_eq!(record.comments, None);
    }

    #[test]
    fn text_is_kept_verbatim() {
        let mut row = full_row();
        row["type"] = json!("Roundabout ");
        row["county"] = json!(" Travis");
        let record = parse_row(&row).unwrap();
        assert_eq!(&*record.kind, "Roundabout ");
        assert_eq!(record.county.as_deref(), Some(" Travis"));
    }

    #[test]
    fn sentinel_and_missing_years_are_unknown() {
        let mut row = full_row();
        row["yearCompleted"] = json!(-1);
        assert_eq!(parse_row(&row).unwrap().year(), None);
        row["yearCompleted"] = json!(0);
        assert_eq!(parse_row(&row).unwrap().year(), None);
        row.as_object_mut().unwrap().remove("yearCompleted");
        assert_eq!(parse_row(&row).unwrap().year_completed, 0);
    }

    #[test]
    fn non_numeric_coordinates_are_absent() {
        let mut row = full_row();
        row["lat"] = json!("n/a");
        let record = parse_row(&row).unwrap();
        assert_eq!(record.lat, None);
        assert!(record.position().is_none());
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let mut row = full_row();
        row["status"] = json!(null);
        assert_eq!(parse_row(&row), Err(DropReason::MissingField("status")));

        let mut row = full_row();
        row["laneType"] = json!("   ");
        assert_eq!(parse_row(&row), Err(DropReason::MissingField("laneType")));

        assert_eq!(parse_row(&json!([1, 2])), Err(DropReason::NotAnObject));
    }
}
