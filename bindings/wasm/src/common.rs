use anyhow::{Result, anyhow};
use serde::Serialize;
use wasm_bindgen::JsValue;

use txintersect_core::{Attribute, FacetValue};

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Serialize to plain JS objects (maps become objects, not `Map`).
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).map_err(|e| e.into())
}

pub(crate) fn parse_attribute(key: &str) -> Result<Attribute> {
    Attribute::from_key(key).ok_or_else(|| {
        let keys = Attribute::ALL.map(|attr| attr.key()).join(", ");
        anyhow!("Unknown attribute {:?}. Expected one of: {}", key, keys)
    })
}

/// Accept a string or a number from JS (chart labels arrive as strings, years often as numbers).
pub(crate) fn parse_value(attr: Attribute, value: &JsValue) -> Result<FacetValue> {
    if let Some(text) = value.as_string() {
        return FacetValue::parse(attr, &text);
    }
    match value.as_f64() {
        Some(n) if n.fract() == 0.0 => FacetValue::parse(attr, &(n as i64).to_string()),
        Some(n) => FacetValue::parse(attr, &n.to_string()),
        None => Err(anyhow!("Filter value for {} must be a string or a number", attr)),
    }
}

pub(crate) fn parse_bounds(bounds: Option<Vec<f64>>) -> Result<Option<[f64; 4]>> {
    bounds.map(|b| <[f64; 4]>::try_from(b)
        .map_err(|b| anyhow!("bounds must be [min_lng, min_lat, max_lng, max_lat], got {} numbers", b.len())))
        .transpose()
}
