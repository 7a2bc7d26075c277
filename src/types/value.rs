use std::{fmt, sync::Arc};

use serde::{Serialize, Serializer};

use super::Attribute;

/// A single selectable value of a filterable attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FacetValue {
    Text(Arc<str>),
    Year(i32),
}

impl FacetValue {
    pub fn text(value: impl Into<Arc<str>>) -> Self { FacetValue::Text(value.into()) }

    #[inline] pub fn as_text(&self) -> Option<&str> {
        match self {
            FacetValue::Text(s) => Some(s),
            FacetValue::Year(_) => None,
        }
    }

    #[inline] pub fn as_year(&self) -> Option<i32> {
        match self {
            FacetValue::Year(y) => Some(*y),
            FacetValue::Text(_) => None,
        }
    }

    /// True if this value has the kind `attr` expects (years for `YearCompleted`, text otherwise).
    #[inline] pub fn fits(&self, attr: Attribute) -> bool {
        matches!(self, FacetValue::Year(_)) == attr.is_year()
    }

    /// Parse a value given on a command line or from JS for `attr`.
    pub fn parse(attr: Attribute, raw: &str) -> anyhow::Result<Self> {
        if attr.is_year() {
            let year = raw.trim().parse::<i32>()
                .map_err(|_| anyhow::anyhow!("[FacetValue::parse] {attr} expects a year, got {raw:?}"))?;
            Ok(FacetValue::Year(year))
        } else {
            Ok(FacetValue::text(raw))
        }
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetValue::Text(s) => f.write_str(s),
            FacetValue::Year(y) => write!(f, "{y}"),
        }
    }
}

impl From<&str> for FacetValue {
    fn from(value: &str) -> Self { FacetValue::text(value) }
}

impl From<i32> for FacetValue {
    fn from(value: i32) -> Self { FacetValue::Year(value) }
}

// Serialized untagged so the presentation layer sees plain strings and numbers.
impl Serialize for FacetValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FacetValue::Text(s) => serializer.serialize_str(s),
            FacetValue::Year(y) => serializer.serialize_i32(*y),
        }
    }
}
