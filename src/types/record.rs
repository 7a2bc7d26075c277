use std::sync::Arc;

use geo::Point;
use serde::Serialize;

use super::{Attribute, FacetValue};

/// One physical intersection, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionRecord {
    pub id: Arc<str>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub intersection: Arc<str>,
    pub txdot_district: Option<Arc<str>>,
    pub city_state: Option<Arc<str>>,
    pub county: Option<Arc<str>>,
    pub on_system: Option<Arc<str>>,
    #[serde(rename = "type")]
    pub kind: Arc<str>,
    pub status: Arc<str>,
    pub year_completed: i32, // <= 0 means unknown
    pub previous_control_type: Option<Arc<str>>,
    pub approaches: Arc<str>,
    pub lane_type: Arc<str>,
    pub icd_ft: f64,
    pub icd_m: f64,
    pub other_control_type: Option<Arc<str>>,
    pub comments: Option<Arc<str>>,
}

impl IntersectionRecord {
    /// Year completed, or `None` for the unknown sentinel.
    #[inline]
    pub fn year(&self) -> Option<i32> {
        (self.year_completed > 0).then_some(self.year_completed)
    }

    /// Text value of a text attribute, or `None` when absent (always `None` for `YearCompleted`).
    pub fn text(&self, attr: Attribute) -> Option<&str> {
        let value = match attr {
            Attribute::Type => Some(&self.kind),
            Attribute::Status => Some(&self.status),
            Attribute::Approaches => Some(&self.approaches),
            Attribute::LaneType => Some(&self.lane_type),
            Attribute::TxdotDistrict => self.txdot_district.as_ref(),
            Attribute::CityState => self.city_state.as_ref(),
            Attribute::County => self.county.as_ref(),
            Attribute::OnSystem => self.on_system.as_ref(),
            Attribute::PreviousControlType => self.previous_control_type.as_ref(),
            Attribute::YearCompleted => None,
        };
        value.map(|s| s.as_ref())
    }

    /// Value of `attr` for this record, or `None` when absent.
    pub fn value(&self, attr: Attribute) -> Option<FacetValue> {
        match attr {
            Attribute::YearCompleted => self.year().map(FacetValue::Year),
            Attribute::Type => Some(FacetValue::Text(self.kind.clone())),
            Attribute::Status => Some(FacetValue::Text(self.status.clone())),
            Attribute::Approaches => Some(FacetValue::Text(self.approaches.clone())),
            Attribute::LaneType => Some(FacetValue::Text(self.lane_type.clone())),
            Attribute::TxdotDistrict => self.txdot_district.clone().map(FacetValue::Text),
            Attribute::CityState => self.city_state.clone().map(FacetValue::Text),
            Attribute::County => self.county.clone().map(FacetValue::Text),
            Attribute::OnSystem => self.on_system.clone().map(FacetValue::Text),
            Attribute::PreviousControlType => self.previous_control_type.clone().map(FacetValue::Text),
        }
    }

    /// True if the record's value for `attr` equals `value`. Absent values never match.
    #[inline]
    pub fn has_value(&self, attr: Attribute, value: &FacetValue) -> bool {
        match value {
            FacetValue::Year(y) => attr.is_year() && self.year() == Some(*y),
            FacetValue::Text(s) => self.text(attr) == Some(s.as_ref()),
        }
    }

    /// Map position as (lng, lat), if both coordinates are present and finite.
    pub fn position(&self) -> Option<Point<f64>> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some(Point::new(lng, lat)),
            _ => None,
        }
    }
}
