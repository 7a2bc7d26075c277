use serde::Serialize;

use crate::types::IntersectionRecord;

const NOT_AVAILABLE: &str = "N/A";

/// Popup content for a marker: the intersection name and labelled detail rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerDetails {
    pub title: String,
    pub rows: Vec<(&'static str, String)>,
}

impl From<&IntersectionRecord> for MarkerDetails {
    fn from(record: &IntersectionRecord) -> Self {
        let or_na = |value: &Option<std::sync::Arc<str>>| {
            value.as_deref().unwrap_or(NOT_AVAILABLE).to_string()
        };

        let mut rows = vec![
            ("City/State", or_na(&record.city_state)),
            ("County", or_na(&record.county)),
            ("Type", record.kind.to_string()),
            ("Status", record.status.to_string()),
            ("Year Completed", record.year_completed.to_string()),
            ("Previous Control Type", or_na(&record.previous_control_type)),
            ("Approaches", record.approaches.to_string()),
            ("Lane Type", record.lane_type.to_string()),
            ("Inner Circle Diameter (ft)", record.icd_ft.to_string()),
            ("Inner Circle Diameter (m)", record.icd_m.to_string()),
            ("TxDOT District", or_na(&record.txdot_district)),
            ("On System", or_na(&record.on_system)),
        ];
        if let Some(comments) = &record.comments {
            rows.push(("Comments", comments.to_string()));
        }

        Self { title: record.intersection.to_string(), rows }
    }
}
