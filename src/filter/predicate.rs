use crate::types::IntersectionRecord;

use super::FilterState;

/// True if `record` passes every attribute's filter.
///
/// An attribute with no selection places no constraint. Otherwise the record's value must be
/// present and selected: a record without a value never matches an active filter.
pub fn matches(record: &IntersectionRecord, state: &FilterState) -> bool {
    state.active().all(|(attr, selected)| {
        selected.iter().any(|value| record.has_value(attr, value))
    })
}

/// Records passing `state`, in dataset order.
pub fn filter<'a>(records: &'a [IntersectionRecord], state: &FilterState) -> Vec<&'a IntersectionRecord> {
    if state.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|record| matches(record, state)).collect()
}

/// Indices (into `records`) of records passing `state`, ascending.
pub fn filter_indices(records: &[IntersectionRecord], state: &FilterState) -> Vec<u32> {
    records.iter().enumerate()
        .filter(|(_, record)| matches(record, state))
        .map(|(i, _)| i as u32)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{filter, filter_indices};
    use crate::{Dataset, filter::FilterState, types::{Attribute, FacetValue}};

    fn dataset() -> Dataset {
        let row = |id: &str, kind: &str, status: &str, county: Option<&str>, year: i32| json!({
            "id": id, "intersection": id, "type": kind, "status": status,
            "approaches": "4", "laneType": "Single", "county": county, "yearCompleted": year,
        });
        Dataset::from_rows(vec![
            row("1", "Roundabout", "Completed", Some("Travis"), 2015),
            row("2", "Signal", "Planned", Some("Bexar"), 0),
            row("3", "Roundabout", "Planned", None, 2020),
            row("4", "Mini Roundabout", "Completed", Some("Travis"), 2015),
        ])
    }

    fn ids(view: &[&crate::IntersectionRecord]) -> Vec<String> {
        view.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn empty_state_keeps_everything() {
        let dataset = dataset();
        assert_eq!(filter(dataset.records(), &FilterState::new()).len(), dataset.len());
    }

    #[test]
    fn single_value_keeps_order() {
        let dataset = dataset();
        let mut state = FilterState::new();
        state.toggle(Attribute::Type, FacetValue::text("Roundabout"), true);
        assert_eq!(ids(&filter(dataset.records(), &state)), vec!["1", "3"]);
    }

    #[test]
    fn or_within_and_across() {
        let dataset = dataset();
        let mut state = FilterState::new();
        state.toggle(Attribute::Type, FacetValue::text("Roundabout"), true);
        state.toggle(Attribute::Type, FacetValue::text("Mini Roundabout"), true);
        assert_eq!(ids(&filter(dataset.records(), &state)), vec!["1", "3", "4"]);

        state.toggle(Attribute::Status, FacetValue::text("Completed"), true);
        assert_eq!(ids(&filter(dataset.records(), &state)), vec!["1", "4"]);
        assert_eq!(filter_indices(dataset.records(), &state), vec![0, 3]);
    }

    #[test]
    fn absent_value_fails_active_filter() {
        let dataset = dataset();
        let mut state = FilterState::new();
        state.toggle(Attribute::County, FacetValue::text("Travis"), true);
        state.toggle(Attribute::County, FacetValue::text("Bexar"), true);
        assert_eq!(ids(&filter(dataset.records(), &state)), vec!["1", "2", "4"]);
    }

    #[test]
    fn unknown_year_never_matches() {
        let dataset = dataset();
        let mut state = FilterState::new();
        state.toggle(Attribute::YearCompleted, FacetValue::Year(2015), true);
        assert_eq!(ids(&filter(dataset.records(), &state)), vec!["1", "4"]);
    }

    #[test]
    fn adding_a_selection_never_grows_the_view() {
        let dataset = dataset();
        let mut state = FilterState::new();
        let steps = [
            (Attribute::Status, FacetValue::text("Planned")),
            (Attribute::County, FacetValue::text("Bexar")),
            (Attribute::YearCompleted, FacetValue::Year(2015)),
        ];
        let mut previous = filter(dataset.records(), &state).len();
        for (attr, value) in steps {
            let before_attr_empty = state.active_count(attr) == 0;
            state.toggle(attr, value, true);
            let now = filter(dataset.records(), &state).len();
            if before_attr_empty { assert!(now <= previous); }
            previous = now;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn clear_restores_full_view() {
        let dataset = dataset();
        let mut state = FilterState::new();
        state.toggle(Attribute::Type, FacetValue::text("Signal"), true);
        state.toggle(Attribute::LaneType, FacetValue::text("Multi"), true);
        assert!(filter(dataset.records(), &state).is_empty());
        state.clear();
        assert_eq!(filter(dataset.records(), &state).len(), dataset.len());
    }
}
