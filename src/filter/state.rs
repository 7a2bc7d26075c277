use serde::{Serialize, Serializer, ser::SerializeMap};
use smallvec::SmallVec;

use crate::types::{Attribute, FacetValue};

/// Selected values for one attribute, kept in the order they were toggled on.
pub type Selection = SmallVec<[FacetValue; 4]>;

/// Current multi-select selections per filterable attribute.
///
/// Within an attribute the selected values are OR-ed, across attributes they are AND-ed
/// (see [`crate::filter::matches`]). Each selection has set semantics but keeps
/// selection order, which is the order chips are displayed in.
#[derive(Debug, Clone)]
pub struct FilterState {
    selections: [Selection; Attribute::COUNT],
}

impl Default for FilterState {
    fn default() -> Self {
        Self { selections: std::array::from_fn(|_| Selection::new()) }
    }
}

impl FilterState {
    pub fn new() -> Self { Self::default() }

    /// Select (`selected = true`) or deselect `value` for `attr`. Returns true if the state changed.
    ///
    /// Panics if the value kind does not fit the attribute (a year for a text attribute or vice versa).
    pub fn toggle(&mut self, attr: Attribute, value: FacetValue, selected: bool) -> bool {
        assert!(value.fits(attr), "value {value:?} does not fit attribute {attr}");
        let selection = &mut self.selections[attr.index()];
        let position = selection.iter().position(|v| *v == value);

        match (selected, position) {
            (true, None) => { selection.push(value); true }
            (false, Some(pos)) => { selection.remove(pos); true }
            _ => false,
        }
    }

    /// Select `value` if it is not selected, otherwise deselect it (chart and marker clicks).
    /// Returns true if the state changed.
    pub fn flip(&mut self, attr: Attribute, value: FacetValue) -> bool {
        let selected = self.is_selected(attr, &value);
        self.toggle(attr, value, !selected)
    }

    /// Reset every attribute's selection to empty. Returns true if anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.is_empty();
        for selection in &mut self.selections { selection.clear(); }
        changed
    }

    /// Selected values for `attr`, in selection order.
    #[inline] pub fn selected(&self, attr: Attribute) -> &[FacetValue] { &self.selections[attr.index()] }

    #[inline] pub fn is_selected(&self, attr: Attribute, value: &FacetValue) -> bool {
        self.selected(attr).contains(value)
    }

    /// Number of selected values for `attr` (the per-section badge).
    #[inline] pub fn active_count(&self, attr: Attribute) -> usize { self.selected(attr).len() }

    /// Number of selected values across all attributes.
    pub fn total_active(&self) -> usize { self.selections.iter().map(|s| s.len()).sum() }

    /// True if no attribute has a selection.
    pub fn is_empty(&self) -> bool { self.selections.iter().all(|s| s.is_empty()) }

    /// Attributes that currently constrain the view, with their selections.
    pub fn active(&self) -> impl Iterator<Item = (Attribute, &[FacetValue])> + '_ {
        Attribute::ALL.into_iter()
            .map(|attr| (attr, self.selected(attr)))
            .filter(|(_, values)| !values.is_empty())
    }
}

impl Serialize for FilterState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Attribute::COUNT))?;
        for attr in Attribute::ALL {
            map.serialize_entry(attr.key(), self.selected(attr))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::FilterState;
    use crate::types::{Attribute, FacetValue};

    fn text(s: &str) -> FacetValue { FacetValue::text(s) }

    #[test]
    fn double_toggle_on_keeps_one_entry() {
        let mut state = FilterState::new();
        assert!(state.toggle(Attribute::Type, text("Roundabout"), true));
        assert!(!state.toggle(Attribute::Type, text("Roundabout"), true));
        assert_eq!(state.selected(Attribute::Type), &[text("Roundabout")]);
        assert_eq!(state.active_count(Attribute::Type), 1);
    }

    #[test]
    fn toggle_off_absent_value_is_noop() {
        let mut state = FilterState::new();
        assert!(!state.toggle(Attribute::County, text("Travis"), false));
        assert!(state.is_empty());
    }

    #[test]
    fn keeps_selection_order() {
        let mut state = FilterState::new();
        state.toggle(Attribute::Status, text("Planned"), true);
        state.toggle(Attribute::Status, text("Completed"), true);
        state.toggle(Attribute::Status, text("Design"), true);
        state.toggle(Attribute::Status, text("Completed"), false);
        state.toggle(Attribute::Status, text("Completed"), true);
        assert_eq!(state.selected(Attribute::Status), &[text("Planned"), text("Design"), text("Completed")]);
    }

    #[test]
    fn toggling_in_any_order_gives_same_set() {
        let values = ["A", "B", "C", "D"];
        let orders: [[usize; 4]; 3] = [[0, 1, 2, 3], [3, 2, 1, 0], [2, 0, 3, 1]];

        let sets = orders.iter().map(|order| {
            let mut state = FilterState::new();
            for &i in order { state.toggle(Attribute::LaneType, text(values[i]), true); }
            let mut set = state.selected(Attribute::LaneType).iter().map(|v| v.to_string()).collect::<Vec<_>>();
            set.sort();
            set
        }).collect::<Vec<_>>();

        assert!(sets.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(sets[0], vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn flip_and_clear() {
        let mut state = FilterState::new();
        assert!(state.flip(Attribute::YearCompleted, FacetValue::Year(2015)));
        state.toggle(Attribute::County, text("Bexar"), true);
        assert!(state.is_selected(Attribute::YearCompleted, &FacetValue::Year(2015)));
        assert_eq!(state.total_active(), 2);

        assert!(state.flip(Attribute::YearCompleted, FacetValue::Year(2015)));
        assert_eq!(state.total_active(), 1);
        assert_eq!(state.active().map(|(attr, _)| attr).collect::<Vec<_>>(), vec![Attribute::County]);

        assert!(state.clear());
        assert!(state.is_empty());
        assert!(!state.clear());
    }

    #[test]
    #[should_panic(expected = "does not fit attribute")]
    fn rejects_text_for_year_attribute() {
        FilterState::new().toggle(Attribute::YearCompleted, text("2015"), true);
    }

    #[test]
    fn serializes_every_attribute_key() {
        let mut state = FilterState::new();
        state.toggle(Attribute::YearCompleted, FacetValue::Year(2020), true);
        state.toggle(Attribute::Type, text("Roundabout"), true);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["yearCompleted"], serde_json::json!([2020]));
        assert_eq!(json["type"], serde_json::json!(["Roundabout"]));
        assert_eq!(json["laneType"], serde_json::json!([]));
        assert_eq!(json.as_object().unwrap().len(), 10);
    }
}
