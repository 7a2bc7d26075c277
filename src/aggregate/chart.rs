use serde::Serialize;

use crate::{filter::FilterState, types::{Attribute, IntersectionRecord}};

use super::{Limit, count_by, top_n, year_series};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Horizontal top-N panel, collapsible to `Limit::Top`.
    Side,
    /// Category bars in order of first appearance.
    Bar,
    /// Completions per year.
    Line,
}

/// One chart panel of the dashboard and the attribute it aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartPanel {
    pub title: &'static str,
    pub attribute: Attribute,
    pub kind: ChartKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: usize,
    /// The bar's value is part of the current filter selection.
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub title: &'static str,
    pub attribute: Attribute,
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
}

impl ChartData {
    /// Number of bars (the "N items" header).
    #[inline] pub fn item_count(&self) -> usize { self.points.len() }
}

impl ChartPanel {
    pub const fn new(title: &'static str, attribute: Attribute, kind: ChartKind) -> Self {
        Self { title, attribute, kind }
    }

    /// The panels of the dashboard page: three side panels, the bar charts and the year line.
    pub fn dashboard() -> [ChartPanel; 7] {
        [
            ChartPanel::new("By Type", Attribute::Type, ChartKind::Side),
            ChartPanel::new("By Lane Type", Attribute::LaneType, ChartKind::Side),
            ChartPanel::new("By Approach Count", Attribute::Approaches, ChartKind::Side),
            ChartPanel::new("Intersections by Type", Attribute::Type, ChartKind::Bar),
            ChartPanel::new("Intersections by Status", Attribute::Status, ChartKind::Bar),
            ChartPanel::new("Intersections by Approach Count", Attribute::Approaches, ChartKind::Bar),
            ChartPanel::new("Intersections by Year Completed", Attribute::YearCompleted, ChartKind::Line),
        ]
    }

    /// Aggregate `view` for this panel. `limit` applies to side panels only,
    /// `year_floor` to the line panel only.
    pub fn data<'a, I>(&self, view: I, state: &FilterState, limit: Limit, year_floor: i32) -> ChartData
    where I: IntoIterator<Item = &'a IntersectionRecord> {
        let buckets = match self.kind {
            ChartKind::Side => top_n(count_by(view, self.attribute), limit),
            ChartKind::Bar => count_by(view, self.attribute),
            ChartKind::Line => year_series(view, year_floor),
        };
        let points = buckets.into_iter()
            .map(|bucket| ChartPoint {
                selected: state.is_selected(self.attribute, &bucket.label),
                name: bucket.label.to_string(),
                value: bucket.count,
            })
            .collect();

        ChartData { title: self.title, attribute: self.attribute, kind: self.kind, points }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ChartKind, ChartPanel, ChartPoint};
    use crate::{Dataset, aggregate::Limit, filter::FilterState, types::{Attribute, FacetValue}};

    fn dataset() -> Dataset {
        let lanes = ["Single", "Multi", "Single", "Hybrid", "Single", "Multi", "Slip", "Turbo", "Other"];
        Dataset::from_rows(lanes.iter().enumerate().map(|(i, lane)| json!({
            "id": i, "intersection": "x", "type": "Roundabout", "status": "Completed",
            "approaches": "4", "laneType": lane, "yearCompleted": 2000 + i as i32,
        })).collect())
    }

    #[test]
    fn side_panel_collapses_and_expands() {
        let dataset = dataset();
        let panel = ChartPanel::new("By Lane Type", Attribute::LaneType, ChartKind::Side);
        let mut state = FilterState::new();
        state.toggle(Attribute::LaneType, FacetValue::text("Multi"), true);

        let collapsed = panel.data(dataset.records(), &state, Limit::Top(5), 1990);
        assert_eq!(collapsed.item_count(), 5);
        assert_eq!(collapsed.points[0], ChartPoint { name: "Single".into(), value: 3, selected: false });
        assert_eq!(collapsed.points[1], ChartPoint { name: "Multi".into(), value: 2, selected: true });

        let expanded = panel.data(dataset.records(), &state, Limit::All, 1990);
        assert_eq!(expanded.item_count(), 6);
    }

    #[test]
    fn line_panel_marks_selected_years() {
        let dataset = dataset();
        let panel = ChartPanel::new("Years", Attribute::YearCompleted, ChartKind::Line);
        let mut state = FilterState::new();
        state.toggle(Attribute::YearCompleted, FacetValue::Year(2003), true);

        let data = panel.data(dataset.records(), &state, Limit::default(), 2001);
        let names = data.points.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["2002", "2003", "2004", "2005", "2006", "2007", "2008"]);
        assert!(data.points.iter().all(|p| p.selected == (p.name == "2003")));
    }

    #[test]
    fn dashboard_panels_cover_every_chart() {
        let panels = ChartPanel::dashboard();
        assert_eq!(panels.iter().filter(|p| p.kind == ChartKind::Side).count(), 3);
        assert_eq!(panels.iter().filter(|p| p.kind == ChartKind::Line).count(), 1);
    }
}
