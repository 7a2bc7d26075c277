use ahash::AHashSet;
use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::types::IntersectionRecord;

/// Quick stats shown above the charts, computed over a view.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub intersections: usize,
    pub types: usize,
    pub statuses: usize,
    pub cities: usize,
    pub counties: usize,
    /// Mean inner circle diameter (ft) over every record in the view; 0 for an empty view.
    pub avg_icd_ft: f64,
}

impl SummaryStats {
    pub fn compute<'a, I>(view: I) -> Self
    where I: IntoIterator<Item = &'a IntersectionRecord> {
        let mut types = AHashSet::new();
        let mut statuses = AHashSet::new();
        let mut cities = AHashSet::new();
        let mut counties = AHashSet::new();
        let (mut count, mut icd_sum) = (0usize, 0.0f64);

        for record in view {
            count += 1;
            icd_sum += record.icd_ft;
            types.insert(record.kind.clone());
            statuses.insert(record.status.clone());
            if let Some(city) = &record.city_state { cities.insert(city.clone()); }
            if let Some(county) = &record.county { counties.insert(county.clone()); }
        }

        Self {
            intersections: count,
            types: types.len(),
            statuses: statuses.len(),
            cities: cities.len(),
            counties: counties.len(),
            avg_icd_ft: if count == 0 { 0.0 } else { icd_sum / count as f64 },
        }
    }

    /// Average ICD rounded to one decimal place.
    pub fn avg_icd_ft_rounded(&self) -> f64 { (self.avg_icd_ft * 10.0).round() / 10.0 }

    /// Average ICD formatted for the stat tile, e.g. "123.4".
    pub fn avg_icd_ft_display(&self) -> String { format!("{:.1}", self.avg_icd_ft_rounded()) }
}

impl Serialize for SummaryStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("SummaryStats", 6)?;
        s.serialize_field("intersections", &self.intersections)?;
        s.serialize_field("types", &self.types)?;
        s.serialize_field("statuses", &self.statuses)?;
        s.serialize_field("cities", &self.cities)?;
        s.serialize_field("counties", &self.counties)?;
        s.serialize_field("avgIcdFt", &self.avg_icd_ft_display())?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::SummaryStats;
    use crate::Dataset;

    #[test]
    fn empty_view_has_zero_average() {
        let stats = SummaryStats::compute(std::iter::empty::<&crate::IntersectionRecord>());
        assert_eq!(stats.intersections, 0);
        assert_eq!(stats.avg_icd_ft, 0.0);
        assert_eq!(stats.avg_icd_ft_display(), "0.0");
    }

    #[test]
    fn distinct_counts_and_average() {
        let row = |kind: &str, status: &str, city: Option<&str>, county: Option<&str>, icd: f64| json!({
            "id": "x", "intersection": "x", "type": kind, "status": status, "approaches": "4",
            "laneType": "Single", "cityState": city, "county": county, "icdFt": icd,
        });
        let dataset = Dataset::from_rows(vec![
            row("Roundabout", "Completed", Some("Austin, TX"), Some("Travis"), 100.0),
            row("Roundabout", "Planned", None, Some("Travis"), 120.0),
            row("Signal", "Completed", Some("Waco, TX"), None, 0.0),
        ]);
        let stats = SummaryStats::compute(dataset.records());

        assert_eq!(stats.intersections, 3);
        assert_eq!(stats.types, 2);
        assert_eq!(stats.statuses, 2);
        assert_eq!(stats.cities, 2);
        assert_eq!(stats.counties, 1);
        assert_eq!(stats.avg_icd_ft_rounded(), 73.3);
        assert_eq!(stats.avg_icd_ft_display(), "73.3");

        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["avgIcdFt"], json!("73.3"));
    }
}
