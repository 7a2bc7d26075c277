use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::types::{Attribute, FacetValue, IntersectionRecord};

/// Default number of bars kept by collapsed top-N panels.
pub const DEFAULT_TOP_N: usize = 5;

/// Years at or before this are left out of the completion time series.
pub const DEFAULT_YEAR_FLOOR: i32 = 1990;

/// Number of records sharing one value of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: FacetValue,
    pub count: usize,
}

/// How many buckets a top-N panel keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Limit {
    Top(usize),
    /// Expanded panel: keep every bucket.
    All,
}

impl Default for Limit {
    fn default() -> Self { Limit::Top(DEFAULT_TOP_N) }
}

/// Group `view` by its value of `attr` and count, in order of first appearance.
///
/// Records without a value for `attr` (including unknown years) fall in no bucket.
pub fn count_by<'a, I>(view: I, attr: Attribute) -> Vec<Bucket>
where I: IntoIterator<Item = &'a IntersectionRecord> {
    let mut index: AHashMap<FacetValue, usize> = AHashMap::new();
    let mut buckets: Vec<Bucket> = Vec::new();

    for value in view.into_iter().filter_map(|record| record.value(attr)) {
        match index.get(&value) {
            Some(&i) => buckets[i].count += 1,
            None => {
                index.insert(value.clone(), buckets.len());
                buckets.push(Bucket { label: value, count: 1 });
            }
        }
    }
    buckets
}

/// Number of records in `view` that `count_by(view, attr)` leaves out.
pub fn excluded_count<'a, I>(view: I, attr: Attribute) -> usize
where I: IntoIterator<Item = &'a IntersectionRecord> {
    view.into_iter().filter(|record| record.value(attr).is_none()).count()
}

/// Completions per year, ascending, skipping unknown years and years `<= floor`.
pub fn year_series<'a, I>(view: I, floor: i32) -> Vec<Bucket>
where I: IntoIterator<Item = &'a IntersectionRecord> {
    let mut buckets = count_by(view, Attribute::YearCompleted);
    buckets.retain(|b| b.label.as_year().is_some_and(|y| y > floor));
    buckets.sort_by_key(|b| b.label.as_year());
    buckets
}

/// Sort descending by count and keep the first `limit` buckets. Ties keep their input order.
pub fn top_n(mut buckets: Vec<Bucket>, limit: Limit) -> Vec<Bucket> {
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    if let Limit::Top(n) = limit {
        buckets.truncate(n);
    }
    buckets
}
