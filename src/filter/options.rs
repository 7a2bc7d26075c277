use std::cmp::Ordering;

use ahash::AHashSet;
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::types::{Attribute, FacetValue, IntersectionRecord};

/// Distinct legal values per filterable attribute, sorted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    values: [Vec<FacetValue>; Attribute::COUNT],
}

impl FilterOptions {
    /// Legal values for `attr`: text sorted lexicographically, years newest first.
    #[inline] pub fn get(&self, attr: Attribute) -> &[FacetValue] { &self.values[attr.index()] }

    /// True if `value` was observed for `attr` in the dataset.
    pub fn contains(&self, attr: Attribute, value: &FacetValue) -> bool {
        value.fits(attr)
            && self.get(attr).binary_search_by(|probe| display_order(attr, probe, value)).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &[FacetValue])> + '_ {
        Attribute::ALL.into_iter().map(|attr| (attr, self.get(attr)))
    }
}

/// Derive the filter options from every record of a dataset.
///
/// Absent values and unknown years are left out. Deterministic and idempotent.
pub fn derive_options<'a, I>(records: I) -> FilterOptions
where I: IntoIterator<Item = &'a IntersectionRecord>, I::IntoIter: Clone {
    let records = records.into_iter();
    let values = std::array::from_fn(|i| {
        let attr = Attribute::ALL[i];
        let mut seen = AHashSet::new();
        let mut values = records.clone()
            .filter_map(|record| record.value(attr))
            .filter(|value| seen.insert(value.clone()))
            .collect::<Vec<_>>();
        values.sort_by(|a, b| display_order(attr, a, b));
        values
    });
    FilterOptions { values }
}

fn display_order(attr: Attribute, a: &FacetValue, b: &FacetValue) -> Ordering {
    match (a, b) {
        (FacetValue::Year(x), FacetValue::Year(y)) => y.cmp(x),
        (FacetValue::Text(x), FacetValue::Text(y)) => x.as_ref().cmp(y.as_ref()),
        _ => unreachable!("mixed value kinds for attribute {attr}"),
    }
}

impl Serialize for FilterOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Attribute::COUNT))?;
        for (attr, values) in self.iter() {
            map.serialize_entry(attr.key(), values)?;
        }
        map.end()
    }
}
