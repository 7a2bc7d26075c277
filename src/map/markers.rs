use std::sync::Arc;

use geo::Point;
use rstar::{AABB, RTree, RTreeObject};
use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::types::IntersectionRecord;

/// A map marker for one record of a view that has both coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub index: u32,        // Dataset index of the record
    pub id: Arc<str>,
    pub position: Point<f64>, // (lng, lat)
}

impl Marker {
    #[inline] pub fn lat(&self) -> f64 { self.position.y() }
    #[inline] pub fn lng(&self) -> f64 { self.position.x() }

    /// Key that stays unique when the same id appears twice in a dataset.
    pub fn key(&self) -> String { format!("{}-{}", self.index, self.id) }
}

impl Serialize for Marker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Marker", 5)?;
        s.serialize_field("key", &self.key())?;
        s.serialize_field("index", &self.index)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("lat", &self.lat())?;
        s.serialize_field("lng", &self.lng())?;
        s.end()
    }
}

/// Markers for the records of `view` that can be placed on the map, in view order.
/// `view` yields each record with its dataset index.
///
/// Records without coordinates are skipped here but still count everywhere else.
pub fn markers<'a, I>(view: I) -> Vec<Marker>
where I: IntoIterator<Item = (u32, &'a IntersectionRecord)> {
    view.into_iter()
        .filter_map(|(index, record)| record.position().map(|position| Marker {
            index,
            id: record.id.clone(),
            position,
        }))
        .collect()
}

/// Split markers into batches of `chunk_size` for incremental rendering.
///
/// Concatenating the batches yields the input unchanged.
pub fn marker_batches(markers: &[Marker], chunk_size: usize) -> std::slice::Chunks<'_, Marker> {
    markers.chunks(chunk_size.max(1))
}

/// A marker location in the R-tree, associated with a marker by index.
#[derive(Debug, Clone)]
struct MarkerPoint {
    idx: usize,
    coords: [f64; 2],
}

impl RTreeObject for MarkerPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope { AABB::from_point(self.coords) }
}

/// Spatial index over markers, answering viewport queries.
#[derive(Debug, Clone)]
pub struct MarkerIndex {
    markers: Vec<Marker>,
    rtree: RTree<MarkerPoint>,
}

impl MarkerIndex {
    pub fn new(markers: Vec<Marker>) -> Self {
        Self {
            rtree: RTree::bulk_load(markers.iter().enumerate()
                .map(|(idx, m)| MarkerPoint { idx, coords: [m.lng(), m.lat()] })
                .collect()),
            markers,
        }
    }

    #[inline] pub fn len(&self) -> usize { self.markers.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.markers.is_empty() }
    #[inline] pub fn markers(&self) -> &[Marker] { &self.markers }

    /// Markers inside `[min_lng, min_lat, max_lng, max_lat]` (edges included), in view order.
    pub fn in_bounds(&self, bounds: [f64; 4]) -> Vec<&Marker> {
        let [min_lng, min_lat, max_lng, max_lat] = bounds;
        let envelope = AABB::from_corners([min_lng, min_lat], [max_lng, max_lat]);
        let mut hits = self.rtree.locate_in_envelope(&envelope)
            .map(|p| p.idx)
            .collect::<Vec<_>>();
        hits.sort_unstable();
        hits.into_iter().map(|idx| &self.markers[idx]).collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Marker, MarkerIndex, marker_batches};
    use crate::Dataset;

    fn markers(dataset: &Dataset) -> Vec<Marker> {
        super::markers(dataset.iter().enumerate().map(|(i, r)| (i as u32, r)))
    }

    fn dataset() -> Dataset {
        let row = |id: &str, lat: serde_json::Value, lng: serde_json::Value| json!({
            "id": id, "intersection": id, "type": "Roundabout", "status": "Completed",
            "approaches": "4", "laneType": "Single", "lat": lat, "lng": lng,
        });
        Dataset::from_rows(vec![
            row("a", json!(30.27), json!(-97.74)),
            row("b", json!(null), json!(-98.49)),
            row("c", json!("29.42"), json!("-98.49")),
            row("d", json!(""), json!(-95.36)),
            row("e", json!(32.78), json!(-96.80)),
        ])
    }

    #[test]
    fn skips_records_without_coordinates() {
        let dataset = dataset();
        let markers = markers(&dataset);
        let ids = markers.iter().map(|m| m.id.as_ref()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "c", "e"]);
        assert_eq!(markers[1].index, 2);
        assert_eq!(markers[1].key(), "2-c");
        assert_eq!(markers[1].lat(), 29.42);
    }

    #[test]
    fn index_points_back_into_the_dataset() {
        let dataset = dataset();
        let view = [(2, &dataset.records()[2]), (4, &dataset.records()[4])];
        let markers = super::markers(view);
        assert_eq!(markers.iter().map(|m| m.index).collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(serde_json::to_value(&markers[1]).unwrap()["index"], json!(4));
    }

    #[test]
    fn batches_concatenate_to_full_set() {
        let dataset = dataset();
        let all = markers(&dataset);
        for size in [0, 1, 2, 3, 100] {
            let joined = marker_batches(&all, size).flatten().cloned().collect::<Vec<_>>();
            assert_eq!(joined, all);
        }
        assert_eq!(marker_batches(&all, 2).count(), 2);
    }

    #[test]
    fn bounds_query_returns_view_order() {
        let dataset = dataset();
        let index = MarkerIndex::new(markers(&dataset));
        assert_eq!(index.len(), 3);

        // South and central Texas only
        let hits = index.in_bounds([-99.0, 29.0, -97.0, 31.0]);
        let ids = hits.iter().map(|m| m.id.as_ref()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "c"]);

        assert!(index.in_bounds([-80.0, 40.0, -79.0, 41.0]).is_empty());
    }
}
