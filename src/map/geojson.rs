use serde_json::{Value, json};

use crate::types::IntersectionRecord;

use super::{MarkerIndex, markers};

/// Export the placeable records of a view as a GeoJSON FeatureCollection of points.
/// The view is given as ascending indices into `records`.
/// bounds: Optional bounding box [min_lng, min_lat, max_lng, max_lat] to filter features.
pub fn markers_geojson(records: &[IntersectionRecord], view: &[u32], bounds: Option<[f64; 4]>) -> Value {
    let index = MarkerIndex::new(markers(view.iter().map(|&i| (i, &records[i as usize]))));
    let selected = match bounds {
        Some(bounds) => index.in_bounds(bounds),
        None => index.markers().iter().collect(),
    };

    let features = selected.into_iter()
        .map(|marker| {
            let record = &records[marker.index as usize];
            json!({
                "type": "Feature",
                "id": marker.key(),
                "geometry": {
                    "type": "Point",
                    "coordinates": [marker.lng(), marker.lat()],
                },
                "properties": {
                    "id": record.id,
                    "intersection": record.intersection,
                    "type": record.kind,
                    "status": record.status,
                },
            })
        })
        .collect::<Vec<_>>();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
