//! Map-facing projections of a view: markers, viewport queries, popups and GeoJSON.

mod details;
mod geojson;
mod markers;

pub use details::MarkerDetails;
pub use geojson::markers_geojson;
pub use markers::{Marker, MarkerIndex, marker_batches, markers};
