use js_sys::Uint32Array;
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use txintersect_core::{ChartPanel, Dashboard, DashboardConfig, Dataset, Limit, map::MarkerDetails};

use crate::common::*;

#[wasm_bindgen]
pub struct WasmDashboard {
    inner: Dashboard,
}

#[wasm_bindgen]
impl WasmDashboard {
    /// Load a dashboard from the dataset JSON text (an array of records) and an optional
    /// config JSON string.
    #[wasm_bindgen(constructor)]
    pub fn new(json: &str, config: Option<String>) -> Result<WasmDashboard, JsValue> {
        let config = match config {
            Some(text) => DashboardConfig::from_json_str(&text).map_err(js_err)?,
            None => DashboardConfig::default(),
        };
        let dataset = Dataset::from_json_str(json).map_err(js_err)?;

        let report = dataset.report();
        web_sys::console::log_1(&format!("[txintersect] loaded {} of {} rows", report.loaded(), report.rows).into());
        for dropped in &report.dropped {
            web_sys::console::warn_1(&format!("[txintersect] dropped row {}: {}", dropped.row, dropped.reason).into());
        }

        Ok(WasmDashboard { inner: Dashboard::with_config(dataset, config) })
    }

    pub fn total_count(&self) -> usize {
        self.inner.total_count()
    }

    pub fn filtered_count(&self) -> usize {
        self.inner.filtered_count()
    }

    /// Number of selected values across all attributes (the sidebar badge).
    pub fn active_filters(&self) -> usize {
        self.inner.state().total_active()
    }

    /// Select or deselect a value. Returns true if the filter state changed.
    pub fn toggle(&mut self, attribute: &str, value: JsValue, selected: bool) -> Result<bool, JsValue> {
        let attr = parse_attribute(attribute).map_err(js_err)?;
        let value = parse_value(attr, &value).map_err(js_err)?;
        Ok(self.inner.toggle(attr, value, selected))
    }

    /// Chart click: select the value if unselected, otherwise deselect it.
    pub fn flip(&mut self, attribute: &str, value: JsValue) -> Result<bool, JsValue> {
        let attr = parse_attribute(attribute).map_err(js_err)?;
        let value = parse_value(attr, &value).map_err(js_err)?;
        Ok(self.inner.flip(attr, value))
    }

    pub fn clear(&mut self) -> bool {
        self.inner.clear()
    }

    /// Records of the filtered view as an array of objects.
    pub fn filtered(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.filtered())
    }

    /// Dataset indices of the filtered view.
    pub fn filtered_indices(&self) -> Uint32Array {
        Uint32Array::from(self.inner.filtered_indices())
    }

    /// Selectable values per attribute key.
    pub fn options(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.options())
    }

    /// Selected values per attribute key, in selection order.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.state())
    }

    /// `[{label, count}]` for an attribute, in first-seen order.
    pub fn count_by(&self, attribute: &str) -> Result<JsValue, JsValue> {
        let attr = parse_attribute(attribute).map_err(js_err)?;
        to_js(&self.inner.count_by(attr))
    }

    /// Largest buckets of an attribute; `n` omitted keeps every bucket.
    pub fn top_n(&self, attribute: &str, n: Option<usize>) -> Result<JsValue, JsValue> {
        let attr = parse_attribute(attribute).map_err(js_err)?;
        let limit = n.map_or(Limit::All, Limit::Top);
        to_js(&self.inner.top_n(attr, limit))
    }

    pub fn year_series(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.year_series())
    }

    pub fn stats(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.stats())
    }

    /// Panel descriptions of the dashboard page.
    pub fn panels(&self) -> Result<JsValue, JsValue> {
        to_js(&ChartPanel::dashboard())
    }

    /// Data for every panel. `expanded` holds the titles of side panels showing all bars.
    pub fn charts(&self, expanded: Option<Vec<String>>) -> Result<JsValue, JsValue> {
        let expanded = expanded.unwrap_or_default();
        let charts = ChartPanel::dashboard().iter()
            .map(|panel| self.inner.chart(panel, expanded.iter().any(|title| title == panel.title)))
            .collect::<Vec<_>>();
        to_js(&charts)
    }

    /// Marker batches for incremental rendering, each an array of `{key, index, id, lat, lng}`.
    pub fn marker_batches(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.marker_batches())
    }

    /// Popup rows for the record at a dataset index (a marker's `index`).
    pub fn details(&self, index: u32) -> Result<JsValue, JsValue> {
        let record = self.inner.dataset().get(index as usize)
            .ok_or_else(|| js_err(format!("No record at index {index}")))?;
        to_js(&MarkerDetails::from(record))
    }

    /// Initial map centre and zoom.
    pub fn map_view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.config().map)
    }

    /// Filtered markers as a GeoJSON FeatureCollection.
    /// bounds: Optional bounding box [min_lng, min_lat, max_lng, max_lat] to filter features.
    #[wasm_bindgen(js_name = "markers_geojson")]
    pub fn markers_geojson(&self, bounds: Option<Vec<f64>>) -> Result<JsValue, JsValue> {
        let bounds = parse_bounds(bounds).map_err(js_err)?;
        let geojson = self.inner.markers_geojson(bounds);

        let json_string = serde_json::to_string(&geojson)
            .map_err(|e| js_err(format!("Failed to serialize GeoJSON to string: {}", e)))?;
        js_sys::JSON::parse(&json_string)
            .map_err(|e| js_err(format!("Failed to parse GeoJSON string: {:?}", e)))
    }
}
