use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::aggregate::{DEFAULT_TOP_N, DEFAULT_YEAR_FLOOR};

/// Initial map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapView {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

impl Default for MapView {
    // Centre of Texas
    fn default() -> Self { Self { center_lat: 31.5, center_lng: -99.5, zoom: 6 } }
}

/// Presentation knobs for a dashboard; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Bars kept by collapsed side panels.
    pub top_n: usize,
    /// Years at or before this are left out of the year series.
    pub year_floor: i32,
    /// Markers handed to the map per rendering batch.
    pub marker_chunk_size: usize,
    pub map: MapView,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            year_floor: DEFAULT_YEAR_FLOOR,
            marker_chunk_size: 100,
            map: MapView::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse a config from JSON text, filling missing fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("[config] Failed to parse dashboard config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config from a JSON file at `path`.
    pub fn read_json(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("[config] Failed to open config file: {}", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("[config] Failed to parse config from {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.top_n > 0, "[config] topN must be at least 1");
        ensure!(self.marker_chunk_size > 0, "[config] markerChunkSize must be at least 1");
        Ok(())
    }
}
