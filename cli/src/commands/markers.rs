use std::{fs::File, io::BufWriter};

use anyhow::{Context, Result};

use super::{load_query, print_json};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::MarkersArgs) -> Result<()> {
    let dashboard = load_query(cli, &args.query)?;
    let geojson = dashboard.markers_geojson(args.bounds);

    let Some(path) = &args.output else {
        return print_json(&geojson);
    };

    let placed = geojson["features"].as_array().map_or(0, Vec::len);
    println!("[markers] writing {} markers ({} records without coordinates skipped) to {}",
        placed,
        dashboard.filtered_count() - dashboard.markers().len(),
        path.display());

    let file = File::create(path)
        .with_context(|| format!("[markers] Failed to create {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), &geojson)
        .with_context(|| format!("[markers] Failed to write GeoJSON to {}", path.display()))?;
    Ok(())
}
