use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::{Context, Result};
use txintersect::{Dataset, dataset::import_spreadsheet_csv};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ImportArgs) -> Result<()> {
    let out_path = args.output.clone().unwrap_or_else(|| PathBuf::from("./intersections.json"));

    println!("[import] reading spreadsheet export from {}", args.input.display());
    let rows = import_spreadsheet_csv(&args.input)?;

    // Rows that loading the written file will drop.
    let checked = Dataset::from_rows(rows.clone());
    let report = checked.report();
    if report.dropped_count() > 0 {
        println!("[import] {} of {} rows are missing required fields and will be dropped on load",
            report.dropped_count(), report.rows);
    }

    println!("[import] writing {} rows to {}", rows.len(), out_path.display());
    let file = File::create(&out_path)
        .with_context(|| format!("[import] Failed to create {}", out_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &rows)
        .with_context(|| format!("[import] Failed to write JSON to {}", out_path.display()))?;
    Ok(())
}
