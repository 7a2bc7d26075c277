pub mod count;
pub mod filter;
pub mod import;
pub mod markers;
pub mod options;
pub mod summary;

use std::io::Write;

use anyhow::{Context, Result};
use txintersect::{Dashboard, DashboardConfig, Dataset};

use crate::cli::{Cli, DataArgs, QueryArgs};

/// Load the dataset named by `args` with the config given on the command line.
pub(crate) fn load_dashboard(cli: &Cli, args: &DataArgs) -> Result<Dashboard> {
    let config = match &cli.config {
        Some(path) => DashboardConfig::read_json(path)?,
        None => DashboardConfig::default(),
    };
    tracing::debug!(path = %args.data.display(), ?config, "loading dataset");
    let dataset = Dataset::read_json(&args.data)?;
    let report = dataset.report();
    if report.dropped_count() > 0 {
        eprintln!("[load] dropped {} of {} rows from {}", report.dropped_count(), report.rows, args.data.display());
        if cli.verbose > 0 {
            for dropped in &report.dropped {
                eprintln!("[load]   row {}: {}", dropped.row, dropped.reason);
            }
        }
    }
    Ok(Dashboard::with_config(dataset, config))
}

/// Load the dataset and apply the --where filters of a query.
pub(crate) fn load_query(cli: &Cli, args: &QueryArgs) -> Result<Dashboard> {
    let mut dashboard = load_dashboard(cli, &args.data)?;
    for (attr, value) in &args.filters {
        if !dashboard.toggle(*attr, value.clone(), true) && !dashboard.state().is_selected(*attr, value) {
            eprintln!("[filter] {attr}={value} does not occur in the dataset; ignored");
        }
    }
    Ok(dashboard)
}

/// Pretty-print `value` as JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).context("[cli] Failed to write JSON to stdout")?;
    writeln!(out)?;
    Ok(())
}
