use anyhow::Result;

use super::{load_query, print_json};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::FilterArgs) -> Result<()> {
    let dashboard = load_query(cli, &args.query)?;
    let records = dashboard.filtered_iter()
        .take(args.limit.unwrap_or(usize::MAX))
        .collect::<Vec<_>>();

    if cli.verbose > 0 {
        eprintln!("[filter] {} of {} records match", dashboard.filtered_count(), dashboard.total_count());
    }
    print_json(&records)
}
