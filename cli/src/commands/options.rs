use anyhow::Result;

use super::{load_dashboard, print_json};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::DataArgs) -> Result<()> {
    let dashboard = load_dashboard(cli, args)?;
    print_json(dashboard.options())
}
