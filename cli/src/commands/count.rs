use anyhow::{Result, ensure};
use txintersect::{Attribute, Limit};

use super::{load_query, print_json};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::CountArgs) -> Result<()> {
    ensure!(!args.series || args.by == Attribute::YearCompleted, "--series requires --by yearCompleted");
    let dashboard = load_query(cli, &args.query)?;

    let buckets = match (args.series, args.top) {
        (true, _) => dashboard.year_series(),
        (false, Some(n)) => dashboard.top_n(args.by, Limit::Top(n)),
        (false, None) => dashboard.count_by(args.by),
    };

    if args.query.json {
        return print_json(&buckets);
    }
    for bucket in &buckets {
        println!("{:<32}{}", bucket.label, bucket.count);
    }
    Ok(())
}
