use anyhow::Result;
use serde_json::json;
use txintersect::Attribute;

use super::{load_query, print_json};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::QueryArgs) -> Result<()> {
    let dashboard = load_query(cli, args)?;
    let stats = dashboard.stats();

    if args.json {
        return print_json(&json!({
            "total": dashboard.total_count(),
            "filtered": dashboard.filtered_count(),
            "activeFilters": dashboard.state().total_active(),
            "stats": stats,
        }));
    }

    println!("Showing {} of {} intersections", dashboard.filtered_count(), dashboard.total_count());
    let active = dashboard.state().total_active();
    if active > 0 {
        println!("{} active {}", active, if active == 1 { "filter" } else { "filters" });
        for (attr, values) in dashboard.state().active() {
            let values = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ");
            println!("  {}: {}", attr.label(), values);
        }
    }
    println!();
    println!("{:<14}{}", "Intersections", stats.intersections);
    println!("{:<14}{}", "Types", stats.types);
    println!("{:<14}{}", "Statuses", stats.statuses);
    println!("{:<14}{}", "Cities", stats.cities);
    println!("{:<14}{}", "Counties", stats.counties);
    println!("{:<14}{}", "Avg ICD (ft)", stats.avg_icd_ft_display());

    if cli.verbose > 0 {
        println!();
        for bucket in dashboard.top_n(Attribute::Type, Default::default()) {
            println!("  {:<24}{}", bucket.label, bucket.count);
        }
    }
    Ok(())
}
