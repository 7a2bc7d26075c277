use std::path::PathBuf;

use txintersect::{Attribute, FacetValue};

/// Texas intersections dataset CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "txintersect", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Dashboard config file (JSON), defaults apply to missing fields
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print the quick stats of the filtered view
    Summary(QueryArgs),

    /// Print the selectable values of every attribute
    Options(DataArgs),

    /// Count the filtered view by one attribute
    Count(CountArgs),

    /// Print the records of the filtered view as JSON
    Filter(FilterArgs),

    /// Write the map markers of the filtered view as GeoJSON
    Markers(MarkersArgs),

    /// Convert a CSV export of the source spreadsheet into the JSON dataset
    Import(ImportArgs),
}

#[derive(clap::Args, Debug)]
pub struct DataArgs {
    /// Dataset file (JSON array of intersection records)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub data: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Filter as key=value (e.g. type=Roundabout, yearCompleted=2019); repeat to combine
    #[arg(short = 'w', long = "where", value_parser = parse_where)]
    pub filters: Vec<(Attribute, FacetValue)>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct CountArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Attribute to group by, as a record key (e.g. status, laneType, yearCompleted)
    #[arg(short, long, value_parser = parse_attribute)]
    pub by: Attribute,

    /// Keep only the N largest buckets
    #[arg(short, long, conflicts_with = "series")]
    pub top: Option<usize>,

    /// Completion time series (ascending years after the configured floor); requires --by yearCompleted
    #[arg(long)]
    pub series: bool,
}

#[derive(clap::Args, Debug)]
pub struct FilterArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Print at most this many records
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct MarkersArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Output GeoJSON file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Bounding box min_lng,min_lat,max_lng,max_lat
    #[arg(long, value_parser = parse_bounds, allow_hyphen_values = true)]
    pub bounds: Option<[f64; 4]>,
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV export of the spreadsheet, with the spreadsheet column headers
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output dataset file, defaults to "./intersections.json"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

pub(crate) fn parse_attribute(key: &str) -> Result<Attribute, String> {
    Attribute::from_key(key).ok_or_else(|| {
        let keys = Attribute::ALL.map(|attr| attr.key()).join(", ");
        format!("unknown attribute {key:?}; expected one of: {keys}")
    })
}

pub(crate) fn parse_where(raw: &str) -> Result<(Attribute, FacetValue), String> {
    let (key, value) = raw.split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    let attr = parse_attribute(key.trim())?;
    let value = FacetValue::parse(attr, value.trim()).map_err(|e| e.to_string())?;
    Ok((attr, value))
}

pub(crate) fn parse_bounds(raw: &str) -> Result<[f64; 4], String> {
    let parts = raw.split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|_| format!("invalid coordinate {p:?}")))
        .collect::<Result<Vec<_>, _>>()?;
    <[f64; 4]>::try_from(parts).map_err(|parts| format!("expected 4 coordinates, got {}", parts.len()))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use txintersect::{Attribute, FacetValue};

    use super::{Cli, Commands, parse_bounds, parse_where};

    #[test]
    fn where_clauses() {
        assert_eq!(parse_where("type=Roundabout").unwrap(), (Attribute::Type, FacetValue::text("Roundabout")));
        assert_eq!(parse_where("yearCompleted = 2019").unwrap(), (Attribute::YearCompleted, FacetValue::Year(2019)));
        assert_eq!(parse_where("cityState=Austin, TX").unwrap().1, FacetValue::text("Austin, TX"));
        assert!(parse_where("yearCompleted=soon").is_err());
        assert!(parse_where("comments=x").unwrap_err().contains("unknown attribute"));
        assert!(parse_where("Roundabout").is_err());
    }

    #[test]
    fn bounds() {
        assert_eq!(parse_bounds("-99,29,-97,31").unwrap(), [-99.0, 29.0, -97.0, 31.0]);
        assert!(parse_bounds("1,2,3").is_err());
        assert!(parse_bounds("a,b,c,d").is_err());
    }

    #[test]
    fn parses_count_command() {
        let cli = Cli::parse_from([
            "txintersect", "-vv", "count", "data.json", "--by", "status", "-w", "type=Roundabout", "--top", "3",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Count(args) = cli.command else { panic!("expected count") };
        assert_eq!(args.by, Attribute::Status);
        assert_eq!(args.top, Some(3));
        assert_eq!(args.query.filters.len(), 1);
    }
}
