//! Count-by summaries, chart panels and summary statistics over a view.

mod chart;
mod count;
mod stats;

pub use chart::{ChartData, ChartKind, ChartPanel, ChartPoint};
pub use count::{Bucket, DEFAULT_TOP_N, DEFAULT_YEAR_FLOOR, Limit, count_by, excluded_count, top_n, year_series};
pub use stats::SummaryStats;
