#![doc = "txintersect public API"]
pub mod aggregate;
mod config;
mod dashboard;
pub mod dataset;
pub mod filter;
pub mod map;
mod types;

#[doc(inline)]
pub use types::{Attribute, FacetValue, IntersectionRecord};

#[doc(inline)]
pub use dataset::{Dataset, LoadReport};

#[doc(inline)]
pub use filter::{FilterOptions, FilterState, derive_options};

#[doc(inline)]
pub use aggregate::{Bucket, ChartData, ChartPanel, Limit, SummaryStats, count_by, top_n, year_series};

#[doc(inline)]
pub use config::{DashboardConfig, MapView};

#[doc(inline)]
pub use dashboard::{Dashboard, SubscriptionId};
