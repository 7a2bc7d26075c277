//! Filter state, option derivation and predicate evaluation.

mod options;
mod predicate;
mod state;

pub use options::{FilterOptions, derive_options};
pub use predicate::{filter, filter_indices, matches};
pub use state::{FilterState, Selection};
