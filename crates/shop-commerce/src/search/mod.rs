//! Product listing module.
//!
//! Filtering and sorting of an already-fetched catalog. Pure and
//! synchronous; the input slice is never reordered.

mod listing;
mod query;

pub use listing::filter_and_sort;
pub use query::{ListingParams, ParseSortError, SortOption};
