//! Pure filtering, sorting, and pagination.
//!
//! Every function here works on record slices and index lists, so both the
//! table and card layouts share one pipeline.

pub mod filter;
pub mod order;
pub mod page;

pub use filter::{FilterState, filter_indices, matches_filter, matches_search};
pub use order::{SortDirection, SortState, sort_indices};
pub use page::{DEFAULT_PAGE_SIZE_OPTIONS, Pagination};
