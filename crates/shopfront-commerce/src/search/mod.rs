//! Search module.
//!
//! Contains the listing query spec, the filter pipeline, the query engine and
//! paginated result pages.

mod engine;
mod filter;
mod query;
mod results;

pub use engine::{compare_names, run_query, sort_products, DEFAULT_PAGE_SIZE};
pub use filter::{CategoryFilter, Filter};
pub use query::{QuerySpec, SortOption};
pub use results::{PageButton, Pager, Pagination, ResultPage};
