//! Search module.
//!
//! Text search and sorting for the product listing page.

mod query;

pub use query::{ProductQuery, SortOption};
