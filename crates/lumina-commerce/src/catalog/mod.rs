//! Product catalog module.
//!
//! Contains the digital product type and the lookup the cart prices against.

mod product;
mod store;

pub use product::Product;
pub use store::{CatalogLookup, StaticCatalog};
