//! Product catalog module.
//!
//! Contains the product record, category keys, and the read-only catalog store.

mod category;
mod demo;
mod product;
mod store;

pub use category::Category;
pub use demo::{demo_products, DEMO_BRANDS};
pub use product::{Product, MAX_RATING};
pub use store::Catalog;
