//! Shopping cart module.
//!
//! Contains the cart aggregate, its pricing against the catalog, and the
//! persisted, lock-protected cart store.

mod cart;
mod pricing;
mod store;

pub use cart::{Cart, CartLine};
pub use pricing::{CartPricing, LineItemPricing};
pub use store::{CartReceipt, CartStore, CART_KEY};
