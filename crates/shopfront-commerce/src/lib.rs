//! Storefront domain types and logic for Shopfront.
//!
//! - **Catalog**: products, categories, the built-in demo catalog
//! - **Search**: filter pipeline, sorting, clamped pagination
//! - **Cart**: cart lines keyed by product and variant, persisted cart store
//! - **Session**: the [`Storefront`] controller that owns one session's state
//!
//! # Example
//!
//! ```rust
//! use shopfront_cache::Cache;
//! use shopfront_commerce::prelude::*;
//!
//! let shop = Storefront::new(Catalog::demo(), CartStore::open(Cache::in_memory()));
//!
//! let page = shop.current_page();
//! assert_eq!(page.summary(), "Showing 1-8 of 10 products");
//!
//! shop.cart_command(CartCommand::add_one(ProductId::new(1))).unwrap();
//! shop.cart_command(CartCommand::add_one(ProductId::new(1))).unwrap();
//! assert_eq!(shop.cart_badge(), 2);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;
pub mod session;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};
pub use session::{CartCommand, ProductDetails, Storefront};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Category, Product};

    // Search
    pub use crate::search::{
        run_query, CategoryFilter, Filter, Pager, Pagination, QuerySpec, ResultPage, SortOption,
        DEFAULT_PAGE_SIZE,
    };

    // Cart
    pub use crate::cart::{Cart, CartLine, CartPricing, CartReceipt, CartStore, LineItemPricing};

    // Session
    pub use crate::session::{CartCommand, ProductDetails, Storefront};
}
