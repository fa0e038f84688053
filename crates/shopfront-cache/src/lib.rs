//! Typed key-value persistence for the Shopfront storefront.
//!
//! Wraps a byte-oriented key-value backend with automatic JSON
//! serialization, so domain code stores and loads plain Rust values.
//!
//! # Example
//!
//! ```rust
//! use shopfront_cache::Cache;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Line {
//!     id: u32,
//!     qty: i64,
//! }
//!
//! let cache = Cache::in_memory();
//!
//! cache.set("ec_cart", &vec![Line { id: 1, qty: 2 }]).unwrap();
//!
//! let lines: Option<Vec<Line>> = cache.get("ec_cart").unwrap();
//! assert_eq!(lines, Some(vec![Line { id: 1, qty: 2 }]));
//!
//! cache.delete("ec_cart").unwrap();
//! assert!(!cache.exists("ec_cart").unwrap());
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
#[cfg(target_arch = "wasm32")]
pub use backend::SpinBackend;
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileBackend, KvBackend, MemoryBackend};
}
