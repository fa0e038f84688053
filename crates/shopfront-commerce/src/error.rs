//! Commerce error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur in storefront operations.
///
/// None of these are fatal: each has a defined recovery at the call site
/// (reject the mutation, fall back to an empty cart, or treat a lookup as absent).
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Non-positive quantity supplied to a cart mutation.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Lookup by identifier found nothing.
    #[error("Product not found: {0}")]
    UnknownProduct(ProductId),

    /// Persisted cart could not be read or decoded.
    #[error("Failed to read persisted cart: {0}")]
    PersistenceRead(String),

    /// Arithmetic overflow in a quantity or money calculation.
    #[error("Arithmetic overflow in quantity calculation")]
    Overflow,

    /// Catalog or input data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Key-value store failure.
    #[error("Cache error: {0}")]
    Cache(#[from] shopfront_cache::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while loading catalog data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommerceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
