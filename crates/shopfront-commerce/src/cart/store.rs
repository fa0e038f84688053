//! Persisted cart store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use shopfront_cache::Cache;

use crate::cart::{Cart, CartLine, CartPricing};
use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Key the cart is stored under unless configured otherwise.
pub const CART_KEY: &str = "ec_cart";

/// Outcome of a cart mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartReceipt {
    /// Whether the cart contents changed.
    pub changed: bool,
    /// Cart badge count after the mutation.
    pub total_quantity: i64,
    /// Number of distinct lines after the mutation.
    pub line_count: usize,
    /// Set when the new state could not be written. The in-memory cart still
    /// holds the change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persist_warning: Option<String>,
}

/// A cart persisted to a key-value cache after every mutation.
///
/// Each mutation holds one lock across read, modify and persist, so
/// concurrent callers cannot interleave and break line uniqueness.
pub struct CartStore {
    cache: Cache,
    key: String,
    cart: Mutex<Cart>,
}

impl CartStore {
    /// Open the cart stored under [`CART_KEY`].
    pub fn open(cache: Cache) -> Self {
        Self::with_key(cache, CART_KEY)
    }

    /// Open the cart stored under `key`.
    ///
    /// A missing, unreadable or corrupt payload starts an empty cart.
    pub fn with_key(cache: Cache, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = match restore(&cache, &key) {
            Ok(cart) => {
                tracing::debug!(key = %key, lines = cart.len(), "cart restored");
                cart
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "discarding unreadable cart");
                Cart::new()
            }
        };

        Self {
            cache,
            key,
            cart: Mutex::new(cart),
        }
    }

    /// The key this cart persists under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Add `qty` of a product. Rejects non-positive quantities.
    pub fn add_item(
        &self,
        product_id: ProductId,
        qty: i64,
        variant: Option<&str>,
    ) -> Result<CartReceipt, CommerceError> {
        self.mutate(|cart| cart.add_item(product_id, qty, variant).map(|_| true))
    }

    /// Remove a line entirely.
    pub fn remove_item(
        &self,
        product_id: ProductId,
        variant: Option<&str>,
    ) -> Result<CartReceipt, CommerceError> {
        self.mutate(|cart| Ok(cart.remove_item(product_id, variant)))
    }

    /// Set a line's quantity; zero removes it.
    pub fn set_quantity(
        &self,
        product_id: ProductId,
        variant: Option<&str>,
        qty: i64,
    ) -> Result<CartReceipt, CommerceError> {
        self.mutate(|cart| cart.set_quantity(product_id, variant, qty))
    }

    /// Empty the cart.
    pub fn clear(&self) -> Result<CartReceipt, CommerceError> {
        self.mutate(|cart| {
            let changed = !cart.is_empty();
            cart.clear();
            Ok(changed)
        })
    }

    /// Fold another cart's lines in.
    pub fn merge(&self, other: &Cart) -> Result<CartReceipt, CommerceError> {
        self.mutate(|cart| {
            cart.merge(other)?;
            Ok(!other.is_empty())
        })
    }

    /// Sum of line quantities.
    pub fn total_quantity(&self) -> i64 {
        self.lock().total_quantity()
    }

    /// A copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.lock().clone()
    }

    /// Price the current cart against a catalog.
    pub fn pricing(&self, catalog: &Catalog) -> Result<CartPricing, CommerceError> {
        self.lock().pricing(catalog)
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate<F>(&self, op: F) -> Result<CartReceipt, CommerceError>
    where
        F: FnOnce(&mut Cart) -> Result<bool, CommerceError>,
    {
        let mut cart = self.lock();
        let changed = op(&mut cart)?;

        let persist_warning = if changed {
            self.persist(&cart)
        } else {
            None
        };

        Ok(CartReceipt {
            changed,
            total_quantity: cart.total_quantity(),
            line_count: cart.len(),
            persist_warning,
        })
    }

    fn persist(&self, cart: &Cart) -> Option<String> {
        match self.cache.set(&self.key, cart) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
                Some(format!("cart change not saved: {e}"))
            }
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("cart", &*self.lock())
            .finish()
    }
}

/// Read and normalize the persisted cart. A missing key is an empty cart.
fn restore(cache: &Cache, key: &str) -> Result<Cart, CommerceError> {
    let lines: Option<Vec<CartLine>> = cache
        .get(key)
        .map_err(|e| CommerceError::PersistenceRead(e.to_string()))?;
    Cart::from_lines(lines.unwrap_or_default())
        .map_err(|e| CommerceError::PersistenceRead(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_cache::{CacheError, KvBackend, MemoryBackend};
    use std::sync::Arc;

    fn id(n: u32) -> ProductId {
        ProductId::new(n)
    }

    /// Reads from an inner store; every write fails.
    struct ReadOnlyBackend(MemoryBackend);

    impl KvBackend for ReadOnlyBackend {
        fn name(&self) -> &'static str {
            "read-only"
        }

        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
            Err(CacheError::StoreError("store is read-only".to_string()))
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Err(CacheError::StoreError("store is read-only".to_string()))
        }

        fn keys(&self) -> Result<Vec<String>, CacheError> {
            self.0.keys()
        }
    }

    #[test]
    fn test_mutations_persist() {
        let dir = tempfile::tempdir().unwrap();

        let store = CartStore::open(Cache::open_dir(dir.path()).unwrap());
        store.add_item(id(1), 1, None).unwrap();
        let receipt = store.add_item(id(1), 2, None).unwrap();
        assert_eq!(receipt.total_quantity, 3);
        assert_eq!(receipt.line_count, 1);
        assert!(receipt.persist_warning.is_none());

        let reopened = CartStore::open(Cache::open_dir(dir.path()).unwrap());
        assert_eq!(reopened.snapshot().lines(), &[CartLine::new(id(1), 3, None)]);
    }

    #[test]
    fn test_invalid_quantity_is_not_persisted() {
        let cache = Cache::in_memory();
        let store = CartStore::open(cache);
        assert!(matches!(
            store.add_item(id(1), 0, None),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert_eq!(store.total_quantity(), 0);
    }

    #[test]
    fn test_corrupt_payload_starts_empty() {
        let cache = Cache::in_memory();
        cache.set_raw(CART_KEY, b"{not json").unwrap();

        let store = CartStore::open(cache);
        assert!(store.snapshot().is_empty());

        // The next mutation overwrites the corrupt payload.
        store.add_item(id(2), 1, Some("M")).unwrap();
        assert_eq!(store.total_quantity(), 1);
    }

    #[test]
    fn test_restored_payload_is_normalized() {
        let cache = Cache::in_memory();
        cache
            .set_raw(
                CART_KEY,
                br#"[{"id":1,"qty":1,"size":null},{"id":1,"qty":2},{"id":3,"qty":0,"size":"L"}]"#,
            )
            .unwrap();

        let store = CartStore::open(cache);
        assert_eq!(store.snapshot().lines(), &[CartLine::new(id(1), 3, None)]);
    }

    #[test]
    fn test_write_failure_is_a_warning() {
        let cache = Cache::with_backend(ReadOnlyBackend(MemoryBackend::new()));
        let store = CartStore::open(cache);

        let receipt = store.add_item(id(5), 1, None).unwrap();
        assert!(receipt.changed);
        assert!(receipt.persist_warning.is_some());
        assert_eq!(store.total_quantity(), 1);
    }

    #[test]
    fn test_no_op_mutations() {
        let store = CartStore::open(Cache::in_memory());
        let receipt = store.remove_item(id(1), None).unwrap();
        assert!(!receipt.changed);

        let receipt = store.set_quantity(id(1), None, 4).unwrap();
        assert!(!receipt.changed);
        assert!(store.snapshot().is_empty());

        assert!(!store.clear().unwrap().changed);
    }

    #[test]
    fn test_merge_persists_and_rejects_overflow() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::open(Cache::open_dir(dir.path()).unwrap());
        store.add_item(id(1), 1, None).unwrap();

        let mut guest = Cart::new();
        guest.add_item(id(1), 2, None).unwrap();
        guest.add_item(id(6), 1, Some("256GB")).unwrap();
        let receipt = store.merge(&guest).unwrap();
        assert!(receipt.changed);
        assert_eq!(receipt.total_quantity, 4);
        assert_eq!(receipt.line_count, 2);

        assert!(!store.merge(&Cart::new()).unwrap().changed);

        let mut huge = Cart::new();
        huge.add_item(id(9), i64::MAX, None).unwrap();
        assert!(matches!(store.merge(&huge), Err(CommerceError::Overflow)));

        let reopened = CartStore::open(Cache::open_dir(dir.path()).unwrap());
        assert_eq!(
            reopened.snapshot().lines(),
            &[
                CartLine::new(id(1), 3, None),
                CartLine::new(id(6), 1, Some("256GB")),
            ]
        );
    }

    #[test]
    fn test_custom_key() {
        let cache = Cache::in_memory();
        cache.set_raw("other_cart", br#"[{"id":4,"qty":2,"size":null}]"#).unwrap();

        let store = CartStore::with_key(cache, "other_cart");
        assert_eq!(store.key(), "other_cart");
        assert_eq!(store.total_quantity(), 2);
    }

    #[test]
    fn test_concurrent_adds_keep_one_line() {
        let store = Arc::new(CartStore::open(Cache::in_memory()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store.add_item(id(1), 1, None).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let cart = store.snapshot();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 200);
    }
}
