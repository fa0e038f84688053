//! Storefront session controller.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartPricing, CartReceipt, CartStore};
use crate::catalog::{Catalog, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::search::{run_query, QuerySpec, ResultPage, DEFAULT_PAGE_SIZE};

/// Number of related products shown on a details view.
pub const DEFAULT_RELATED_COUNT: usize = 4;

/// Number of featured products shown on the home view.
pub const DEFAULT_FEATURED_COUNT: usize = 6;

/// A cart mutation requested by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CartCommand {
    Add {
        product_id: ProductId,
        qty: i64,
        variant: Option<String>,
    },
    Remove {
        product_id: ProductId,
        variant: Option<String>,
    },
    SetQuantity {
        product_id: ProductId,
        variant: Option<String>,
        qty: i64,
    },
    /// Fold another cart's lines in with the add rule.
    Merge {
        cart: Cart,
    },
    Clear,
}

impl CartCommand {
    /// Add one unit without a variant.
    pub fn add_one(product_id: ProductId) -> Self {
        CartCommand::Add {
            product_id,
            qty: 1,
            variant: None,
        }
    }
}

/// A product with its related products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDetails {
    pub product: Product,
    pub related: Vec<Product>,
}

/// State for one storefront session.
///
/// Owns the catalog, the cart store and the current listing query. Create
/// one per session and drop it when the session ends.
#[derive(Debug)]
pub struct Storefront {
    catalog: Catalog,
    cart: CartStore,
    listing: QuerySpec,
    page_size: NonZeroUsize,
    featured_count: usize,
    related_count: usize,
}

impl Storefront {
    pub fn new(catalog: Catalog, cart: CartStore) -> Self {
        Self {
            catalog,
            cart,
            listing: QuerySpec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            featured_count: DEFAULT_FEATURED_COUNT,
            related_count: DEFAULT_RELATED_COUNT,
        }
    }

    /// Set the listing page size.
    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set how many products the home view features.
    pub fn with_featured_count(mut self, count: usize) -> Self {
        self.featured_count = count;
        self
    }

    /// Set how many related products a details view shows.
    pub fn with_related_count(mut self, count: usize) -> Self {
        self.related_count = count;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The current listing query.
    pub fn listing(&self) -> &QuerySpec {
        &self.listing
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Replace the listing query and run it.
    pub fn apply_filter(&mut self, spec: QuerySpec) -> ResultPage {
        if let Some(max) = spec.max_price {
            if max.currency != self.catalog.currency() {
                tracing::warn!(
                    ceiling = max.currency.code(),
                    catalog = self.catalog.currency().code(),
                    "price ceiling currency differs from catalog; ignoring it"
                );
            }
        }
        self.listing = spec;
        self.current_page()
    }

    /// Move the listing to another page. Out-of-range pages are clamped.
    pub fn set_page(&mut self, page: i64) -> ResultPage {
        self.listing.page = page;
        self.current_page()
    }

    /// Run the current listing query.
    pub fn current_page(&self) -> ResultPage {
        run_query(self.catalog.products(), &self.listing, self.page_size)
    }

    /// Apply a cart mutation.
    pub fn cart_command(&self, command: CartCommand) -> Result<CartReceipt, CommerceError> {
        tracing::debug!(?command, "cart command");
        match command {
            CartCommand::Add {
                product_id,
                qty,
                variant,
            } => self.cart.add_item(product_id, qty, variant.as_deref()),
            CartCommand::Remove {
                product_id,
                variant,
            } => self.cart.remove_item(product_id, variant.as_deref()),
            CartCommand::SetQuantity {
                product_id,
                variant,
                qty,
            } => self.cart.set_quantity(product_id, variant.as_deref(), qty),
            CartCommand::Merge { cart } => self.cart.merge(&cart),
            CartCommand::Clear => self.cart.clear(),
        }
    }

    /// Total quantity across cart lines.
    pub fn cart_badge(&self) -> i64 {
        self.cart.total_quantity()
    }

    pub fn cart_snapshot(&self) -> Cart {
        self.cart.snapshot()
    }

    pub fn cart_pricing(&self) -> Result<CartPricing, CommerceError> {
        self.cart.pricing(&self.catalog)
    }

    /// The home view's featured products.
    pub fn featured(&self) -> &[Product] {
        self.catalog.featured(self.featured_count)
    }

    /// Details for `id`, falling back to the first product when the id is
    /// unknown. `None` only for an empty catalog.
    pub fn product_details(&self, id: ProductId) -> Option<ProductDetails> {
        let product = self.catalog.get_or_first(id)?;
        if product.id != id {
            tracing::debug!(requested = %id, shown = %product.id, "unknown product, showing first");
        }
        let related = self
            .catalog
            .related(product, self.related_count)
            .into_iter()
            .cloned()
            .collect();

        Some(ProductDetails {
            product: product.clone(),
            related,
        })
    }
}
