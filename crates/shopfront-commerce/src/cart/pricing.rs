//! Cart pricing calculations.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals for known products.
    pub subtotal: Money,
    /// Per-line pricing breakdown, in cart order.
    pub lines: Vec<LineItemPricing>,
    /// Cart lines whose product is not in the catalog.
    pub unknown_products: Vec<ProductId>,
}

impl CartPricing {
    /// Number of priced units.
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |total, line| total.saturating_add(line.quantity))
    }

    /// Check if any cart line could not be priced.
    pub fn has_unknown_products(&self) -> bool {
        !self.unknown_products.is_empty()
    }
}

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    pub variant: Option<String>,
    pub unit_price: Money,
    pub quantity: i64,
    /// unit_price * quantity
    pub total: Money,
}

impl LineItemPricing {
    /// Name with the variant appended, e.g. `Tote Bag (M)`.
    pub fn display_name(&self) -> String {
        match &self.variant {
            Some(variant) => format!("{} ({})", self.name, variant),
            None => self.name.clone(),
        }
    }
}
