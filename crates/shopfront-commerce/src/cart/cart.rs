//! Cart and cart line types.

use crate::cart::{CartPricing, LineItemPricing};
use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One line of the cart: a product, an optional variant and a quantity.
///
/// Serialized as `{"id": .., "qty": .., "size": ..}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Product on this line. Not checked against the catalog.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Quantity, at least 1.
    pub qty: i64,
    /// Variant such as a size; `None` for products without variants.
    #[serde(rename = "size", default)]
    pub variant: Option<String>,
}

impl CartLine {
    pub fn new(product_id: ProductId, qty: i64, variant: Option<&str>) -> Self {
        Self {
            product_id,
            qty,
            variant: variant.map(str::to_owned),
        }
    }

    /// Whether this line is keyed by `(product_id, variant)`.
    pub fn is_for(&self, product_id: ProductId, variant: Option<&str>) -> bool {
        self.product_id == product_id && self.variant.as_deref() == variant
    }
}

/// A shopping cart.
///
/// Lines keep insertion order, no two lines share a
/// `(product_id, variant)` pair, and the quantities sum to at most
/// `i64::MAX`. Deserializing goes through [`Cart::from_lines`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from raw lines, e.g. a persisted payload.
    ///
    /// Lines with a non-positive quantity are dropped and repeated
    /// `(product_id, variant)` pairs are folded together.
    pub fn from_lines(lines: Vec<CartLine>) -> Result<Self, CommerceError> {
        let mut cart = Cart::new();
        for line in lines.into_iter().filter(|line| line.qty > 0) {
            cart.add_item(line.product_id, line.qty, line.variant.as_deref())?;
        }
        Ok(cart)
    }

    /// Add `qty` of a product to the cart.
    ///
    /// An existing line for the same `(product_id, variant)` has its quantity
    /// increased; otherwise a new line is appended. Returns the line's new
    /// quantity.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - The line or cart total would exceed `i64::MAX`
    ///
    /// The cart is unchanged on error.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        qty: i64,
        variant: Option<&str>,
    ) -> Result<i64, CommerceError> {
        if qty <= 0 {
            return Err(CommerceError::InvalidQuantity(qty));
        }
        self.total_quantity()
            .checked_add(qty)
            .ok_or(CommerceError::Overflow)?;

        if let Some(existing) = self.lines.iter_mut().find(|l| l.is_for(product_id, variant)) {
            existing.qty = existing
                .qty
                .checked_add(qty)
                .ok_or(CommerceError::Overflow)?;
            return Ok(existing.qty);
        }

        self.lines.push(CartLine::new(product_id, qty, variant));
        Ok(qty)
    }

    /// Remove a line entirely. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId, variant: Option<&str>) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| !l.is_for(product_id, variant));
        self.lines.len() < len_before
    }

    /// Set a line's quantity.
    ///
    /// Zero removes the line. A missing line is not created; `Ok(false)` is
    /// returned instead. Fails with [`CommerceError::Overflow`] when the cart
    /// total would exceed `i64::MAX`.
    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        variant: Option<&str>,
        qty: i64,
    ) -> Result<bool, CommerceError> {
        if qty < 0 {
            return Err(CommerceError::InvalidQuantity(qty));
        }
        if qty == 0 {
            return Ok(self.remove_item(product_id, variant));
        }

        let total = self.total_quantity();
        match self.lines.iter_mut().find(|l| l.is_for(product_id, variant)) {
            Some(line) => {
                (total - line.qty)
                    .checked_add(qty)
                    .ok_or(CommerceError::Overflow)?;
                line.qty = qty;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Clear all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Fold another cart's lines into this one using the add rule.
    ///
    /// On overflow this cart is left unchanged.
    pub fn merge(&mut self, other: &Cart) -> Result<(), CommerceError> {
        let mut merged = self.clone();
        for line in &other.lines {
            merged.add_item(line.product_id, line.qty, line.variant.as_deref())?;
        }
        *self = merged;
        Ok(())
    }

    /// Sum of all line quantities, for the cart badge.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.qty).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the line for `(product_id, variant)`.
    pub fn get(&self, product_id: ProductId, variant: Option<&str>) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.is_for(product_id, variant))
    }

    /// Price the cart against a catalog.
    ///
    /// Lines whose product is not in the catalog are listed in
    /// [`CartPricing::unknown_products`] and left out of the subtotal.
    pub fn pricing(&self, catalog: &Catalog) -> Result<CartPricing, CommerceError> {
        let currency = catalog.currency();

        let mut lines = Vec::with_capacity(self.lines.len());
        let mut unknown_products = Vec::new();
        for line in &self.lines {
            let Some(product) = catalog.get(line.product_id) else {
                unknown_products.push(line.product_id);
                continue;
            };
            let total = product
                .price
                .try_multiply(line.qty)
                .ok_or(CommerceError::Overflow)?;
            lines.push(LineItemPricing {
                product_id: line.product_id,
                name: product.name.clone(),
                variant: line.variant.clone(),
                unit_price: product.price,
                quantity: line.qty,
                total,
            });
        }

        let subtotal = Money::try_sum(lines.iter().map(|l| &l.total), currency)
            .ok_or(CommerceError::Overflow)?;

        Ok(CartPricing {
            subtotal,
            lines,
            unknown_products,
        })
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CommerceError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        Cart::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id(n: u32) -> ProductId {
        ProductId::new(n)
    }

    #[test]
    fn test_add_item_accumulates() {
        let mut cart = Cart::new();
        cart.add_item(id(1), 1, None).unwrap();
        cart.add_item(id(1), 2, None).unwrap();

        assert_eq!(cart.lines(), &[CartLine::new(id(1), 3, None)]);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_variants_are_separate_lines() {
        let mut cart = Cart::new();
        cart.add_item(id(1), 1, Some("M")).unwrap();
        cart.add_item(id(1), 1, Some("L")).unwrap();
        cart.add_item(id(1), 1, None).unwrap();
        cart.add_item(id(1), 1, Some("M")).unwrap();

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.get(id(1), Some("M")).unwrap().qty, 2);
        assert_eq!(cart.total_quantity(), 4);
    }

    #[test]
    fn test_add_item_rejects_non_positive() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add_item(id(1), 0, None),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert!(matches!(
            cart.add_item(id(1), -2, None),
            Err(CommerceError::InvalidQuantity(-2))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_item_overflow_leaves_line() {
        let mut cart = Cart::new();
        cart.add_item(id(1), i64::MAX, None).unwrap();
        assert!(matches!(
            cart.add_item(id(1), 1, None),
            Err(CommerceError::Overflow)
        ));
        assert_eq!(cart.get(id(1), None).unwrap().qty, i64::MAX);
    }

    #[test]
    fn test_cart_total_cannot_exceed_i64() {
        let mut cart = Cart::new();
        cart.add_item(id(1), i64::MAX, None).unwrap();
        assert!(matches!(
            cart.add_item(id(2), 5, None),
            Err(CommerceError::Overflow)
        ));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), i64::MAX);

        let mut cart = Cart::new();
        cart.add_item(id(1), i64::MAX - 1, None).unwrap();
        cart.add_item(id(2), 1, None).unwrap();
        assert!(matches!(
            cart.set_quantity(id(2), None, 2),
            Err(CommerceError::Overflow)
        ));
        assert!(cart.set_quantity(id(1), None, 3).unwrap());
        assert_eq!(cart.total_quantity(), 4);

        let oversized = vec![
            CartLine::new(id(1), i64::MAX, None),
            CartLine::new(id(2), 5, None),
        ];
        assert!(matches!(Cart::from_lines(oversized), Err(CommerceError::Overflow)));
        let json = r#"[{"id":1,"qty":9223372036854775807},{"id":2,"qty":5}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(id(1), 1, None).unwrap();
        cart.add_item(id(2), 1, Some("42")).unwrap();

        assert!(!cart.remove_item(id(2), None));
        assert!(cart.remove_item(id(2), Some("42")));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add_item(id(1), 1, None).unwrap();

        assert!(cart.set_quantity(id(1), None, 5).unwrap());
        assert_eq!(cart.total_quantity(), 5);

        assert!(!cart.set_quantity(id(9), None, 5).unwrap());
        assert!(cart.get(id(9), None).is_none());

        assert!(matches!(
            cart.set_quantity(id(1), None, -1),
            Err(CommerceError::InvalidQuantity(-1))
        ));

        assert!(cart.set_quantity(id(1), None, 0).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merge() {
        let mut cart = Cart::new();
        cart.add_item(id(1), 1, None).unwrap();

        let mut other = Cart::new();
        other.add_item(id(1), 2, None).unwrap();
        other.add_item(id(3), 1, Some("S")).unwrap();

        cart.merge(&other).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(id(1), None).unwrap().qty, 3);

        let mut huge = Cart::new();
        huge.add_item(id(3), i64::MAX, Some("S")).unwrap();
        let before = cart.clone();
        assert!(cart.merge(&huge).is_err());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_from_lines_normalizes() {
        let lines = vec![
            CartLine::new(id(1), 1, None),
            CartLine::new(id(2), 0, None),
            CartLine::new(id(1), 4, None),
            CartLine::new(id(3), -1, Some("M")),
        ];
        let cart = Cart::from_lines(lines).unwrap();
        assert_eq!(cart.lines(), &[CartLine::new(id(1), 5, None)]);
    }

    #[test]
    fn test_wire_format() {
        let mut cart = Cart::new();
        cart.add_item(id(1), 3, None).unwrap();
        cart.add_item(id(4), 1, Some("XL")).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(
            json,
            r#"[{"id":1,"qty":3,"size":null},{"id":4,"qty":1,"size":"XL"}]"#
        );

        let parsed: Vec<CartLine> = serde_json::from_str(r#"[{"id":7,"qty":2}]"#).unwrap();
        assert_eq!(parsed, vec![CartLine::new(id(7), 2, None)]);
    }

    #[test]
    fn test_pricing() {
        let catalog = Catalog::demo();
        let mut cart = Cart::new();
        cart.add_item(id(9), 2, None).unwrap();
        cart.add_item(id(5), 1, None).unwrap();
        cart.add_item(id(404), 1, None).unwrap();

        let pricing = cart.pricing(&catalog).unwrap();
        assert_eq!(pricing.subtotal.display(), "$1195.00");
        assert_eq!(pricing.lines.len(), 2);
        assert_eq!(pricing.lines[0].total.amount_cents, 19600);
        assert_eq!(pricing.unknown_products, vec![id(404)]);
        assert_eq!(pricing.item_count(), 3);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u32, i64, Option<&'static str>),
        Remove(u32, Option<&'static str>),
        Set(u32, Option<&'static str>, i64),
        Clear,
    }

    fn arb_variant() -> impl Strategy<Value = Option<&'static str>> {
        prop::option::of(prop::sample::select(vec!["S", "M", "L"]))
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (1u32..5, -2i64..6, arb_variant()).prop_map(|(p, q, v)| Op::Add(p, q, v)),
            2 => (1u32..5, arb_variant()).prop_map(|(p, v)| Op::Remove(p, v)),
            2 => (1u32..5, arb_variant(), -1i64..6).prop_map(|(p, v, q)| Op::Set(p, v, q)),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn prop_cart_invariants(ops in prop::collection::vec(arb_op(), 0..60)) {
            let mut cart = Cart::new();
            for op in ops {
                match op {
                    Op::Add(p, q, v) => { let _ = cart.add_item(id(p), q, v); }
                    Op::Remove(p, v) => { cart.remove_item(id(p), v); }
                    Op::Set(p, v, q) => { let _ = cart.set_quantity(id(p), v, q); }
                    Op::Clear => cart.clear(),
                }

                let lines = cart.lines();
                for (i, a) in lines.iter().enumerate() {
                    prop_assert!(a.qty >= 1);
                    for b in &lines[i + 1..] {
                        prop_assert!(!b.is_for(a.product_id, a.variant.as_deref()));
                    }
                }
                let sum: i64 = lines.iter().map(|l| l.qty).sum();
                prop_assert_eq!(cart.total_quantity(), sum);
            }
        }
    }
}
