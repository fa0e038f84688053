//! Product records.

use crate::catalog::Category;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// A product in the catalog. Immutable once the catalog is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier (> 0).
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Brand name, matched exactly by the brand filter.
    pub brand: String,
    /// Category this product belongs to.
    pub category: Category,
    /// Average rating in `[0, 5]`.
    pub rating: f64,
    /// Image path, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    /// Create a new product without an image.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        brand: impl Into<String>,
        category: Category,
        rating: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            brand: brand.into(),
            category,
            rating,
            image: None,
        }
    }

    /// Set the image path.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Check the record against the catalog's data invariants.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if !self.id.is_valid() {
            return Err(CommerceError::validation(format!(
                "product '{}' has id 0",
                self.name
            )));
        }
        if self.price.is_negative() {
            return Err(CommerceError::validation(format!(
                "product {} has negative price {}",
                self.id, self.price.amount_cents
            )));
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(CommerceError::validation(format!(
                "product {} has rating {} outside [0, {}]",
                self.id, self.rating, MAX_RATING
            )));
        }
        Ok(())
    }

    /// Rating with one decimal, as shown on product cards.
    pub fn rating_display(&self) -> String {
        format!("{:.1}", self.rating)
    }

    /// One-line description used on the details view.
    pub fn description(&self) -> String {
        format!(
            "{} with premium features. Brand: {}. Category: {}.",
            self.name,
            self.brand,
            self.category.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn product(id: u32, rating: f64, cents: i64) -> Product {
        Product::new(
            ProductId::new(id),
            "Test Product",
            Money::new(cents, Currency::USD),
            "Generic",
            Category::Audio,
            rating,
        )
    }

    #[test]
    fn test_product_creation() {
        let p = product(1, 4.5, 1999).with_image("assets/products/product1.jpg");
        assert_eq!(p.id, ProductId::new(1));
        assert_eq!(p.image.as_deref(), Some("assets/products/product1.jpg"));
        assert_eq!(p.rating_display(), "4.5");
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_records() {
        assert!(matches!(
            product(0, 4.0, 100).validate(),
            Err(CommerceError::Validation(_))
        ));
        assert!(product(1, 5.1, 100).validate().is_err());
        assert!(product(1, -0.5, 100).validate().is_err());
        assert!(product(1, f64::NAN, 100).validate().is_err());
        assert!(product(1, 3.0, -1).validate().is_err());
        assert!(product(1, 0.0, 0).validate().is_ok());
        assert!(product(1, 5.0, 0).validate().is_ok());
    }

    #[test]
    fn test_description() {
        let p = product(3, 4.0, 100);
        assert_eq!(
            p.description(),
            "Test Product with premium features. Brand: Generic. Category: Audio."
        );
    }
}
