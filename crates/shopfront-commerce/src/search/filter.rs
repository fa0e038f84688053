//! Search filter types.

use std::collections::BTreeSet;

use crate::catalog::{Category, Product};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Which category a listing is restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// No restriction.
    #[default]
    All,
    /// Only products in this category.
    Only(Category),
    /// A key that names no known category (e.g. a hand-edited URL); matches nothing.
    Unknown(String),
}

impl CategoryFilter {
    /// Parse a `cat` value. Empty and `"all"` mean no restriction.
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        if key.is_empty() || key == "all" {
            return CategoryFilter::All;
        }
        match Category::from_key(key) {
            Some(category) => CategoryFilter::Only(category),
            None => CategoryFilter::Unknown(key.to_string()),
        }
    }

    /// The key as it appears in a URL.
    pub fn key(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.key(),
            CategoryFilter::Unknown(key) => key,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

/// One stage of the listing filter pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Case-insensitive substring of name, brand or category label.
    Text(String),
    /// Category restriction.
    Category(CategoryFilter),
    /// Brand must be one of these (exact match).
    Brands(BTreeSet<String>),
    /// Price must not exceed this amount. A ceiling in another currency
    /// than the product's does not apply.
    MaxPrice(Money),
}

impl Filter {
    /// Create a text filter. The needle is lowercased once here.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into().to_lowercase())
    }

    /// Whether this filter lets the product through.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Text(needle) => {
                needle.is_empty()
                    || product.name.to_lowercase().contains(needle.as_str())
                    || product.brand.to_lowercase().contains(needle.as_str())
                    || product
                        .category
                        .label()
                        .to_lowercase()
                        .contains(needle.as_str())
            }
            Filter::Category(CategoryFilter::All) => true,
            Filter::Category(CategoryFilter::Only(category)) => product.category == *category,
            Filter::Category(CategoryFilter::Unknown(_)) => false,
            Filter::Brands(brands) => brands.is_empty() || brands.contains(&product.brand),
            Filter::MaxPrice(max) => {
                product.price.currency != max.currency
                    || product.price.amount_cents <= max.amount_cents
            }
        }
    }
}
