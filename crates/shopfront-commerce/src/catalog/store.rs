//! Read-only catalog store.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{demo, Category, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// The immutable product list for a session, indexed by id.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
    currency: Currency,
}

impl Catalog {
    /// Build a catalog, rejecting invalid records, duplicate ids and mixed
    /// currencies. An empty catalog is priced in USD.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let currency = products
            .first()
            .map(|p| p.price.currency)
            .unwrap_or(Currency::USD);
        Self::with_currency(products, currency)
    }

    fn with_currency(products: Vec<Product>, currency: Currency) -> Result<Self, CommerceError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            product.validate()?;
            if product.price.currency != currency {
                return Err(CommerceError::validation(format!(
                    "product {} is priced in {}, catalog uses {}",
                    product.id,
                    product.price.currency.code(),
                    currency.code()
                )));
            }
            if index.insert(product.id, position).is_some() {
                return Err(CommerceError::validation(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
        }
        Ok(Self {
            products,
            index,
            currency,
        })
    }

    /// The built-in ten-item demo catalog.
    pub fn demo() -> Self {
        let products = demo::demo_products();
        let index = products
            .iter()
            .enumerate()
            .map(|(position, p)| (p.id, position))
            .collect();
        Self {
            products,
            index,
            currency: Currency::USD,
        }
    }

    /// Parse a JSON array of catalog records.
    ///
    /// Prices are decimal numbers in `currency` (e.g. `199` or `49.99`).
    pub fn from_json(json: &str, currency: Currency) -> Result<Self, CommerceError> {
        let records: Vec<CatalogRecord> = serde_json::from_str(json)?;
        let products = records
            .into_iter()
            .map(|r| r.into_product(currency))
            .collect::<Result<Vec<_>, _>>()?;
        Self::with_currency(products, currency)
    }

    /// Load a JSON catalog file.
    pub fn load(path: impl AsRef<Path>, currency: Currency) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json, currency)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Currency every price in this catalog is quoted in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id; `None` when the id is unknown.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).map(|&position| &self.products[position])
    }

    /// Look up a product by id, turning absence into [`CommerceError::UnknownProduct`].
    pub fn require(&self, id: ProductId) -> Result<&Product, CommerceError> {
        self.get(id).ok_or(CommerceError::UnknownProduct(id))
    }

    /// Look up a product, falling back to the first catalog entry when the id is unknown.
    ///
    /// Only an empty catalog yields `None`.
    pub fn get_or_first(&self, id: ProductId) -> Option<&Product> {
        self.get(id).or_else(|| self.products.first())
    }

    /// The first `count` products, shown as deals on the home view.
    pub fn featured(&self, count: usize) -> &[Product] {
        &self.products[..count.min(self.products.len())]
    }

    /// Up to `limit` other products from the same category, in catalog order.
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect()
    }

    /// Distinct brands in order of first appearance.
    pub fn brands(&self) -> Vec<&str> {
        let mut brands: Vec<&str> = Vec::new();
        for product in &self.products {
            if !brands.contains(&product.brand.as_str()) {
                brands.push(&product.brand);
            }
        }
        brands
    }

    /// Categories that have at least one product, in menu order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.products.iter().any(|p| p.category == *c))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::demo()
    }
}

/// On-disk catalog record: the product shape with a decimal price.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    id: ProductId,
    name: String,
    price: f64,
    brand: String,
    category: Category,
    rating: f64,
    #[serde(default)]
    image: Option<String>,
}

impl CatalogRecord {
    fn into_product(self, currency: Currency) -> Result<Product, CommerceError> {
        if !self.price.is_finite() {
            return Err(CommerceError::validation(format!(
                "product {} has a non-numeric price",
                self.id
            )));
        }
        let mut product = Product::new(
            self.id,
            self.name,
            Money::from_decimal(self.price, currency),
            self.brand,
            self.category,
            self.rating,
        );
        product.image = self.image;
        Ok(product)
    }
}
