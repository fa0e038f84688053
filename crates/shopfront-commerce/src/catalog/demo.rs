//! Built-in demo catalog.

use crate::catalog::{Category, Product};
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Brands offered by the demo storefront's filter panel.
pub const DEMO_BRANDS: [&str; 6] = ["Apple", "Samsung", "Huawei", "Canon", "LogiSound", "Generic"];

/// The ten demo products, in catalog order.
pub fn demo_products() -> Vec<Product> {
    [
        (1, "Smart Watch Pro", 199, "Generic", Category::Watches, 4.5),
        (2, "Laptop Pro 15", 1199, "Generic", Category::Electronics, 4.7),
        (3, "Canon EOS 2000", 780, "Canon", Category::Cameras, 4.4),
        (4, "Headphones X100", 150, "LogiSound", Category::Audio, 4.2),
        (5, "iPhone 14", 999, "Apple", Category::Electronics, 4.8),
        (6, "Galaxy S23", 949, "Samsung", Category::Electronics, 4.6),
        (7, "Huawei Watch Fit", 169, "Huawei", Category::Watches, 4.1),
        (8, "Mirrorless Alpha Z", 1128, "Generic", Category::Cameras, 4.3),
        (9, "Studio Headset", 98, "LogiSound", Category::Audio, 4.0),
        (10, "MacBook Air 13", 1299, "Apple", Category::Electronics, 4.9),
    ]
    .into_iter()
    .map(|(id, name, dollars, brand, category, rating)| {
        Product::new(
            ProductId::new(id),
            name,
            Money::new(dollars * 100, Currency::USD),
            brand,
            category,
            rating,
        )
        .with_image(format!("assets/products/product{id}.jpg"))
    })
    .collect()
}
