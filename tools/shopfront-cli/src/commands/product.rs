//! Product details command.

use anyhow::{bail, Context as _, Result};
use shopfront_commerce::ids::ProductId;

use super::ProductArgs;
use crate::context::Context;

/// Run the product command.
pub fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let id: ProductId = args
        .id
        .parse()
        .with_context(|| format!("Invalid product id: {}", args.id))?;

    let shop = ctx.storefront()?;
    let Some(details) = shop.product_details(id) else {
        bail!("The catalog is empty");
    };
    if details.product.id != id {
        ctx.output.warn(&format!(
            "Product {} not found, showing {}",
            id, details.product.id
        ));
    }

    if ctx.output.is_json() {
        ctx.output.json(&details);
        return Ok(());
    }

    let product = &details.product;
    ctx.output.header(&product.name);
    ctx.output.kv("id", &product.id.to_string());
    ctx.output.kv("price", &product.price.display());
    ctx.output.kv("brand", &product.brand);
    ctx.output.kv("category", product.category.label());
    ctx.output.kv("rating", &format!("★ {}", product.rating_display()));
    if let Some(image) = &product.image {
        ctx.output.kv("image", image);
    }
    ctx.output.info(&product.description());

    if !details.related.is_empty() {
        ctx.output.header("Related products");
        ctx.output.product_table(&details.related);
    }

    Ok(())
}
