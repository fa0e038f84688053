//! Featured products command.

use anyhow::Result;

use super::FeaturedArgs;
use crate::context::Context;

/// Run the featured command.
pub fn run(args: FeaturedArgs, ctx: &Context) -> Result<()> {
    let mut shop = ctx.storefront()?;
    if let Some(count) = args.count {
        shop = shop.with_featured_count(count);
    }
    let featured = shop.featured();

    if ctx.output.is_json() {
        ctx.output.json(&featured);
        return Ok(());
    }

    ctx.output.header("Featured deals");
    if featured.is_empty() {
        ctx.output.info("No products in the catalog");
        return Ok(());
    }
    ctx.output.product_table(featured);
    ctx.output.info(&format!(
        "Brands: {}",
        shop.catalog().brands().join(", ")
    ));

    Ok(())
}
