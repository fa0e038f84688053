//! Cart commands.

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;
use shopfront_commerce::cart::{Cart, CartPricing, CartReceipt};
use shopfront_commerce::ids::ProductId;
use shopfront_commerce::{CartCommand as Command, Storefront};

use super::{CartArgs, CartCommand};
use crate::context::Context;

#[derive(Serialize)]
struct CartOutput<'a> {
    total_quantity: i64,
    #[serde(flatten)]
    pricing: &'a CartPricing,
}

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;

    let command = match args.command {
        CartCommand::Show => return show_cart(&shop, ctx),
        CartCommand::Add { id, qty, variant } => Command::Add {
            product_id: parse_id(&id)?,
            qty,
            variant,
        },
        CartCommand::Remove { id, variant } => Command::Remove {
            product_id: parse_id(&id)?,
            variant,
        },
        CartCommand::Set { id, qty, variant } => Command::SetQuantity {
            product_id: parse_id(&id)?,
            variant,
            qty,
        },
        CartCommand::Merge { file } => Command::Merge {
            cart: read_cart(&ctx.cwd.join(file))?,
        },
        CartCommand::Clear => Command::Clear,
    };

    if let Command::Add { product_id, .. } = &command {
        if shop.catalog().get(*product_id).is_none() {
            ctx.output
                .warn(&format!("Product {} is not in the catalog", product_id));
        }
    }

    let summary = describe(&command);
    let receipt = shop.cart_command(command)?;
    report(&summary, &receipt, ctx);

    Ok(())
}

fn parse_id(id: &str) -> Result<ProductId> {
    id.parse()
        .with_context(|| format!("Invalid product id: {}", id))
}

/// Read a saved cart payload; duplicate lines are folded together.
fn read_cart(path: &Path) -> Result<Cart> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read cart file: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid cart file: {}", path.display()))
}

fn describe(command: &Command) -> String {
    let line = |id: &ProductId, variant: &Option<String>| match variant {
        Some(variant) => format!("product {} ({})", id, variant),
        None => format!("product {}", id),
    };
    match command {
        Command::Add {
            product_id,
            qty,
            variant,
        } => format!("Added {} × {}", qty, line(product_id, variant)),
        Command::Remove {
            product_id,
            variant,
        } => format!("Removed {}", line(product_id, variant)),
        Command::SetQuantity {
            product_id,
            variant,
            qty,
        } => format!("Set {} to {}", line(product_id, variant), qty),
        Command::Merge { cart } => format!(
            "Merged {} line(s), {} item(s)",
            cart.len(),
            cart.total_quantity()
        ),
        Command::Clear => "Cleared the cart".to_string(),
    }
}

fn report(summary: &str, receipt: &CartReceipt, ctx: &Context) {
    if let Some(warning) = &receipt.persist_warning {
        ctx.output.warn(warning);
    }

    if ctx.output.is_json() {
        ctx.output.json(receipt);
        return;
    }

    if receipt.changed {
        ctx.output.success(summary);
    } else {
        ctx.output.info("Cart unchanged: no matching line");
    }
    ctx.output.kv("items in cart", &receipt.total_quantity.to_string());
}

fn show_cart(shop: &Storefront, ctx: &Context) -> Result<()> {
    let pricing = shop.cart_pricing()?;

    if ctx.output.is_json() {
        ctx.output.json(&CartOutput {
            total_quantity: shop.cart_badge(),
            pricing: &pricing,
        });
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({} items)", shop.cart_badge()));
    if pricing.lines.is_empty() && !pricing.has_unknown_products() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    let widths = [4, 28, 5, 10, 10];
    ctx.output
        .table_row(&["ID", "ITEM", "QTY", "PRICE", "TOTAL"], &widths);
    for line in &pricing.lines {
        let row = [
            line.product_id.to_string(),
            line.display_name(),
            line.quantity.to_string(),
            line.unit_price.display(),
            line.total.display(),
        ];
        let cols: Vec<&str> = row.iter().map(String::as_str).collect();
        ctx.output.table_row(&cols, &widths);
    }
    for id in &pricing.unknown_products {
        ctx.output
            .warn(&format!("Product {} is no longer in the catalog", id));
    }
    ctx.output.kv("subtotal", &pricing.subtotal.display());

    Ok(())
}
