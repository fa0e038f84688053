//! Catalog search command.

use anyhow::Result;
use serde::Serialize;
use shopfront_commerce::catalog::Catalog;
use shopfront_commerce::money::Money;
use shopfront_commerce::search::{CategoryFilter, QuerySpec, ResultPage, SortOption};

use super::SearchArgs;
use crate::context::Context;

#[derive(Serialize)]
struct SearchOutput<'a> {
    query_string: String,
    summary: String,
    #[serde(flatten)]
    page: &'a ResultPage,
}

/// Run the search command.
pub fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let mut shop = ctx.storefront()?;
    let spec = build_query(args, shop.catalog(), ctx);
    ctx.output.debug(&format!("Query: ?{}", spec.to_query_string()));

    let page = shop.apply_filter(spec);

    if ctx.output.is_json() {
        ctx.output.json(&SearchOutput {
            query_string: shop.listing().to_query_string(),
            summary: page.summary(),
            page: &page,
        });
        return Ok(());
    }

    ctx.output.header(&page.summary());
    ctx.output.product_table(&page.items);
    if let Some(pager) = page.pager() {
        ctx.output.pager(&pager);
    }

    Ok(())
}

/// Merge a URL query string and explicit flags into one query.
///
/// Prices are read in the catalog's own currency.
fn build_query(args: SearchArgs, catalog: &Catalog, ctx: &Context) -> QuerySpec {
    let currency = catalog.currency();
    let mut spec = match &args.url {
        Some(qs) => QuerySpec::from_query_string(qs, currency),
        None => QuerySpec::new(),
    };

    if let Some(text) = args.query {
        spec.text = text.trim().to_string();
    }
    if let Some(category) = args.category {
        spec.category = CategoryFilter::from_key(&category);
        if let CategoryFilter::Unknown(key) = &spec.category {
            let known: Vec<&str> = catalog.categories().iter().map(|c| c.key()).collect();
            ctx.output.warn(&format!(
                "Unknown category '{}', nothing will match (available: {})",
                key,
                known.join(", ")
            ));
        }
    }
    spec.brands.extend(
        args.brands
            .into_iter()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty()),
    );
    if let Some(max_price) = args.max_price {
        spec.max_price = Money::parse_decimal(&max_price, currency);
        if spec.max_price.is_none() {
            ctx.output
                .warn(&format!("Ignoring max price '{}': not a number", max_price));
        }
    }
    if let Some(sort) = args.sort {
        spec.sort = SortOption::parse(&sort);
        if spec.sort.as_str() != sort.trim() {
            ctx.output
                .warn(&format!("Unknown sort '{}', using {}", sort, spec.sort.display_name()));
        }
    }
    if args.url.is_none() || args.page != 1 {
        spec.page = args.page;
    }

    spec
}
