//! Listing query specification.

use std::collections::BTreeSet;

use crate::money::{Currency, Money};
use crate::search::{CategoryFilter, Filter};
use serde::{Deserialize, Serialize};

/// Sort options for listing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Catalog order, unchanged. Not a ranking.
    #[default]
    Relevance,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
}

impl SortOption {
    /// Every sort option, in menu order.
    pub const ALL: [SortOption; 4] = [
        SortOption::Relevance,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::NameAsc,
    ];

    /// Parse a sort name. Unknown names fall back to [`SortOption::Relevance`].
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "price_asc" => SortOption::PriceAsc,
            "price_desc" => SortOption::PriceDesc,
            "name_asc" => SortOption::NameAsc,
            _ => SortOption::Relevance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Relevance => "relevance",
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
            SortOption::NameAsc => "name_asc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Relevance => "Relevance",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
        }
    }
}

/// A listing query: filters, sort order and requested page.
///
/// `page` is whatever the caller asked for; the engine clamps it into
/// `[1, total_pages]` before slicing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Free-text query; empty matches everything.
    pub text: String,
    /// Category restriction.
    pub category: CategoryFilter,
    /// Allowed brands; empty means no restriction.
    pub brands: BTreeSet<String>,
    /// Price ceiling, inclusive.
    pub max_price: Option<Money>,
    /// Sort order.
    pub sort: SortOption,
    /// Requested page (1-indexed).
    pub page: i64,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self::new()
    }
}

impl QuerySpec {
    /// A query matching the whole catalog, first page, catalog order.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            category: CategoryFilter::All,
            brands: BTreeSet::new(),
            max_price: None,
            sort: SortOption::Relevance,
            page: 1,
        }
    }

    /// Set the text query.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Restrict to a single category.
    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    /// Allow one more brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brands.insert(brand.into());
        self
    }

    /// Set the price ceiling.
    pub fn with_max_price(mut self, max: Money) -> Self {
        self.max_price = Some(max);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set the requested page.
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// The filter pipeline, in the order stages are applied.
    ///
    /// Inactive stages are omitted.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::with_capacity(4);
        if !self.text.is_empty() {
            filters.push(Filter::text(self.text.as_str()));
        }
        if !self.category.is_all() {
            filters.push(Filter::Category(self.category.clone()));
        }
        if !self.brands.is_empty() {
            filters.push(Filter::Brands(self.brands.clone()));
        }
        if let Some(max) = self.max_price {
            filters.push(Filter::MaxPrice(max));
        }
        filters
    }

    /// Parse URL query parameters.
    ///
    /// Recognised keys: `q`, `cat`, `brand` (repeatable), `max_price`, `sort`,
    /// `page`. Malformed numbers leave the corresponding setting inactive.
    pub fn from_query_string(qs: &str, currency: Currency) -> Self {
        let mut query = QuerySpec::new();

        for pair in qs.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or("");
            let value = urlencoding_decode(parts.next().unwrap_or(""));

            match key {
                "q" => query.text = value.trim().to_string(),
                "cat" => query.category = CategoryFilter::from_key(&value),
                "brand" => {
                    let brand = value.trim();
                    if !brand.is_empty() {
                        query.brands.insert(brand.to_string());
                    }
                }
                "max_price" => query.max_price = Money::parse_decimal(&value, currency),
                "sort" => query.sort = SortOption::parse(&value),
                "page" => query.page = value.trim().parse().unwrap_or(1),
                _ => {}
            }
        }

        query
    }

    /// Encode as URL query parameters; defaults are omitted.
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<(&str, String)> = Vec::new();
        if !self.text.is_empty() {
            params.push(("q", self.text.clone()));
        }
        if !self.category.is_all() {
            params.push(("cat", self.category.key().to_string()));
        }
        for brand in &self.brands {
            params.push(("brand", brand.clone()));
        }
        if let Some(max) = self.max_price {
            params.push(("max_price", format!("{}", max.to_decimal())));
        }
        if self.sort != SortOption::Relevance {
            params.push(("sort", self.sort.as_str().to_string()));
        }
        if self.page != 1 {
            params.push(("page", self.page.to_string()));
        }

        params
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding_encode(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn urlencoding_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let decoded = s
                    .get(i + 1..i + 3)
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match decoded {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn urlencoding_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
