//! Output formatting for the CLI.

use console::style;
use shopfront_commerce::catalog::Product;
use shopfront_commerce::search::Pager;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Print products as a table.
    pub fn product_table(&self, products: &[Product]) {
        if self.json || products.is_empty() {
            return;
        }
        self.table_row(&["ID", "NAME", "BRAND", "CATEGORY", "PRICE", "RATING"], &PRODUCT_WIDTHS);
        for product in products {
            let row = product_row(product);
            let cols: Vec<&str> = row.iter().map(String::as_str).collect();
            self.table_row(&cols, &PRODUCT_WIDTHS);
        }
    }

    /// Print a pager line, e.g. `‹ Prev  [1]  2  Next ›`.
    pub fn pager(&self, pager: &Pager) {
        if self.json {
            return;
        }
        println!("  {}", format_pager(pager));
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

const PRODUCT_WIDTHS: [usize; 6] = [4, 20, 10, 12, 10, 6];

/// Table cells for one product.
pub fn product_row(product: &Product) -> [String; 6] {
    [
        product.id.to_string(),
        product.name.clone(),
        product.brand.clone(),
        product.category.label().to_string(),
        product.price.display(),
        format!("★ {}", product.rating_display()),
    ]
}

/// Render a pager as plain text; the current page is bracketed.
pub fn format_pager(pager: &Pager) -> String {
    let mut parts = Vec::with_capacity(pager.pages.len() + 2);
    if !pager.prev.disabled {
        parts.push(format!("‹ Prev({})", pager.prev.target));
    }
    for button in &pager.pages {
        if button.disabled {
            parts.push(format!("[{}]", button.target));
        } else {
            parts.push(button.target.to_string());
        }
    }
    if !pager.next.disabled {
        parts.push(format!("Next({}) ›", pager.next.target));
    }
    parts.join("  ")
}
