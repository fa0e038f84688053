//! CLI configuration.

use std::num::NonZeroUsize;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use shopfront_commerce::cart::CART_KEY;
use shopfront_commerce::money::Currency;
use shopfront_commerce::search::DEFAULT_PAGE_SIZE;
use shopfront_commerce::session::{DEFAULT_FEATURED_COUNT, DEFAULT_RELATED_COUNT};
use shopfront_observability::{LogConfig, LogFormat, LogLevel};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shopfront.toml", ".shopfront.toml", "shopfront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog source and listing sizes.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Cart persistence.
    #[serde(default)]
    pub cart: CartConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Check values that parse but cannot be used.
    pub fn validate(&self) -> Result<()> {
        self.page_size()?;
        self.currency()?;
        if self.cart.key.trim().is_empty() {
            bail!("cart.key must not be empty");
        }
        if self.cart.data_dir.trim().is_empty() {
            bail!("cart.data_dir must not be empty");
        }
        Ok(())
    }

    pub fn page_size(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.catalog.page_size)
            .context("catalog.page_size must be greater than zero")
    }

    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.catalog.currency)
            .with_context(|| format!("Unknown catalog.currency: {}", self.catalog.currency))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Catalog configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file; the built-in demo catalog when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Currency of the prices in `path` (default: USD). The demo catalog is
    /// always priced in USD.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Products per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Products shown by `featured`.
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,

    /// Related products shown with a product.
    #[serde(default = "default_related_count")]
    pub related_count: usize,
}

fn default_currency() -> String {
    Currency::USD.code().to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE.get()
}

fn default_featured_count() -> usize {
    DEFAULT_FEATURED_COUNT
}

fn default_related_count() -> usize {
    DEFAULT_RELATED_COUNT
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            currency: default_currency(),
            page_size: default_page_size(),
            featured_count: default_featured_count(),
            related_count: default_related_count(),
        }
    }
}

/// Cart persistence configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Directory holding the persisted cart.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Key the cart is stored under.
    #[serde(default = "default_cart_key")]
    pub key: String,
}

fn default_data_dir() -> String {
    ".shopfront".to_string()
}

fn default_cart_key() -> String {
    CART_KEY.to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            key: default_cart_key(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

fn default_log_format() -> LogFormat {
    LogFormat::Human
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Subscriber settings; `verbose` lowers the level to debug.
    pub fn to_log_config(&self, verbose: bool) -> LogConfig {
        let level = if verbose {
            self.level.min(LogLevel::Debug)
        } else {
            self.level
        };
        LogConfig::new(level, self.format)
    }
}

/// Generate a default shopfront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Shopfront configuration

[catalog]
# path = "catalog.json"
# Currency of the prices in `path`; the demo catalog is always USD.
currency = "USD"
page_size = {page_size}
featured_count = {featured}
related_count = {related}

[cart]
data_dir = ".shopfront"
key = "{key}"

[logging]
level = "info"
format = "human"
"#,
        page_size = DEFAULT_PAGE_SIZE,
        featured = DEFAULT_FEATURED_COUNT,
        related = DEFAULT_RELATED_COUNT,
        key = CART_KEY,
    )
}
