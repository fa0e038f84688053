//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use shopfront_cache::Cache;
use shopfront_commerce::cart::CartStore;
use shopfront_commerce::catalog::Catalog;
use shopfront_commerce::Storefront;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config_file(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a configured path.
    ///
    /// Relative paths are taken from the config file's directory, or the
    /// working directory when no file was loaded.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.cwd);
        resolve(base, path)
    }

    /// Load the configured catalog, or the demo catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.config.catalog.path {
            Some(path) => {
                let path = self.resolve_path(path);
                self.output.debug(&format!("Loading catalog from {}", path.display()));
                Catalog::load(&path, self.config.currency()?)
                    .with_context(|| format!("Failed to load catalog: {}", path.display()))
            }
            None => Ok(Catalog::demo()),
        }
    }

    /// Open the persisted cart.
    pub fn cart_store(&self) -> Result<CartStore> {
        let dir = self.resolve_path(&self.config.cart.data_dir);
        self.output.debug(&format!("Cart data directory: {}", dir.display()));
        let cache = Cache::open_dir(&dir)
            .with_context(|| format!("Failed to open cart data directory: {}", dir.display()))?;
        Ok(CartStore::with_key(cache, self.config.cart.key.as_str()))
    }

    /// Build a storefront session from the configuration.
    pub fn storefront(&self) -> Result<Storefront> {
        self.config.validate()?;
        let shop = Storefront::new(self.catalog()?, self.cart_store()?)
            .with_page_size(self.config.page_size()?)
            .with_featured_count(self.config.catalog.featured_count)
            .with_related_count(self.config.catalog.related_count);
        Ok(shop)
    }
}

/// Find the nearest config file, walking up from `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
