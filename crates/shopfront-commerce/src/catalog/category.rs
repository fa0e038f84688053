//! Category keys and their display labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A known catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Fashion,
    Cameras,
    Audio,
    Watches,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Fashion,
        Category::Cameras,
        Category::Audio,
        Category::Watches,
    ];

    /// Stable key used in URLs and catalog data.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Fashion => "fashion",
            Category::Cameras => "cameras",
            Category::Audio => "audio",
            Category::Watches => "watches",
        }
    }

    /// Human-readable label; also searched by the text filter.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Fashion => "Fashion",
            Category::Cameras => "Cameras",
            Category::Audio => "Audio",
            Category::Watches => "Watches",
        }
    }

    /// Look up a category by key. Keys are matched exactly.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
