//! Product record and category path types

use serde::{Deserialize, Serialize};

/// Column names of the output table, in fixed order
pub const COLUMNS: [&str; 14] = [
    "level1",
    "level2",
    "level3",
    "sku",
    "product_name",
    "product_url",
    "image_url",
    "price_gross",
    "price_net",
    "price_numeric",
    "currency",
    "unit",
    "availability",
    "leaf_url",
];

/// How a leaf listing was reached: department, subcategory, sub-subcategory
///
/// Deeper levels are empty strings when the leaf sits higher in the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPath {
    pub level1: String,
    pub level2: String,
    pub level3: String,
}

impl CategoryPath {
    pub fn root(level1: &str) -> Self {
        Self {
            level1: level1.to_string(),
            ..Self::default()
        }
    }

    /// Extends the path by one level
    ///
    /// A path that already holds three levels is returned unchanged.
    pub fn child(&self, title: &str) -> Self {
        let mut next = self.clone();
        if next.level2.is_empty() {
            next.level2 = title.to_string();
        } else if next.level3.is_empty() {
            next.level3 = title.to_string();
        }
        next
    }
}

/// One product as listed on a leaf page
///
/// Every field is plain text; a value the page did not provide is the empty
/// string, so every record carries the full column set. Field order matches
/// [`COLUMNS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub level1: String,
    pub level2: String,
    pub level3: String,
    pub sku: String,
    pub product_name: String,
    pub product_url: String,
    pub image_url: String,
    pub price_gross: String,
    pub price_net: String,
    pub price_numeric: String,
    pub currency: String,
    pub unit: String,
    pub availability: String,
    pub leaf_url: String,
}

impl ProductRecord {
    /// Creates an empty record placed under `path` and produced by `leaf_url`
    pub fn new(path: &CategoryPath, leaf_url: &str) -> Self {
        Self {
            level1: path.level1.clone(),
            level2: path.level2.clone(),
            level3: path.level3.clone(),
            leaf_url: leaf_url.to_string(),
            ..Self::default()
        }
    }

    /// Field values in column order
    pub fn values(&self) -> [&str; 14] {
        [
            self.level1.as_str(),
            self.level2.as_str(),
            self.level3.as_str(),
            self.sku.as_str(),
            self.product_name.as_str(),
            self.product_url.as_str(),
            self.image_url.as_str(),
            self.price_gross.as_str(),
            self.price_net.as_str(),
            self.price_numeric.as_str(),
            self.currency.as_str(),
            self.unit.as_str(),
            self.availability.as_str(),
            self.leaf_url.as_str(),
        ]
    }
}
