//! MTM file to product mapping

use serde::{Deserialize, Serialize};

/// One `Filename,Product` row of the mapping file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    #[serde(rename = "Filename", default)]
    pub filename: String,

    #[serde(rename = "Product", default)]
    pub product: String,
}

impl MappingEntry {
    pub fn new(filename: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            product: product.into(),
        }
    }
}

/// Ordered filename to product mapping (many files to one product)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductMap {
    entries: Vec<MappingEntry>,
}

impl ProductMap {
    pub const HEADERS: [&'static str; 2] = ["Filename", "Product"];

    pub fn new(entries: Vec<MappingEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Product mapped to a file name; the first matching entry wins
    pub fn product_for(&self, filename: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.filename.trim() == filename.trim())
            .map(|e| e.product.trim())
            .filter(|p| !p.is_empty())
    }

    /// Map a file to a product, replacing any existing entry for the file
    pub fn set(&mut self, filename: impl Into<String>, product: impl Into<String>) {
        let filename = filename.into();
        let product = product.into();
        match self
            .entries
            .iter_mut()
            .find(|e| e.filename.trim() == filename.trim())
        {
            Some(entry) => entry.product = product,
            None => self.entries.push(MappingEntry::new(filename, product)),
        }
    }

    /// Remove every entry for a file; returns whether anything was removed
    pub fn remove(&mut self, filename: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.filename.trim() != filename.trim());
        self.entries.len() != before
    }

    /// Distinct non-empty products in first-seen order
    pub fn products(&self) -> Vec<&str> {
        let mut products: Vec<&str> = Vec::new();
        for entry in &self.entries {
            let product = entry.product.trim();
            if !product.is_empty() && !products.contains(&product) {
                products.push(product);
            }
        }
        products
    }
}
