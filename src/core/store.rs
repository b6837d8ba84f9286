//! Paper-spec store: a product mapping file plus one CSV table per product
//!
//! ```text
//! <root>/
//!   mtm_product_map.csv   Filename,Product
//!   <product>.csv         NO,ITEM,Min,...,Compare_Bias3
//! ```
//!
//! Missing files read as empty. Writes replace the whole file and the last
//! writer wins.

use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::entities::{MappingEntry, PaperSpecs, ProductMap, SpecRow};

/// Default store directory, relative to the working directory
pub const DEFAULT_STORE_DIR: &str = "paper_specs";

/// File name of the filename → product mapping
pub const MAPPING_FILE: &str = "mtm_product_map.csv";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid product name '{0}'")]
    InvalidProduct(String),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn csv(path: &Path, source: csv::Error) -> Self {
        StoreError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Directory-backed paper-spec store
#[derive(Debug, Clone)]
pub struct SpecStore {
    root: PathBuf,
}

impl SpecStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mapping_path(&self) -> PathBuf {
        self.root.join(MAPPING_FILE)
    }

    /// File holding a product's spec; a name already ending in `.csv` is
    /// used as the file name verbatim
    pub fn spec_path(&self, product: &str) -> Result<PathBuf, StoreError> {
        let product = product.trim();
        if product.is_empty()
            || product.contains(['/', '\\'])
            || product == "."
            || product == ".."
        {
            return Err(StoreError::InvalidProduct(product.to_string()));
        }

        let file_name = if product.to_lowercase().ends_with(".csv") {
            product.to_string()
        } else {
            format!("{}.csv", product)
        };
        if file_name.eq_ignore_ascii_case(MAPPING_FILE) {
            return Err(StoreError::InvalidProduct(product.to_string()));
        }
        Ok(self.root.join(file_name))
    }

    /// Create the store directory and a header-only mapping file if absent
    pub fn init(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|e| StoreError::io(&self.root, e))?;
        if !self.mapping_path().exists() {
            self.save_mapping(&ProductMap::default())?;
        }
        Ok(())
    }

    pub fn load_mapping(&self) -> Result<ProductMap, StoreError> {
        let path = self.mapping_path();
        if !path.exists() {
            debug!(path = %path.display(), "no mapping file");
            return Ok(ProductMap::default());
        }

        let file = fs::File::open(&path).map_err(|e| StoreError::io(&path, e))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(file);

        let mut entries = Vec::new();
        for result in reader.deserialize::<MappingEntry>() {
            let entry = result.map_err(|e| StoreError::csv(&path, e))?;
            entries.push(entry);
        }
        Ok(ProductMap::new(entries))
    }

    pub fn save_mapping(&self, mapping: &ProductMap) -> Result<(), StoreError> {
        let path = self.mapping_path();
        let records = mapping
            .entries()
            .iter()
            .map(|e| vec![e.filename.clone(), e.product.clone()]);
        self.write_table(&path, &ProductMap::HEADERS, records)
    }

    /// Load a product's spec table; an absent file is an empty table
    pub fn load_spec(&self, product: &str) -> Result<Vec<SpecRow>, StoreError> {
        let path = self.spec_path(product)?;
        if !path.exists() {
            debug!(product, path = %path.display(), "no spec file");
            return Ok(Vec::new());
        }
        let file = fs::File::open(&path).map_err(|e| StoreError::io(&path, e))?;
        read_spec_rows(file).map_err(|e| StoreError::csv(&path, e))
    }

    pub fn save_spec(&self, product: &str, rows: &[SpecRow]) -> Result<PathBuf, StoreError> {
        let path = self.spec_path(product)?;
        self.write_table(&path, &SpecRow::HEADERS, rows.iter().map(SpecRow::to_record))?;
        Ok(path)
    }

    /// Product names of every spec table in the store, sorted
    pub fn list_products(&self) -> Result<Vec<String>, StoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut products = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(|e| StoreError::io(&self.root, e))? {
            let entry = entry.map_err(|e| StoreError::io(&self.root, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.eq_ignore_ascii_case(MAPPING_FILE) {
                continue;
            }
            if path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
            {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    products.push(stem.to_string());
                }
            }
        }
        products.sort();
        Ok(products)
    }

    /// Mapping plus the spec table of every mapped product
    pub fn snapshot(&self) -> Result<PaperSpecs, StoreError> {
        let mapping = self.load_mapping()?;
        let products: Vec<String> = mapping.products().into_iter().map(String::from).collect();
        Ok(self.load_products(mapping, products))
    }

    /// Mapping plus the spec tables of the products mapped to `files`
    ///
    /// Only an unreadable mapping file is an error. A product table that
    /// fails to load is recorded in the result so the files mapped to it
    /// can be reported one by one.
    pub fn snapshot_for<'a, I>(&self, files: I) -> Result<PaperSpecs, StoreError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mapping = self.load_mapping()?;
        let mut products: Vec<String> = Vec::new();
        for file in files {
            if let Some(product) = mapping.product_for(file) {
                if !products.iter().any(|p| p == product) {
                    products.push(product.to_string());
                }
            }
        }
        Ok(self.load_products(mapping, products))
    }

    fn load_products(&self, mapping: ProductMap, products: Vec<String>) -> PaperSpecs {
        let mut specs = PaperSpecs::new(mapping);
        for product in products {
            match self.load_spec(&product) {
                Ok(rows) => {
                    debug!(product = %product, rows = rows.len(), "loaded paper spec");
                    specs.insert_table(product, rows);
                }
                Err(e) => {
                    warn!(product = %product, error = %e, "paper spec not loaded");
                    specs.insert_failure(product, e.to_string());
                }
            }
        }
        specs
    }

    fn write_table<I>(&self, path: &Path, headers: &[&str], records: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        fs::create_dir_all(&self.root).map_err(|e| StoreError::io(&self.root, e))?;

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|e| StoreError::csv(path, e))?;
        writer
            .write_record(headers)
            .map_err(|e| StoreError::csv(path, e))?;
        for record in records {
            writer
                .write_record(&record)
                .map_err(|e| StoreError::csv(path, e))?;
        }
        writer.flush().map_err(|e| StoreError::io(path, e))?;
        Ok(())
    }
}

impl Default for SpecStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_DIR)
    }
}

/// Read spec rows from any CSV source with a header line
///
/// Columns are matched by header name; missing columns read as blank.
pub fn read_spec_rows<R: Read>(reader: R) -> Result<Vec<SpecRow>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    reader.deserialize::<SpecRow>().collect()
}
