//! Flat tables for display and export

use clap::ValueEnum;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::entities::{Column, SortPlanRow, SpecRow};
use crate::parser::tokenizer::encode_latin1;
use crate::parser::ParsedBatch;

/// File name of the exported test-plan table
pub const TEST_PLAN_FILE: &str = "test_plan.csv";

/// File name of the exported sort-plan table
pub const SORT_PLAN_FILE: &str = "sort_plan.csv";

/// Character encoding of exported CSV files
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// UTF-8
    #[default]
    Utf8,
    /// ISO-8859-1; characters outside it are written as '?'
    Latin1,
}

impl Encoding {
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Latin1 => encode_latin1(text),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "utf8"),
            Encoding::Latin1 => write!(f, "latin1"),
        }
    }
}

/// A header row plus equally wide string rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Test-plan table of a batch, at least as wide as the named columns
    pub fn test_plan(batch: &ParsedBatch) -> Self {
        let width = batch.test_plan_width();
        let mut table = Table::new(Column::headers(width));
        table.rows = batch.test_rows().map(|r| r.to_record(width)).collect();
        table
    }

    /// Sort-plan table with as many code columns as the longest entry
    pub fn sort_plan(batch: &ParsedBatch) -> Self {
        let max_codes = batch.max_codes();
        let mut table = Table::new(SortPlanRow::headers(max_codes));
        table.rows = batch.sort_rows().map(|r| r.to_record(max_codes)).collect();
        table
    }

    pub fn spec(rows: &[SpecRow]) -> Self {
        let mut table = Table::new(SpecRow::HEADERS.iter().map(|h| h.to_string()).collect());
        table.rows = rows.iter().map(SpecRow::to_record).collect();
        table
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Rows as JSON objects keyed by header
    pub fn to_json_rows(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .zip(row.iter())
                    .map(|(h, v)| (h.clone(), serde_json::Value::String(v.clone())))
                    .collect()
            })
            .collect()
    }

    /// Render as CSV text
    pub fn to_csv_string(&self) -> Result<String, csv::Error> {
        let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Render as CSV bytes in the given encoding
    pub fn to_csv(&self, encoding: Encoding) -> Result<Vec<u8>, csv::Error> {
        Ok(encoding.encode(&self.to_csv_string()?))
    }

    pub fn write_csv(&self, path: &Path, encoding: Encoding) -> Result<(), ExportError> {
        let bytes = self.to_csv(encoding).map_err(|e| ExportError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        fs::write(path, bytes).map_err(|e| ExportError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Write `test_plan.csv` and `sort_plan.csv` for a batch into `dir`
pub fn export_batch(
    batch: &ParsedBatch,
    dir: &Path,
    encoding: Encoding,
) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir).map_err(|e| ExportError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let test_path = dir.join(TEST_PLAN_FILE);
    Table::test_plan(batch).write_csv(&test_path, encoding)?;

    let sort_path = dir.join(SORT_PLAN_FILE);
    Table::sort_plan(batch).write_csv(&sort_path, encoding)?;

    Ok(vec![test_path, sort_path])
}
