//! MTM parsing: tokenizer, decode tables, sort-line parser and table builder

pub mod builder;
pub mod codes;
pub mod sort_line;
pub mod tokenizer;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

pub use builder::{FileTables, TableBuilder, BIN_SECTION_END, BIN_SECTION_START};
pub use sort_line::parse_sort_line;

use crate::entities::{SortPlanRow, SourceFile, TestPlanRow};

/// Data problems found while building tables
///
/// These never stop a run; they are reported next to rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseIssue {
    #[error("{file}: No test data found.")]
    NoTestData { file: String },

    #[error("{file}: Test NO {no}: unrecognized {column} code '{value}'.")]
    UnknownCode {
        file: String,
        no: String,
        column: &'static str,
        value: String,
    },
}

impl ParseIssue {
    /// Name of the file the issue was found in
    pub fn file(&self) -> &str {
        match self {
            ParseIssue::NoTestData { file } | ParseIssue::UnknownCode { file, .. } => file,
        }
    }
}

/// Errors that stop a whole batch
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no MTM files to process")]
    NoInput,
}

/// Tables and issues for every file of a run
#[derive(Debug, Clone, Default)]
pub struct ParsedBatch {
    /// Files that produced test data, in input order
    pub files: Vec<FileTables>,
    pub issues: Vec<ParseIssue>,
}

impl ParsedBatch {
    /// Test-plan rows of every file
    pub fn test_rows(&self) -> impl Iterator<Item = &TestPlanRow> {
        self.files.iter().flat_map(|f| f.test_rows.iter())
    }

    /// Sort-plan rows of every file
    pub fn sort_rows(&self) -> impl Iterator<Item = &SortPlanRow> {
        self.files.iter().flat_map(|f| f.sort_rows.iter())
    }

    /// Largest code count of any sort row
    pub fn max_codes(&self) -> usize {
        self.sort_rows().map(|r| r.codes.len()).max().unwrap_or(0)
    }

    /// Widest test-plan row, never narrower than the named schema
    pub fn test_plan_width(&self) -> usize {
        self.test_rows()
            .map(TestPlanRow::width)
            .fold(crate::entities::Column::COUNT, usize::max)
    }
}

/// Parse a batch of MTM files with the standard decode tables
pub fn parse(files: &[SourceFile]) -> Result<ParsedBatch, ParseError> {
    parse_with(&TableBuilder::default(), files)
}

/// Parse a batch with a specific builder
///
/// Files are processed in order; a file without test data is reported and
/// skipped, and processing continues with the next one.
pub fn parse_with(builder: &TableBuilder<'_>, files: &[SourceFile]) -> Result<ParsedBatch, ParseError> {
    if files.is_empty() {
        return Err(ParseError::NoInput);
    }

    let mut batch = ParsedBatch::default();
    for file in files {
        if let Some(tables) = builder.build(file, &mut batch.issues) {
            batch.files.push(tables);
        }
    }

    info!(
        files = files.len(),
        parsed = batch.files.len(),
        issues = batch.issues.len(),
        "parsed MTM batch"
    );
    Ok(batch)
}
