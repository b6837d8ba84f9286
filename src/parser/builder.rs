//! Table builder: splits each file into test-plan rows and sort-plan lines

use tracing::{debug, warn};

use super::codes::{CodeTable, TEST_PLAN_CODES};
use super::sort_line::parse_sort_line;
use super::tokenizer::{decode_latin1, tokenize_record, DELIMITER};
use super::ParseIssue;
use crate::entities::{BinLine, SortPlanRow, SourceFile, TestPlanRow};

/// Marker line that opens the bin section
pub const BIN_SECTION_START: &str = "= TEST BIN DATA =";
/// Marker line that closes the bin section
pub const BIN_SECTION_END: &str = "= END DC BIN DATA =";

/// Where the builder is within a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Before the bin section; lines are test-plan rows
    Test,
    /// Inside the bin section; lines are sort-plan entries
    Bin,
    /// After the bin section closed; lines are test-plan rows again
    Outside,
}

impl Section {
    fn next(self, line: &str) -> Self {
        match (self, line) {
            (_, BIN_SECTION_START) => Section::Bin,
            (Section::Bin, BIN_SECTION_END) => Section::Outside,
            (state, _) => state,
        }
    }
}

/// The two tables recovered from one MTM file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTables {
    pub filename: String,
    pub test_rows: Vec<TestPlanRow>,
    /// Bin-section lines in file order, before sort-line parsing
    pub bin_lines: Vec<BinLine>,
    /// Bin-section lines that parsed as sort entries
    pub sort_rows: Vec<SortPlanRow>,
}

/// Builds [`FileTables`] from raw files
pub struct TableBuilder<'a> {
    codes: &'a [&'a CodeTable],
    delimiter: char,
}

impl Default for TableBuilder<'static> {
    fn default() -> Self {
        Self::new(&TEST_PLAN_CODES)
    }
}

impl<'a> TableBuilder<'a> {
    pub fn new(codes: &'a [&'a CodeTable]) -> Self {
        Self {
            codes,
            delimiter: DELIMITER,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Build the tables for one file
    ///
    /// Issues found along the way are appended to `issues`. A file with no
    /// test rows is reported and yields `None`.
    pub fn build(&self, file: &SourceFile, issues: &mut Vec<ParseIssue>) -> Option<FileTables> {
        let text = decode_latin1(&file.bytes);
        let mut tables = FileTables {
            filename: file.name.clone(),
            ..Default::default()
        };
        let mut section = Section::Test;

        for raw_line in text.lines() {
            let line = raw_line.trim();
            let next = section.next(line);
            if next != section {
                debug!(file = %file.name, from = ?section, to = ?next, "section change");
                section = next;
                continue;
            }
            if line.is_empty() || line.starts_with('=') {
                continue;
            }

            if section == Section::Bin {
                tables.bin_lines.push(BinLine::new(&file.name, line));
            } else if let Some(record) = tokenize_record(&file.name, line, self.delimiter) {
                tables
                    .test_rows
                    .push(TestPlanRow::new(&file.name, record.into_fields()));
            }
        }

        if tables.test_rows.is_empty() {
            warn!(file = %file.name, "no test data found");
            issues.push(ParseIssue::NoTestData {
                file: file.name.clone(),
            });
            return None;
        }

        self.decode_columns(&mut tables.test_rows, issues);

        tables.sort_rows = tables
            .bin_lines
            .iter()
            .filter_map(|bin| {
                let parsed = parse_sort_line(&bin.line, self.delimiter);
                if parsed.is_none() {
                    debug!(file = %bin.filename, line = %bin.line, "sort line rejected");
                }
                parsed.map(|p| p.into_row(&bin.filename, &bin.line))
            })
            .collect();

        debug!(
            file = %file.name,
            test_rows = tables.test_rows.len(),
            bin_lines = tables.bin_lines.len(),
            sort_rows = tables.sort_rows.len(),
            "built tables"
        );
        Some(tables)
    }

    /// Replace raw codes with labels once all rows of a file are collected
    fn decode_columns(&self, rows: &mut [TestPlanRow], issues: &mut Vec<ParseIssue>) {
        for row in rows.iter_mut() {
            for table in self.codes {
                let raw = row.get(table.column).to_string();
                match table.decode(&raw) {
                    Some(label) => row.set(table.column, label),
                    None => issues.push(ParseIssue::UnknownCode {
                        file: row.filename.clone(),
                        no: row.no().to_string(),
                        column: table.column.header(),
                        value: raw,
                    }),
                }
            }
        }
    }
}
