//! Sort (bin) plan rows from the `= TEST BIN DATA =` section

use serde::Serialize;
use std::fmt;

/// A raw bin-section line, kept with its source file until parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinLine {
    pub filename: String,
    pub line: String,
}

impl BinLine {
    pub fn new(filename: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            line: line.into(),
        }
    }
}

/// Outcome column of a sort line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinResult {
    Pass,
    Fail,
    /// Anything else, kept verbatim
    Other(String),
}

impl BinResult {
    /// Classify a result token, ignoring case
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_uppercase().as_str() {
            "PASS" => BinResult::Pass,
            "FAIL" => BinResult::Fail,
            _ => BinResult::Other(token.to_string()),
        }
    }
}

impl fmt::Display for BinResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinResult::Pass => write!(f, "PASS"),
            BinResult::Fail => write!(f, "FAIL"),
            BinResult::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Fields recovered from one sort line by the sort-line parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedSortLine {
    pub bin_no: String,
    pub result: String,
    pub logic: String,
    /// Diagnostic codes in line order, multi-word tokens in spaced form
    pub codes: Vec<String>,
    /// Free text after the first delimiter
    pub item: String,
}

impl ParsedSortLine {
    pub fn into_row(self, filename: impl Into<String>, line: impl Into<String>) -> SortPlanRow {
        SortPlanRow {
            filename: filename.into(),
            line: line.into(),
            bin_no: self.bin_no,
            result: self.result,
            logic: self.logic,
            codes: self.codes,
            item: self.item,
        }
    }
}

/// A parsed sort-plan entry tagged with its source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortPlanRow {
    pub filename: String,
    /// Original line text
    pub line: String,
    pub bin_no: String,
    /// Result token as written (see [`SortPlanRow::outcome`])
    pub result: String,
    pub logic: String,
    pub codes: Vec<String>,
    pub item: String,
}

impl SortPlanRow {
    pub fn outcome(&self) -> BinResult {
        BinResult::from_token(&self.result)
    }

    pub fn is_pass(&self) -> bool {
        self.outcome() == BinResult::Pass
    }

    /// Whether any code equals `code`, ignoring case
    pub fn has_code(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c.eq_ignore_ascii_case(code))
    }

    /// First code, if any
    pub fn first_code(&self) -> Option<&str> {
        self.codes.first().map(String::as_str)
    }

    /// Table header for sort plans with up to `max_codes` codes per row
    pub fn headers(max_codes: usize) -> Vec<String> {
        let mut headers: Vec<String> = ["Filename", "Bin", "Result", "Logic"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        headers.extend((0..max_codes).map(|i| format!("Code_{}", i)));
        headers.push("Item".to_string());
        headers
    }

    /// Row as table cells with the code list padded to `max_codes`
    pub fn to_record(&self, max_codes: usize) -> Vec<String> {
        let mut record = vec![
            self.filename.clone(),
            self.bin_no.clone(),
            self.result.clone(),
            self.logic.clone(),
        ];
        record.extend(self.codes.iter().cloned());
        for _ in self.codes.len()..max_codes {
            record.push(String::new());
        }
        record.push(self.item.clone());
        record
    }
}
