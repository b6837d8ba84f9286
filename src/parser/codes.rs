//! Decode tables for coded test-plan columns

use crate::entities::Column;

pub const FAIL: &str = "FAIL";
pub const PASS: &str = "PASS";

/// Fixed raw-code to label lookup for one column
#[derive(Debug)]
pub struct CodeTable {
    pub column: Column,
    entries: &'static [(&'static str, &'static str)],
}

impl CodeTable {
    pub const fn new(column: Column, entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { column, entries }
    }

    /// Label for a raw code
    ///
    /// An absent (empty) value decodes to the empty label. Returns `None`
    /// for codes the table does not know.
    pub fn decode(&self, raw: &str) -> Option<&'static str> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Some("");
        }
        self.entries
            .iter()
            .find(|(code, _)| *code == raw)
            .map(|(_, label)| *label)
    }

    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }
}

pub static SORT: CodeTable = CodeTable::new(Column::Sort, &[("1", FAIL), ("2", PASS), ("3", "")]);

pub static CONDITION_SORT: CodeTable = CodeTable::new(
    Column::ConditionSort,
    &[("0", ""), ("1", "F-T"), ("2", "P-T"), ("3", "P/F-T")],
);

pub static RV: CodeTable = CodeTable::new(Column::Rv, &[("1", "RV"), ("0", "")]);
pub static CP: CodeTable = CodeTable::new(Column::Cp, &[("1", "CP"), ("0", "")]);
pub static AR: CodeTable = CodeTable::new(Column::Ar, &[("1", "AR"), ("0", "")]);
pub static SKIP: CodeTable = CodeTable::new(Column::Skip, &[("1", "SKIP"), ("0", "")]);
pub static BVR: CodeTable = CodeTable::new(Column::Bvr, &[("1", "BVR"), ("0", "")]);
pub static VP: CodeTable = CodeTable::new(Column::Vp, &[("1", "VP"), ("0", "")]);
pub static INT: CodeTable = CodeTable::new(Column::Int, &[("1", "INT"), ("0", "")]);

/// Every coded column of the test plan, in column order
pub static TEST_PLAN_CODES: [&CodeTable; 9] = [
    &SORT,
    &CONDITION_SORT,
    &RV,
    &CP,
    &AR,
    &SKIP,
    &BVR,
    &VP,
    &INT,
];
