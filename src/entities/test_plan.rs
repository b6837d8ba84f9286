//! Test plan rows reconstructed from the non-bin section of an MTM file

use std::fmt;

/// Named positions of a test-plan line
///
/// Discriminants are column indices in the exported table, where column 0
/// is the injected file name and column `n` holds line field `n - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    No = 1,
    Item,
    Unknown3,
    Code,
    Min,
    MinUnit,
    Max,
    MaxUnit,
    Sort,
    ConditionSort,
    Unknown11,
    Bias1,
    Bias1Unit,
    Bias2,
    Bias2Unit,
    Bias3,
    Bias3Unit,
    TestTime,
    TestTimeUnit,
    Rv,
    Unknown21,
    Cp,
    Ar,
    Skip,
    Bvr,
    Vp,
    Int,
}

impl Column {
    /// Number of named columns, file name included
    pub const COUNT: usize = 28;

    pub fn all() -> &'static [Column] {
        &[
            Column::No,
            Column::Item,
            Column::Unknown3,
            Column::Code,
            Column::Min,
            Column::MinUnit,
            Column::Max,
            Column::MaxUnit,
            Column::Sort,
            Column::ConditionSort,
            Column::Unknown11,
            Column::Bias1,
            Column::Bias1Unit,
            Column::Bias2,
            Column::Bias2Unit,
            Column::Bias3,
            Column::Bias3Unit,
            Column::TestTime,
            Column::TestTimeUnit,
            Column::Rv,
            Column::Unknown21,
            Column::Cp,
            Column::Ar,
            Column::Skip,
            Column::Bvr,
            Column::Vp,
            Column::Int,
        ]
    }

    /// Index in the exported table (0 is the file name)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Index of the field within the caret-split line
    pub fn field_index(self) -> usize {
        self.index() - 1
    }

    pub fn header(self) -> &'static str {
        match self {
            Column::No => "NO",
            Column::Item => "ITEM",
            Column::Unknown3 => "Unknown_3",
            Column::Code => "Code",
            Column::Min => "Min",
            Column::MinUnit => "Min_Unit",
            Column::Max => "Max",
            Column::MaxUnit => "Max_Unit",
            Column::Sort => "Sort",
            Column::ConditionSort => "Condition_Sort",
            Column::Unknown11 => "Unknown_11",
            Column::Bias1 => "Bias1",
            Column::Bias1Unit => "Bias1_Unit",
            Column::Bias2 => "Bias2",
            Column::Bias2Unit => "Bias2_Unit",
            Column::Bias3 => "Bias3",
            Column::Bias3Unit => "Bias3_Unit",
            Column::TestTime => "Test_Time",
            Column::TestTimeUnit => "Test_Time_Unit",
            Column::Rv => "RV",
            Column::Unknown21 => "Unknown_21",
            Column::Cp => "CP",
            Column::Ar => "AR",
            Column::Skip => "SKIP",
            Column::Bvr => "BVR",
            Column::Vp => "VP",
            Column::Int => "INT",
        }
    }

    /// Column headers for a table `width` columns wide
    ///
    /// Columns past the named schema are called `Unknown_<index>`.
    pub fn headers(width: usize) -> Vec<String> {
        let mut headers = vec!["Filename".to_string()];
        headers.extend(Self::all().iter().map(|c| c.header().to_string()));
        while headers.len() < width {
            headers.push(format!("Unknown_{}", headers.len()));
        }
        headers
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// A single test from the test plan
///
/// Coded columns (Sort, Condition_Sort and the flag columns) hold their
/// decoded labels once the table builder has run; an unrecognized code
/// is kept verbatim and reported as a parse issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPlanRow {
    pub filename: String,
    fields: Vec<String>,
}

impl TestPlanRow {
    pub fn new(filename: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            filename: filename.into(),
            fields,
        }
    }

    /// Value at a named column; missing trailing fields read as empty
    pub fn get(&self, column: Column) -> &str {
        self.fields
            .get(column.field_index())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Replace the value at a named column, padding short rows as needed
    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        let idx = column.field_index();
        if self.fields.len() <= idx {
            self.fields.resize(idx + 1, String::new());
        }
        self.fields[idx] = value.into();
    }

    pub fn no(&self) -> &str {
        self.get(Column::No)
    }

    pub fn item(&self) -> &str {
        self.get(Column::Item)
    }

    /// Whether a flag column (RV, CP, AR, ...) is set
    pub fn has_flag(&self, column: Column) -> bool {
        self.get(column) == column.header()
    }

    /// Number of table columns this row occupies, file name included
    pub fn width(&self) -> usize {
        self.fields.len() + 1
    }

    /// Row as table cells, padded with empty strings to `width`
    pub fn to_record(&self, width: usize) -> Vec<String> {
        let mut record = Vec::with_capacity(width.max(self.width()));
        record.push(self.filename.clone());
        record.extend(self.fields.iter().cloned());
        while record.len() < width {
            record.push(String::new());
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_column_indices_match_schema() {
        assert_eq!(Column::No.index(), 1);
        assert_eq!(Column::Sort.index(), 9);
        assert_eq!(Column::Rv.index(), 20);
        assert_eq!(Column::Int.index(), 27);
        assert_eq!(Column::all().len() + 1, Column::COUNT);
    }

    #[test]
    fn test_headers_extend_past_schema() {
        let headers = Column::headers(30);
        assert_eq!(headers[0], "Filename");
        assert_eq!(headers[27], "INT");
        assert_eq!(headers[28], "Unknown_28");
        assert_eq!(headers[29], "Unknown_29");
    }

    #[test]
    fn test_get_missing_field_is_empty() {
        let row = TestPlanRow::new("a.mtm", fields(&["1", "HFE"]));
        assert_eq!(row.no(), "1");
        assert_eq!(row.item(), "HFE");
        assert_eq!(row.get(Column::Ar), "");
    }

    #[test]
    fn test_set_pads_short_rows() {
        let mut row = TestPlanRow::new("a.mtm", fields(&["1"]));
        row.set(Column::Ar, "AR");
        assert!(row.has_flag(Column::Ar));
        assert_eq!(row.width(), Column::COUNT - 4);
    }

    #[test]
    fn test_to_record_pads() {
        let row = TestPlanRow::new("a.mtm", fields(&["1", "VBE"]));
        let record = row.to_record(5);
        assert_eq!(record, vec!["a.mtm", "1", "VBE", "", ""]);
    }
}
