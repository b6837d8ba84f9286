//! Sort coverage: every test number needs an F-code in the sort plan

use std::collections::BTreeSet;

use super::settings::Rule;
use super::violation::Violation;
use crate::entities::{SortPlanRow, TestPlanRow};

/// Sort-plan code for a test number, e.g. `7` becomes `F007`
///
/// Returns `None` when the number is not an integer.
pub fn coverage_code(no: &str) -> Option<String> {
    no.trim().parse::<i64>().ok().map(|n| format!("F{:03}", n))
}

/// Whether a sort-plan code has the `F<digits>` form
fn is_test_code(code: &str) -> bool {
    code.strip_prefix('F')
        .map(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

/// Check that each test of a file is covered by the file's sort plan
///
/// Tests whose number is not an integer are left out. Missing codes are
/// listed in sorted order in a single violation.
pub fn check_sort_coverage(
    file: &str,
    rows: &[TestPlanRow],
    sort_rows: &[SortPlanRow],
) -> Option<Violation> {
    let required: BTreeSet<String> = rows.iter().filter_map(|r| coverage_code(r.no())).collect();

    let covered: BTreeSet<&str> = sort_rows
        .iter()
        .flat_map(|r| r.codes.iter())
        .map(String::as_str)
        .filter(|c| is_test_code(c))
        .collect();

    let missing: Vec<&str> = required
        .iter()
        .map(String::as_str)
        .filter(|code| !covered.contains(code))
        .collect();

    if missing.is_empty() {
        return None;
    }
    Some(Violation::for_file(
        Rule::Coverage,
        file,
        format!(
            "{}: Missing sort plan coverage for codes: {}",
            file,
            missing.join(", ")
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Column, ParsedSortLine};

    fn test_row(no: &str) -> TestPlanRow {
        let mut row = TestPlanRow::new("a.mtm", Vec::new());
        row.set(Column::No, no);
        row
    }

    fn sort_row(codes: &[&str]) -> SortPlanRow {
        ParsedSortLine {
            bin_no: "21".to_string(),
            result: "FAIL".to_string(),
            logic: "OR".to_string(),
            codes: codes.iter().map(|s| s.to_string()).collect(),
            item: String::new(),
        }
        .into_row("a.mtm", "")
    }

    #[test]
    fn test_coverage_code_format() {
        assert_eq!(coverage_code("7").as_deref(), Some("F007"));
        assert_eq!(coverage_code(" 12 ").as_deref(), Some("F012"));
        assert_eq!(coverage_code("1234").as_deref(), Some("F1234"));
        assert_eq!(coverage_code("MT2000 TEST PROGRAM"), None);
        assert_eq!(coverage_code(""), None);
    }

    #[test]
    fn test_missing_code_is_reported() {
        let rows = vec![test_row("7")];
        let violation = check_sort_coverage("a.mtm", &rows, &[]).unwrap();
        assert_eq!(violation.rule, Rule::Coverage);
        assert_eq!(
            violation.message,
            "a.mtm: Missing sort plan coverage for codes: F007"
        );
    }

    #[test]
    fn test_missing_codes_are_sorted() {
        let rows = vec![test_row("12"), test_row("3"), test_row("1"), test_row("x")];
        let sorts = vec![sort_row(&["F001", "BIN OUT"])];
        let violation = check_sort_coverage("a.mtm", &rows, &sorts).unwrap();
        assert!(violation.message.ends_with("F003, F012"));
    }

    #[test]
    fn test_full_coverage() {
        let rows = vec![test_row("1"), test_row("2")];
        let sorts = vec![sort_row(&["F001"]), sort_row(&["F002", "OSC"])];
        assert!(check_sort_coverage("a.mtm", &rows, &sorts).is_none());
    }
}
