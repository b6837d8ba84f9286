//! Test-plan rules: branch-must-FAIL and HFE-must-use-AR

use super::settings::Rule;
use super::violation::Violation;
use crate::entities::{Column, TestPlanRow};
use crate::parser::codes::FAIL;

/// `NO` value of the program header row, exempt from branch checks
pub const PROGRAM_HEADER_NO: &str = "MT2000 TEST PROGRAM";

/// Every test except the program header must sort to FAIL
///
/// Reports one violation per file with the number of offending rows.
pub fn check_branch_fail(file: &str, rows: &[TestPlanRow]) -> Option<Violation> {
    let offending = rows
        .iter()
        .filter(|r| r.no() != PROGRAM_HEADER_NO)
        .filter(|r| r.get(Column::Sort) != FAIL)
        .count();

    if offending == 0 {
        return None;
    }
    Some(Violation::for_file(
        Rule::BranchFail,
        file,
        format!("{}: {} test(s) found where Sort ≠ 'FAIL'.", file, offending),
    ))
}

/// HFE tests must carry the AR option; one violation per offending row
pub fn check_hfe_ar(file: &str, rows: &[TestPlanRow]) -> Vec<Violation> {
    rows.iter()
        .filter(|r| r.item().trim().eq_ignore_ascii_case("HFE"))
        .filter(|r| !r.has_flag(Column::Ar))
        .map(|r| {
            Violation::for_file(
                Rule::HfeAr,
                file,
                format!("{}: HFE test NO {} does not use AR option.", file, r.no()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(no: &str, item: &str, sort: &str, ar: &str) -> TestPlanRow {
        let mut row = TestPlanRow::new("a.mtm", Vec::new());
        row.set(Column::No, no);
        row.set(Column::Item, item);
        row.set(Column::Sort, sort);
        row.set(Column::Ar, ar);
        row
    }

    #[test]
    fn test_branch_fail_counts_non_fail_rows() {
        let rows = vec![
            row(PROGRAM_HEADER_NO, "", "", ""),
            row("1", "VBE", "FAIL", ""),
            row("2", "VCE", "PASS", ""),
            row("3", "ICBO", "", ""),
        ];
        let violation = check_branch_fail("a.mtm", &rows).unwrap();
        assert_eq!(violation.rule, Rule::BranchFail);
        assert_eq!(violation.message, "a.mtm: 2 test(s) found where Sort ≠ 'FAIL'.");
    }

    #[test]
    fn test_branch_fail_passes_when_all_fail() {
        let rows = vec![row("1", "VBE", "FAIL", ""), row(PROGRAM_HEADER_NO, "", "PASS", "")];
        assert!(check_branch_fail("a.mtm", &rows).is_none());
    }

    #[test]
    fn test_hfe_without_ar_is_reported_per_row() {
        let rows = vec![
            row("4", "hfe", "FAIL", ""),
            row("5", "HFE", "FAIL", "AR"),
            row("6", " HFE ", "FAIL", ""),
            row("7", "VBE", "FAIL", ""),
        ];
        let violations = check_hfe_ar("a.mtm", &rows);
        assert_eq!(violations.len(), 2);
        assert_eq!(
            violations[0].message,
            "a.mtm: HFE test NO 4 does not use AR option."
        );
        assert!(violations[1].message.contains("NO 6"));
    }
}
