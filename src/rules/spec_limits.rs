//! Paper-spec limit check

use super::settings::Rule;
use super::violation::Violation;
use crate::entities::{Column, LimitField, PaperSpecs, SpecRow, TestPlanRow};

/// Test-plan column holding the value checked against a spec field
fn test_column(field: LimitField) -> Column {
    match field {
        LimitField::Min => Column::Min,
        LimitField::Max => Column::Max,
        LimitField::Bias1 => Column::Bias1,
        LimitField::Bias2 => Column::Bias2,
        LimitField::Bias3 => Column::Bias3,
    }
}

/// First spec row matching a test by `NO`, or by `ITEM` ignoring case
pub fn find_spec_row<'a>(spec: &'a [SpecRow], no: &str, item: &str) -> Option<&'a SpecRow> {
    let no = no.trim();
    let item = item.trim();
    spec.iter().find(|s| {
        let no_match = !no.is_empty() && s.no.trim() == no;
        let item_match = !item.is_empty() && s.item.trim().eq_ignore_ascii_case(item);
        no_match || item_match
    })
}

/// Numeric equality; values that are not numbers never match
pub fn values_match(actual: &str, expected: &str) -> bool {
    match (actual.trim().parse::<f64>(), expected.trim().parse::<f64>()) {
        (Ok(a), Ok(e)) => a == e,
        _ => false,
    }
}

/// Compare each test of a file against its product's paper spec
pub fn check_spec_limits(file: &str, rows: &[TestPlanRow], specs: &PaperSpecs) -> Vec<Violation> {
    let Some(product) = specs.product_for(file) else {
        return vec![Violation::for_file(
            Rule::SpecLimits,
            file,
            format!("{}: No product mapping found to validate limits.", file),
        )];
    };
    if let Some(reason) = specs.load_error(product) {
        return vec![Violation::for_file(
            Rule::SpecLimits,
            file,
            format!(
                "{}: Paper spec for product '{}' could not be loaded: {}",
                file, product, reason
            ),
        )];
    }
    let spec = specs.table(product);

    let mut violations = Vec::new();
    for row in rows {
        let no = row.no().trim();
        let item = row.item().trim();

        let Some(spec_row) = find_spec_row(spec, no, item) else {
            violations.push(Violation::for_file(
                Rule::SpecLimits,
                file,
                format!("{}: Test NO {} ({}) not found in spec.", file, no, item),
            ));
            continue;
        };

        for &field in LimitField::all() {
            if !spec_row.enforces(field) {
                continue;
            }
            let Some(expected) = spec_row.expected(field) else {
                continue;
            };
            let actual = row.get(test_column(field));
            if !values_match(actual, expected) {
                violations.push(Violation::for_file(
                    Rule::SpecLimits,
                    file,
                    format!(
                        "{}: Test NO {} ({}) {} mismatch. MTM: {} ≠ Spec: {}",
                        file, no, item, field, actual, expected
                    ),
                ));
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{MappingEntry, ProductMap};

    fn test_row(no: &str, item: &str, min: &str, max: &str) -> TestPlanRow {
        let mut row = TestPlanRow::new("a.mtm", Vec::new());
        row.set(Column::No, no);
        row.set(Column::Item, item);
        row.set(Column::Min, min);
        row.set(Column::Max, max);
        row
    }

    fn spec_row(no: &str, item: &str, min: &str, max: &str) -> SpecRow {
        let mut row = SpecRow::new(no, item);
        row.min = min.to_string();
        row.max = max.to_string();
        row
    }

    fn specs(rows: Vec<SpecRow>) -> PaperSpecs {
        PaperSpecs::new(ProductMap::new(vec![MappingEntry::new("a.mtm", "P1")])).with_table("P1", rows)
    }

    #[test]
    fn test_numeric_equality() {
        assert!(values_match("10.0", "10"));
        assert!(values_match(" 1e1 ", "10"));
        assert!(!values_match("abc", "10"));
        assert!(!values_match("", "10"));
        assert!(!values_match("10.5", "10"));
    }

    #[test]
    fn test_equal_limits_pass() {
        let specs = specs(vec![spec_row("1", "VBE", "10", "")]);
        let rows = vec![test_row("1", "VBE", "10.0", "99")];
        assert!(check_spec_limits("a.mtm", &rows, &specs).is_empty());
    }

    #[test]
    fn test_non_numeric_is_mismatch() {
        let specs = specs(vec![spec_row("1", "VBE", "10", "")]);
        let rows = vec![test_row("1", "VBE", "abc", "")];
        let violations = check_spec_limits("a.mtm", &rows, &specs);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].message,
            "a.mtm: Test NO 1 (VBE) Min mismatch. MTM: abc ≠ Spec: 10"
        );
    }

    #[test]
    fn test_missing_mapping() {
        let specs = PaperSpecs::default();
        let rows = vec![test_row("1", "VBE", "1", "2")];
        let violations = check_spec_limits("a.mtm", &rows, &specs);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].message,
            "a.mtm: No product mapping found to validate limits."
        );
    }

    #[test]
    fn test_unloadable_spec_is_reported_for_its_file() {
        let mut specs = PaperSpecs::new(ProductMap::new(vec![
            MappingEntry::new("a.mtm", "P1"),
            MappingEntry::new("b.mtm", "P2"),
        ]))
        .with_table("P1", vec![spec_row("1", "VBE", "10", "")]);
        specs.insert_failure("P2", "CSV error in P2.csv: bad row");

        let rows = vec![test_row("1", "VBE", "10", "")];
        assert!(check_spec_limits("a.mtm", &rows, &specs).is_empty());

        let violations = check_spec_limits("b.mtm", &rows, &specs);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].message,
            "b.mtm: Paper spec for product 'P2' could not be loaded: CSV error in P2.csv: bad row"
        );
    }

    #[test]
    fn test_row_not_in_spec() {
        let specs = specs(vec![spec_row("1", "VBE", "", "")]);
        let rows = vec![test_row("2", "VCE", "1", "2")];
        let violations = check_spec_limits("a.mtm", &rows, &specs);
        assert_eq!(
            violations[0].message,
            "a.mtm: Test NO 2 (VCE) not found in spec."
        );
    }

    #[test]
    fn test_match_by_item_ignores_case_and_first_wins() {
        let spec = vec![
            spec_row("9", "hfe", "100", ""),
            spec_row("3", "HFE", "200", ""),
        ];
        let found = find_spec_row(&spec, "3", "HFE").unwrap();
        assert_eq!(found.min, "100");
    }

    #[test]
    fn test_disabled_toggle_skips_field() {
        let mut row = spec_row("1", "VBE", "10", "20");
        row.compare_limit = Some(false);
        row.bias1 = "0.5".to_string();
        let specs = specs(vec![row]);
        let rows = vec![test_row("1", "VBE", "1", "2")];
        let violations = check_spec_limits("a.mtm", &rows, &specs);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Bias1 mismatch"));
    }
}
