//! Sort-plan rules over the whole batch

use super::settings::Rule;
use super::violation::Violation;
use crate::entities::SortPlanRow;

pub const ALL_PASS: &str = "ALL PASS";
pub const BIN_OUT: &str = "BIN OUT";
pub const OSC: &str = "OSC";

/// PASS entries must use AND logic, `ALL PASS` as first code and the
/// required bin; one violation per offending entry
pub fn check_pass_format<'a>(
    rows: impl IntoIterator<Item = &'a SortPlanRow>,
    required_bin: &str,
) -> Vec<Violation> {
    rows.into_iter()
        .filter(|r| r.is_pass())
        .filter(|r| {
            let logic_ok = r.logic.trim().eq_ignore_ascii_case("AND");
            let code_ok = r
                .first_code()
                .map(|c| c.trim().eq_ignore_ascii_case(ALL_PASS))
                .unwrap_or(false);
            let bin_ok = r.bin_no.trim() == required_bin;
            !(logic_ok && code_ok && bin_ok)
        })
        .map(|r| {
            Violation::for_file(
                Rule::PassFormat,
                &r.filename,
                format!(
                    "{}: Invalid PASS bin (BIN={}). Expected BIN={}, Logic='AND', Code_0='ALL PASS'.",
                    r.filename,
                    r.bin_no.trim(),
                    required_bin
                ),
            )
        })
        .collect()
}

/// At most one PASS entry across the sort plan
pub fn check_single_pass<'a>(rows: impl IntoIterator<Item = &'a SortPlanRow>) -> Option<Violation> {
    let passes: Vec<&SortPlanRow> = rows.into_iter().filter(|r| r.is_pass()).collect();
    if passes.len() <= 1 {
        return None;
    }

    let listing: Vec<String> = passes
        .iter()
        .map(|r| format!("{}: {}", r.filename, r.line))
        .collect();
    Some(Violation::for_batch(
        Rule::SinglePass,
        format!(
            "Multiple PASS bins found ({}). Expected only one:\n{}",
            passes.len(),
            listing.join("\n")
        ),
    ))
}

/// The sort plan must use `code` somewhere
pub fn check_required_code<'a>(
    rows: impl IntoIterator<Item = &'a SortPlanRow>,
    rule: Rule,
    code: &str,
) -> Option<Violation> {
    if rows.into_iter().any(|r| r.has_code(code)) {
        return None;
    }
    Some(Violation::for_batch(
        rule,
        format!("Sort Plan does not contain '{}' in any code column.", code),
    ))
}
