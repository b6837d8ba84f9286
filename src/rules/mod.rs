//! Validation rule engine
//!
//! Each rule is an independent check over the parsed tables. All enabled
//! rules run, in a fixed order, and their violations are collected into a
//! single list:
//!
//! 1. per file, in input order: branch-fail, hfe-ar, coverage, spec-limits
//! 2. over the whole sort plan: pass-format, single-pass, bin-out, osc

pub mod coverage;
pub mod report;
pub mod settings;
pub mod sort_plan;
pub mod spec_limits;
pub mod test_plan;
pub mod violation;

use tracing::{debug, info};

pub use report::ValidationReport;
pub use settings::{Rule, ValidationSettings};
pub use violation::Violation;

use crate::entities::PaperSpecs;
use crate::parser::ParsedBatch;

/// Runs the enabled rules of a [`ValidationSettings`] over parsed batches
pub struct Validator<'a> {
    settings: &'a ValidationSettings,
    specs: &'a PaperSpecs,
}

impl<'a> Validator<'a> {
    pub fn new(settings: &'a ValidationSettings, specs: &'a PaperSpecs) -> Self {
        Self { settings, specs }
    }

    /// Validate a batch; the result depends only on the inputs
    pub fn run(&self, batch: &ParsedBatch) -> Vec<Violation> {
        let settings = self.settings;
        let mut violations = Vec::new();

        for tables in &batch.files {
            let file = tables.filename.as_str();
            let before = violations.len();

            if settings.check_branch_fail {
                violations.extend(test_plan::check_branch_fail(file, &tables.test_rows));
            }
            if settings.check_hfe_ar {
                violations.extend(test_plan::check_hfe_ar(file, &tables.test_rows));
            }
            if settings.check_coverage {
                violations.extend(coverage::check_sort_coverage(
                    file,
                    &tables.test_rows,
                    &tables.sort_rows,
                ));
            }
            if settings.check_spec_limits {
                violations.extend(spec_limits::check_spec_limits(
                    file,
                    &tables.test_rows,
                    self.specs,
                ));
            }

            debug!(file, violations = violations.len() - before, "checked file");
        }

        if settings.check_pass_format {
            violations.extend(sort_plan::check_pass_format(
                batch.sort_rows(),
                &settings.required_bin(),
            ));
        }
        if settings.check_single_pass {
            violations.extend(sort_plan::check_single_pass(batch.sort_rows()));
        }
        if settings.check_bin_out {
            violations.extend(sort_plan::check_required_code(
                batch.sort_rows(),
                Rule::BinOut,
                sort_plan::BIN_OUT,
            ));
        }
        if settings.check_osc {
            violations.extend(sort_plan::check_required_code(
                batch.sort_rows(),
                Rule::Osc,
                sort_plan::OSC,
            ));
        }

        info!(
            rules = settings.enabled().len(),
            violations = violations.len(),
            "validation finished"
        );
        violations
    }
}

/// Validate a parsed batch against the settings and paper specs
pub fn validate(
    batch: &ParsedBatch,
    settings: &ValidationSettings,
    specs: &PaperSpecs,
) -> Vec<Violation> {
    Validator::new(settings, specs).run(batch)
}
