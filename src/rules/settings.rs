//! Per-run rule toggles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Validation rules that can be switched on or off
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// Every test (except the program header row) sorts to FAIL
    BranchFail,
    /// HFE tests use the AR option
    HfeAr,
    /// PASS bins use AND logic, ALL PASS and the required bin number
    PassFormat,
    /// At most one PASS bin in the sort plan
    SinglePass,
    /// Every test number appears as an F-code in the sort plan
    Coverage,
    /// The sort plan contains a BIN OUT code
    BinOut,
    /// The sort plan contains an OSC code
    Osc,
    /// Test limits match the product's paper spec
    SpecLimits,
}

impl Rule {
    pub fn all() -> &'static [Rule] {
        &[
            Rule::BranchFail,
            Rule::HfeAr,
            Rule::PassFormat,
            Rule::SinglePass,
            Rule::Coverage,
            Rule::BinOut,
            Rule::Osc,
            Rule::SpecLimits,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::BranchFail => "branch-fail",
            Rule::HfeAr => "hfe-ar",
            Rule::PassFormat => "pass-format",
            Rule::SinglePass => "single-pass",
            Rule::Coverage => "coverage",
            Rule::BinOut => "bin-out",
            Rule::Osc => "osc",
            Rule::SpecLimits => "spec-limits",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bin number a PASS entry must use when none is configured
pub const DEFAULT_REQUIRED_BIN: &str = "11";

/// Rule toggles and parameters for one validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub check_branch_fail: bool,
    pub check_hfe_ar: bool,
    pub check_pass_format: bool,
    pub check_single_pass: bool,
    pub check_coverage: bool,
    pub check_bin_out: bool,
    pub check_osc: bool,
    pub check_spec_limits: bool,

    /// Two-digit bin number required for PASS entries
    pub required_bin: String,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self::all()
    }
}

impl ValidationSettings {
    /// Every rule enabled
    pub fn all() -> Self {
        Self {
            check_branch_fail: true,
            check_hfe_ar: true,
            check_pass_format: true,
            check_single_pass: true,
            check_coverage: true,
            check_bin_out: true,
            check_osc: true,
            check_spec_limits: true,
            required_bin: DEFAULT_REQUIRED_BIN.to_string(),
        }
    }

    /// Every rule disabled
    pub fn none() -> Self {
        Self {
            check_branch_fail: false,
            check_hfe_ar: false,
            check_pass_format: false,
            check_single_pass: false,
            check_coverage: false,
            check_bin_out: false,
            check_osc: false,
            check_spec_limits: false,
            required_bin: DEFAULT_REQUIRED_BIN.to_string(),
        }
    }

    pub fn with_required_bin(mut self, bin: &str) -> Self {
        self.required_bin = pad_bin(bin);
        self
    }

    pub fn is_enabled(&self, rule: Rule) -> bool {
        *self.toggle(rule)
    }

    pub fn set(&mut self, rule: Rule, enabled: bool) {
        *self.toggle_mut(rule) = enabled;
    }

    /// Enabled rules in declaration order
    pub fn enabled(&self) -> Vec<Rule> {
        Rule::all()
            .iter()
            .copied()
            .filter(|r| self.is_enabled(*r))
            .collect()
    }

    /// Required bin, zero-padded to two digits
    pub fn required_bin(&self) -> String {
        pad_bin(&self.required_bin)
    }

    fn toggle(&self, rule: Rule) -> &bool {
        match rule {
            Rule::BranchFail => &self.check_branch_fail,
            Rule::HfeAr => &self.check_hfe_ar,
            Rule::PassFormat => &self.check_pass_format,
            Rule::SinglePass => &self.check_single_pass,
            Rule::Coverage => &self.check_coverage,
            Rule::BinOut => &self.check_bin_out,
            Rule::Osc => &self.check_osc,
            Rule::SpecLimits => &self.check_spec_limits,
        }
    }

    fn toggle_mut(&mut self, rule: Rule) -> &mut bool {
        match rule {
            Rule::BranchFail => &mut self.check_branch_fail,
            Rule::HfeAr => &mut self.check_hfe_ar,
            Rule::PassFormat => &mut self.check_pass_format,
            Rule::SinglePass => &mut self.check_single_pass,
            Rule::Coverage => &mut self.check_coverage,
            Rule::BinOut => &mut self.check_bin_out,
            Rule::Osc => &mut self.check_osc,
            Rule::SpecLimits => &mut self.check_spec_limits,
        }
    }
}

/// Left-pad a bin number with zeros to two characters
pub fn pad_bin(bin: &str) -> String {
    format!("{:0>2}", bin.trim())
}
