//! Diagnostic rendering of a validation run

use miette::Diagnostic;
use thiserror::Error;

use super::violation::Violation;
use crate::parser::ParseIssue;

/// A single reported problem, either a parse issue or a rule violation
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct Finding {
    message: String,

    #[help]
    help: Option<String>,
}

impl From<&ParseIssue> for Finding {
    fn from(issue: &ParseIssue) -> Self {
        let help = match issue {
            ParseIssue::NoTestData { .. } => {
                Some("Check that the file is an MTM export with a test section".to_string())
            }
            ParseIssue::UnknownCode { column, .. } => {
                Some(format!("Known {} codes are listed in the decode tables", column))
            }
        };
        Self {
            message: issue.to_string(),
            help,
        }
    }
}

impl From<&Violation> for Finding {
    fn from(violation: &Violation) -> Self {
        Self {
            message: violation.message.clone(),
            help: Some(format!("rule: {}", violation.rule)),
        }
    }
}

/// Every problem of a run as one diagnostic with related findings
#[derive(Debug, Error, Diagnostic)]
#[error("Validation failed: {summary}")]
#[diagnostic(code(mtm::validate::failed))]
pub struct ValidationReport {
    summary: String,

    #[related]
    findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn new(issues: &[ParseIssue], violations: &[Violation]) -> Self {
        let mut findings: Vec<Finding> = issues.iter().map(Finding::from).collect();
        findings.extend(violations.iter().map(Finding::from));

        let count = findings.len();
        let summary = if count == 1 {
            "1 problem".to_string()
        } else {
            format!("{} problems", count)
        };
        Self { summary, findings }
    }

    pub fn finding_count(&self) -> usize {
        self.findings.len()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}
