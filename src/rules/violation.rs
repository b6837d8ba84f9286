//! Rule violations

use serde::Serialize;
use std::fmt;

use super::settings::Rule;

/// A broken business rule
///
/// Violations are collected, never fatal. `file` is `None` for checks that
/// apply to the sort plan of the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule: Rule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub message: String,
}

impl Violation {
    pub fn for_file(rule: Rule, file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule,
            file: Some(file.into()),
            message: message.into(),
        }
    }

    pub fn for_batch(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            file: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
