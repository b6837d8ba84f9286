//! MTM: test-program export validator
//!
//! Parses caret-delimited MTM exports into a test plan and a sort plan,
//! then checks both against configurable business rules and externally
//! maintained paper-spec limit tables.

pub mod cli;
pub mod core;
pub mod entities;
pub mod parser;
pub mod rules;

pub use entities::{PaperSpecs, SortPlanRow, SourceFile, SpecRow, TestPlanRow};
pub use parser::{parse, ParseError, ParseIssue, ParsedBatch};
pub use rules::{validate, Rule, ValidationSettings, Violation};
