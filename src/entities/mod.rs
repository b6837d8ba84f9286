//! Entity types for MTM tables and paper specs

pub mod mapping;
pub mod paper_spec;
pub mod sort_plan;
pub mod source;
pub mod test_plan;

pub use mapping::{MappingEntry, ProductMap};
pub use paper_spec::{LimitField, PaperSpecs, SpecRow};
pub use sort_plan::{BinLine, BinResult, ParsedSortLine, SortPlanRow};
pub use source::{RawRecord, SourceFile};
pub use test_plan::{Column, TestPlanRow};
