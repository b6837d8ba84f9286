//! Core module - configuration, input loading, spec store and tables

pub mod config;
pub mod loader;
pub mod project;
pub mod store;
pub mod table;

pub use config::{Config, ValidationOverrides};
pub use loader::{collect_paths, load_sources, LoadError};
pub use project::{Project, ProjectError};
pub use store::{SpecStore, StoreError, DEFAULT_STORE_DIR, MAPPING_FILE};
pub use table::{export_batch, Encoding, ExportError, Table};
