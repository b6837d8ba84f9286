//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{load_sources, Config, SpecStore};
use crate::parser::{parse, ParsedBatch};

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Store selected by --store, else by configuration
pub fn open_store(global: &GlobalOpts, config: &Config) -> SpecStore {
    let root = global.store.clone().unwrap_or_else(|| config.store_dir());
    SpecStore::new(root)
}

/// Output format after applying the configured default
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.format.or_config(config.default_format.as_deref())
}

/// Load and parse every MTM file under the given paths
pub fn load_batch(paths: &[PathBuf]) -> Result<ParsedBatch> {
    let sources = load_sources(paths).into_diagnostic()?;
    parse(&sources).into_diagnostic()
}

/// "1 file" / "2 files"
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
