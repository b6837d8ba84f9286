//! Input file loading
//!
//! Paths given on the command line may be files or directories. Directories
//! are walked recursively for `.mtm` files (extension matched without case);
//! explicitly named files are taken as-is.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::entities::SourceFile;

/// Extension of MTM test program exports
pub const MTM_EXTENSION: &str = "mtm";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input path not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

fn is_mtm_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(MTM_EXTENSION))
}

/// Expand the given paths into the list of input files
///
/// Files found inside one directory are sorted by path; the order of the
/// given paths is kept.
pub fn collect_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(path).follow_links(true) {
                let entry = entry.map_err(|e| LoadError::Walk {
                    path: path.clone(),
                    source: e,
                })?;
                if entry.file_type().is_file() && is_mtm_file(entry.path()) {
                    found.push(entry.into_path());
                }
            }
            found.sort();
            debug!(dir = %path.display(), files = found.len(), "scanned directory");
            files.extend(found);
        } else {
            return Err(LoadError::NotFound(path.clone()));
        }
    }

    Ok(files)
}

/// Read one input file; its name is the file's base name
pub fn load_source(path: &Path) -> Result<SourceFile, LoadError> {
    let bytes = fs::read(path).map_err(|e| LoadError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SourceFile::new(name, bytes))
}

/// Collect and read every input file under the given paths
pub fn load_sources(paths: &[PathBuf]) -> Result<Vec<SourceFile>, LoadError> {
    collect_paths(paths)?
        .iter()
        .map(|p| load_source(p))
        .collect()
}
