//! Project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::store::DEFAULT_STORE_DIR;

/// Name of the per-project configuration directory
pub const PROJECT_DIR: &str = ".mtm";

/// A directory holding MTM files, a paper-spec store and `.mtm/`
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .mtm/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current =
            std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create the project structure at the given path
    ///
    /// With `force`, an existing `.mtm/` is reused and its config rewritten.
    pub fn init(path: &Path, force: bool) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let mtm_dir = root.join(PROJECT_DIR);
        if mtm_dir.exists() && !force {
            return Err(ProjectError::AlreadyExists(root));
        }

        std::fs::create_dir_all(&mtm_dir).map_err(|e| ProjectError::IoError(e.to_string()))?;
        std::fs::write(mtm_dir.join("config.yaml"), Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# MTM Project Configuration

# Directory holding mtm_product_map.csv and <product>.csv paper specs
# (relative paths are resolved against the project root)
# store_dir: paper_specs

# Default output format (auto, tsv, json, csv, md)
# default_format: auto

# Encoding for exported CSV tables (utf8, latin1)
# export_encoding: utf8

# Rule defaults for `mtm validate` (all rules are on unless disabled here)
# validation:
#   check_branch_fail: true
#   check_hfe_ar: true
#   check_pass_format: true
#   check_single_pass: true
#   check_coverage: true
#   check_bin_out: true
#   check_osc: true
#   check_spec_limits: true
#   required_bin: "11"
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .mtm configuration directory
    pub fn mtm_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Default paper-spec store location for this project
    pub fn store_dir(&self) -> PathBuf {
        self.root.join(DEFAULT_STORE_DIR)
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not an MTM project (searched from {searched_from:?}). Run 'mtm init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("MTM project already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_project_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path(), false).unwrap();

        assert!(project.mtm_dir().is_dir());
        assert!(project.mtm_dir().join("config.yaml").exists());
        assert_eq!(project.store_dir(), project.root().join("paper_specs"));
    }

    #[test]
    fn test_project_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path(), false).unwrap();

        let err = Project::init(tmp.path(), false).unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyExists(_)));
        assert!(Project::init(tmp.path(), true).is_ok());
    }

    #[test]
    fn test_project_discover_finds_mtm_dir() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path(), false).unwrap();

        let subdir = tmp.path().join("lots/2024/week1");
        std::fs::create_dir_all(&subdir).unwrap();

        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_project_discover_fails_without_mtm_dir() {
        let tmp = tempdir().unwrap();
        let err = Project::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }
}
