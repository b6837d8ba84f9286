//! Configuration management with layered hierarchy
//!
//! Later layers override earlier ones:
//! built-in defaults, global user config, project config, environment.
//! Command-line flags are applied on top by the commands themselves.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::project::Project;
use crate::core::store::DEFAULT_STORE_DIR;
use crate::core::table::Encoding;
use crate::rules::{Rule, ValidationSettings};

/// Partial rule settings; unset keys leave the lower layer in place
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationOverrides {
    pub check_branch_fail: Option<bool>,
    pub check_hfe_ar: Option<bool>,
    pub check_pass_format: Option<bool>,
    pub check_single_pass: Option<bool>,
    pub check_coverage: Option<bool>,
    pub check_bin_out: Option<bool>,
    pub check_osc: Option<bool>,
    pub check_spec_limits: Option<bool>,
    pub required_bin: Option<String>,
}

impl ValidationOverrides {
    fn toggle(&self, rule: Rule) -> Option<bool> {
        match rule {
            Rule::BranchFail => self.check_branch_fail,
            Rule::HfeAr => self.check_hfe_ar,
            Rule::PassFormat => self.check_pass_format,
            Rule::SinglePass => self.check_single_pass,
            Rule::Coverage => self.check_coverage,
            Rule::BinOut => self.check_bin_out,
            Rule::Osc => self.check_osc,
            Rule::SpecLimits => self.check_spec_limits,
        }
    }

    fn merge(&mut self, other: ValidationOverrides) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field;
                })*
            };
        }
        take!(
            check_branch_fail,
            check_hfe_ar,
            check_pass_format,
            check_single_pass,
            check_coverage,
            check_bin_out,
            check_osc,
            check_spec_limits,
            required_bin
        );
    }

    /// Apply to a full settings value
    pub fn apply(&self, settings: &mut ValidationSettings) {
        for &rule in Rule::all() {
            if let Some(enabled) = self.toggle(rule) {
                settings.set(rule, enabled);
            }
        }
        if let Some(ref bin) = self.required_bin {
            settings.required_bin = bin.clone();
        }
    }
}

/// MTM configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Paper-spec store directory
    pub store_dir: Option<PathBuf>,

    /// Default output format
    pub default_format: Option<String>,

    /// Encoding of exported CSV tables
    pub export_encoding: Option<Encoding>,

    /// Rule defaults for `mtm validate`
    pub validation: ValidationOverrides,

    /// Project root the config was discovered in, if any
    #[serde(skip)]
    project_root: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/mtm/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_layer(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config (.mtm/config.yaml)
        if let Ok(project) = Project::discover() {
            if let Some(mut project_config) = Self::read_layer(&project.mtm_dir().join("config.yaml")) {
                // relative store paths belong to the project
                project_config.store_dir = project_config
                    .store_dir
                    .map(|dir| Self::resolve(project.root(), dir));
                config.merge(project_config);
            }
            config.project_root = Some(project.root().to_path_buf());
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    fn read_layer(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable config");
                return None;
            }
        };
        match serde_yml::from_str::<Config>(&contents) {
            Ok(layer) => {
                debug!(path = %path.display(), "loaded config layer");
                Some(layer)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping invalid config");
                None
            }
        }
    }

    fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = var("MTM_STORE_DIR").filter(|v| !v.trim().is_empty()) {
            self.store_dir = Some(PathBuf::from(dir));
        }
        if let Some(bin) = var("MTM_REQUIRED_BIN").filter(|v| !v.trim().is_empty()) {
            self.validation.required_bin = Some(bin);
        }
    }

    fn resolve(root: &Path, dir: PathBuf) -> PathBuf {
        if dir.is_absolute() {
            dir
        } else {
            root.join(dir)
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mtm")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.store_dir.is_some() {
            self.store_dir = other.store_dir;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.export_encoding.is_some() {
            self.export_encoding = other.export_encoding;
        }
        self.validation.merge(other.validation);
    }

    /// Store directory: configured, else `paper_specs` in the project root,
    /// else `paper_specs` in the working directory
    pub fn store_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.store_dir {
            return dir.clone();
        }
        match self.project_root {
            Some(ref root) => root.join(DEFAULT_STORE_DIR),
            None => PathBuf::from(DEFAULT_STORE_DIR),
        }
    }

    pub fn export_encoding(&self) -> Encoding {
        self.export_encoding.unwrap_or_default()
    }

    /// Rule settings from every layer, before command-line flags
    pub fn validation_settings(&self) -> ValidationSettings {
        let mut settings = ValidationSettings::default();
        self.validation.apply(&mut settings);
        settings
    }
}
