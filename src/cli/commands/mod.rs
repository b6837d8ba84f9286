//! CLI command implementations

pub mod completions;
pub mod export;
pub mod init;
pub mod map;
pub mod show;
pub mod spec;
pub mod validate;
