//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, export::ExportArgs, init::InitArgs, map::MapCommands,
    show::ShowArgs, spec::SpecCommands, validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "mtm")]
#[command(author, version, about = "MTM test program validator")]
#[command(long_about = "Parses MT2000 test program exports (.mtm) into test-plan and sort-plan tables and checks them against production rules and paper specs.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Paper-spec store directory (default: paper_specs)
    #[arg(long, global = true, env = "MTM_STORE_DIR")]
    pub store: Option<PathBuf>,
}

impl GlobalOpts {
    /// Log level implied by --quiet / --verbose
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize an MTM project (.mtm/ config and paper-spec store)
    Init(InitArgs),

    /// Validate MTM files against production rules and paper specs
    Validate(ValidateArgs),

    /// Show the parsed test-plan or sort-plan table
    Show(ShowArgs),

    /// Export test_plan.csv and sort_plan.csv
    Export(ExportArgs),

    /// Manage the MTM file to product mapping
    #[command(subcommand)]
    Map(MapCommands),

    /// Manage product paper specs
    #[command(subcommand)]
    Spec(SpecCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (markdown table for terminals)
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}

impl OutputFormat {
    /// Resolve `auto` against a configured default
    pub fn or_config(self, configured: Option<&str>) -> OutputFormat {
        if self != OutputFormat::Auto {
            return self;
        }
        configured
            .and_then(|name| OutputFormat::from_str(name, true).ok())
            .unwrap_or(OutputFormat::Auto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_auto_format_uses_config() {
        assert_eq!(OutputFormat::Auto.or_config(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::Csv.or_config(Some("json")), OutputFormat::Csv);
        assert_eq!(OutputFormat::Auto.or_config(Some("bogus")), OutputFormat::Auto);
        assert_eq!(OutputFormat::Auto.or_config(None), OutputFormat::Auto);
    }

    #[test]
    fn test_log_level_flags() {
        let cli = Cli::try_parse_from(["mtm", "-v", "map", "list"]).unwrap();
        assert_eq!(cli.global.log_level(), "debug");
        let cli = Cli::try_parse_from(["mtm", "map", "list", "--quiet"]).unwrap();
        assert_eq!(cli.global.log_level(), "error");
    }
}
