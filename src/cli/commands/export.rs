//! `mtm export` command - Write the parsed tables as CSV

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::load_batch;
use crate::cli::GlobalOpts;
use crate::core::{export_batch, Config, Encoding};

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// MTM files or directories
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output directory for test_plan.csv and sort_plan.csv
    #[arg(long, short = 'o', default_value = ".")]
    pub output: PathBuf,

    /// Text encoding of the written files (default: from config, else utf8)
    #[arg(long, value_enum)]
    pub encoding: Option<Encoding>,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let encoding = args.encoding.unwrap_or_else(|| config.export_encoding());

    let batch = load_batch(&args.paths)?;
    let written = export_batch(&batch, &args.output, encoding).into_diagnostic()?;

    for issue in &batch.issues {
        eprintln!("{} {}", style("!").yellow(), issue);
    }

    if !global.quiet {
        for path in &written {
            println!(
                "{} Wrote {} ({})",
                style("✓").green(),
                style(path.display()).cyan(),
                encoding
            );
        }
    }
    Ok(())
}
