//! `mtm show` command - Display parsed tables

use clap::ValueEnum;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_batch, output_format, plural};
use crate::cli::output::print_table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Table};

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TableKind {
    /// One row per test
    #[default]
    Test,
    /// One row per bin-section sort entry
    Sort,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// MTM files or directories
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Which table to show
    #[arg(long, short = 't', value_enum, default_value = "test")]
    pub table: TableKind,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = output_format(global, &config);
    let batch = load_batch(&args.paths)?;

    let table = match args.table {
        TableKind::Test => Table::test_plan(&batch),
        TableKind::Sort => Table::sort_plan(&batch),
    };

    print_table(&table, format)?;

    let human = matches!(format, OutputFormat::Auto | OutputFormat::Md);
    if human && !global.quiet {
        println!();
        println!(
            "{} from {}",
            style(plural(table.len(), "row")).cyan(),
            plural(batch.files.len(), "file")
        );
        for issue in &batch.issues {
            eprintln!("{} {}", style("!").yellow(), issue);
        }
    }
    Ok(())
}
