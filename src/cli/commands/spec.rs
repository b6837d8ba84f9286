//! `mtm spec` command - Product paper specs

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::path::PathBuf;

use crate::cli::helpers::{open_store, output_format, plural};
use crate::cli::output::print_table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::store::read_spec_rows;
use crate::core::{Config, Table};

#[derive(Subcommand, Debug)]
pub enum SpecCommands {
    /// List products that have a spec file
    List,

    /// Show a product's spec table
    Show(ProductArgs),

    /// Create an empty (header-only) spec for a product
    New(NewArgs),

    /// Import a CSV file as a product's spec
    Import(ImportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ProductArgs {
    /// Product name
    pub product: String,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Product name
    pub product: String,

    /// Overwrite an existing spec
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Product name
    pub product: String,

    /// CSV file with NO, ITEM, limit and Compare_* columns
    pub file: PathBuf,
}

pub fn run(cmd: SpecCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let store = open_store(global, &config);
    let format = output_format(global, &config);
    let human = matches!(format, OutputFormat::Auto | OutputFormat::Md) && !global.quiet;

    match cmd {
        SpecCommands::List => {
            let products = store.list_products().into_diagnostic()?;
            let mapping = store.load_mapping().into_diagnostic()?;

            let mut table = Table::new(vec!["Product".to_string(), "Files".to_string()]);
            for product in &products {
                let files = mapping
                    .entries()
                    .iter()
                    .filter(|e| e.product.trim() == product)
                    .count();
                table.rows.push(vec![product.clone(), files.to_string()]);
            }
            print_table(&table, format)?;

            if human {
                println!();
                println!(
                    "{} in {}",
                    style(plural(products.len(), "product")).cyan(),
                    store.root().display()
                );
            }
            Ok(())
        }
        SpecCommands::Show(args) => {
            let path = store.spec_path(&args.product).into_diagnostic()?;
            if !path.exists() {
                return Err(miette::miette!(
                    "no spec for product '{}' ({})",
                    args.product,
                    path.display()
                ));
            }
            let rows = store.load_spec(&args.product).into_diagnostic()?;
            print_table(&Table::spec(&rows), format)?;

            if human {
                println!();
                println!("{}", style(plural(rows.len(), "spec row")).cyan());
            }
            Ok(())
        }
        SpecCommands::New(args) => {
            let path = store.spec_path(&args.product).into_diagnostic()?;
            if path.exists() && !args.force {
                return Err(miette::miette!(
                    "spec for '{}' already exists at {} (use --force to overwrite)",
                    args.product,
                    path.display()
                ));
            }
            store.save_spec(&args.product, &[]).into_diagnostic()?;

            if !global.quiet {
                println!(
                    "{} Created {}",
                    style("✓").green(),
                    style(path.display()).cyan()
                );
            }
            Ok(())
        }
        SpecCommands::Import(args) => {
            let file = File::open(&args.file)
                .map_err(|e| miette::miette!("cannot open {}: {}", args.file.display(), e))?;
            let rows = read_spec_rows(file)
                .map_err(|e| miette::miette!("invalid spec CSV {}: {}", args.file.display(), e))?;
            let path = store.save_spec(&args.product, &rows).into_diagnostic()?;

            if !global.quiet {
                println!(
                    "{} Imported {} into {}",
                    style("✓").green(),
                    plural(rows.len(), "spec row"),
                    style(path.display()).cyan()
                );
            }
            Ok(())
        }
    }
}
