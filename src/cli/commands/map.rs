//! `mtm map` command - MTM file to product mapping

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_store, output_format, plural};
use crate::cli::output::print_table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Table};
use crate::entities::ProductMap;

#[derive(Subcommand, Debug)]
pub enum MapCommands {
    /// List mapped files and their products
    List,

    /// Map a file to a product, replacing any existing entry
    Set(SetArgs),

    /// Remove a file's mapping
    Remove(RemoveArgs),
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// MTM file name (base name, e.g. LOT42.mtm)
    pub filename: String,

    /// Product whose paper spec applies
    pub product: String,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// MTM file name
    pub filename: String,
}

pub fn run(cmd: MapCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let store = open_store(global, &config);

    match cmd {
        MapCommands::List => {
            let mapping = store.load_mapping().into_diagnostic()?;
            let format = output_format(global, &config);

            let mut table = Table::new(ProductMap::HEADERS.iter().map(|h| h.to_string()).collect());
            table.rows = mapping
                .entries()
                .iter()
                .map(|e| vec![e.filename.clone(), e.product.clone()])
                .collect();
            print_table(&table, format)?;

            if matches!(format, OutputFormat::Auto | OutputFormat::Md) && !global.quiet {
                println!();
                println!(
                    "{} mapped to {}",
                    style(plural(table.len(), "file")).cyan(),
                    plural(mapping.products().len(), "product")
                );
            }
            Ok(())
        }
        MapCommands::Set(args) => {
            let filename = args.filename.trim();
            let product = args.product.trim();
            if filename.is_empty() || product.is_empty() {
                return Err(miette::miette!("filename and product must not be empty"));
            }
            // reject names the store cannot turn into a spec file
            store.spec_path(product).into_diagnostic()?;

            let mut mapping = store.load_mapping().into_diagnostic()?;
            mapping.set(filename, product);
            store.save_mapping(&mapping).into_diagnostic()?;

            if !global.quiet {
                println!(
                    "{} Mapped {} → {}",
                    style("✓").green(),
                    style(filename).cyan(),
                    style(product).yellow()
                );
                if store.load_spec(product).into_diagnostic()?.is_empty() {
                    println!(
                        "  {} no paper spec rows for {} yet; see {}",
                        style("!").yellow(),
                        product,
                        style("mtm spec import").yellow()
                    );
                }
            }
            Ok(())
        }
        MapCommands::Remove(args) => {
            let mut mapping = store.load_mapping().into_diagnostic()?;
            if !mapping.remove(args.filename.trim()) {
                return Err(miette::miette!("no mapping for '{}'", args.filename));
            }
            store.save_mapping(&mapping).into_diagnostic()?;

            if !global.quiet {
                println!(
                    "{} Removed mapping for {}",
                    style("✓").green(),
                    style(&args.filename).cyan()
                );
            }
            Ok(())
        }
    }
}
