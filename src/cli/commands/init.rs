//! `mtm init` command - Initialize a new MTM project

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::project::{Project, ProjectError};
use crate::core::SpecStore;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Rewrite .mtm/config.yaml even if .mtm/ already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        if !global.quiet {
            println!(
                "{} Created directory {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
    }

    let project = match Project::init(&path, args.force) {
        Ok(project) => project,
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} MTM project already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!("Use {} to reinitialize", style("mtm init --force").yellow());
            return Ok(());
        }
        Err(e) => return Err(miette::miette!("{}", e)),
    };

    let store = match global.store {
        Some(ref dir) if dir.is_absolute() => SpecStore::new(dir.clone()),
        Some(ref dir) => SpecStore::new(project.root().join(dir)),
        None => SpecStore::new(project.store_dir()),
    };
    store.init().into_diagnostic()?;

    if global.quiet {
        return Ok(());
    }

    println!(
        "{} Initialized MTM project at {}",
        style("✓").green(),
        style(project.root().display()).cyan()
    );
    println!();
    println!("Created project structure:");
    println!("  {}", style(".mtm/config.yaml").dim());
    println!(
        "  {}",
        style(store.mapping_path().display()).dim()
    );
    println!();
    println!("Next steps:");
    println!(
        "  {} Map an MTM file to a product",
        style("mtm map set <file.mtm> <product>").yellow()
    );
    println!(
        "  {} Import a product paper spec",
        style("mtm spec import <product> <spec.csv>").yellow()
    );
    println!(
        "  {} Validate MTM files",
        style("mtm validate <paths>").yellow()
    );
    Ok(())
}
