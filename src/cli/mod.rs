//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod helpers;
pub mod output;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};

use miette::Result;

/// Set up structured logging to stderr
///
/// `RUST_LOG` takes precedence over the --quiet / --verbose flags.
pub fn setup_logging(global: &GlobalOpts) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = global.log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mtm={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    tracing::debug!("Logging initialized at level: {}", log_level);
}

/// Run a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => commands::init::run(args, &global),
        Commands::Validate(args) => commands::validate::run(args, &global),
        Commands::Show(args) => commands::show::run(args, &global),
        Commands::Export(args) => commands::export::run(args, &global),
        Commands::Map(cmd) => commands::map::run(cmd, &global),
        Commands::Spec(cmd) => commands::spec::run(cmd, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
