//! `mtm validate` command - Check MTM files against production rules

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::helpers::{load_batch, open_store, output_format, plural};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{export_batch, Config, Encoding};
use crate::entities::PaperSpecs;
use crate::parser::{ParseIssue, ParsedBatch};
use crate::rules::{validate, Rule, ValidationReport, ValidationSettings, Violation};

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// MTM files or directories to validate
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Disable a rule (repeatable)
    #[arg(long, value_enum)]
    pub skip: Vec<Rule>,

    /// Run only these rules (repeatable)
    #[arg(long, value_enum)]
    pub only: Vec<Rule>,

    /// Required PASS bin number (default: 11)
    #[arg(long, env = "MTM_REQUIRED_BIN")]
    pub bin: Option<String>,

    /// Show summary only, don't show individual problems
    #[arg(long)]
    pub summary: bool,

    /// Also write test_plan.csv and sort_plan.csv to this directory
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Encoding of exported tables (default: from config, else utf8)
    #[arg(long, value_enum, requires = "export")]
    pub encoding: Option<Encoding>,
}

impl ValidateArgs {
    /// Rule settings after applying command-line flags to the configured ones
    pub fn settings(&self, base: ValidationSettings) -> ValidationSettings {
        let mut settings = base;
        if !self.only.is_empty() {
            for &rule in Rule::all() {
                settings.set(rule, self.only.contains(&rule));
            }
        }
        for &rule in &self.skip {
            settings.set(rule, false);
        }
        if let Some(ref bin) = self.bin {
            settings.required_bin = bin.clone();
        }
        settings
    }
}

/// Machine-readable result of a run
#[derive(Serialize)]
struct JsonReport<'a> {
    passed: bool,
    files: Vec<&'a str>,
    rules: Vec<Rule>,
    required_bin: String,
    issues: &'a [ParseIssue],
    violations: &'a [Violation],
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let settings = args.settings(config.validation_settings());
    let format = output_format(global, &config);

    let batch = load_batch(&args.paths)?;

    let specs = if settings.check_spec_limits {
        open_store(global, &config)
            .snapshot_for(batch.files.iter().map(|f| f.filename.as_str()))
            .into_diagnostic()?
    } else {
        PaperSpecs::default()
    };

    let violations = validate(&batch, &settings, &specs);

    if let Some(ref dir) = args.export {
        let encoding = args.encoding.unwrap_or_else(|| config.export_encoding());
        let written = export_batch(&batch, dir, encoding).into_diagnostic()?;
        if !global.quiet && format != OutputFormat::Json {
            for path in &written {
                println!("{} Wrote {}", style("✓").green(), style(path.display()).cyan());
            }
        }
    }

    let report = ValidationReport::new(&batch.issues, &violations);

    if format == OutputFormat::Json {
        let json = JsonReport {
            passed: report.is_clean(),
            files: batch.files.iter().map(|f| f.filename.as_str()).collect(),
            rules: settings.enabled(),
            required_bin: settings.required_bin(),
            issues: &batch.issues,
            violations: &violations,
        };
        println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
    } else if !global.quiet {
        print_file_results(&batch, &violations);
        print_summary(&batch, &violations);
    }

    if report.is_clean() {
        if !global.quiet && format != OutputFormat::Json {
            println!("{} All files passed validation!", style("✓").green().bold());
        }
        return Ok(());
    }

    if args.summary || format == OutputFormat::Json {
        return Err(miette::miette!(
            "Validation failed: {}",
            plural(report.finding_count(), "problem")
        ));
    }
    Err(report.into())
}

fn print_file_results(batch: &ParsedBatch, violations: &[Violation]) {
    println!(
        "{} Validating {}",
        style("→").blue(),
        plural(batch.files.len(), "file")
    );

    for tables in &batch.files {
        let name = tables.filename.as_str();
        let problems = violations
            .iter()
            .filter(|v| v.file.as_deref() == Some(name))
            .count()
            + batch.issues.iter().filter(|i| i.file() == name).count();

        if problems == 0 {
            println!(
                "  {} {} ({} tests, {} bins)",
                style("✓").green(),
                name,
                tables.test_rows.len(),
                tables.sort_rows.len()
            );
        } else {
            println!(
                "  {} {} - {}",
                style("✗").red(),
                name,
                style(plural(problems, "problem")).red()
            );
        }
    }

    for issue in batch.issues.iter().filter(|i| matches!(i, ParseIssue::NoTestData { .. })) {
        println!("  {} {}", style("?").yellow(), issue);
    }
}

fn print_summary(batch: &ParsedBatch, violations: &[Violation]) {
    let batch_wide = violations.iter().filter(|v| v.file.is_none()).count();

    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Validation Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Files parsed:       {}", style(batch.files.len()).cyan());
    println!(
        "  Test rows:          {}",
        style(batch.test_rows().count()).cyan()
    );
    println!(
        "  Sort rows:          {}",
        style(batch.sort_rows().count()).cyan()
    );
    println!(
        "  Parse issues:       {}",
        style(batch.issues.len()).yellow()
    );
    println!("  Violations:         {}", style(violations.len()).red());
    if batch_wide > 0 {
        println!("    sort plan wide:   {}", style(batch_wide).red());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(only: Vec<Rule>, skip: Vec<Rule>, bin: Option<&str>) -> ValidateArgs {
        ValidateArgs {
            paths: vec![PathBuf::from("x.mtm")],
            skip,
            only,
            bin: bin.map(String::from),
            summary: false,
            export: None,
            encoding: None,
        }
    }

    #[test]
    fn test_only_limits_rules() {
        let settings = args(vec![Rule::Osc], vec![], None).settings(ValidationSettings::all());
        assert_eq!(settings.enabled(), vec![Rule::Osc]);
    }

    #[test]
    fn test_skip_wins_over_only() {
        let settings = args(vec![Rule::Osc, Rule::BinOut], vec![Rule::Osc], None)
            .settings(ValidationSettings::all());
        assert_eq!(settings.enabled(), vec![Rule::BinOut]);
    }

    #[test]
    fn test_bin_flag_overrides_config() {
        let base = ValidationSettings::all().with_required_bin("12");
        let settings = args(vec![], vec![], Some("5")).settings(base);
        assert_eq!(settings.required_bin(), "05");
        assert_eq!(settings.enabled().len(), Rule::all().len());
    }
}
