//! Table output in the supported formats

use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::truncate_str;
use crate::cli::OutputFormat;
use crate::core::Table;

/// Widest cell shown in terminal tables; machine formats are never cut
const MAX_CELL_WIDTH: usize = 40;

/// Render a table as a string in the given format
pub fn render_table(table: &Table, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Auto | OutputFormat::Md => Ok(render_markdown(table, format == OutputFormat::Auto)),
        OutputFormat::Tsv => Ok(render_tsv(table)),
        OutputFormat::Csv => table.to_csv_string().into_diagnostic(),
        OutputFormat::Json => serde_json::to_string_pretty(&table.to_json_rows()).into_diagnostic(),
    }
}

pub fn print_table(table: &Table, format: OutputFormat) -> Result<()> {
    let rendered = render_table(table, format)?;
    if rendered.ends_with('\n') {
        print!("{}", rendered);
    } else {
        println!("{}", rendered);
    }
    Ok(())
}

fn render_markdown(table: &Table, truncate: bool) -> String {
    let cell = |s: &String| {
        let s = if truncate {
            truncate_str(s, MAX_CELL_WIDTH)
        } else {
            s.clone()
        };
        s.replace('|', "\\|")
    };

    let mut builder = Builder::default();
    builder.push_record(table.headers.iter().map(cell));
    for row in &table.rows {
        builder.push_record(row.iter().map(cell));
    }
    builder.build().with(Style::markdown()).to_string()
}

fn render_tsv(table: &Table) -> String {
    let mut out = table.headers.join("\t");
    out.push('\n');
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(|c| c.replace(['\t', '\n'], " ")).collect();
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec!["NO".to_string(), "ITEM".to_string()]);
        table.rows.push(vec!["1".to_string(), "VBE|X".to_string()]);
        table
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let out = render_table(&sample(), OutputFormat::Md).unwrap();
        assert!(out.starts_with("| NO"));
        assert!(out.contains("VBE\\|X"));
    }

    #[test]
    fn test_tsv() {
        let out = render_table(&sample(), OutputFormat::Tsv).unwrap();
        assert_eq!(out, "NO\tITEM\n1\tVBE|X\n");
    }

    #[test]
    fn test_json_rows_are_keyed_by_header() {
        let out = render_table(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["ITEM"], "VBE|X");
    }

    #[test]
    fn test_csv() {
        let out = render_table(&sample(), OutputFormat::Csv).unwrap();
        assert_eq!(out, "NO,ITEM\n1,VBE|X\n");
    }
}
