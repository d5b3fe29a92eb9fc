//! Output formatters for run reports

use anyhow::Result;
use colored::*;
use serde::Serialize;
use sheetform_core::{FileReport, RunReport, SheetPreview, SheetReport};

const MAX_HEADERS_SHOWN: usize = 10;

/// Previews of the sheets of one analyzed file
#[derive(Serialize)]
pub struct FilePreview {
    pub filename: String,
    pub sheets: Vec<SheetPreview>,
}

/// Print the run in human-readable format with colors
pub fn print_human(run: &RunReport) {
    for file in &run.files {
        print_file(file);
    }

    if !run.failures.is_empty() {
        println!("{}", "Failed files:".red().bold().underline());
        for failure in &run.failures {
            println!(
                "  {} [{}] {}: {}",
                "ERROR".red().bold(),
                failure.kind.as_str().bright_black(),
                failure.filename,
                failure.message
            );
        }
        println!();
    }

    println!("{}", "Summary:".bold().underline());
    println!("  {} {}", "Files:".bold(), run.total_files());
    println!("  {} {}", "Analyzed:".green().bold(), run.files.len());
    if run.has_failures() {
        println!("  {} {}", "Failed:".red().bold(), run.failures.len());
    }
}

fn print_file(file: &FileReport) {
    println!(
        "{} {} ({})",
        "File:".bold(),
        file.filename.bold(),
        file.format.to_string().bright_black()
    );
    println!("  {} {}", "Sheets:".bold(), file.sheets.len());
    println!();

    for sheet in &file.sheets {
        print_sheet(sheet);
    }
}

fn print_sheet(sheet: &SheetReport) {
    println!("  {} {}", "Sheet:".bold(), sheet.name.cyan().bold());

    match &sheet.dimensions {
        Some(range) => println!(
            "    Dimensions: {} ({} rows x {} columns)",
            range, sheet.max_row, sheet.max_column
        ),
        None => println!("    Dimensions: {}", "empty".bright_black()),
    }

    if !sheet.merged_cells.is_empty() {
        let ranges: Vec<String> = sheet.merged_cells.iter().map(|m| m.to_string()).collect();
        println!(
            "    Merged cells ({}): {}",
            ranges.len(),
            ranges.join(", ").yellow()
        );
    }

    println!("    Filled cells: {}", sheet.filled_cells.len());
    println!(
        "    Empty cells: {} sampled of {}{}",
        sheet.empty_cells.len(),
        sheet.empty_cells.total_in_window,
        if sheet.empty_cells.complete { "" } else { " (partial)" }
    );

    if !sheet.headers.is_empty() {
        println!("    Possible headers ({}):", sheet.headers.len());
        for header in sheet.headers.iter().take(MAX_HEADERS_SHOWN) {
            println!(
                "      {} {} {}",
                header.cell.reference.yellow(),
                header.cell.value,
                format!("[{}]", header.matched_keywords.join(", ")).bright_black()
            );
        }
        if sheet.headers.len() > MAX_HEADERS_SHOWN {
            println!(
                "      {}",
                format!("... and {} more", sheet.headers.len() - MAX_HEADERS_SHOWN).bright_black()
            );
        }
    }

    println!();
}

/// Print the row-by-row preview of a file's sheets
pub fn print_preview(file: &FilePreview) {
    println!("{} {}", "Preview:".bold().underline(), file.filename.bold());

    for preview in &file.sheets {
        println!("  {} {}", "Sheet:".bold(), preview.name.cyan().bold());
        for row in &preview.rows {
            let cells: Vec<String> = row
                .cells
                .iter()
                .map(|(reference, value)| format!("{}={}", reference.yellow(), value))
                .collect();
            println!("    {:>4} | {}", row.row.to_string().bright_black(), cells.join("  "));
        }
        println!();
    }
}

/// Print the run in JSON format; previews, when given, go in the same document
pub fn print_json(run: &RunReport, previews: Option<&[FilePreview]>) -> Result<()> {
    let output = json_document(run, previews)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn json_document(run: &RunReport, previews: Option<&[FilePreview]>) -> Result<serde_json::Value> {
    let mut output = serde_json::json!({
        "files": run.files,
        "failures": run.failures,
        "summary": {
            "total": run.total_files(),
            "analyzed": run.files.len(),
            "failed": run.failures.len(),
        }
    });

    if let Some(previews) = previews {
        output["previews"] = serde_json::to_value(previews)?;
    }

    Ok(output)
}
