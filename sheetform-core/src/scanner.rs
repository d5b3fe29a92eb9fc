//! Structural scanner: walks a bounded window of a sheet and classifies cells

use crate::classifier::{HeaderClassifier, is_filled};
use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::reader::WorkbookAdapter;
use crate::reference::MergedRange;
use crate::report::{
    CellEntry, EmptyCell, HeaderCandidate, SheetReport, SheetScan, assemble_sheet,
};
use serde::{Deserialize, Serialize};

/// Scan one sheet into a structural report
///
/// Only the first `max_rows` x `max_cols` cells are walked, row-major.
/// Merged ranges and dimensions cover the whole sheet.
pub fn scan_sheet(
    adapter: &mut dyn WorkbookAdapter,
    sheet: &str,
    config: &ScanConfig,
    classifier: &HeaderClassifier,
) -> Result<SheetReport> {
    let dimensions = adapter.dimensions(sheet)?;
    let merged = sheet_merged_ranges(adapter, sheet)?;

    let rows = dimensions.rows.min(config.max_rows);
    let cols = dimensions.cols.min(config.max_cols);

    let mut scan = SheetScan::default();

    for row in 1..=rows {
        for col in 1..=cols {
            let cell = adapter.cell_at(sheet, row, col)?;

            if is_filled(&cell.value) {
                let entry = CellEntry::new(
                    cell.position,
                    truncate_chars(&cell.value.display_text(), config.value_max_chars),
                );

                // Keywords are matched against the full text, not the truncated one
                if let Some(text) = cell.value.as_text() {
                    if classifier.is_header_candidate(row, text) {
                        scan.headers.push(HeaderCandidate {
                            cell: entry.clone(),
                            matched_keywords: classifier
                                .matched_keywords(text)
                                .into_iter()
                                .map(String::from)
                                .collect(),
                        });
                    }
                }

                scan.filled.push(entry);
            } else {
                scan.empty.total_in_window += 1;
                if row <= config.empty_sample_rows && scan.empty.cells.len() < config.empty_sample_cap {
                    scan.empty.cells.push(EmptyCell::new(cell.position));
                }
            }
        }
    }

    scan.empty.complete = scan.empty.cells.len() == scan.empty.total_in_window;

    log::debug!(
        "Sheet '{}': {} filled, {} empty ({} sampled), {} headers, {} merged",
        sheet,
        scan.filled.len(),
        scan.empty.total_in_window,
        scan.empty.cells.len(),
        scan.headers.len(),
        merged.len()
    );

    Ok(assemble_sheet(sheet, dimensions, merged, scan))
}

/// Merged ranges of a sheet, empty when the format cannot provide them
fn sheet_merged_ranges(adapter: &mut dyn WorkbookAdapter, sheet: &str) -> Result<Vec<MergedRange>> {
    match adapter.merged_ranges(sheet) {
        Ok(merged) => Ok(merged),
        Err(ScanError::CapabilityUnavailable { reason, .. }) => {
            log::debug!("No merge information for sheet '{}': {}", sheet, reason);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Filled cells of one row in the detailed preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub row: u32,
    /// (reference, text) pairs, left to right
    pub cells: Vec<(String, String)>,
}

/// Row-by-row view of the filled cells at the top of a sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetPreview {
    pub name: String,
    pub rows: Vec<PreviewRow>,
}

/// Preview the first `display_rows` x `max_cols` cells of a sheet
///
/// Rows without any filled cell are left out.
pub fn preview_sheet(
    adapter: &mut dyn WorkbookAdapter,
    sheet: &str,
    config: &ScanConfig,
) -> Result<SheetPreview> {
    let dimensions = adapter.dimensions(sheet)?;
    let rows = dimensions.rows.min(config.display_rows);
    let cols = dimensions.cols.min(config.max_cols);

    let mut preview = SheetPreview {
        name: sheet.to_string(),
        rows: Vec::new(),
    };

    for row in 1..=rows {
        let mut cells = Vec::new();
        for col in 1..=cols {
            let cell = adapter.cell_at(sheet, row, col)?;
            if is_filled(&cell.value) {
                cells.push((
                    cell.position.to_string(),
                    truncate_chars(&cell.value.display_text(), config.display_value_chars),
                ));
            }
        }
        if !cells.is_empty() {
            preview.rows.push(PreviewRow { row, cells });
        }
    }

    Ok(preview)
}

/// Keep at most `max` characters (not bytes)
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
