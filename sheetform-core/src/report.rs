//! Structural reports: per sheet, per file and per run

use crate::error::{FailureKind, Result, ScanError};
use crate::reader::{SheetDimensions, SpreadsheetFormat};
use crate::reference::{CellRef, MergedRange};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Filled cell as reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEntry {
    #[serde(rename = "ref")]
    pub reference: String,
    /// Display text, truncated to the configured length
    pub value: String,
    pub row: u32,
    pub col: u32,
}

impl CellEntry {
    pub fn new(position: CellRef, value: impl Into<String>) -> Self {
        Self {
            reference: position.to_string(),
            value: value.into(),
            row: position.row,
            col: position.col,
        }
    }

    pub fn position(&self) -> CellRef {
        CellRef::new(self.row, self.col)
    }
}

/// Blank cell as reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyCell {
    #[serde(rename = "ref")]
    pub reference: String,
    pub row: u32,
    pub col: u32,
}

impl EmptyCell {
    pub fn new(position: CellRef) -> Self {
        Self {
            reference: position.to_string(),
            row: position.row,
            col: position.col,
        }
    }
}

/// Capped sample of blank cells in the scan window
///
/// `cells` is not an inventory: only the first blank cells in row-major
/// order, within the sample row limit, are kept. `total_in_window` counts
/// every blank cell the scan walked over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyCellSample {
    pub cells: Vec<EmptyCell>,
    pub total_in_window: usize,
    /// True when `cells` holds every blank cell of the scan window
    pub complete: bool,
}

impl EmptyCellSample {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Filled cell in a header row whose text matched the keyword heuristic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCandidate {
    #[serde(flatten)]
    pub cell: CellEntry,
    pub matched_keywords: Vec<String>,
}

/// Structure of one sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetReport {
    pub name: String,
    /// Used range such as "A1:T50", None for an empty sheet
    pub dimensions: Option<String>,
    pub max_row: u32,
    pub max_column: u32,
    pub merged_cells: Vec<MergedRange>,
    pub filled_cells: Vec<CellEntry>,
    pub empty_cells: EmptyCellSample,
    pub headers: Vec<HeaderCandidate>,
}

/// Cells collected by the scanner for one sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetScan {
    pub filled: Vec<CellEntry>,
    pub empty: EmptyCellSample,
    pub headers: Vec<HeaderCandidate>,
}

/// Structure of one workbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub filename: String,
    pub path: PathBuf,
    pub format: SpreadsheetFormat,
    pub sheets: Vec<SheetReport>,
}

/// File that could not be analyzed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    /// Index of the file in the input list
    pub position: usize,
    pub filename: String,
    pub path: PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

/// Result of a run over an ordered list of files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Successful files, in input order
    pub files: Vec<FileReport>,
    /// Failed files, in input order
    pub failures: Vec<FileFailure>,
}

impl RunReport {
    pub fn total_files(&self) -> usize {
        self.files.len() + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON (UTF-8, non-ASCII kept as is)
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json_pretty()?;
        fs::write(path, json)?;
        Ok(())
    }
}

pub fn assemble_sheet(
    name: &str,
    dimensions: SheetDimensions,
    merged_cells: Vec<MergedRange>,
    scan: SheetScan,
) -> SheetReport {
    SheetReport {
        name: name.to_string(),
        dimensions: dimensions.range_string(),
        max_row: dimensions.rows,
        max_column: dimensions.cols,
        merged_cells,
        filled_cells: scan.filled,
        empty_cells: scan.empty,
        headers: scan.headers,
    }
}

pub fn assemble_file(path: &Path, format: SpreadsheetFormat, sheets: Vec<SheetReport>) -> FileReport {
    FileReport {
        filename: file_name(path),
        path: path.to_path_buf(),
        format,
        sheets,
    }
}

/// Split per-file outcomes into reports and failures, keeping input order
pub fn assemble_run<I>(outcomes: I) -> RunReport
where
    I: IntoIterator<Item = (PathBuf, Result<FileReport>)>,
{
    let mut run = RunReport::default();

    for (position, (path, outcome)) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(report) => run.files.push(report),
            Err(error) => run.failures.push(failure(position, &path, &error)),
        }
    }

    run
}

fn failure(position: usize, path: &Path, error: &ScanError) -> FileFailure {
    FileFailure {
        position,
        filename: file_name(path),
        path: path.to_path_buf(),
        kind: error.kind(),
        message: error.to_string(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
