//! Workbook data structures shared by every adapter

use crate::reference::{CellRef, column_letters};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported spreadsheet formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadsheetFormat {
    /// Office Open XML workbook (zip container)
    Xlsx,
    /// Legacy BIFF workbook (OLE2 compound document)
    Xls,
}

impl SpreadsheetFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" => Some(SpreadsheetFormat::Xlsx),
            "xls" => Some(SpreadsheetFormat::Xls),
            _ => None,
        }
    }

    /// Leading bytes every file of this format starts with
    pub fn signature(&self) -> &'static [u8] {
        match self {
            SpreadsheetFormat::Xlsx => b"PK\x03\x04",
            SpreadsheetFormat::Xls => &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1],
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SpreadsheetFormat::Xlsx => "xlsx",
            SpreadsheetFormat::Xls => "xls",
        }
    }
}

impl fmt::Display for SpreadsheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True extent of a sheet, 1-based
///
/// `rows` and `cols` count from A1 up to the last used cell, so a sheet whose
/// data ends at T50 has 50 rows and 20 columns. An empty sheet is 0x0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetDimensions {
    pub rows: u32,
    pub cols: u32,
    /// First used cell, when the sheet has any
    pub first: Option<CellRef>,
}

impl SheetDimensions {
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            first: None,
        }
    }

    /// Extent starting at A1
    pub fn new(rows: u32, cols: u32) -> Self {
        if rows == 0 || cols == 0 {
            return Self::empty();
        }
        Self {
            rows,
            cols,
            first: Some(CellRef::new(1, 1)),
        }
    }

    /// Extent from 0-based first and last used positions
    pub fn from_zero_based(start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            rows: end.0 + 1,
            cols: end.1 + 1,
            first: Some(CellRef::from_zero_based(start.0, start.1)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Used range in A1 notation (e.g., "A1:T50"); None for an empty sheet
    pub fn range_string(&self) -> Option<String> {
        let first = self.first?;
        if self.is_empty() {
            return None;
        }
        Some(format!(
            "{}:{}{}",
            first,
            column_letters(self.cols),
            self.rows
        ))
    }
}

/// Cell value types
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Boolean(bool),
    /// Error literal such as `#DIV/0!`
    Error(String),
}

impl CellValue {
    pub fn is_text(&self) -> bool {
        matches!(self, CellValue::Text(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Check if the cell has no value or only whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) | CellValue::Error(s) => s.trim().is_empty(),
            CellValue::Number(_) | CellValue::Boolean(_) => false,
        }
    }

    /// Text shown in reports
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) | CellValue::Error(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Boolean(b) => b.to_string(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Represents a single cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub position: CellRef,
    pub value: CellValue,
}

impl Cell {
    pub fn new(position: CellRef, value: CellValue) -> Self {
        Self { position, value }
    }

    pub fn empty(position: CellRef) -> Self {
        Self::new(position, CellValue::Empty)
    }
}
