//! In-memory workbook, for callers that already hold grid data and for tests

use super::WorkbookAdapter;
use crate::error::{Result, ScanError};
use crate::reader::workbook::{Cell, CellValue, SheetDimensions, SpreadsheetFormat};
use crate::reference::{CellRef, MergedRange};
use std::collections::HashMap;

/// Worksheet held in memory
#[derive(Debug, Clone)]
pub struct MemorySheet {
    pub name: String,
    pub cells: HashMap<CellRef, CellValue>,
    /// None when merge information is not available for this sheet
    pub merged: Option<Vec<MergedRange>>,
}

impl MemorySheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: HashMap::new(),
            merged: Some(Vec::new()),
        }
    }

    /// Set a cell by A1 reference. Invalid references are ignored.
    pub fn with_value(mut self, cell_ref: &str, value: CellValue) -> Self {
        if let Some(position) = CellRef::parse(cell_ref) {
            self.cells.insert(position, value);
        }
        self
    }

    pub fn with_text(self, cell_ref: &str, text: impl Into<String>) -> Self {
        self.with_value(cell_ref, CellValue::Text(text.into()))
    }

    pub fn with_number(self, cell_ref: &str, number: f64) -> Self {
        self.with_value(cell_ref, CellValue::Number(number))
    }

    /// Add a merged range such as "A1:C1". Invalid ranges are ignored.
    pub fn with_merge(mut self, range: &str) -> Self {
        if let (Some(merged), Some(range)) = (self.merged.as_mut(), MergedRange::parse(range)) {
            merged.push(range);
        }
        self
    }

    pub fn without_merge_info(mut self) -> Self {
        self.merged = None;
        self
    }

    /// Extent of the stored non-empty cells
    pub fn dimensions(&self) -> SheetDimensions {
        let used: Vec<_> = self
            .cells
            .iter()
            .filter(|(_, value)| **value != CellValue::Empty)
            .map(|(position, _)| *position)
            .collect();

        let (Some(min_row), Some(min_col), Some(max_row), Some(max_col)) = (
            used.iter().map(|c| c.row).min(),
            used.iter().map(|c| c.col).min(),
            used.iter().map(|c| c.row).max(),
            used.iter().map(|c| c.col).max(),
        ) else {
            return SheetDimensions::empty();
        };

        SheetDimensions {
            rows: max_row,
            cols: max_col,
            first: Some(CellRef::new(min_row, min_col)),
        }
    }
}

/// Workbook held in memory, tagged with the format it stands for
#[derive(Debug, Clone)]
pub struct MemoryWorkbook {
    format: SpreadsheetFormat,
    sheets: Vec<MemorySheet>,
}

impl MemoryWorkbook {
    pub fn new(format: SpreadsheetFormat) -> Self {
        Self {
            format,
            sheets: Vec::new(),
        }
    }

    pub fn with_sheet(mut self, sheet: MemorySheet) -> Self {
        self.sheets.push(sheet);
        self
    }

    fn sheet(&self, name: &str) -> Result<&MemorySheet> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ScanError::decode("<memory>", format!("sheet '{}' not found", name)))
    }
}

impl WorkbookAdapter for MemoryWorkbook {
    fn format(&self) -> SpreadsheetFormat {
        self.format
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn dimensions(&mut self, sheet: &str) -> Result<SheetDimensions> {
        Ok(self.sheet(sheet)?.dimensions())
    }

    fn cell_at(&mut self, sheet: &str, row: u32, col: u32) -> Result<Cell> {
        let position = CellRef::new(row, col);
        let value = self
            .sheet(sheet)?
            .cells
            .get(&position)
            .cloned()
            .unwrap_or_default();
        Ok(Cell::new(position, value))
    }

    fn merged_ranges(&mut self, sheet: &str) -> Result<Vec<MergedRange>> {
        self.sheet(sheet)?
            .merged
            .clone()
            .ok_or_else(|| ScanError::capability(sheet, "no merge information"))
    }
}
