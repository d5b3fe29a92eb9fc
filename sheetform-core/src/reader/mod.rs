//! Workbook adapters: one interface over XLSX and XLS readers

use crate::error::{Result, ScanError};
use crate::reference::{CellRef, MergedRange};
use calamine::{Data, Range, Reader};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

pub mod memory;
pub mod workbook;
pub mod xls;
pub mod xlsx;
pub mod xml_parser;

pub use memory::{MemorySheet, MemoryWorkbook};
pub use workbook::{Cell, CellValue, SheetDimensions, SpreadsheetFormat};
pub use xls::XlsAdapter;
pub use xlsx::XlsxAdapter;

/// Format-agnostic view of an opened workbook
///
/// Rows and columns are 1-based for every implementation, whatever the
/// indexing of the underlying reader.
pub trait WorkbookAdapter {
    fn format(&self) -> SpreadsheetFormat;

    /// Sheet names in document order
    fn sheet_names(&self) -> Vec<String>;

    /// True extent of the sheet
    fn dimensions(&mut self, sheet: &str) -> Result<SheetDimensions>;

    /// Cell at a 1-based position; `CellValue::Empty` when blank or outside
    /// the used range
    fn cell_at(&mut self, sheet: &str, row: u32, col: u32) -> Result<Cell>;

    /// Merged ranges in document order
    ///
    /// Returns `ScanError::CapabilityUnavailable` when the merge metadata of
    /// this sheet cannot be obtained.
    fn merged_ranges(&mut self, sheet: &str) -> Result<Vec<MergedRange>>;
}

/// Open a workbook from a file path, picking the adapter from the extension
pub fn open_workbook<P: AsRef<Path>>(path: P) -> Result<Box<dyn WorkbookAdapter>> {
    let path = path.as_ref();
    let format = detect_format(path)?;

    log::info!("Opening {} as {}", path.display(), format);

    match format {
        SpreadsheetFormat::Xlsx => Ok(Box::new(XlsxAdapter::open(path)?)),
        SpreadsheetFormat::Xls => Ok(Box::new(XlsAdapter::open(path)?)),
    }
}

/// Determine the format from the extension and check the file signature
pub fn detect_format(path: &Path) -> Result<SpreadsheetFormat> {
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or_default();

    let format = SpreadsheetFormat::from_extension(ext).ok_or_else(|| {
        ScanError::format(
            path,
            if ext.is_empty() {
                "missing file extension".to_string()
            } else {
                format!("unsupported extension '{}'", ext)
            },
        )
    })?;

    let mut file = File::open(path).map_err(|e| ScanError::format(path, e.to_string()))?;
    let signature = format.signature();
    let mut header = vec![0u8; signature.len()];
    file.read_exact(&mut header)
        .map_err(|_| ScanError::format(path, "file is too short to be a spreadsheet"))?;

    if header != signature {
        return Err(ScanError::format(
            path,
            format!("content does not match the {} format", format),
        ));
    }

    Ok(format)
}

/// Sheet ranges loaded through calamine, kept for repeated cell lookups
#[derive(Default)]
pub(crate) struct SheetCache {
    ranges: HashMap<String, Range<Data>>,
}

impl SheetCache {
    /// Load the range of a sheet once
    pub(crate) fn range<RS, R>(&mut self, reader: &mut R, path: &Path, sheet: &str) -> Result<&Range<Data>>
    where
        RS: Read + Seek,
        R: Reader<RS>,
        R::Error: std::fmt::Display,
    {
        if !self.ranges.contains_key(sheet) {
            let range = reader
                .worksheet_range(sheet)
                .map_err(|e| ScanError::decode(path, format!("sheet '{}': {}", sheet, e)))?;
            log::debug!("Loaded sheet '{}' of {}", sheet, path.display());
            self.ranges.insert(sheet.to_string(), range);
        }
        Ok(&self.ranges[sheet])
    }
}

/// Extent of a calamine range, converted to 1-based dimensions
pub(crate) fn range_dimensions(range: &Range<Data>) -> SheetDimensions {
    if range.is_empty() {
        return SheetDimensions::empty();
    }
    match (range.start(), range.end()) {
        (Some(start), Some(end)) => SheetDimensions::from_zero_based(start, end),
        _ => SheetDimensions::empty(),
    }
}

/// Cell of a calamine range at a 1-based position
pub(crate) fn range_cell(range: &Range<Data>, row: u32, col: u32) -> Cell {
    let position = CellRef::new(row, col);
    if row == 0 || col == 0 {
        return Cell::empty(position);
    }

    let value = range
        .get_value(position.to_zero_based())
        .map(parse_cell_value)
        .unwrap_or_default();

    Cell::new(position, value)
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
