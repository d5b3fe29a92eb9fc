//! XLS adapter for legacy BIFF workbooks
//!
//! calamine decodes MERGEDCELLS records while loading each BIFF8 sheet, so
//! merge information needs no extra opt-in. A sheet name calamine did not
//! load reports the capability as unavailable.

use super::{SheetCache, WorkbookAdapter, range_cell, range_dimensions};
use crate::error::{Result, ScanError};
use crate::reader::workbook::{Cell, SheetDimensions, SpreadsheetFormat};
use crate::reference::MergedRange;
use calamine::{Reader, Xls, open_workbook};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub struct XlsAdapter {
    path: PathBuf,
    workbook: Xls<BufReader<File>>,
    cache: SheetCache,
}

impl XlsAdapter {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let workbook: Xls<BufReader<File>> =
            open_workbook(path).map_err(|e| ScanError::decode(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            workbook,
            cache: SheetCache::default(),
        })
    }
}

impl WorkbookAdapter for XlsAdapter {
    fn format(&self) -> SpreadsheetFormat {
        SpreadsheetFormat::Xls
    }

    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    fn dimensions(&mut self, sheet: &str) -> Result<SheetDimensions> {
        let range = self.cache.range(&mut self.workbook, &self.path, sheet)?;
        Ok(range_dimensions(range))
    }

    fn cell_at(&mut self, sheet: &str, row: u32, col: u32) -> Result<Cell> {
        let range = self.cache.range(&mut self.workbook, &self.path, sheet)?;
        Ok(range_cell(range, row, col))
    }

    fn merged_ranges(&mut self, sheet: &str) -> Result<Vec<MergedRange>> {
        // Dimensions are 0-based and inclusive
        self.workbook
            .worksheet_merge_cells(sheet)
            .map(|dims| {
                dims.iter()
                    .map(|d| MergedRange::from_zero_based(d.start, d.end))
                    .collect()
            })
            .ok_or_else(|| ScanError::capability(sheet, "no merge table for this sheet"))
    }
}
