//! XLSX adapter: calamine for cell values, the zip container for merges

use super::xml_parser::{self, XmlPartError};
use super::{SheetCache, WorkbookAdapter, range_cell, range_dimensions};
use crate::error::{Result, ScanError};
use crate::reader::workbook::{Cell, SheetDimensions, SpreadsheetFormat};
use crate::reference::MergedRange;
use calamine::{Reader, Xlsx, open_workbook};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

pub struct XlsxAdapter {
    path: PathBuf,
    workbook: Xlsx<BufReader<File>>,
    archive: ZipArchive<BufReader<File>>,
    /// Sheet name -> worksheet part path, or why it could not be resolved
    sheet_parts: std::result::Result<HashMap<String, String>, String>,
    cache: SheetCache,
}

impl XlsxAdapter {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let workbook: Xlsx<BufReader<File>> =
            open_workbook(path).map_err(|e| ScanError::decode(path, e))?;

        let file = File::open(path).map_err(|e| ScanError::format(path, e.to_string()))?;
        let mut archive =
            ZipArchive::new(BufReader::new(file)).map_err(|e| ScanError::decode(path, e))?;

        let sheet_parts = xml_parser::resolve_sheet_paths(&mut archive)
            .map(|paths| paths.into_iter().collect())
            .map_err(|e| e.to_string());

        Ok(Self {
            path: path.to_path_buf(),
            workbook,
            archive,
            sheet_parts,
            cache: SheetCache::default(),
        })
    }
}

impl WorkbookAdapter for XlsxAdapter {
    fn format(&self) -> SpreadsheetFormat {
        SpreadsheetFormat::Xlsx
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
        let part = match &self.sheet_parts {
            Ok(parts) => parts
                .get(sheet)
                .cloned()
                .ok_or_else(|| ScanError::capability(sheet, "sheet not listed in workbook.xml"))?,
            Err(reason) => return Err(ScanError::capability(sheet, reason.clone())),
        };

        match xml_parser::extract_merged_cells_from_xlsx(&mut self.archive, &part) {
            Ok(merged) => Ok(merged),
            Err(e @ XmlPartError::MissingPart(_)) => Err(ScanError::capability(sheet, e.to_string())),
            Err(e) => Err(ScanError::decode(&self.path, e)),
        }
    }
}
