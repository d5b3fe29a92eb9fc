//! sheetform-core: structural scanner for paper-form spreadsheets
//!
//! Opens XLSX and XLS workbooks behind one adapter interface and reports,
//! per sheet, the filled cells, a sample of empty cells (candidate input
//! fields), the merged ranges and the cells that look like field headers.

pub mod classifier;
pub mod config;
pub mod error;
pub mod reader;
pub mod reference;
pub mod report;
pub mod scanner;

use rayon::prelude::*;
use std::path::{Path, PathBuf};

pub use classifier::HeaderClassifier;
pub use config::ScanConfig;
pub use error::{FailureKind, Result, ScanError};
pub use reader::{SpreadsheetFormat, WorkbookAdapter, open_workbook};
pub use report::{FileFailure, FileReport, RunReport, SheetReport};
pub use scanner::SheetPreview;

/// Main analyzer interface
pub struct FormAnalyzer {
    config: ScanConfig,
    classifier: HeaderClassifier,
}

impl FormAnalyzer {
    /// Create a new analyzer with default configuration
    pub fn new() -> Self {
        Self::from_valid_config(ScanConfig::default())
    }

    /// Create a new analyzer with custom configuration, rejecting invalid ones
    pub fn with_config(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: ScanConfig) -> Self {
        let classifier = HeaderClassifier::from_config(&config);
        Self { config, classifier }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Analyze one spreadsheet file
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<FileReport> {
        let path = path.as_ref();
        let mut adapter = open_workbook(path)?;
        self.analyze_workbook(path, adapter.as_mut())
    }

    /// Analyze an already opened workbook; every sheet is scanned in order
    pub fn analyze_workbook(&self, path: &Path, adapter: &mut dyn WorkbookAdapter) -> Result<FileReport> {
        let mut sheets = Vec::new();
        for name in adapter.sheet_names() {
            sheets.push(scanner::scan_sheet(adapter, &name, &self.config, &self.classifier)?);
        }
        Ok(report::assemble_file(path, adapter.format(), sheets))
    }

    /// Analyze files in order. A file that fails is recorded and the run
    /// goes on with the next one.
    pub fn analyze_files<P>(&self, paths: &[P]) -> RunReport
    where
        P: AsRef<Path> + Sync,
    {
        let analyze = |path: &P| {
            let path = path.as_ref();
            let outcome = self.analyze_file(path);
            if let Err(e) = &outcome {
                log::warn!("Skipping {}: {}", path.display(), e);
            }
            (path.to_path_buf(), outcome)
        };

        // collect() on an indexed parallel iterator keeps input order
        let outcomes: Vec<(PathBuf, Result<FileReport>)> = if self.config.parallel {
            paths.par_iter().map(analyze).collect()
        } else {
            paths.iter().map(analyze).collect()
        };

        report::assemble_run(outcomes)
    }

    /// Row-by-row preview of every non-empty sheet of a file
    pub fn preview_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<SheetPreview>> {
        let mut adapter = open_workbook(path.as_ref())?;
        let mut previews = Vec::new();

        for name in adapter.sheet_names() {
            if adapter.dimensions(&name)?.is_empty() {
                continue;
            }
            previews.push(scanner::preview_sheet(adapter.as_mut(), &name, &self.config)?);
        }

        Ok(previews)
    }
}

impl Default for FormAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
