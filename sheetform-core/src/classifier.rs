//! Cell classification: filled vs. empty, and the header keyword heuristic

use crate::config::ScanConfig;
use crate::reader::CellValue;

/// A cell is filled when its value is present and not blank after trimming
pub fn is_filled(value: &CellValue) -> bool {
    !value.is_blank()
}

/// Keyword-based header detection for the first rows of a sheet
///
/// Matching is a case-insensitive substring test, not a whole-word match:
/// "si" matches inside "revision" and "no" inside "nombre".
#[derive(Debug, Clone)]
pub struct HeaderClassifier {
    keywords: Vec<String>,
    header_rows: u32,
}

impl HeaderClassifier {
    pub fn new<I, S>(keywords: I, header_rows: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            header_rows,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(&config.keywords, config.header_rows)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn header_rows(&self) -> u32 {
        self.header_rows
    }

    /// Header predicate for a textual cell at a 1-based row
    pub fn is_header_candidate(&self, row: u32, text: &str) -> bool {
        if row == 0 || row > self.header_rows {
            return false;
        }
        let lower = text.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }

    /// Keywords found in the text, in keyword-list order
    pub fn matched_keywords(&self, text: &str) -> Vec<&str> {
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .filter(|k| lower.contains(k.as_str()))
            .map(|k| k.as_str())
            .collect()
    }
}

impl Default for HeaderClassifier {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}
