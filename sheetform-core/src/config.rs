//! Scan configuration: window caps, sampling limits and header keywords

use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default header keywords (Spanish form vocabulary)
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "nombre",
    "fecha",
    "firma",
    "observ",
    "item",
    "descripcion",
    "responsable",
    "cargo",
    "hora",
    "proyecto",
    "actividad",
    "equipo",
    "herramienta",
    "estado",
    "si",
    "no",
    "n/a",
];

/// Limits and keyword set used by the scanner and the header classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Rows walked for structural capture
    pub max_rows: u32,
    /// Columns walked for structural capture and previews
    pub max_cols: u32,
    /// Rows eligible for header candidates
    pub header_rows: u32,
    /// Rows eligible for the empty-cell sample
    pub empty_sample_rows: u32,
    /// Maximum number of sampled empty cells per sheet
    pub empty_sample_cap: usize,
    /// Rows shown by the detailed preview
    pub display_rows: u32,
    /// Characters kept per cell in the detailed preview
    pub display_value_chars: usize,
    /// Characters kept per filled cell value in reports
    pub value_max_chars: usize,
    pub keywords: Vec<String>,
    /// Analyze files on a thread pool
    pub parallel: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_rows: 50,
            max_cols: 20,
            header_rows: 5,
            empty_sample_rows: 30,
            empty_sample_cap: 100,
            display_rows: 60,
            display_value_chars: 40,
            value_max_chars: 100,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            parallel: false,
        }
    }
}

impl ScanConfig {
    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| ScanError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ScanError::Config(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // An empty keyword is a substring of every value
        if let Some(pos) = self.keywords.iter().position(|k| k.trim().is_empty()) {
            return Err(ScanError::Config(format!(
                "keyword #{} is empty; every text cell would match",
                pos + 1
            )));
        }

        if self.value_max_chars == 0 {
            return Err(ScanError::Config(
                "value_max_chars must be greater than 0".to_string(),
            ));
        }

        if self.display_value_chars == 0 {
            return Err(ScanError::Config(
                "display_value_chars must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.max_rows, 50);
        assert_eq!(config.max_cols, 20);
        assert_eq!(config.header_rows, 5);
        assert_eq!(config.empty_sample_rows, 30);
        assert_eq!(config.empty_sample_cap, 100);
        assert_eq!(config.display_rows, 60);
        assert_eq!(config.keywords.len(), 17);
        assert!(config.keywords.contains(&"n/a".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ScanConfig::from_toml_str(
            r#"
max_rows = 10
keywords = ["nombre", "firma"]
"#,
        )
        .unwrap();

        assert_eq!(config.max_rows, 10);
        assert_eq!(config.max_cols, 20);
        assert_eq!(config.keywords, vec!["nombre", "firma"]);
        assert!(!config.parallel);
    }

    #[test]
    fn test_invalid_toml() {
        let result = ScanConfig::from_toml_str("max_rows = \"many\"");
        assert!(matches!(result, Err(ScanError::Config(_))));
    }

    #[test]
    fn test_validation() {
        let mut config = ScanConfig::default();
        config.empty_sample_cap = 0;
        config.max_rows = 0;
        assert!(config.validate().is_ok());

        let mut bad = ScanConfig::default();
        bad.keywords.push("  ".to_string());
        assert!(bad.validate().is_err());

        let mut bad = ScanConfig::default();
        bad.value_max_chars = 0;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheetform.toml");
        fs::write(&path, "header_rows = 3\nparallel = true\n").unwrap();

        let config = ScanConfig::from_file(&path).unwrap();
        assert_eq!(config.header_rows, 3);
        assert!(config.parallel);

        let missing = ScanConfig::from_file(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ScanError::Io(_))));
    }
}
