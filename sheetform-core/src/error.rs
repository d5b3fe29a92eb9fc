//! Error types for opening and scanning workbooks

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while opening, reading or scanning a workbook
#[derive(Error, Debug)]
pub enum ScanError {
    /// Extension or content does not match a supported format, or the file
    /// is missing/unreadable
    #[error("unsupported or unreadable file {}: {reason}", path.display())]
    Format { path: PathBuf, reason: String },

    /// The spreadsheet library could not parse the bytes
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// Merge metadata is not obtainable for this sheet. Callers degrade to an
    /// empty merged range list.
    #[error("merge information unavailable for sheet '{sheet}': {reason}")]
    CapabilityUnavailable { sheet: String, reason: String },

    /// Invalid scan configuration
    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;

/// Failure category recorded for a file that could not be analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Format,
    Decode,
    Other,
}

impl ScanError {
    pub(crate) fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ScanError::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ScanError::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn capability(sheet: &str, reason: impl Into<String>) -> Self {
        ScanError::CapabilityUnavailable {
            sheet: sheet.to_string(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ScanError::Format { .. } => FailureKind::Format,
            ScanError::Decode { .. } => FailureKind::Decode,
            _ => FailureKind::Other,
        }
    }
}

impl FailureKind {
    pub fn as_str(&self) -> &str {
        match self {
            FailureKind::Format => "format",
            FailureKind::Decode => "decode",
            FailureKind::Other => "other",
        }
    }
}
