use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a dataset from loading.
///
/// There is no partial success: either every row loads and validates, or the
/// caller gets one of these and nothing else.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Structural problems: unreadable file, missing header, missing column,
    /// ragged rows.
    #[error("format error in {}: {kind}", path.display())]
    Format { path: PathBuf, kind: FormatKind },

    /// A value that breaks a field invariant.
    #[error("validation error in {} at row {row}, column {column}: {reason} (got {value:?})", path.display())]
    Validation {
        path: PathBuf,
        /// 1-based data row, header excluded.
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum FormatKind {
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("no header row")]
    MissingHeader,
    #[error("missing required column {0:?}")]
    MissingColumn(&'static str),
    #[error("malformed row: {0}")]
    Csv(#[from] csv::Error),
}

impl ReportError {
    pub fn format(path: impl Into<PathBuf>, kind: impl Into<FormatKind>) -> Self {
        ReportError::Format {
            path: path.into(),
            kind: kind.into(),
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, ReportError::Format { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ReportError::Validation { .. })
    }
}

pub type Result<T, E = ReportError> = std::result::Result<T, E>;
