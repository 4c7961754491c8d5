//! Error types for exports

use ipsgen_model::ModelError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Error type for export operations
///
/// Problems with the exported model are not errors; they are reported as
/// messages. These variants interrupt an export that already started or
/// refuse to start one.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Target exists and overwriting was not confirmed
    #[error("{} already exists, overwriting was not confirmed", path.display())]
    TargetExists { path: PathBuf },

    /// The caller cancelled the export
    #[error("export to {} cancelled after {rows} rows", path.display())]
    Cancelled { path: PathBuf, rows: usize },

    /// File system error
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The spreadsheet could not be written
    #[error("failed to write spreadsheet {}: {message}", path.display())]
    Spreadsheet { path: PathBuf, message: String },

    /// Model lookup failed
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ExportError {
    /// Whether the export ended without touching the target file.
    pub fn target_untouched(&self) -> bool {
        matches!(
            self,
            ExportError::TargetExists { .. } | ExportError::Cancelled { .. }
        )
    }
}
