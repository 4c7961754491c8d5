//! ipsgen-export - Export of model data to external files
//!
//! This crate provides:
//! - [`EnumExportOperation`] writing the values of an enum type or enum
//!   content to an xlsx sheet
//! - [`CancellationToken`] for aborting an export between row batches
//!
//! Model problems found before the export are reported as
//! [`ipsgen_core::MessageList`]; only refusals (existing target, cancelled)
//! and I/O failures are [`ExportError`]s.

mod cancel;
mod enum_export;
mod error;

pub use cancel::CancellationToken;
pub use enum_export::{EnumExportOperation, MAX_COLUMNS, OverwritePolicy, ROW_BATCH_SIZE, codes};
pub use error::{ExportError, ExportResult};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{CancellationToken, EnumExportOperation, ExportError, ExportResult, OverwritePolicy};
}
