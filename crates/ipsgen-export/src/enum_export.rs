//! Export of enum values to an xlsx file
//!
//! One sheet, one column per enum attribute (literal name and inherited
//! copies included), optionally preceded by a header row of attribute
//! names. The workbook is written to a temporary file next to the target
//! and moved onto the target only after the final flush, so a failed or
//! cancelled export never leaves a partial file behind.

use crate::cancel::CancellationToken;
use crate::error::{ExportError, ExportResult};
use ipsgen_core::{DatatypeKind, Decimal, Message, MessageList};
use ipsgen_model::{EnumType, EnumValueContainer, IpsProject};
use std::path::{Path, PathBuf};
use std::time::Instant;
use umya_spreadsheet::Worksheet;

/// Most columns an exported sheet can hold.
pub const MAX_COLUMNS: usize = 255;

/// Rows written between two cancellation checks.
pub const ROW_BATCH_SIZE: usize = 100;

const SHEET_NAME: &str = "Sheet1";

/// Message codes reported by enum exports
pub mod codes {
    pub const ENUM_TYPE_NOT_FOUND: &str = "ENUMEXPORT-ENUM_TYPE_NOT_FOUND";
    pub const NO_VALUES_ALLOWED: &str = "ENUMEXPORT-CONTAINER_CANNOT_HOLD_VALUES";
    pub const TOO_MANY_COLUMNS: &str = "ENUMEXPORT-TOO_MANY_COLUMNS";
    pub const ROW_WIDTH_MISMATCH: &str = "ENUMEXPORT-ROW_WIDTH_MISMATCH";
    pub const EXPORTED: &str = "ENUMEXPORT-EXPORTED";
}

/// What to do when the target file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Fail with [`ExportError::TargetExists`] before writing anything.
    #[default]
    Refuse,
    /// The caller confirmed that the target may be replaced.
    Confirmed,
}

/// Writes the values of one enum type or enum content to a spreadsheet
pub struct EnumExportOperation<'a> {
    container: &'a dyn EnumValueContainer,
    target: PathBuf,
    null_representation: String,
    export_column_header_row: bool,
    overwrite: OverwritePolicy,
    progress: Option<&'a dyn Fn(usize)>,
}

impl<'a> EnumExportOperation<'a> {
    /// Export with a header row, nulls written as empty cells and without
    /// permission to overwrite.
    pub fn new(container: &'a dyn EnumValueContainer, target: impl Into<PathBuf>) -> Self {
        Self {
            container,
            target: target.into(),
            null_representation: String::new(),
            export_column_header_row: true,
            overwrite: OverwritePolicy::Refuse,
            progress: None,
        }
    }

    #[must_use]
    pub fn with_null_representation(mut self, null_representation: impl Into<String>) -> Self {
        self.null_representation = null_representation.into();
        self
    }

    #[must_use]
    pub fn with_column_header_row(mut self, export_column_header_row: bool) -> Self {
        self.export_column_header_row = export_column_header_row;
        self
    }

    #[must_use]
    pub fn with_overwrite(mut self, overwrite: OverwritePolicy) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Called after each written batch with the number of values written
    /// so far.
    #[must_use]
    pub fn with_progress(mut self, progress: &'a dyn Fn(usize)) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn null_representation(&self) -> &str {
        &self.null_representation
    }

    pub fn exports_column_header_row(&self) -> bool {
        self.export_column_header_row
    }

    /// Checks run before anything is written.
    pub fn validate(&self, project: &IpsProject) -> MessageList {
        let mut messages = MessageList::new();
        let name = self.container.qualified_name();

        let Some(enum_type) = self.container.find_enum_type(project) else {
            messages.add(
                Message::error(
                    codes::ENUM_TYPE_NOT_FOUND,
                    format!(
                        "The enum type {} of {name} does not exist.",
                        self.container.enum_type_name()
                    ),
                )
                .with_property(name, "enumType"),
            );
            return messages;
        };

        if !self.container.is_capable_of_containing_values(project) {
            messages.add(
                Message::error(
                    codes::NO_VALUES_ALLOWED,
                    format!("{name} cannot contain values, there is nothing to export."),
                )
                .with_object(name),
            );
        }

        let columns = enum_type.column_count();
        if columns > MAX_COLUMNS {
            messages.add(
                Message::error(
                    codes::TOO_MANY_COLUMNS,
                    format!(
                        "The enum type {} has {columns} attributes, but at most {MAX_COLUMNS} columns can be exported.",
                        enum_type.qualified_name
                    ),
                )
                .with_property(enum_type.qualified_name.as_str(), "attributes"),
            );
        }

        let mismatched = self
            .container
            .enum_values()
            .iter()
            .filter(|v| v.cells().len() != columns)
            .count();
        if mismatched > 0 {
            messages.add(
                Message::warning(
                    codes::ROW_WIDTH_MISMATCH,
                    format!(
                        "{mismatched} values of {name} do not have {columns} cells; missing cells are exported as null."
                    ),
                )
                .with_property(name, "values"),
            );
        }

        messages
    }

    /// Run the export.
    ///
    /// Model problems are returned as messages and leave the target
    /// untouched. On success the messages end with an info message naming
    /// the number of exported values.
    pub fn run(
        &self,
        project: &IpsProject,
        cancel: &CancellationToken,
    ) -> ExportResult<MessageList> {
        let started = Instant::now();
        if self.target.exists() && self.overwrite != OverwritePolicy::Confirmed {
            return Err(ExportError::TargetExists {
                path: self.target.clone(),
            });
        }

        let mut messages = self.validate(project);
        if messages.contains_errors() {
            tracing::warn!(
                container = self.container.qualified_name(),
                errors = messages.len(),
                "enum export not started"
            );
            return Ok(messages);
        }
        let Some(enum_type) = self.container.find_enum_type(project) else {
            return Ok(messages);
        };

        let mut book = umya_spreadsheet::new_file();
        let sheet = book
            .get_sheet_by_name_mut(SHEET_NAME)
            .ok_or_else(|| self.spreadsheet_error(format!("sheet {SHEET_NAME} missing")))?;
        let rows = self.fill_sheet(sheet, enum_type, project, cancel)?;

        if cancel.is_cancelled() {
            return Err(self.cancelled(rows));
        }
        self.persist(&book)?;

        tracing::info!(
            container = self.container.qualified_name(),
            target = %self.target.display(),
            rows,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "enum values exported"
        );
        messages.add(
            Message::info(
                codes::EXPORTED,
                format!(
                    "Exported {rows} values of {} to {}.",
                    self.container.qualified_name(),
                    self.target.display()
                ),
            )
            .with_object(self.container.qualified_name()),
        );
        Ok(messages)
    }

    /// Write header and values, checking for cancellation before each
    /// batch. Returns the number of value rows written.
    fn fill_sheet(
        &self,
        sheet: &mut Worksheet,
        enum_type: &EnumType,
        project: &IpsProject,
        cancel: &CancellationToken,
    ) -> ExportResult<usize> {
        let kinds: Vec<Option<DatatypeKind>> = enum_type
            .attributes
            .iter()
            .map(|a| {
                project
                    .enum_attribute_datatype(&enum_type.qualified_name, &a.name)
                    .and_then(|d| project.resolve_datatype(d))
                    .map(|d| d.kind)
            })
            .collect();

        let mut row = 1u32;
        if self.export_column_header_row {
            for (col, attribute) in enum_type.attributes.iter().enumerate() {
                sheet
                    .get_cell_mut((col as u32 + 1, row))
                    .set_value(attribute.name.clone());
            }
            row += 1;
        }

        let mut written = 0;
        for batch in self.container.enum_values().chunks(ROW_BATCH_SIZE) {
            if cancel.is_cancelled() {
                tracing::info!(
                    container = self.container.qualified_name(),
                    rows = written,
                    "enum export cancelled"
                );
                return Err(self.cancelled(written));
            }
            for value in batch {
                for (col, kind) in kinds.iter().enumerate() {
                    let cell = sheet.get_cell_mut((col as u32 + 1, row));
                    match value.cell(col) {
                        None => {
                            cell.set_value(self.null_representation.clone());
                        }
                        Some(text) => match kind.and_then(|k| number(k, text)) {
                            Some(n) => {
                                cell.set_value_number(n);
                            }
                            None => {
                                cell.set_value(text.to_string());
                            }
                        },
                    }
                }
                row += 1;
                written += 1;
            }
            tracing::trace!(rows = written, "enum export batch written");
            if let Some(progress) = self.progress {
                progress(written);
            }
        }
        Ok(written)
    }

    fn persist(&self, book: &umya_spreadsheet::Spreadsheet) -> ExportResult<()> {
        let dir = match self.target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = tempfile::Builder::new()
            .prefix(".ipsgen-export")
            .suffix(".xlsx")
            .tempfile_in(dir)
            .map_err(|source| ExportError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        umya_spreadsheet::writer::xlsx::write(book, temp.path())
            .map_err(|err| self.spreadsheet_error(err.to_string()))?;
        temp.persist(&self.target).map_err(|err| ExportError::Io {
            path: self.target.clone(),
            source: err.error,
        })?;
        Ok(())
    }

    fn cancelled(&self, rows: usize) -> ExportError {
        ExportError::Cancelled {
            path: self.target.clone(),
            rows,
        }
    }

    fn spreadsheet_error(&self, message: String) -> ExportError {
        ExportError::Spreadsheet {
            path: self.target.clone(),
            message,
        }
    }
}

/// Numbers a spreadsheet cell holds exactly are written as numeric cells,
/// everything else as text.
fn number(kind: DatatypeKind, text: &str) -> Option<f64> {
    let text = text.trim();
    let exact = match kind {
        k if k.is_integral() => Decimal::from(text.parse::<i64>().ok()?),
        DatatypeKind::Decimal => Decimal::from_str_exact(text).ok()?,
        _ => return None,
    };
    let value = text.parse::<f64>().ok()?;
    (Decimal::from_str_exact(&value.to_string()).ok()? == exact).then_some(value)
}
