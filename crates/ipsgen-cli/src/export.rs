//! Export-enum command implementation

use anyhow::{Context, Result, bail};
use ipsgen_export::{CancellationToken, EnumExportOperation, OverwritePolicy};
use ipsgen_model::{EnumValueContainer, IpsProject};
use std::path::PathBuf;

pub struct ExportArgs {
    pub project: Option<PathBuf>,
    pub enum_name: String,
    pub output: PathBuf,
    pub null_representation: String,
    pub header: bool,
    pub force: bool,
}

/// Export one enum type or enum content. Returns `false` when the export
/// reported errors and wrote nothing.
pub fn run(args: ExportArgs) -> Result<bool> {
    let dir = crate::project_dir(args.project);
    let project = IpsProject::load(&dir)
        .with_context(|| format!("Failed to load project: {}", dir.display()))?;

    let container: &dyn EnumValueContainer = match (
        project.enum_type(&args.enum_name),
        project.enum_content(&args.enum_name),
    ) {
        (Some(enum_type), _) => enum_type as &dyn EnumValueContainer,
        (None, Some(content)) => content as &dyn EnumValueContainer,
        (None, None) => bail!("No enum type or enum content named {}", args.enum_name),
    };

    println!("Exporting {} to {}", args.enum_name, args.output.display());

    let overwrite = if args.force {
        OverwritePolicy::Confirmed
    } else {
        OverwritePolicy::Refuse
    };
    let messages = EnumExportOperation::new(container, &args.output)
        .with_null_representation(args.null_representation)
        .with_column_header_row(args.header)
        .with_overwrite(overwrite)
        .run(&project, &CancellationToken::new())
        .with_context(|| format!("Export of {} failed", args.enum_name))?;

    crate::print_messages(&messages);
    Ok(!messages.contains_errors())
}
