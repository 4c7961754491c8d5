//! Check command implementation

use anyhow::{Context, Result};
use ipsgen_core::Severity;
use ipsgen_model::IpsProject;
use std::path::PathBuf;

/// Validate the project. Returns `false` when any error was reported.
pub fn run(project: Option<PathBuf>) -> Result<bool> {
    let dir = crate::project_dir(project);
    println!("Checking project: {}", dir.display());

    let project = IpsProject::load(&dir)
        .with_context(|| format!("Failed to load project: {}", dir.display()))?;
    let messages = project.validate();

    println!(
        "✓ Project: {} ({})",
        project.config().project.name,
        project.config().project.base_package
    );
    println!("✓ Objects: {}", project.len());

    if messages.is_empty() {
        println!("\nProject is valid!");
        return Ok(true);
    }

    println!(
        "\n{} errors, {} warnings, {} infos:",
        messages.count(Severity::Error),
        messages.count(Severity::Warning),
        messages.count(Severity::Info)
    );
    crate::print_messages(&messages);
    Ok(!messages.contains_errors())
}
