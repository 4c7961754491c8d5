//! Generate command implementation

use anyhow::{Context, Result};
use ipsgen_codegen::{BuildScope, BuilderSet};
use ipsgen_core::Severity;
use ipsgen_model::IpsProject;
use std::path::{Path, PathBuf};

/// Build the project and write the generated files below `output`.
///
/// Returns whether the build succeeded without validation errors and
/// without aborted artifacts. Files of successful builders are written
/// either way.
pub fn run(project: Option<PathBuf>, output: &Path, changed: &[String]) -> Result<bool> {
    let dir = crate::project_dir(project);
    println!("Generating project: {}", dir.display());

    let project = IpsProject::load(&dir)
        .with_context(|| format!("Failed to load project: {}", dir.display()))?;
    let builders = BuilderSet::with_defaults(project.config());

    let scope = if changed.is_empty() {
        BuildScope::Full
    } else {
        let scope = BuildScope::affected_by(changed, &project, &builders);
        println!("  {} changed, {} to regenerate", changed.len(), scope.resolve(&project).len());
        scope
    };

    let report = builders.build(&project, &scope);
    let written = report
        .write_to(output)
        .with_context(|| format!("Failed to write generated files to {}", output.display()))?;

    println!("✓ Files written: {written} ({})", output.display());
    if !report.skipped.is_empty() {
        println!("✗ Skipped: {}", report.skipped.join(", "));
    }
    for aborted in &report.aborted {
        println!("✗ Aborted: {aborted}");
    }
    if !report.messages.is_empty() {
        println!(
            "\n{} errors, {} warnings:",
            report.messages.count(Severity::Error),
            report.messages.count(Severity::Warning)
        );
        crate::print_messages(&report.messages);
    }

    Ok(report.is_success())
}
