//! Import command implementation
//!
//! A workspace is a directory with a `workspace.toml` listing its projects.
//! Imported projects are either referenced where they are or copied into
//! the workspace directory.

use anyhow::{Context, Result, bail};
use ipsgen_core::{IpsProjectConfig, PROJECT_FILE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name of the workspace description inside a workspace directory.
pub const WORKSPACE_FILE: &str = "workspace.toml";

/// workspace.toml structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Workspace {
    #[serde(default, rename = "project")]
    pub projects: Vec<WorkspaceProject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceProject {
    pub name: String,

    /// Relative to the workspace for copies, absolute for references.
    pub path: PathBuf,

    #[serde(default)]
    pub copied: bool,
}

impl Workspace {
    /// Load the workspace description, or an empty workspace when the
    /// directory has none yet.
    pub fn load(workspace_dir: &Path) -> Result<Self> {
        let path = workspace_dir.join(WORKSPACE_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read workspace: {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse workspace: {}", path.display()))
    }

    pub fn save(&self, workspace_dir: &Path) -> Result<()> {
        let path = workspace_dir.join(WORKSPACE_FILE);
        let content = toml::to_string_pretty(self).context("Failed to serialize workspace")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write workspace: {}", path.display()))
    }

    pub fn project(&self, name: &str) -> Option<&WorkspaceProject> {
        self.projects.iter().find(|p| p.name == name)
    }
}

/// Check that `dir` holds a project and return its configuration.
pub fn check_project_dir(dir: &Path) -> Result<IpsProjectConfig> {
    if !dir.exists() {
        bail!("Project directory does not exist: {}", dir.display());
    }
    if !dir.is_dir() {
        bail!("Not a directory: {}", dir.display());
    }
    let config_path = dir.join(PROJECT_FILE);
    if !config_path.is_file() {
        bail!("{} is missing in {}", PROJECT_FILE, dir.display());
    }
    IpsProjectConfig::from_file(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))
}

/// Add the project at `dir` to the workspace at `workspace_dir`.
pub fn run(dir: &Path, copy: bool, workspace_dir: &Path) -> Result<WorkspaceProject> {
    println!("Importing project: {}", dir.display());

    let config = check_project_dir(dir)?;
    let name = config.project.name.clone();

    std::fs::create_dir_all(workspace_dir)
        .with_context(|| format!("Failed to create workspace: {}", workspace_dir.display()))?;
    let mut workspace = Workspace::load(workspace_dir)?;
    if workspace.project(&name).is_some() {
        bail!("The workspace already contains a project named {name}");
    }

    let entry = if copy {
        let target = workspace_dir.join(&name);
        if target.exists() {
            bail!("Directory already exists: {}", target.display());
        }
        let files = copy_tree(dir, &target)?;
        println!("  Copied {files} files to {}", target.display());
        WorkspaceProject {
            name: name.clone(),
            path: PathBuf::from(&name),
            copied: true,
        }
    } else {
        let path = dir
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", dir.display()))?;
        WorkspaceProject {
            name: name.clone(),
            path,
            copied: false,
        }
    };

    workspace.projects.push(entry.clone());
    workspace.save(workspace_dir)?;
    tracing::info!(project = %name, copied = copy, "project imported");

    println!("✓ Project {name} added to {}", workspace_dir.join(WORKSPACE_FILE).display());
    Ok(entry)
}

/// Copy every file below `from` to `to`. Returns the number of files.
fn copy_tree(from: &Path, to: &Path) -> Result<usize> {
    let mut files = 0;
    for entry in WalkDir::new(from) {
        let entry = entry.with_context(|| format!("Failed to walk {}", from.display()))?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .with_context(|| format!("{} is outside {}", entry.path().display(), from.display()))?;
        let target = to.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            std::fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
            files += 1;
        }
    }
    Ok(files)
}
