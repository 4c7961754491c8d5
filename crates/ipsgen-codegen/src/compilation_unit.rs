//! Java compilation units and generated files

use crate::error::{GeneratorError, GeneratorResult};
use crate::fragment::JavaCodeFragment;
use ipsgen_core::naming;
use std::fs;
use std::path::{Path, PathBuf};

/// One top-level Java type with its package and imports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    qualified_name: String,
    body: JavaCodeFragment,
}

impl CompilationUnit {
    /// `body` holds the type declaration including its annotations.
    pub fn new(qualified_name: impl Into<String>, body: JavaCodeFragment) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            body,
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn package(&self) -> &str {
        naming::package_of(&self.qualified_name)
    }

    /// Path of the source file relative to the output root.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.package().split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.java", naming::simple_name(&self.qualified_name)));
        path
    }

    /// Full source text. Imports from the unit's own package are dropped.
    pub fn render(&self) -> String {
        let mut code = String::new();
        let package = self.package();

        if !package.is_empty() {
            code.push_str(&format!("package {package};\n\n"));
        }

        let imports: Vec<&String> = self
            .body
            .imports()
            .iter()
            .filter(|import| naming::package_of(import) != package)
            .collect();
        for import in &imports {
            code.push_str(&format!("import {import};\n"));
        }
        if !imports.is_empty() {
            code.push('\n');
        }

        code.push_str(self.body.source());
        code
    }
}

/// A file produced by a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative to the output root.
    pub path: PathBuf,
    pub content: String,
    /// Model object the file was generated for.
    pub object: String,
    /// Name of the producing builder.
    pub builder: &'static str,
}

impl GeneratedFile {
    pub fn from_unit(unit: &CompilationUnit, object: &str, builder: &'static str) -> Self {
        Self {
            path: unit.relative_path(),
            content: unit.render(),
            object: object.to_string(),
            builder,
        }
    }

    /// Write below `output_dir`, creating directories as needed.
    pub fn write_to(&self, output_dir: &Path) -> GeneratorResult<PathBuf> {
        let target = output_dir.join(&self.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| GeneratorError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        fs::write(&target, &self.content).map_err(|source| GeneratorError::Io {
            path: target.display().to_string(),
            source,
        })?;
        Ok(target)
    }
}
