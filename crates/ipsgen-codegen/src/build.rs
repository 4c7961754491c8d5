//! Build orchestration
//!
//! A [`BuilderSet`] validates the project, then hands every object in the
//! [`BuildScope`] to each applicable builder. Objects with validation errors
//! are skipped. A builder failing on one object aborts that artifact only;
//! the failure is recorded in the [`BuildReport`] and the build continues.

use crate::annotations::AnnotationGeneratorRegistry;
use crate::builder::{
    ArtifactBuilder, BuildContext, EnumClassBuilder, EnumContentXmlBuilder,
    PolicyCmptClassBuilder, ProductCmptClassBuilder, TableStructureClassBuilder,
};
use crate::compilation_unit::GeneratedFile;
use crate::error::GeneratorResult;
use crate::node::GeneratorModelContext;
use indexmap::IndexSet;
use ipsgen_core::{IpsProjectConfig, MessageList, Severity};
use ipsgen_model::{IpsObject, IpsProject};
use std::fmt;
use std::path::Path;
use std::time::Instant;

// ============================================================================
// Scope
// ============================================================================

/// Objects a build generates artifacts for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildScope {
    /// Every object of the project.
    Full,
    /// The named objects, in insertion order.
    Objects(IndexSet<String>),
}

impl BuildScope {
    pub fn objects<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BuildScope::Objects(names.into_iter().map(Into::into).collect())
    }

    /// Everything the builders must regenerate after `changed` objects
    /// changed, following configuration links and type hierarchies.
    ///
    /// Names of objects no longer in the project are ignored.
    pub fn affected_by<S: AsRef<str>>(
        changed: &[S],
        project: &IpsProject,
        builders: &BuilderSet,
    ) -> Self {
        let mut affected = IndexSet::new();
        for name in changed {
            let Some(object) = project.object(name.as_ref()) else {
                tracing::debug!(object = name.as_ref(), "changed object no longer exists");
                continue;
            };
            for builder in builders.builders() {
                affected.extend(builder.artifacts_for(object, project));
            }
        }
        BuildScope::Objects(affected)
    }

    /// Qualified names in build order.
    pub fn resolve(&self, project: &IpsProject) -> Vec<String> {
        match self {
            BuildScope::Full => project
                .objects()
                .map(|o| o.qualified_name().to_string())
                .collect(),
            BuildScope::Objects(names) => names.iter().cloned().collect(),
        }
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        match self {
            BuildScope::Full => true,
            BuildScope::Objects(names) => names.contains(qualified_name),
        }
    }
}

// ============================================================================
// Report
// ============================================================================

/// A builder failing on one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbortedArtifact {
    pub object: String,
    pub builder: &'static str,
    pub error: String,
}

impl fmt::Display for AbortedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.object, self.builder, self.error)
    }
}

/// Outcome of one build run
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub files: Vec<GeneratedFile>,
    /// Validation messages of the whole project.
    pub messages: MessageList,
    pub aborted: Vec<AbortedArtifact>,
    /// Objects not built because of validation errors or because they do
    /// not exist.
    pub skipped: Vec<String>,
}

impl BuildReport {
    /// No validation errors and no aborted artifacts.
    pub fn is_success(&self) -> bool {
        !self.messages.contains_errors() && self.aborted.is_empty()
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<&GeneratedFile> {
        let path = path.as_ref();
        self.files.iter().find(|f| f.path == path)
    }

    pub fn files_for<'a>(&'a self, object: &'a str) -> impl Iterator<Item = &'a GeneratedFile> {
        self.files.iter().filter(move |f| f.object == object)
    }

    /// Write every generated file below `output_dir`. Returns the number of
    /// files written.
    pub fn write_to(&self, output_dir: impl AsRef<Path>) -> GeneratorResult<usize> {
        let output_dir = output_dir.as_ref();
        for file in &self.files {
            let path = file.write_to(output_dir)?;
            tracing::trace!(path = %path.display(), "wrote generated file");
        }
        Ok(self.files.len())
    }
}

// ============================================================================
// Builder set
// ============================================================================

/// The builders and annotation generators of one project
pub struct BuilderSet {
    builders: Vec<Box<dyn ArtifactBuilder>>,
    annotations: AnnotationGeneratorRegistry,
}

impl BuilderSet {
    /// Builder set without builders.
    pub fn new(annotations: AnnotationGeneratorRegistry) -> Self {
        Self {
            builders: Vec::new(),
            annotations,
        }
    }

    /// All built-in builders with the default annotation generators.
    pub fn with_defaults(config: &IpsProjectConfig) -> Self {
        let mut set = Self::new(AnnotationGeneratorRegistry::with_defaults(
            &config.generator,
            &config.project.base_package,
        ));
        set.add_builder(PolicyCmptClassBuilder);
        set.add_builder(ProductCmptClassBuilder);
        set.add_builder(EnumClassBuilder);
        set.add_builder(EnumContentXmlBuilder);
        set.add_builder(TableStructureClassBuilder);
        set
    }

    pub fn add_builder<B>(&mut self, builder: B)
    where
        B: ArtifactBuilder + 'static,
    {
        self.builders.push(Box::new(builder));
    }

    pub fn builders(&self) -> impl Iterator<Item = &dyn ArtifactBuilder> {
        self.builders.iter().map(|b| b.as_ref())
    }

    pub fn annotations(&self) -> &AnnotationGeneratorRegistry {
        &self.annotations
    }

    /// Run all applicable builders on one object. Failures are returned
    /// next to the files of the builders that succeeded.
    pub fn build_object(
        &self,
        object: &IpsObject,
        ctx: &BuildContext<'_>,
    ) -> (Vec<GeneratedFile>, Vec<AbortedArtifact>) {
        let name = object.qualified_name();
        let mut files = Vec::new();
        let mut aborted = Vec::new();

        for builder in self.builders().filter(|b| b.is_builder_for(object)) {
            match builder.build(name, ctx) {
                Ok(generated) => {
                    tracing::debug!(
                        object = name,
                        builder = builder.name(),
                        files = generated.len(),
                        "generated artifact"
                    );
                    files.extend(generated);
                }
                Err(err) => {
                    if err.is_contract_violation() {
                        tracing::error!(
                            object = name,
                            builder = builder.name(),
                            error = %err,
                            "generator contract violated, artifact aborted"
                        );
                    } else {
                        tracing::error!(
                            object = name,
                            builder = builder.name(),
                            error = %err,
                            "artifact aborted"
                        );
                    }
                    aborted.push(AbortedArtifact {
                        object: name.to_string(),
                        builder: builder.name(),
                        error: err.to_string(),
                    });
                }
            }
        }
        (files, aborted)
    }

    /// Validate `project` and generate the artifacts of every object in
    /// `scope`.
    pub fn build(&self, project: &IpsProject, scope: &BuildScope) -> BuildReport {
        let started = Instant::now();
        let messages = project.validate();
        let nodes = GeneratorModelContext::new(project);
        let ctx = BuildContext::new(&nodes, &self.annotations);

        let mut report = BuildReport::default();
        for name in scope.resolve(project) {
            let Some(object) = project.object(&name) else {
                tracing::warn!(object = %name, "object not found, skipped");
                report.skipped.push(name);
                continue;
            };
            if has_errors_for(&messages, &name) {
                tracing::warn!(object = %name, "object has validation errors, skipped");
                report.skipped.push(name);
                continue;
            }
            let (files, aborted) = self.build_object(object, &ctx);
            report.files.extend(files);
            report.aborted.extend(aborted);
        }
        report.messages = messages;

        tracing::info!(
            files = report.files.len(),
            aborted = report.aborted.len(),
            skipped = report.skipped.len(),
            errors = report.messages.count(Severity::Error),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "build finished"
        );
        report
    }
}

impl fmt::Debug for BuilderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.builders().map(|b| b.name()).collect();
        f.debug_struct("BuilderSet")
            .field("builders", &names)
            .field("annotations", &self.annotations)
            .finish()
    }
}

/// Error messages about the object itself or one of its parts
/// (`Type.attribute`).
fn has_errors_for(messages: &MessageList, qualified_name: &str) -> bool {
    let part_prefix = format!("{qualified_name}.");
    messages.iter().any(|m| {
        m.severity == Severity::Error
            && m.invalid_properties
                .iter()
                .any(|p| p.object == qualified_name || p.object.starts_with(&part_prefix))
    })
}

#[cfg(test)]
#[path = "build/build_tests.rs"]
mod build_tests;
