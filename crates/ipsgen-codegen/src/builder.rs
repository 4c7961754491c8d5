//! Artifact builders
//!
//! Each builder turns one kind of model object into generated files. A build
//! asks every builder [`ArtifactBuilder::is_builder_for`] an object and lets
//! the applicable ones produce their files. Incremental builds additionally
//! ask [`ArtifactBuilder::artifacts_for`] which objects a builder must
//! regenerate after a change; that lookup follows configuration links
//! explicitly, e.g. a changed product component type makes the policy class
//! builder regenerate the configured policy class.

mod enum_class;
mod enum_content_xml;
mod policy_class;
mod product_class;
mod published_interface;
mod table_class;

pub use enum_class::EnumClassBuilder;
pub use enum_content_xml::{EnumContentXmlBuilder, enum_content_xml};
pub use policy_class::PolicyCmptClassBuilder;
pub use product_class::ProductCmptClassBuilder;
pub use table_class::TableStructureClassBuilder;

use crate::annotations::{AnnotatedJavaElementType, AnnotationGeneratorRegistry};
use crate::compilation_unit::{CompilationUnit, GeneratedFile};
use crate::error::GeneratorResult;
use crate::fragment::JavaCodeFragmentBuilder;
use crate::node::{GeneratorModelContext, ModelNode};
use ipsgen_model::{IpsObject, IpsProject};

/// Everything a builder needs during one build run
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    pub nodes: &'a GeneratorModelContext<'a>,
    pub annotations: &'a AnnotationGeneratorRegistry,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        nodes: &'a GeneratorModelContext<'a>,
        annotations: &'a AnnotationGeneratorRegistry,
    ) -> Self {
        Self { nodes, annotations }
    }

    pub fn project(&self) -> &'a IpsProject {
        self.nodes.project()
    }

    /// Append the annotations of one element, followed by `@Deprecated`
    /// when the node is deprecated.
    pub(crate) fn annotate(
        &self,
        code: &mut JavaCodeFragmentBuilder,
        element_type: AnnotatedJavaElementType,
        node: ModelNode<'_>,
    ) -> GeneratorResult<()> {
        code.append_fragment(&self.annotations.create_annotations(element_type, &node)?);
        code.append_fragment(
            &self
                .annotations
                .create_annotations(AnnotatedJavaElementType::Deprecation, &node)?,
        );
        Ok(())
    }
}

/// Produces the generated files of one kind of model object
pub trait ArtifactBuilder: Send + Sync {
    /// Name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Whether this builder generates files for `object` itself.
    fn is_builder_for(&self, object: &IpsObject) -> bool;

    /// Objects whose artifacts this builder must regenerate when `object`
    /// changed. Includes `object` itself when the builder is for it.
    fn artifacts_for(&self, object: &IpsObject, project: &IpsProject) -> Vec<String>;

    /// Generate the files for the object named `qualified_name`.
    fn build(
        &self,
        qualified_name: &str,
        ctx: &BuildContext<'_>,
    ) -> GeneratorResult<Vec<GeneratedFile>>;
}

/// Builder whose artifacts are Java compilation units
pub trait JavaSourceFileBuilder: ArtifactBuilder {
    fn compilation_units(
        &self,
        qualified_name: &str,
        ctx: &BuildContext<'_>,
    ) -> GeneratorResult<Vec<CompilationUnit>>;
}

/// Render the compilation units of a Java builder into files.
pub(crate) fn java_files<B>(
    builder: &B,
    qualified_name: &str,
    ctx: &BuildContext<'_>,
) -> GeneratorResult<Vec<GeneratedFile>>
where
    B: JavaSourceFileBuilder + ?Sized,
{
    Ok(builder
        .compilation_units(qualified_name, ctx)?
        .iter()
        .map(|unit| GeneratedFile::from_unit(unit, qualified_name, builder.name()))
        .collect())
}

/// `/** text */` block; nothing for empty text.
pub(crate) fn javadoc(code: &mut JavaCodeFragmentBuilder, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    code.append_ln("/**");
    for line in text.lines() {
        if line.trim().is_empty() {
            code.append_ln(" *");
        } else {
            code.append_ln(&format!(" * {}", line.trim_end()));
        }
    }
    code.append_ln(" */");
}

#[cfg(test)]
#[path = "builder/builder_tests.rs"]
mod builder_tests;
