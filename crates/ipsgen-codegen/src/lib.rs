//! ipsgen-codegen - Java source generation from the design-time model
//!
//! This crate turns an [`ipsgen_model::IpsProject`] into Java sources and
//! resources:
//! - [`GeneratorModelContext`] builds read-only generator model nodes
//!   ([`GenType`], [`GenEnumType`], [`GenTableStructure`]) per build run
//! - [`AnnotationGeneratorRegistry`] maps each [`AnnotatedJavaElementType`]
//!   to the [`AnnotationGenerator`]s that annotate it
//! - [`ArtifactBuilder`]s compose annotations and code into files
//! - [`BuilderSet`] drives a build over a [`BuildScope`] and reports the
//!   result as a [`BuildReport`]
//!
//! # Example
//!
//! ```
//! use ipsgen_codegen::{BuildScope, BuilderSet};
//! use ipsgen_core::IpsProjectConfig;
//! use ipsgen_model::{Attribute, IpsProject, PolicyCmptType};
//!
//! let mut project = IpsProject::new(IpsProjectConfig::new("demo", "org.example"));
//! let mut policy = PolicyCmptType::new("home.HomePolicy");
//! policy.attributes.push(Attribute::new("premium", "Integer"));
//! project.add_object(policy).unwrap();
//!
//! let builders = BuilderSet::with_defaults(project.config());
//! let report = builders.build(&project, &BuildScope::Full);
//!
//! let file = report.file("org/example/home/HomePolicy.java").unwrap();
//! assert!(file.content.contains("@IpsPolicyCmptType(name = \"home.HomePolicy\")"));
//! ```

mod annotations;
mod build;
mod builder;
mod compilation_unit;
mod error;
mod fragment;
mod jvm_types;
mod node;
mod value_set_code;

pub mod runtime;

pub use annotations::{
    AllowedValuesAnnGen, AnnotatedJavaElementType, AnnotationGenerator,
    AnnotationGeneratorRegistry, AssociationAdderAnnGen, AssociationAnnGen,
    AssociationRemoverAnnGen, AttributeGetterAnnGen, AttributeSetterAnnGen,
    ChangingOverTimeAnnGen, ConfiguredByAnnGen, ConfiguresAnnGen, DefaultValueAnnGen,
    DeprecationAnnGen, DocumentedAnnGen, EnumAttributeAnnGen, EnumTypeAnnGen,
    JaxbFieldAdapterAnnGen, PolicyCmptDeclClassAnnGen, ProductCmptDeclClassAnnGen,
    PublishedInterfaceAnnGen, TableStructureAnnGen, ValidationRuleAnnGen, ValidationRulesAnnGen,
};
pub use build::{AbortedArtifact, BuildReport, BuildScope, BuilderSet};
pub use builder::{
    ArtifactBuilder, BuildContext, EnumClassBuilder, EnumContentXmlBuilder,
    JavaSourceFileBuilder, PolicyCmptClassBuilder, ProductCmptClassBuilder,
    TableStructureClassBuilder, enum_content_xml,
};
pub use compilation_unit::{CompilationUnit, GeneratedFile};
pub use error::{GeneratorError, GeneratorResult};
pub use fragment::{JavaCodeFragment, JavaCodeFragmentBuilder, concat, quote, quoted_string_array};
pub use jvm_types::{JvmType, java_literal, map_datatype};
pub use node::{
    GenAssociation, GenAttribute, GenColumn, GenEnumAttribute, GenEnumType,
    GenInverseAssociation, GenTableStructure, GenType, GenTypeKind, GenValidationRule,
    GeneratorModelContext, ModelNode,
};
pub use value_set_code::{value_set_expression, value_set_type};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnnotatedJavaElementType, AnnotationGenerator, AnnotationGeneratorRegistry,
        ArtifactBuilder, BuildReport, BuildScope, BuilderSet, GeneratedFile, GeneratorError,
        GeneratorModelContext, GeneratorResult, JavaCodeFragment, ModelNode,
    };
}
