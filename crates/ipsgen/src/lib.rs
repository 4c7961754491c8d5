//! # ipsgen
//!
//! Model-driven Java code generation for insurance product models.
//!
//! A project is a directory holding `ipsproject.toml` and one TOML file per
//! model object. ipsgen provides:
//! - Value sets (unrestricted, enumeration, range, string length, derived)
//!   with membership, subset and comparison semantics
//! - Validation of the model as severity-tagged messages
//! - Java source generation with runtime metadata annotations
//! - Export of enum values to spreadsheets
//!
//! ## Quick Start
//!
//! ```no_run
//! use ipsgen::prelude::*;
//!
//! let project = IpsProject::load("path/to/project")?;
//! let builders = BuilderSet::with_defaults(project.config());
//! let report = builders.build(&project, &BuildScope::Full);
//! report.write_to("target/generated")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`ipsgen_core`] - Messages, datatypes, configuration, naming
//! - [`ipsgen_valueset`] - Value set model
//! - [`ipsgen_model`] - Design-time object model and project loading
//! - [`ipsgen_codegen`] - Generator model nodes, annotations, builders
//! - [`ipsgen_export`] - Enum export

// Re-export core types
pub use ipsgen_core::{
    DatatypeKind, DatatypeRegistry, GeneratorConfig, IpsProjectConfig, Message, MessageList,
    ObjectProperty, PROJECT_FILE, Severity, ValueDatatype, naming,
};

// Re-export the value set model
pub use ipsgen_valueset::{
    DerivedValueSet, EnumValueSet, RangeValueSet, StringLengthValueSet, UnrestrictedValueSet,
    ValueSet, ValueSetContext, ValueSetError, ValueSetKind, ValueSetOwnerRef,
};

// Re-export the object model
pub use ipsgen_model::{
    Association, AssociationKind, Attribute, AttributeKind, EnumAttribute, EnumContent, EnumType,
    EnumValue, EnumValueCache, EnumValueContainer, IpsObject, IpsProject, ModelError, ModelResult,
    PolicyCmptType, ProductCmptType, TableStructure, ValidationRule, pull_up_enum_attribute,
};

// Re-export generation
pub use ipsgen_codegen::{
    AnnotatedJavaElementType, AnnotationGenerator, AnnotationGeneratorRegistry, ArtifactBuilder,
    BuildReport, BuildScope, BuilderSet, GeneratedFile, GeneratorError, GeneratorModelContext,
    GeneratorResult,
};

// Re-export export
pub use ipsgen_export::{
    CancellationToken, EnumExportOperation, ExportError, ExportResult, OverwritePolicy,
};

pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use ipsgen::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        BuildReport, BuildScope, BuilderSet, CancellationToken, EnumExportOperation,
        EnumValueContainer, IpsObject, IpsProject, IpsProjectConfig, Message, MessageList,
        OverwritePolicy, Severity,
    };
}
