//! Annotation generators
//!
//! Builders ask the [`AnnotationGeneratorRegistry`] for the annotations of
//! one Java element by naming its [`AnnotatedJavaElementType`] and handing
//! over the model node the element is generated from. The registry runs
//! every generator registered for that element type, in registration order,
//! skipping those whose [`AnnotationGenerator::is_generate_annotation_for`]
//! declines the node, and concatenates the fragments.
//!
//! ```text
//! element type + node
//!        │
//!        ▼
//! ┌────────────────────┐   applicable?   ┌─────────────────────┐
//! │ generators for the │ ──────────────► │ create_annotation() │
//! │ element type       │                 └──────────┬──────────┘
//! └────────────────────┘                            │
//!                                                   ▼
//!                                    fragments in registration order
//! ```
//!
//! Unregistered element types and declining generators contribute nothing;
//! neither is an error. A generator handed a node it cannot handle returns
//! [`GeneratorError::IllegalArgument`].

mod association;
mod attribute;
mod declaration;
mod deprecation;
mod enums;
mod jaxb;
mod rule;
mod table;

pub use association::{AssociationAdderAnnGen, AssociationAnnGen, AssociationRemoverAnnGen};
pub use attribute::{
    AllowedValuesAnnGen, AttributeGetterAnnGen, AttributeSetterAnnGen, DefaultValueAnnGen,
};
pub use declaration::{
    ChangingOverTimeAnnGen, ConfiguredByAnnGen, ConfiguresAnnGen, DocumentedAnnGen,
    PolicyCmptDeclClassAnnGen, ProductCmptDeclClassAnnGen, PublishedInterfaceAnnGen,
    ValidationRulesAnnGen,
};
pub use deprecation::DeprecationAnnGen;
pub use enums::{EnumAttributeAnnGen, EnumTypeAnnGen};
pub use jaxb::JaxbFieldAdapterAnnGen;
pub use rule::ValidationRuleAnnGen;
pub use table::TableStructureAnnGen;

use crate::error::{GeneratorError, GeneratorResult};
use crate::fragment::JavaCodeFragment;
use crate::node::ModelNode;
use indexmap::IndexMap;
use ipsgen_core::GeneratorConfig;
use std::fmt;
use std::sync::Arc;

/// Java elements that carry generated annotations
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
pub enum AnnotatedJavaElementType {
    PolicyCmptDeclClass,
    PolicyCmptDeclClassAttributeField,
    PolicyCmptDeclClassAttributeGetter,
    PolicyCmptDeclClassAttributeSetter,
    PolicyCmptDeclClassAttributeAllowedValues,
    PolicyCmptDeclClassAssociation,
    /// Adder of a to-many or setter of a to-one association.
    PolicyCmptDeclClassAssociationAdder,
    PolicyCmptDeclClassAssociationRemover,
    PolicyCmptValidationRuleMethod,
    ProductCmptDeclClass,
    ProductCmptDeclClassAttributeGetter,
    ProductCmptDeclClassAttributeSetter,
    ProductCmptDeclClassAttributeDefault,
    ProductCmptDeclClassAttributeAllowedValues,
    ProductCmptDeclClassAssociation,
    PublishedInterface,
    EnumClass,
    EnumAttributeGetter,
    TableStructureClass,
    /// Any element generated from a deprecated model element.
    Deprecation,
}

/// Strategy producing annotations for one kind of model node
///
/// Implementations hold configuration at most; one instance serves every
/// build run and every thread.
pub trait AnnotationGenerator: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this generator contributes to `node`. Pure.
    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool;

    /// Annotations for `node`. Only defined when
    /// [`AnnotationGenerator::is_generate_annotation_for`] returned `true`.
    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment>;
}

/// Error for a generator receiving a node kind it does not handle.
pub(crate) fn wrong_node(generator: &str, node: &ModelNode<'_>) -> GeneratorError {
    GeneratorError::illegal_argument(format!(
        "{generator} cannot annotate a {} node",
        node.kind_name()
    ))
}

/// Generators per element type, in registration order
#[derive(Clone, Default)]
pub struct AnnotationGeneratorRegistry {
    generators: IndexMap<AnnotatedJavaElementType, Vec<Arc<dyn AnnotationGenerator>>>,
}

impl AnnotationGeneratorRegistry {
    /// Registry without any generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in generators, honoring the generator settings.
    pub fn with_defaults(config: &GeneratorConfig, base_package: &str) -> Self {
        use AnnotatedJavaElementType::*;

        let mut registry = Self::new();
        let documented = Arc::new(DocumentedAnnGen::new(base_package, &config.locale));

        registry.register(PolicyCmptDeclClass, PolicyCmptDeclClassAnnGen);
        registry.register_shared(PolicyCmptDeclClass, documented.clone());
        registry.register(ProductCmptDeclClass, ProductCmptDeclClassAnnGen);
        registry.register_shared(ProductCmptDeclClass, documented);
        registry.register(PublishedInterface, PublishedInterfaceAnnGen);

        let getter = Arc::new(AttributeGetterAnnGen);
        registry.register_shared(PolicyCmptDeclClassAttributeGetter, getter.clone());
        registry.register_shared(ProductCmptDeclClassAttributeGetter, getter);
        let setter = Arc::new(AttributeSetterAnnGen);
        registry.register_shared(PolicyCmptDeclClassAttributeSetter, setter.clone());
        registry.register_shared(ProductCmptDeclClassAttributeSetter, setter);
        let allowed_values = Arc::new(AllowedValuesAnnGen);
        registry.register_shared(PolicyCmptDeclClassAttributeAllowedValues, allowed_values.clone());
        registry.register_shared(ProductCmptDeclClassAttributeAllowedValues, allowed_values);
        registry.register(ProductCmptDeclClassAttributeDefault, DefaultValueAnnGen);
        if config.generate_jaxb_support {
            registry.register(
                PolicyCmptDeclClassAttributeField,
                JaxbFieldAdapterAnnGen::with_default_adapters(),
            );
        }

        let association = Arc::new(AssociationAnnGen);
        registry.register_shared(PolicyCmptDeclClassAssociation, association.clone());
        registry.register_shared(ProductCmptDeclClassAssociation, association);
        registry.register(PolicyCmptDeclClassAssociationAdder, AssociationAdderAnnGen);
        registry.register(PolicyCmptDeclClassAssociationRemover, AssociationRemoverAnnGen);

        registry.register(PolicyCmptValidationRuleMethod, ValidationRuleAnnGen);
        registry.register(EnumClass, EnumTypeAnnGen);
        registry.register(EnumAttributeGetter, EnumAttributeAnnGen);
        registry.register(TableStructureClass, TableStructureAnnGen);
        registry.register(Deprecation, DeprecationAnnGen);

        registry
    }

    /// Append `generator` to the generators of `element_type`.
    pub fn register<G>(&mut self, element_type: AnnotatedJavaElementType, generator: G)
    where
        G: AnnotationGenerator + 'static,
    {
        self.register_shared(element_type, Arc::new(generator));
    }

    /// Register one instance for several element types.
    pub fn register_shared(
        &mut self,
        element_type: AnnotatedJavaElementType,
        generator: Arc<dyn AnnotationGenerator>,
    ) {
        self.generators
            .entry(element_type)
            .or_default()
            .push(generator);
    }

    pub fn generators_for(
        &self,
        element_type: AnnotatedJavaElementType,
    ) -> &[Arc<dyn AnnotationGenerator>] {
        self.generators
            .get(&element_type)
            .map_or(&[], Vec::as_slice)
    }

    /// All annotations for one element.
    pub fn create_annotations(
        &self,
        element_type: AnnotatedJavaElementType,
        node: &ModelNode<'_>,
    ) -> GeneratorResult<JavaCodeFragment> {
        let mut fragment = JavaCodeFragment::new();
        for generator in self.generators_for(element_type) {
            if generator.is_generate_annotation_for(node) {
                tracing::trace!(
                    generator = generator.name(),
                    element = %element_type,
                    "creating annotation"
                );
                fragment.append(&generator.create_annotation(node)?);
            }
        }
        Ok(fragment)
    }
}

impl fmt::Debug for AnnotationGeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (element_type, generators) in &self.generators {
            let names: Vec<&str> = generators.iter().map(|g| g.name()).collect();
            map.entry(element_type, &names);
        }
        map.finish()
    }
}

#[cfg(test)]
#[path = "annotations/annotations_tests.rs"]
mod annotations_tests;
