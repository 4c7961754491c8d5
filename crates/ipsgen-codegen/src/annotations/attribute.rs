//! Annotations on attribute accessors

use super::{AnnotationGenerator, wrong_node};
use crate::error::GeneratorResult;
use crate::fragment::{JavaCodeFragment, JavaCodeFragmentBuilder, quote};
use crate::node::{GenAttribute, ModelNode};
use crate::runtime;

fn expect_attribute<'a>(
    generator: &str,
    node: &ModelNode<'a>,
) -> GeneratorResult<&'a GenAttribute> {
    node.as_attribute().ok_or_else(|| wrong_node(generator, node))
}

/// `@IpsAttribute(name, kind, valueSetKind)` on getters.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeGetterAnnGen;

impl AnnotationGenerator for AttributeGetterAnnGen {
    fn name(&self) -> &'static str {
        "AttributeGetterAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_attribute().is_some()
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let attribute = expect_attribute(self.name(), node)?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation(runtime::IPS_ATTRIBUTE, None)
            .append(&format!("(name = {}, kind = ", quote(&attribute.name)))
            .append_class_name(runtime::ATTRIBUTE_KIND)
            .append(&format!(".{}, valueSetKind = ", attribute.kind.java_constant()))
            .append_class_name(runtime::VALUE_SET_KIND)
            .append_ln(&format!(".{})", attribute.value_set_kind().java_constant()));
        Ok(code.build())
    }
}

/// `@IpsAttributeSetter` on setters of changeable attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeSetterAnnGen;

impl AnnotationGenerator for AttributeSetterAnnGen {
    fn name(&self) -> &'static str {
        "AttributeSetterAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_attribute().is_some_and(GenAttribute::is_changeable)
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let attribute = expect_attribute(self.name(), node)?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation_ln(runtime::IPS_ATTRIBUTE_SETTER, Some(&quote(&attribute.name)));
        Ok(code.build())
    }
}

/// `@IpsAllowedValues` on the allowed-values method.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowedValuesAnnGen;

impl AnnotationGenerator for AllowedValuesAnnGen {
    fn name(&self) -> &'static str {
        "AllowedValuesAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_attribute().is_some_and(|a| !a.is_derived())
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let attribute = expect_attribute(self.name(), node)?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation_ln(runtime::IPS_ALLOWED_VALUES, Some(&quote(&attribute.name)));
        Ok(code.build())
    }
}

/// `@IpsDefaultValue` on product getters of configured default values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValueAnnGen;

impl AnnotationGenerator for DefaultValueAnnGen {
    fn name(&self) -> &'static str {
        "DefaultValueAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_attribute()
            .is_some_and(GenAttribute::is_configured_by_product)
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let attribute = expect_attribute(self.name(), node)?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation_ln(runtime::IPS_DEFAULT_VALUE, Some(&quote(&attribute.name)));
        Ok(code.build())
    }
}
