//! Annotations of generated enum classes

use super::{AnnotationGenerator, wrong_node};
use crate::error::GeneratorResult;
use crate::fragment::{JavaCodeFragment, JavaCodeFragmentBuilder, quote, quoted_string_array};
use crate::node::ModelNode;
use crate::runtime;

/// `@IpsEnumType` on enum classes, plus `@IpsExtensibleEnum` for
/// extensible types.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumTypeAnnGen;

impl AnnotationGenerator for EnumTypeAnnGen {
    fn name(&self) -> &'static str {
        "EnumTypeAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_enum_type().is_some()
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let enum_type = node
            .as_enum_type()
            .ok_or_else(|| wrong_node(self.name(), node))?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation_ln(
            runtime::IPS_ENUM_TYPE,
            Some(&format!(
                "name = {}, attributeNames = {}",
                quote(&enum_type.qualified_name),
                quoted_string_array(&enum_type.attribute_names())
            )),
        );
        if enum_type.extensible
            && let Some(content) = &enum_type.enum_content_name
        {
            code.annotation_ln(
                runtime::IPS_EXTENSIBLE_ENUM,
                Some(&format!("enumContentName = {}", quote(content))),
            );
        }
        Ok(code.build())
    }
}

/// `@IpsEnumAttribute` on enum attribute getters; only set flags are
/// written.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumAttributeAnnGen;

impl AnnotationGenerator for EnumAttributeAnnGen {
    fn name(&self) -> &'static str {
        "EnumAttributeAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_enum_attribute().is_some()
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let attribute = node
            .as_enum_attribute()
            .ok_or_else(|| wrong_node(self.name(), node))?;
        let mut params = vec![format!("name = {}", quote(&attribute.name))];
        if attribute.identifier {
            params.push("identifier = true".to_string());
        }
        if attribute.unique {
            params.push("unique = true".to_string());
        }
        if attribute.display_name {
            params.push("displayName = true".to_string());
        }
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation_ln(runtime::IPS_ENUM_ATTRIBUTE, Some(&params.join(", ")));
        Ok(code.build())
    }
}
