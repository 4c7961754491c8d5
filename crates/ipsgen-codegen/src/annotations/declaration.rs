//! Class-level annotations of policy and product component classes

use super::{AnnotationGenerator, wrong_node};
use crate::error::GeneratorResult;
use crate::fragment::{JavaCodeFragment, JavaCodeFragmentBuilder, quote, quoted_string_array};
use crate::node::{GenType, ModelNode};
use crate::runtime;
use ipsgen_core::naming;

fn expect_type<'a>(generator: &str, node: &ModelNode<'a>) -> GeneratorResult<&'a GenType> {
    node.as_type().ok_or_else(|| wrong_node(generator, node))
}

/// `@IpsAttributes` and `@IpsAssociations` listing the type's own parts.
fn parts_annotations(code: &mut JavaCodeFragmentBuilder, ty: &GenType) {
    code.annotation_ln(
        runtime::IPS_ATTRIBUTES,
        Some(&quoted_string_array(&ty.attribute_names())),
    );
    if !ty.associations.is_empty() {
        code.annotation_ln(
            runtime::IPS_ASSOCIATIONS,
            Some(&quoted_string_array(&ty.association_names())),
        );
    }
}

/// Composes the declaration of a policy class: type, parts, the
/// configuring product class, then the validation rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyCmptDeclClassAnnGen;

impl AnnotationGenerator for PolicyCmptDeclClassAnnGen {
    fn name(&self) -> &'static str {
        "PolicyCmptDeclClassAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_type().is_some_and(GenType::is_policy_type)
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let ty = expect_type(self.name(), node)?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation_ln(
            runtime::IPS_POLICY_CMPT_TYPE,
            Some(&format!("name = {}", quote(&ty.qualified_name))),
        );
        parts_annotations(&mut code, ty);

        if ConfiguredByAnnGen.is_generate_annotation_for(node) {
            code.append_fragment(&ConfiguredByAnnGen.create_annotation(node)?);
        }
        if ValidationRulesAnnGen.is_generate_annotation_for(node) {
            code.append_fragment(&ValidationRulesAnnGen.create_annotation(node)?);
        }
        Ok(code.build())
    }
}

/// Composes the declaration of a product class: type, parts, the
/// configured policy class, then changes over time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductCmptDeclClassAnnGen;

impl AnnotationGenerator for ProductCmptDeclClassAnnGen {
    fn name(&self) -> &'static str {
        "ProductCmptDeclClassAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_type().is_some_and(|t| !t.is_policy_type())
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let ty = expect_type(self.name(), node)?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation_ln(
            runtime::IPS_PRODUCT_CMPT_TYPE,
            Some(&format!("name = {}", quote(&ty.qualified_name))),
        );
        parts_annotations(&mut code, ty);

        if ConfiguresAnnGen.is_generate_annotation_for(node) {
            code.append_fragment(&ConfiguresAnnGen.create_annotation(node)?);
        }
        if ChangingOverTimeAnnGen.is_generate_annotation_for(node) {
            code.append_fragment(&ChangingOverTimeAnnGen.create_annotation(node)?);
        }
        Ok(code.build())
    }
}

/// `@IpsConfiguredBy(Product.class)` on configurable policy classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredByAnnGen;

impl AnnotationGenerator for ConfiguredByAnnGen {
    fn name(&self) -> &'static str {
        "ConfiguredByAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_type().is_some_and(GenType::is_configured_by_product)
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let ty = expect_type(self.name(), node)?;
        let product_class = ty.product_class().ok_or_else(|| wrong_node(self.name(), node))?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation(runtime::IPS_CONFIGURED_BY, None)
            .append("(")
            .append_class_name(product_class)
            .append_ln(".class)");
        Ok(code.build())
    }
}

/// `@IpsConfigures(Policy.class)` on product classes configuring policies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguresAnnGen;

impl AnnotationGenerator for ConfiguresAnnGen {
    fn name(&self) -> &'static str {
        "ConfiguresAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_type()
            .is_some_and(GenType::is_configuration_for_policy_cmpt_type)
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let ty = expect_type(self.name(), node)?;
        let policy_class = ty.policy_class().ok_or_else(|| wrong_node(self.name(), node))?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation(runtime::IPS_CONFIGURES, None)
            .append("(")
            .append_class_name(policy_class)
            .append_ln(".class)");
        Ok(code.build())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChangingOverTimeAnnGen;

impl AnnotationGenerator for ChangingOverTimeAnnGen {
    fn name(&self) -> &'static str {
        "ChangingOverTimeAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_type()
            .is_some_and(|t| !t.is_policy_type() && t.changing_over_time)
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        expect_type(self.name(), node)?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation_ln(runtime::IPS_CHANGING_OVER_TIME, None);
        Ok(code.build())
    }
}

/// `@IpsValidationRules({"R1", "R2"})` listing the rules of a policy type
///
/// Rule names appear in the order of the node's rule list. Types without
/// rules get no annotation at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationRulesAnnGen;

impl AnnotationGenerator for ValidationRulesAnnGen {
    fn name(&self) -> &'static str {
        "ValidationRulesAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_type()
            .is_some_and(|t| !t.validation_rules().is_empty())
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let ty = expect_type(self.name(), node)?;
        let names: Vec<&str> = ty
            .validation_rules()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation_ln(runtime::IPS_VALIDATION_RULES, Some(&quoted_string_array(&names)));
        Ok(code.build())
    }
}

/// `@IpsPublishedInterface(implementation = Policy.class)` on published
/// interfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishedInterfaceAnnGen;

impl AnnotationGenerator for PublishedInterfaceAnnGen {
    fn name(&self) -> &'static str {
        "PublishedInterfaceAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_type()
            .is_some_and(|t| t.published_interface.is_some())
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let ty = expect_type(self.name(), node)?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation(runtime::IPS_PUBLISHED_INTERFACE, None)
            .append("(implementation = ")
            .append_class_name(&ty.class_name)
            .append_ln(".class)");
        Ok(code.build())
    }
}

/// `@IpsDocumented` naming the label and description resource bundle
#[derive(Debug, Clone)]
pub struct DocumentedAnnGen {
    bundle_name: String,
    default_locale: String,
}

impl DocumentedAnnGen {
    pub fn new(base_package: &str, default_locale: &str) -> Self {
        Self {
            bundle_name: naming::qualify(base_package, "model-label-and-descriptions"),
            default_locale: default_locale.to_string(),
        }
    }
}

impl AnnotationGenerator for DocumentedAnnGen {
    fn name(&self) -> &'static str {
        "DocumentedAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_type().is_some() && !self.default_locale.is_empty()
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        expect_type(self.name(), node)?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation_ln(
            runtime::IPS_DOCUMENTED,
            Some(&format!(
                "bundleName = {}, defaultLocale = {}",
                quote(&self.bundle_name),
                quote(&self.default_locale)
            )),
        );
        Ok(code.build())
    }
}
