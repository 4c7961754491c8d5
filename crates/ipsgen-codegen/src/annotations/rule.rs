use super::{AnnotationGenerator, wrong_node};
use crate::error::GeneratorResult;
use crate::fragment::{JavaCodeFragment, JavaCodeFragmentBuilder, quote};
use crate::node::ModelNode;
use crate::runtime;

/// `@IpsValidationRule` on rule methods, plus
/// `@IpsConfigurableValidationRule` for rules products can switch off.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationRuleAnnGen;

impl AnnotationGenerator for ValidationRuleAnnGen {
    fn name(&self) -> &'static str {
        "ValidationRuleAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_validation_rule().is_some()
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let rule = node
            .as_validation_rule()
            .ok_or_else(|| wrong_node(self.name(), node))?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation(runtime::IPS_VALIDATION_RULE, None)
            .append(&format!(
                "(name = {}, msgCode = {}, severity = ",
                quote(&rule.name),
                quote(&rule.message_code)
            ))
            .append_class_name(runtime::SEVERITY)
            .append_ln(&format!(".{})", rule.severity_constant()));
        if rule.configured_by_product {
            code.annotation_ln(
                runtime::IPS_CONFIGURABLE_VALIDATION_RULE,
                Some(&format!("defaultActivated = {}", rule.checked_by_default)),
            );
        }
        Ok(code.build())
    }
}
