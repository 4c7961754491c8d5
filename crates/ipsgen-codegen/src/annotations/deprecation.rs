use super::AnnotationGenerator;
use crate::error::GeneratorResult;
use crate::fragment::{JavaCodeFragment, JavaCodeFragmentBuilder};
use crate::node::ModelNode;
use crate::runtime;

/// `@Deprecated` on anything generated from a deprecated element.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeprecationAnnGen;

impl AnnotationGenerator for DeprecationAnnGen {
    fn name(&self) -> &'static str {
        "DeprecationAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.is_deprecated()
    }

    fn create_annotation(&self, _node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation_ln(runtime::DEPRECATED, None);
        Ok(code.build())
    }
}
