use super::{AnnotationGenerator, wrong_node};
use crate::error::GeneratorResult;
use crate::fragment::{JavaCodeFragment, JavaCodeFragmentBuilder, quote, quoted_string_array};
use crate::node::ModelNode;
use crate::runtime;

/// `@IpsTableStructure(name, type, columns)` on table classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableStructureAnnGen;

impl AnnotationGenerator for TableStructureAnnGen {
    fn name(&self) -> &'static str {
        "TableStructureAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_table_structure().is_some()
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let table = node
            .as_table_structure()
            .ok_or_else(|| wrong_node(self.name(), node))?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation(runtime::IPS_TABLE_STRUCTURE, None)
            .append(&format!("(name = {}, type = ", quote(&table.qualified_name)))
            .append_class_name(runtime::TABLE_STRUCTURE_KIND)
            .append_ln(&format!(
                ".{}, columns = {})",
                table.kind_constant(),
                quoted_string_array(&table.column_names())
            ));
        Ok(code.build())
    }
}
