//! Table structure classes: the table itself and its row class

use super::{ArtifactBuilder, BuildContext, JavaSourceFileBuilder, java_files, javadoc};
use crate::annotations::AnnotatedJavaElementType as Element;
use crate::compilation_unit::{CompilationUnit, GeneratedFile};
use crate::error::{GeneratorError, GeneratorResult};
use crate::fragment::{JavaCodeFragment, JavaCodeFragmentBuilder};
use crate::node::{GenColumn, GenTableStructure, ModelNode};
use crate::runtime;
use ipsgen_core::naming;
use ipsgen_model::{IpsObject, IpsProject};

#[derive(Debug, Clone, Copy, Default)]
pub struct TableStructureClassBuilder;

impl ArtifactBuilder for TableStructureClassBuilder {
    fn name(&self) -> &'static str {
        "TableStructureClassBuilder"
    }

    fn is_builder_for(&self, object: &IpsObject) -> bool {
        matches!(object, IpsObject::TableStructure(_))
    }

    fn artifacts_for(&self, object: &IpsObject, _project: &IpsProject) -> Vec<String> {
        if self.is_builder_for(object) {
            vec![object.qualified_name().to_string()]
        } else {
            Vec::new()
        }
    }

    fn build(
        &self,
        qualified_name: &str,
        ctx: &BuildContext<'_>,
    ) -> GeneratorResult<Vec<GeneratedFile>> {
        java_files(self, qualified_name, ctx)
    }
}

impl JavaSourceFileBuilder for TableStructureClassBuilder {
    fn compilation_units(
        &self,
        qualified_name: &str,
        ctx: &BuildContext<'_>,
    ) -> GeneratorResult<Vec<CompilationUnit>> {
        let table = ctx.nodes.gen_table_structure(qualified_name)?;
        let row_class = naming::qualify(table.package(), &table.row_class_name());
        Ok(vec![
            CompilationUnit::new(table.class_name.clone(), table_class(&table, ctx)?),
            CompilationUnit::new(row_class, row_class_body(&table)),
        ])
    }
}

fn table_class(table: &GenTableStructure, ctx: &BuildContext<'_>) -> GeneratorResult<JavaCodeFragment> {
    let simple = table.simple_class_name();
    let row = table.row_class_name();
    let mut code = JavaCodeFragmentBuilder::new();

    javadoc(&mut code, &format!("Table structure {}.", table.qualified_name));
    ctx.annotate(&mut code, Element::TableStructureClass, ModelNode::TableStructure(table))?;
    code.append_ln(&format!("public class {simple} {{")).indent();

    code.newline()
        .append("private final ")
        .append_class_name(runtime::LIST)
        .append(&format!("<{row}> rows = new "))
        .append_class_name(runtime::ARRAY_LIST)
        .append_ln("<>();");

    code.newline()
        .append("public ")
        .append_class_name(runtime::LIST)
        .append_ln(&format!("<{row}> getAllRows() {{"))
        .indent()
        .append("return ")
        .append_class_name(runtime::COLLECTIONS)
        .append_ln(".unmodifiableList(rows);")
        .outdent()
        .append_ln("}");

    code.newline()
        .append_ln(&format!("public void addRow({row} row) {{"))
        .indent()
        .append_ln("rows.add(row);")
        .outdent()
        .append_ln("}");

    if let Some(key) = table.unique_keys.first() {
        let columns = key
            .iter()
            .map(|name| {
                table.column(name).ok_or_else(|| {
                    GeneratorError::illegal_state(format!(
                        "unique key of {} names unknown column {name}",
                        table.qualified_name
                    ))
                })
            })
            .collect::<GeneratorResult<Vec<&GenColumn>>>()?;
        find_row_method(&mut code, &row, &columns);
    }

    code.outdent().append_ln("}");
    Ok(code.build())
}

/// Linear lookup by the columns of the first unique key.
fn find_row_method(code: &mut JavaCodeFragmentBuilder, row: &str, columns: &[&GenColumn]) {
    code.newline();
    javadoc(code, "Returns the row matching the given key, null if there is none.");
    code.append(&format!("public {row} findRow("));
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            code.append(", ");
        }
        code.append_class_name(column.jvm_type.java_type(true))
            .append(&format!(" {}", column.name));
    }
    code.append_ln(") {")
        .indent()
        .append_ln(&format!("for ({row} row : rows) {{"))
        .indent()
        .append("if (");
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            code.append(" && ");
        }
        code.append_class_name(runtime::OBJECTS)
            .append(&format!(".equals(row.{}(), {})", column.getter_name(), column.name));
    }
    code.append_ln(") {")
        .indent()
        .append_ln("return row;")
        .outdent()
        .append_ln("}")
        .outdent()
        .append_ln("}")
        .append_ln("return null;")
        .outdent()
        .append_ln("}");
}

fn row_class_body(table: &GenTableStructure) -> JavaCodeFragment {
    let row = table.row_class_name();
    let mut code = JavaCodeFragmentBuilder::new();

    javadoc(&mut code, &format!("Row of the table structure {}.", table.qualified_name));
    code.append_ln(&format!("public class {row} {{")).indent();

    for column in &table.columns {
        code.newline()
            .append("private final ")
            .append_class_name(column.jvm_type.java_type(true))
            .append_ln(&format!(" {};", column.name));
    }

    code.newline().append(&format!("public {row}("));
    for (i, column) in table.columns.iter().enumerate() {
        if i > 0 {
            code.append(", ");
        }
        code.append_class_name(column.jvm_type.java_type(true))
            .append(&format!(" {}", column.name));
    }
    code.append_ln(") {").indent();
    for column in &table.columns {
        code.append_ln(&format!("this.{0} = {0};", column.name));
    }
    code.outdent().append_ln("}");

    for column in &table.columns {
        code.newline()
            .append("public ")
            .append_class_name(column.jvm_type.java_type(true))
            .append_ln(&format!(" {}() {{", column.getter_name()))
            .indent()
            .append_ln(&format!("return {};", column.name))
            .outdent()
            .append_ln("}");
    }

    code.outdent().append_ln("}");
    code.build()
}
