//! Enum type classes
//!
//! Concrete, closed enum types become Java enums with one constant per
//! value. Abstract enum types become interfaces declaring the attribute
//! getters. Extensible types become final classes whose built-in values are
//! constants; further values come from enum contents at runtime.

use super::{ArtifactBuilder, BuildContext, JavaSourceFileBuilder, java_files, javadoc};
use crate::annotations::AnnotatedJavaElementType as Element;
use crate::compilation_unit::{CompilationUnit, GeneratedFile};
use crate::error::GeneratorResult;
use crate::fragment::{JavaCodeFragment, JavaCodeFragmentBuilder};
use crate::jvm_types::java_literal;
use crate::node::{GenEnumAttribute, GenEnumType, ModelNode};
use crate::runtime;
use ipsgen_core::DatatypeKind;
use ipsgen_model::{IpsObject, IpsProject};

#[derive(Debug, Clone, Copy, Default)]
pub struct EnumClassBuilder;

impl ArtifactBuilder for EnumClassBuilder {
    fn name(&self) -> &'static str {
        "EnumClassBuilder"
    }

    fn is_builder_for(&self, object: &IpsObject) -> bool {
        matches!(object, IpsObject::EnumType(_))
    }

    /// Subtypes inherit attributes, so they are regenerated with their
    /// supertype.
    fn artifacts_for(&self, object: &IpsObject, project: &IpsProject) -> Vec<String> {
        match object {
            IpsObject::EnumType(t) => std::iter::once(t.qualified_name.clone())
                .chain(
                    project
                        .all_subtypes(&t.qualified_name)
                        .into_iter()
                        .map(str::to_string),
                )
                .collect(),
            _ => Vec::new(),
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

impl JavaSourceFileBuilder for EnumClassBuilder {
    fn compilation_units(
        &self,
        qualified_name: &str,
        ctx: &BuildContext<'_>,
    ) -> GeneratorResult<Vec<CompilationUnit>> {
        let enum_type = ctx.nodes.gen_enum_type(qualified_name)?;
        let body = if enum_type.is_abstract {
            enum_interface(&enum_type, ctx)?
        } else {
            enum_class(&enum_type, ctx)?
        };
        Ok(vec![CompilationUnit::new(enum_type.class_name.clone(), body)])
    }
}

fn header(
    code: &mut JavaCodeFragmentBuilder,
    enum_type: &GenEnumType,
    ctx: &BuildContext<'_>,
) -> GeneratorResult<()> {
    javadoc(
        code,
        &format!("Enumeration type {}.", enum_type.qualified_name),
    );
    ctx.annotate(code, Element::EnumClass, ModelNode::EnumType(enum_type))
}

fn enum_interface(enum_type: &GenEnumType, ctx: &BuildContext<'_>) -> GeneratorResult<JavaCodeFragment> {
    let mut code = JavaCodeFragmentBuilder::new();
    header(&mut code, enum_type, ctx)?;
    code.append(&format!("public interface {}", enum_type.simple_class_name()));
    if let Some(superinterface) = &enum_type.superinterface {
        code.append(" extends ").append_class_name(superinterface);
    }
    code.append_ln(" {").indent();

    for attribute in enum_type.field_attributes().filter(|a| !a.inherited) {
        code.newline();
        ctx.annotate(&mut code, Element::EnumAttributeGetter, ModelNode::EnumAttribute(attribute))?;
        code.append_class_name(attribute.jvm_type.java_type(false))
            .append_ln(&format!(" {}();", attribute.getter_name()));
    }

    code.outdent().append_ln("}");
    Ok(code.build())
}

fn enum_class(enum_type: &GenEnumType, ctx: &BuildContext<'_>) -> GeneratorResult<JavaCodeFragment> {
    let simple = enum_type.simple_class_name();
    let mut code = JavaCodeFragmentBuilder::new();
    header(&mut code, enum_type, ctx)?;

    let keyword = if enum_type.is_java_enum() {
        "enum"
    } else {
        "final class"
    };
    code.append(&format!("public {keyword} {simple}"));
    if let Some(superinterface) = &enum_type.superinterface {
        code.append(" implements ").append_class_name(superinterface);
    }
    code.append_ln(" {").indent();

    let fields: Vec<&GenEnumAttribute> = enum_type.field_attributes().collect();
    let mut literals = Vec::with_capacity(enum_type.values.len());
    for row in 0..enum_type.values.len() {
        literals.push(enum_type.literal_name(row)?);
    }

    code.newline();
    if enum_type.is_java_enum() {
        if literals.is_empty() {
            code.append_ln(";");
        }
        for (row, literal) in literals.iter().enumerate() {
            code.append(literal)
                .append_fragment(&constructor_arguments(enum_type, &fields, row))
                .append_ln(if row + 1 == literals.len() { ";" } else { "," });
        }
    } else {
        for (row, literal) in literals.iter().enumerate() {
            code.append(&format!("public static final {simple} {literal} = new {simple}"))
                .append_fragment(&constructor_arguments(enum_type, &fields, row))
                .append_ln(";");
        }
        code.newline()
            .append("private static final ")
            .append_class_name(runtime::LIST)
            .append(&format!("<{simple}> VALUES = "));
        if literals.is_empty() {
            code.append_class_name(runtime::COLLECTIONS)
                .append_ln(".emptyList();");
        } else {
            code.append_class_name(runtime::COLLECTIONS)
                .append(".unmodifiableList(")
                .append_class_name(runtime::ARRAYS)
                .append_ln(&format!(".asList({}));", literals.join(", ")));
        }
    }

    for attribute in &fields {
        code.newline()
            .append("private final ")
            .append_class_name(attribute.jvm_type.java_type(false))
            .append_ln(&format!(" {};", attribute.name));
    }

    let visibility = if enum_type.is_java_enum() { "" } else { "public " };
    code.newline().append(&format!("{visibility}{simple}("));
    for (i, attribute) in fields.iter().enumerate() {
        if i > 0 {
            code.append(", ");
        }
        code.append_class_name(attribute.jvm_type.java_type(false))
            .append(&format!(" {}", attribute.name));
    }
    code.append_ln(") {").indent();
    for attribute in &fields {
        code.append_ln(&format!("this.{0} = {0};", attribute.name));
    }
    code.outdent().append_ln("}");

    for &attribute in &fields {
        code.newline();
        ctx.annotate(&mut code, Element::EnumAttributeGetter, ModelNode::EnumAttribute(attribute))?;
        if attribute.inherited {
            code.append_ln("@Override");
        }
        code.append("public ")
            .append_class_name(attribute.jvm_type.java_type(false))
            .append_ln(&format!(" {}() {{", attribute.getter_name()))
            .indent()
            .append_ln(&format!("return {};", attribute.name))
            .outdent()
            .append_ln("}");
    }

    if let Some(identifier) = enum_type.identifier_attribute() {
        value_by_id_method(&mut code, enum_type, identifier);
    }

    code.outdent().append_ln("}");
    Ok(code.build())
}

fn constructor_arguments(
    enum_type: &GenEnumType,
    fields: &[&GenEnumAttribute],
    row: usize,
) -> JavaCodeFragment {
    let cells = enum_type.values.rows.get(row);
    let mut code = JavaCodeFragmentBuilder::new();
    code.append("(");
    for (i, attribute) in fields.iter().enumerate() {
        if i > 0 {
            code.append(", ");
        }
        let value = cells
            .and_then(|cells| cells.get(attribute.index))
            .and_then(|cell| cell.as_deref());
        code.append_fragment(&java_literal(&attribute.datatype, value));
    }
    code.append(")");
    code.build()
}

/// `getValueById(String id)` comparing the string form of the identifier.
fn value_by_id_method(
    code: &mut JavaCodeFragmentBuilder,
    enum_type: &GenEnumType,
    identifier: &GenEnumAttribute,
) {
    let simple = enum_type.simple_class_name();
    let values = if enum_type.is_java_enum() {
        "values()"
    } else {
        "VALUES"
    };
    let comparison = if identifier.datatype.kind == DatatypeKind::String {
        format!("id.equals(value.{})", identifier.name)
    } else {
        format!("id.equals(String.valueOf(value.{}))", identifier.name)
    };

    code.newline();
    javadoc(code, "Returns the value with the given identifier, null if there is none.");
    code.append_ln(&format!("public static {simple} getValueById(String id) {{"))
        .indent()
        .append_ln("if (id == null) {")
        .indent()
        .append_ln("return null;")
        .outdent()
        .append_ln("}")
        .append_ln(&format!("for ({simple} value : {values}) {{"))
        .indent()
        .append_ln(&format!("if ({comparison}) {{"))
        .indent()
        .append_ln("return value;")
        .outdent()
        .append_ln("}")
        .outdent()
        .append_ln("}")
        .append_ln("return null;")
        .outdent()
        .append_ln("}");
}
