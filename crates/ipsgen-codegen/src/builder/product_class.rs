//! Product component classes

use super::published_interface::published_interface_unit;
use super::{ArtifactBuilder, BuildContext, JavaSourceFileBuilder, java_files, javadoc};
use crate::annotations::AnnotatedJavaElementType as Element;
use crate::compilation_unit::{CompilationUnit, GeneratedFile};
use crate::error::{GeneratorError, GeneratorResult};
use crate::fragment::{JavaCodeFragment, JavaCodeFragmentBuilder, quote};
use crate::jvm_types::java_literal;
use crate::node::{GenAttribute, GenType, ModelNode};
use crate::runtime;
use crate::value_set_code::{value_set_expression, value_set_type};
use ipsgen_core::naming;
use ipsgen_model::{IpsObject, IpsProject, PolicyCmptType};

/// Generates the class of a product component type, including the default
/// values and allowed values of the policy attributes it configures
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductCmptClassBuilder;

impl ArtifactBuilder for ProductCmptClassBuilder {
    fn name(&self) -> &'static str {
        "ProductCmptClassBuilder"
    }

    fn is_builder_for(&self, object: &IpsObject) -> bool {
        matches!(object, IpsObject::ProductCmptType(_))
    }

    fn artifacts_for(&self, object: &IpsObject, project: &IpsProject) -> Vec<String> {
        match object {
            IpsObject::ProductCmptType(t) => vec![t.qualified_name.clone()],
            IpsObject::PolicyCmptType(t) => configuring_product_type(t, project).into_iter().collect(),
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

impl JavaSourceFileBuilder for ProductCmptClassBuilder {
    fn compilation_units(
        &self,
        qualified_name: &str,
        ctx: &BuildContext<'_>,
    ) -> GeneratorResult<Vec<CompilationUnit>> {
        let ty = ctx.nodes.gen_type(qualified_name)?;
        if ty.is_policy_type() {
            return Err(GeneratorError::illegal_argument(format!(
                "{qualified_name} is not a product component type"
            )));
        }
        let mut units = vec![CompilationUnit::new(
            ty.class_name.clone(),
            product_class(&ty, ctx)?,
        )];
        if ty.published_interface.is_some() {
            units.push(published_interface_unit(&ty, ctx)?);
        }
        Ok(units)
    }
}

/// The product type configuring `policy`. Only a product type that
/// configures the policy type in return counts.
fn configuring_product_type(policy: &PolicyCmptType, project: &IpsProject) -> Option<String> {
    let product = project.product_cmpt_type(policy.configured_by.as_deref()?)?;
    (product.is_configuration_for_policy_cmpt_type()
        && product.policy_cmpt_type.as_deref() == Some(policy.qualified_name.as_str()))
    .then(|| product.qualified_name.clone())
}

fn product_class(ty: &GenType, ctx: &BuildContext<'_>) -> GeneratorResult<JavaCodeFragment> {
    let mut code = JavaCodeFragmentBuilder::new();
    let default_doc = format!(
        "Implementation for the product component type {}.",
        ty.qualified_name
    );
    javadoc(&mut code, ty.description.as_deref().unwrap_or(&default_doc));
    ctx.annotate(&mut code, Element::ProductCmptDeclClass, ModelNode::Type(ty))?;

    code.append("public ");
    if ty.is_abstract {
        code.append("abstract ");
    }
    code.append(&format!("class {} extends ", ty.simple_class_name()))
        .append_class_name(ty.superclass.as_deref().unwrap_or(runtime::PRODUCT_COMPONENT));
    if let Some(interface) = &ty.published_interface {
        code.append(" implements ").append_class_name(interface);
    }
    code.append_ln(" {").indent();

    for attribute in ty.attributes.iter().filter(|a| !a.overrides) {
        code.newline();
        javadoc(&mut code, &format!("The name of the property {}.", attribute.name));
        code.append_ln(&format!(
            "public static final String {} = {};",
            attribute.property_constant(),
            quote(&attribute.name)
        ));
    }

    for attribute in &ty.attributes {
        code.newline()
            .append("private ")
            .append_class_name(attribute.java_type())
            .append(&format!(" {} = ", attribute.field_name()))
            .append_fragment(&java_literal(
                &attribute.datatype,
                attribute.default_value.as_deref(),
            ))
            .append_ln(";");
    }
    for attribute in &ty.configured_attributes {
        configured_fields(&mut code, attribute);
    }
    for association in &ty.associations {
        code.newline().append("private ");
        if association.is_to_many() {
            code.append_class_name(runtime::LIST)
                .append("<")
                .append_class_name(&association.target_class)
                .append(&format!("> {} = new ", association.field_name()))
                .append_class_name(runtime::ARRAY_LIST)
                .append_ln("<>();");
        } else {
            code.append_class_name(&association.target_class)
                .append_ln(&format!(" {};", association.field_name()));
        }
    }

    code.newline()
        .append_ln(&format!("public {}() {{", ty.simple_class_name()))
        .indent()
        .append_ln("super();")
        .outdent()
        .append_ln("}");

    for attribute in &ty.attributes {
        let node = ModelNode::Attribute(attribute);
        code.newline();
        ctx.annotate(&mut code, Element::ProductCmptDeclClassAttributeGetter, node)?;
        if attribute.overrides {
            code.append_ln("@Override");
        }
        code.append("public ")
            .append_class_name(attribute.java_type())
            .append_ln(&format!(" {}() {{", attribute.getter_name()))
            .indent()
            .append_ln(&format!("return {};", attribute.field_name()))
            .outdent()
            .append_ln("}");

        if attribute.is_changeable() {
            code.newline();
            ctx.annotate(&mut code, Element::ProductCmptDeclClassAttributeSetter, node)?;
            code.append(&format!("public void {}(", attribute.setter_name()))
                .append_class_name(attribute.java_type())
                .append_ln(" newValue) {")
                .indent()
                .append_ln(&format!("this.{} = newValue;", attribute.field_name()))
                .outdent()
                .append_ln("}");
        }
    }

    for attribute in &ty.configured_attributes {
        configured_methods(&mut code, attribute, ctx)?;
    }

    for association in &ty.associations {
        code.newline();
        ctx.annotate(
            &mut code,
            Element::ProductCmptDeclClassAssociation,
            ModelNode::Association(association),
        )?;
        code.append("public ");
        if association.is_to_many() {
            code.append_class_name(runtime::LIST)
                .append("<? extends ")
                .append_class_name(&association.target_class)
                .append_ln(&format!("> {}() {{", association.getter_name()))
                .indent()
                .append("return ")
                .append_class_name(runtime::COLLECTIONS)
                .append_ln(&format!(".unmodifiableList({});", association.field_name()));
        } else {
            code.append_class_name(&association.target_class)
                .append_ln(&format!(" {}() {{", association.getter_name()))
                .indent()
                .append_ln(&format!("return {};", association.field_name()));
        }
        code.outdent().append_ln("}");
    }

    if let Some(policy) = ty.policy_class() {
        create_policy_method(&mut code, ty, policy, ctx);
    }

    code.outdent().append_ln("}");
    Ok(code.build())
}

fn default_value_field(attribute: &GenAttribute) -> String {
    format!("defaultValue{}", naming::capitalize(&attribute.name))
}

fn allowed_values_field(attribute: &GenAttribute) -> String {
    format!("allowedValuesFor{}", naming::capitalize(&attribute.name))
}

fn configured_fields(code: &mut JavaCodeFragmentBuilder, attribute: &GenAttribute) {
    code.newline()
        .append("private ")
        .append_class_name(attribute.java_type())
        .append(&format!(" {} = ", default_value_field(attribute)))
        .append_fragment(&java_literal(
            &attribute.datatype,
            attribute.default_value.as_deref(),
        ))
        .append_ln(";");
    code.newline()
        .append("private ")
        .append_fragment(&value_set_type(&attribute.datatype))
        .append(&format!(" {} = ", allowed_values_field(attribute)))
        .append_fragment(&value_set_expression(
            &attribute.value_set,
            &attribute.datatype,
        ))
        .append_ln(";");
}

fn configured_methods(
    code: &mut JavaCodeFragmentBuilder,
    attribute: &GenAttribute,
    ctx: &BuildContext<'_>,
) -> GeneratorResult<()> {
    let node = ModelNode::Attribute(attribute);

    code.newline();
    javadoc(
        code,
        &format!("Returns the default value for {}.", attribute.name),
    );
    ctx.annotate(code, Element::ProductCmptDeclClassAttributeDefault, node)?;
    code.append("public ")
        .append_class_name(attribute.java_type())
        .append_ln(&format!(" {}() {{", attribute.default_value_method_name()))
        .indent()
        .append_ln(&format!("return {};", default_value_field(attribute)))
        .outdent()
        .append_ln("}");

    code.newline();
    javadoc(
        code,
        &format!("Returns the values allowed for {}.", attribute.name),
    );
    ctx.annotate(code, Element::ProductCmptDeclClassAttributeAllowedValues, node)?;
    code.append("public ")
        .append_fragment(&value_set_type(&attribute.datatype))
        .append(&format!(" {}(", attribute.allowed_values_method_name()))
        .append_class_name(runtime::VALIDATION_CONTEXT)
        .append_ln(" context) {")
        .indent()
        .append_ln(&format!("return {};", allowed_values_field(attribute)))
        .outdent()
        .append_ln("}");
    Ok(())
}

/// `createX()` for the configured policy class. The new policy object is
/// linked to this product when the policy type is configured by this type.
fn create_policy_method(
    code: &mut JavaCodeFragmentBuilder,
    ty: &GenType,
    policy_class: &str,
    ctx: &BuildContext<'_>,
) {
    let policy_simple = naming::simple_name(policy_class);
    let linked = ctx
        .project()
        .product_cmpt_type(&ty.qualified_name)
        .and_then(|product| product.policy_cmpt_type.as_deref())
        .and_then(|policy| ctx.project().policy_cmpt_type(policy))
        .is_some_and(|policy| {
            policy.configured_by.as_deref() == Some(ty.qualified_name.as_str())
        });

    code.newline();
    javadoc(
        code,
        &format!("Creates a new {policy_simple} configured by this product component."),
    );
    code.append("public ")
        .append_class_name(policy_class)
        .append_ln(&format!(" create{policy_simple}() {{"))
        .indent()
        .append_ln(&format!("{policy_simple} policy = new {policy_simple}();"));
    if linked {
        code.append_ln(&format!("policy.set{}(this);", ty.simple_class_name()));
    }
    code.append_ln("return policy;").outdent().append_ln("}");
}
