//! Policy component classes

use super::published_interface::published_interface_unit;
use super::{ArtifactBuilder, BuildContext, JavaSourceFileBuilder, java_files, javadoc};
use crate::annotations::AnnotatedJavaElementType as Element;
use crate::compilation_unit::{CompilationUnit, GeneratedFile};
use crate::error::{GeneratorError, GeneratorResult};
use crate::fragment::{JavaCodeFragment, JavaCodeFragmentBuilder, quote};
use crate::jvm_types::java_literal;
use crate::node::{GenAssociation, GenAttribute, GenType, ModelNode};
use crate::runtime;
use crate::value_set_code::{value_set_expression, value_set_type};
use ipsgen_core::naming;
use ipsgen_model::{AttributeKind, IpsObject, IpsProject, ProductCmptType};

const PRODUCT_FIELD: &str = "productCmpt";

/// Generates the class of a policy component type and, if enabled, its
/// published interface
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyCmptClassBuilder;

impl ArtifactBuilder for PolicyCmptClassBuilder {
    fn name(&self) -> &'static str {
        "PolicyCmptClassBuilder"
    }

    fn is_builder_for(&self, object: &IpsObject) -> bool {
        matches!(object, IpsObject::PolicyCmptType(_))
    }

    fn artifacts_for(&self, object: &IpsObject, project: &IpsProject) -> Vec<String> {
        match object {
            IpsObject::PolicyCmptType(t) => vec![t.qualified_name.clone()],
            IpsObject::ProductCmptType(t) => configured_policy_type(t, project).into_iter().collect(),
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

impl JavaSourceFileBuilder for PolicyCmptClassBuilder {
    fn compilation_units(
        &self,
        qualified_name: &str,
        ctx: &BuildContext<'_>,
    ) -> GeneratorResult<Vec<CompilationUnit>> {
        let ty = ctx.nodes.gen_type(qualified_name)?;
        if !ty.is_policy_type() {
            return Err(GeneratorError::illegal_argument(format!(
                "{qualified_name} is not a policy component type"
            )));
        }
        let mut units = vec![CompilationUnit::new(
            ty.class_name.clone(),
            policy_class(&ty, ctx)?,
        )];
        if ty.published_interface.is_some() {
            units.push(published_interface_unit(&ty, ctx)?);
        }
        Ok(units)
    }
}

/// The policy type a product type configures, found by following the
/// configuration link of the product type.
fn configured_policy_type(product: &ProductCmptType, project: &IpsProject) -> Option<String> {
    if !product.is_configuration_for_policy_cmpt_type() {
        return None;
    }
    let policy_name = product.policy_cmpt_type.as_deref()?;
    project
        .policy_cmpt_type(policy_name)
        .map(|policy| policy.qualified_name.clone())
}

fn policy_class(ty: &GenType, ctx: &BuildContext<'_>) -> GeneratorResult<JavaCodeFragment> {
    let mut code = JavaCodeFragmentBuilder::new();
    let default_doc = format!("Implementation for the policy component type {}.", ty.qualified_name);
    javadoc(&mut code, ty.description.as_deref().unwrap_or(&default_doc));
    ctx.annotate(&mut code, Element::PolicyCmptDeclClass, ModelNode::Type(ty))?;

    code.append("public ");
    if ty.is_abstract {
        code.append("abstract ");
    }
    code.append(&format!("class {} extends ", ty.simple_class_name()))
        .append_class_name(ty.superclass.as_deref().unwrap_or(runtime::ABSTRACT_MODEL_OBJECT));
    if let Some(interface) = &ty.published_interface {
        code.append(" implements ").append_class_name(interface);
    }
    code.append_ln(" {").indent();

    constants(&mut code, ty);
    fields(&mut code, ty, ctx)?;

    code.newline()
        .append_ln(&format!("public {}() {{", ty.simple_class_name()))
        .indent()
        .append_ln("super();")
        .outdent()
        .append_ln("}");

    for attribute in &ty.attributes {
        attribute_methods(&mut code, ty, attribute, ctx)?;
    }
    if let Some(product) = ty.product_class() {
        product_methods(&mut code, product);
    }
    for association in &ty.associations {
        association_methods(&mut code, ty, association, ctx)?;
    }
    for rule in ty.validation_rules() {
        code.newline();
        javadoc(
            &mut code,
            &format!(
                "Executes the rule {} and adds a message to the given list if the object is invalid.",
                rule.name
            ),
        );
        ctx.annotate(
            &mut code,
            Element::PolicyCmptValidationRuleMethod,
            ModelNode::ValidationRule(rule),
        )?;
        code.append(&format!("public boolean {}(", rule.method_name))
            .append_class_name(runtime::MESSAGE_LIST)
            .append(" ml, ")
            .append_class_name(runtime::VALIDATION_CONTEXT)
            .append_ln(" context) {")
            .indent()
            .append_ln("return true;")
            .outdent()
            .append_ln("}");
    }

    code.outdent().append_ln("}");
    Ok(code.build())
}

fn constants(code: &mut JavaCodeFragmentBuilder, ty: &GenType) {
    for attribute in ty.attributes.iter().filter(|a| !a.overrides) {
        code.newline();
        javadoc(code, &format!("The name of the property {}.", attribute.name));
        code.append_ln(&format!(
            "public static final String {} = {};",
            attribute.property_constant(),
            quote(&attribute.name)
        ));
    }
    for attribute in ty.attributes.iter().filter(|a| !a.is_derived()) {
        code.newline();
        javadoc(
            code,
            &format!("Max allowed values for property {}.", attribute.name),
        );
        code.append("public static final ")
            .append_fragment(&value_set_type(&attribute.datatype))
            .append(&format!(" {} = ", attribute.max_allowed_values_constant()))
            .append_fragment(&value_set_expression(
                &attribute.value_set,
                &attribute.datatype,
            ))
            .append_ln(";");
    }
    for rule in ty.validation_rules() {
        code.newline().append_ln(&format!(
            "public static final String {} = {};",
            rule.message_code_constant(),
            quote(&rule.message_code)
        ));
    }
}

/// Attributes with a stored value.
fn has_field(attribute: &GenAttribute) -> bool {
    matches!(
        attribute.kind,
        AttributeKind::Changeable | AttributeKind::DerivedByExplicitMethodCall
    )
}

fn fields(
    code: &mut JavaCodeFragmentBuilder,
    ty: &GenType,
    ctx: &BuildContext<'_>,
) -> GeneratorResult<()> {
    for attribute in ty.attributes.iter().filter(|a| has_field(a)) {
        code.newline();
        code.append_fragment(&ctx.annotations.create_annotations(
            Element::PolicyCmptDeclClassAttributeField,
            &ModelNode::Attribute(attribute),
        )?);
        code.append("private ")
            .append_class_name(attribute.java_type())
            .append(&format!(" {} = ", attribute.field_name()))
            .append_fragment(&java_literal(
                &attribute.datatype,
                attribute.default_value.as_deref(),
            ))
            .append_ln(";");
    }

    if let Some(product) = ty.product_class() {
        code.newline()
            .append("private ")
            .append_class_name(product)
            .append_ln(&format!(" {PRODUCT_FIELD};"));
    }

    for association in ty.associations.iter().filter(|a| !a.derived_union) {
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
    Ok(())
}

fn attribute_methods(
    code: &mut JavaCodeFragmentBuilder,
    ty: &GenType,
    attribute: &GenAttribute,
    ctx: &BuildContext<'_>,
) -> GeneratorResult<()> {
    let node = ModelNode::Attribute(attribute);

    code.newline();
    ctx.annotate(code, Element::PolicyCmptDeclClassAttributeGetter, node)?;
    if attribute.overrides {
        code.append_ln("@Override");
    }
    code.append("public ")
        .append_class_name(attribute.java_type())
        .append_ln(&format!(" {}() {{", attribute.getter_name()))
        .indent();
    if has_field(attribute) {
        code.append_ln(&format!("return {};", attribute.field_name()));
    } else {
        code.append("return ")
            .append_fragment(&java_literal(
                &attribute.datatype,
                attribute.default_value.as_deref(),
            ))
            .append_ln(";");
    }
    code.outdent().append_ln("}");

    if attribute.is_changeable() {
        code.newline();
        ctx.annotate(code, Element::PolicyCmptDeclClassAttributeSetter, node)?;
        code.append(&format!("public void {}(", attribute.setter_name()))
            .append_class_name(attribute.java_type())
            .append_ln(" newValue) {")
            .indent()
            .append_ln(&format!("this.{} = newValue;", attribute.field_name()))
            .outdent()
            .append_ln("}");
    }

    if !attribute.is_derived() {
        code.newline();
        ctx.annotate(code, Element::PolicyCmptDeclClassAttributeAllowedValues, node)?;
        code.append("public ")
            .append_fragment(&value_set_type(&attribute.datatype))
            .append(&format!(" {}(", attribute.allowed_values_method_name()))
            .append_class_name(runtime::VALIDATION_CONTEXT)
            .append_ln(" context) {")
            .indent();
        match ty.product_class() {
            Some(product) if attribute.is_configured_by_product() => {
                let getter = product_getter_name(product);
                code.append_ln(&format!("if ({getter}() == null) {{"))
                    .indent()
                    .append_ln(&format!("return {};", attribute.max_allowed_values_constant()))
                    .outdent()
                    .append_ln("}")
                    .append_ln(&format!(
                        "return {getter}().{}(context);",
                        attribute.allowed_values_method_name()
                    ));
            }
            _ => {
                code.append_ln(&format!("return {};", attribute.max_allowed_values_constant()));
            }
        }
        code.outdent().append_ln("}");
    }
    Ok(())
}

fn product_getter_name(product_class: &str) -> String {
    format!("get{}", naming::simple_name(product_class))
}

fn product_methods(code: &mut JavaCodeFragmentBuilder, product_class: &str) {
    let simple = naming::simple_name(product_class);
    code.newline()
        .append("public ")
        .append_class_name(product_class)
        .append_ln(&format!(" {}() {{", product_getter_name(product_class)))
        .indent()
        .append_ln(&format!("return {PRODUCT_FIELD};"))
        .outdent()
        .append_ln("}");
    code.newline()
        .append(&format!("public void set{simple}("))
        .append_class_name(product_class)
        .append_ln(&format!(" {PRODUCT_FIELD}) {{"))
        .indent()
        .append_ln(&format!("this.{PRODUCT_FIELD} = {PRODUCT_FIELD};"))
        .outdent()
        .append_ln("}");
}

fn association_methods(
    code: &mut JavaCodeFragmentBuilder,
    ty: &GenType,
    association: &GenAssociation,
    ctx: &BuildContext<'_>,
) -> GeneratorResult<()> {
    let node = ModelNode::Association(association);
    let field = association.field_name();

    code.newline();
    ctx.annotate(code, Element::PolicyCmptDeclClassAssociation, node)?;
    code.append("public ");
    if association.is_to_many() {
        code.append_class_name(runtime::LIST)
            .append("<? extends ")
            .append_class_name(&association.target_class)
            .append(">");
    } else {
        code.append_class_name(&association.target_class);
    }
    code.append_ln(&format!(" {}() {{", association.getter_name()))
        .indent();
    if association.derived_union {
        derived_union_body(code, ty, association);
    } else if association.is_to_many() {
        code.append("return ")
            .append_class_name(runtime::COLLECTIONS)
            .append_ln(&format!(".unmodifiableList({field});"));
    } else {
        code.append_ln(&format!("return {field};"));
    }
    code.outdent().append_ln("}");

    if association.derived_union {
        return Ok(());
    }

    code.newline();
    ctx.annotate(code, Element::PolicyCmptDeclClassAssociationAdder, node)?;
    if association.is_to_many() {
        code.append(&format!("public void {}(", association.adder_name()))
            .append_class_name(&association.target_class)
            .append_ln(" objectToAdd) {")
            .indent()
            .append_ln("if (objectToAdd == null) {")
            .indent()
            .append_ln(&format!(
                "throw new NullPointerException(\"Can't add null to association {} of \" + this);",
                association.role_singular
            ))
            .outdent()
            .append_ln("}")
            .append_ln(&format!("if ({field}.contains(objectToAdd)) {{"))
            .indent()
            .append_ln("return;")
            .outdent()
            .append_ln("}")
            .append_ln(&format!("{field}.add(objectToAdd);"))
            .outdent()
            .append_ln("}");

        code.newline();
        ctx.annotate(code, Element::PolicyCmptDeclClassAssociationRemover, node)?;
        code.append(&format!("public void {}(", association.remover_name()))
            .append_class_name(&association.target_class)
            .append_ln(" objectToRemove) {")
            .indent()
            .append_ln(&format!("{field}.remove(objectToRemove);"))
            .outdent()
            .append_ln("}");
    } else {
        code.append(&format!("public void {}(", association.setter_name()))
            .append_class_name(&association.target_class)
            .append_ln(" newObject) {")
            .indent()
            .append_ln(&format!("this.{field} = newObject;"))
            .outdent()
            .append_ln("}");
    }
    Ok(())
}

/// Collects the values of the associations in `ty` that subset the derived
/// union.
fn derived_union_body(code: &mut JavaCodeFragmentBuilder, ty: &GenType, union: &GenAssociation) {
    let subsets = ty
        .associations
        .iter()
        .filter(|a| a.subsetted_derived_union.as_deref() == Some(union.role_singular.as_str()));

    if union.is_to_many() {
        code.append_class_name(runtime::LIST)
            .append("<")
            .append_class_name(&union.target_class)
            .append("> result = new ")
            .append_class_name(runtime::ARRAY_LIST)
            .append_ln("<>();");
        for subset in subsets {
            if subset.is_to_many() {
                code.append_ln(&format!("result.addAll({}());", subset.getter_name()));
            } else {
                code.append_ln(&format!("if ({}() != null) {{", subset.getter_name()))
                    .indent()
                    .append_ln(&format!("result.add({}());", subset.getter_name()))
                    .outdent()
                    .append_ln("}");
            }
        }
        code.append_ln("return result;");
    } else {
        for subset in subsets {
            code.append_ln(&format!("if ({}() != null) {{", subset.getter_name()))
                .indent()
                .append_ln(&format!("return {}();", subset.getter_name()))
                .outdent()
                .append_ln("}");
        }
        code.append_ln("return null;");
    }
}
