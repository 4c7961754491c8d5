use super::{BuildContext, javadoc};
use crate::annotations::AnnotatedJavaElementType;
use crate::compilation_unit::CompilationUnit;
use crate::error::{GeneratorError, GeneratorResult};
use crate::fragment::JavaCodeFragmentBuilder;
use crate::node::{GenType, ModelNode};
use ipsgen_core::naming;

/// Interface name for a generated class, `I` + simple name.
pub(crate) fn interface_name(class_name: &str) -> String {
    naming::qualify(
        naming::package_of(class_name),
        &format!("I{}", naming::simple_name(class_name)),
    )
}

/// The published interface of `ty`, declaring the getters of its published
/// attributes.
pub(crate) fn published_interface_unit(
    ty: &GenType,
    ctx: &BuildContext<'_>,
) -> GeneratorResult<CompilationUnit> {
    let name = ty.published_interface.as_deref().ok_or_else(|| {
        GeneratorError::illegal_state(format!(
            "{} has no published interface",
            ty.qualified_name
        ))
    })?;

    let mut code = JavaCodeFragmentBuilder::new();
    javadoc(
        &mut code,
        &format!("Published interface for {}.", ty.simple_class_name()),
    );
    ctx.annotate(
        &mut code,
        AnnotatedJavaElementType::PublishedInterface,
        ModelNode::Type(ty),
    )?;
    code.append(&format!("public interface {}", naming::simple_name(name)));
    if let Some(superclass) = &ty.superclass {
        code.append(" extends ")
            .append_class_name(&interface_name(superclass));
    }
    code.append_ln(" {").indent();

    for attribute in ty.attributes.iter().filter(|a| a.published && !a.overrides) {
        code.newline();
        javadoc(
            &mut code,
            &format!("Returns the value of {}.", attribute.name),
        );
        code.append_class_name(attribute.java_type())
            .append_ln(&format!(" {}();", attribute.getter_name()));
    }

    code.outdent().append_ln("}");
    Ok(CompilationUnit::new(name, code.build()))
}
