//! Annotations on association accessors

use super::{AnnotationGenerator, wrong_node};
use crate::error::GeneratorResult;
use crate::fragment::{JavaCodeFragment, JavaCodeFragmentBuilder, quote};
use crate::node::{GenAssociation, ModelNode};
use crate::runtime;

fn expect_association<'a>(
    generator: &str,
    node: &ModelNode<'a>,
) -> GeneratorResult<&'a GenAssociation> {
    node.as_association().ok_or_else(|| wrong_node(generator, node))
}

/// `@IpsAssociation` on association getters
///
/// Appends `@IpsInverseAssociation` when the node has a resolved inverse,
/// and the derived union markers where they apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssociationAnnGen;

impl AnnotationGenerator for AssociationAnnGen {
    fn name(&self) -> &'static str {
        "AssociationAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_association().is_some()
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let association = expect_association(self.name(), node)?;
        let mut code = JavaCodeFragmentBuilder::new();

        code.annotation(runtime::IPS_ASSOCIATION, None)
            .append(&format!("(name = {}", quote(&association.role_singular)));
        if association.is_to_many() {
            code.append(&format!(", pluralName = {}", quote(&association.role_plural)));
        }
        code.append(", kind = ")
            .append_class_name(runtime::ASSOCIATION_KIND)
            .append(&format!(".{}, targetClass = ", association.kind.java_constant()))
            .append_class_name(&association.target_class)
            .append_ln(&format!(
                ".class, min = {}, max = {})",
                association.min_cardinality,
                association.max_cardinality_literal()
            ));

        if association.derived_union {
            code.annotation_ln(runtime::IPS_DERIVED_UNION, None);
        }
        if let Some(union) = &association.subsetted_derived_union {
            code.annotation_ln(runtime::IPS_SUBSET_OF_DERIVED_UNION, Some(&quote(union)));
        }
        if let Some(matching) = &association.matching_association {
            code.annotation_ln(
                runtime::IPS_MATCHING_ASSOCIATION,
                Some(&format!("name = {}", quote(matching))),
            );
        }
        if let Some(inverse) = association.inverse_association() {
            code.annotation_ln(runtime::IPS_INVERSE_ASSOCIATION, Some(&quote(&inverse.role_name)));
        }
        Ok(code.build())
    }
}

/// `@IpsAssociationAdder` on adders and to-one setters.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssociationAdderAnnGen;

impl AnnotationGenerator for AssociationAdderAnnGen {
    fn name(&self) -> &'static str {
        "AssociationAdderAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_association().is_some_and(|a| !a.derived_union)
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let association = expect_association(self.name(), node)?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation_ln(
            runtime::IPS_ASSOCIATION_ADDER,
            Some(&format!("association = {}", quote(&association.role_singular))),
        );
        Ok(code.build())
    }
}

/// `@IpsAssociationRemover` on removers of to-many associations.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssociationRemoverAnnGen;

impl AnnotationGenerator for AssociationRemoverAnnGen {
    fn name(&self) -> &'static str {
        "AssociationRemoverAnnGen"
    }

    fn is_generate_annotation_for(&self, node: &ModelNode<'_>) -> bool {
        node.as_association()
            .is_some_and(|a| a.is_to_many() && !a.derived_union)
    }

    fn create_annotation(&self, node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
        let association = expect_association(self.name(), node)?;
        let mut code = JavaCodeFragmentBuilder::new();
        code.annotation_ln(
            runtime::IPS_ASSOCIATION_REMOVER,
            Some(&format!("association = {}", quote(&association.role_singular))),
        );
        Ok(code.build())
    }
}
