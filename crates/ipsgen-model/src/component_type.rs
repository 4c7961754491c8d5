//! Behavior shared by policy and product component types

use crate::association::{self, Association, AssociationKind};
use crate::attribute::Attribute;
use crate::project::IpsProject;
use ipsgen_core::{Message, MessageList};
use ipsgen_valueset::ValueSetContext;
use std::collections::HashSet;

/// A type with attributes, associations and a supertype
pub trait ComponentType {
    fn qualified_name(&self) -> &str;

    fn supertype(&self) -> Option<&str>;

    fn is_abstract(&self) -> bool;

    fn attributes(&self) -> &[Attribute];

    fn attributes_mut(&mut self) -> &mut Vec<Attribute>;

    fn associations(&self) -> &[Association];

    fn is_deprecated(&self) -> bool;

    /// `true` for policy component types.
    fn is_policy_type(&self) -> bool;

    fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes().iter().find(|a| a.name == name)
    }

    fn association(&self, role: &str) -> Option<&Association> {
        self.associations()
            .iter()
            .find(|a| a.target_role_singular == role || a.target_role_plural == role)
    }
}

/// Message codes shared by both kinds of component types
pub mod codes {
    pub const SUPERTYPE_NOT_FOUND: &str = "TYPE-SUPERTYPE_NOT_FOUND";
    pub const SUPERTYPE_WRONG_KIND: &str = "TYPE-SUPERTYPE_WRONG_KIND";
    pub const CYCLE_IN_HIERARCHY: &str = "TYPE-CYCLE_IN_TYPE_HIERARCHY";
    pub const DUPLICATE_ATTRIBUTE: &str = "TYPE-DUPLICATE_ATTRIBUTE_NAME";
    pub const ABSTRACT_VALUE_SET_IN_CONCRETE_TYPE: &str = "TYPE-ABSTRACT_VALUESET_IN_CONCRETE_TYPE";
    pub const CONFIGURING_TYPE_NOT_FOUND: &str = "TYPE-CONFIGURING_TYPE_NOT_FOUND";
    pub const CONFIGURATION_MISMATCH: &str = "TYPE-CONFIGURATION_MISMATCH";
}

/// Checks every component type shares: hierarchy, attributes, associations.
pub(crate) fn validate_component_type(
    ty: &dyn ComponentType,
    project: &IpsProject,
    ctx: &ValueSetContext<'_>,
) -> MessageList {
    let mut messages = MessageList::new();
    let name = ty.qualified_name();

    if let Some(supertype) = ty.supertype() {
        match project.component_type(supertype) {
            None => messages.add(
                Message::error(
                    codes::SUPERTYPE_NOT_FOUND,
                    format!("The supertype {supertype} does not exist."),
                )
                .with_property(name, "supertype"),
            ),
            Some(found) if found.is_policy_type() != ty.is_policy_type() => messages.add(
                Message::error(
                    codes::SUPERTYPE_WRONG_KIND,
                    format!("The supertype {supertype} is a different kind of type."),
                )
                .with_property(name, "supertype"),
            ),
            Some(_) => {}
        }
        if project.has_cyclic_hierarchy(name) {
            messages.add(
                Message::error(
                    codes::CYCLE_IN_HIERARCHY,
                    format!("The type hierarchy of {name} contains a cycle."),
                )
                .with_property(name, "supertype"),
            );
        }
    }

    let mut seen = HashSet::new();
    for attribute in ty.attributes() {
        if !seen.insert(attribute.name.as_str()) {
            messages.add(
                Message::error(
                    codes::DUPLICATE_ATTRIBUTE,
                    format!("The attribute name {} is used more than once.", attribute.name),
                )
                .with_property(Attribute::part_id(name, &attribute.name), "name"),
            );
        }
        let overridden = project.find_overridden_attribute(name, &attribute.name);
        messages.extend(attribute.validate(name, overridden, ctx));

        if attribute.value_set().is_abstract() && !ty.is_abstract() {
            messages.add(
                Message::error(
                    codes::ABSTRACT_VALUE_SET_IN_CONCRETE_TYPE,
                    format!(
                        "The concrete type {name} must not have an abstract value set for {}.",
                        attribute.name
                    ),
                )
                .with_property(Attribute::part_id(name, &attribute.name), "valueSet"),
            );
        }
    }

    for association in ty.associations() {
        messages.extend(association.validate(name));
        messages.extend(validate_association_target(ty, association, project));
    }

    messages
}

fn validate_association_target(
    ty: &dyn ComponentType,
    association: &Association,
    project: &IpsProject,
) -> MessageList {
    let mut messages = MessageList::new();
    let part = format!("{}.{}", ty.qualified_name(), association.target_role_singular);

    let Some(target) = project.component_type(&association.target) else {
        messages.add(
            Message::error(
                association::codes::TARGET_NOT_FOUND,
                format!("The target {} does not exist.", association.target),
            )
            .with_property(part, "target"),
        );
        return messages;
    };

    let Some(inverse_role) = &association.inverse else {
        return messages;
    };
    match project.find_inverse_association(association) {
        None => messages.add(
            Message::error(
                association::codes::INVERSE_NOT_FOUND,
                format!(
                    "The target {} has no association {inverse_role}.",
                    target.qualified_name()
                ),
            )
            .with_property(part, "inverse"),
        ),
        Some(inverse) => {
            let points_back = inverse.inverse.as_deref() == Some(&association.target_role_singular)
                && project.is_same_or_subtype(ty.qualified_name(), &inverse.target);
            let kinds_match = match association.kind {
                AssociationKind::Composition => inverse.kind == AssociationKind::CompositionToMaster,
                AssociationKind::CompositionToMaster => inverse.kind == AssociationKind::Composition,
                other => inverse.kind == other,
            };
            if !(points_back && kinds_match) {
                messages.add(
                    Message::error(
                        association::codes::INVERSE_MISMATCH,
                        format!(
                            "The association {inverse_role} of {} is not the inverse of {}.",
                            target.qualified_name(),
                            association.target_role_singular
                        ),
                    )
                    .with_property(part, "inverse"),
                );
            }
        }
    }
    messages
}
