//! Moving an enum attribute up the enum type hierarchy

use crate::enum_type::EnumAttribute;
use crate::error::{ModelError, ModelResult};
use crate::events::ContentChangeEvent;
use crate::project::IpsProject;

/// Move `attribute` of `enum_type` up to `target`, a direct or indirect
/// supertype.
///
/// Afterwards `target` defines the attribute, the original becomes an
/// inherited copy and every other subtype of `target` carries an inherited
/// copy as well. Each type receiving a new column gets a null cell in every
/// stored value.
pub fn pull_up_enum_attribute(
    project: &mut IpsProject,
    enum_type: &str,
    attribute: &str,
    target: &str,
) -> ModelResult<()> {
    let source = project
        .enum_type(enum_type)
        .ok_or_else(|| ModelError::ObjectNotFound(enum_type.to_string()))?;
    let original = source
        .attribute(attribute)
        .ok_or_else(|| ModelError::AttributeNotFound {
            type_name: enum_type.to_string(),
            attribute: attribute.to_string(),
        })?;
    if original.inherited {
        return Err(ModelError::AttributeInherited {
            type_name: enum_type.to_string(),
            attribute: attribute.to_string(),
        });
    }
    if project.enum_type(target).is_none() {
        return Err(ModelError::ObjectNotFound(target.to_string()));
    }
    if !project.supertype_names(enum_type).iter().any(|s| s == target) {
        return Err(ModelError::NotASupertype {
            type_name: enum_type.to_string(),
            supertype: target.to_string(),
        });
    }
    if project
        .enum_type(target)
        .is_some_and(|t| t.attribute(attribute).is_some())
    {
        return Err(ModelError::DuplicateAttribute {
            type_name: target.to_string(),
            attribute: attribute.to_string(),
        });
    }

    let mut pulled = original.clone();
    pulled.inherited = false;
    let inherited = EnumAttribute::inherited_copy(&pulled);
    let subtypes: Vec<String> = project
        .all_subtypes(target)
        .into_iter()
        .filter(|name| *name != enum_type)
        .map(str::to_string)
        .collect();

    project.enum_type_mut(target)?.push_attribute(pulled);

    let source = project.enum_type_mut(enum_type)?;
    if let Some(index) = source.attribute_index(attribute) {
        source.attributes[index] = inherited.clone();
    }

    let mut events = vec![
        ContentChangeEvent::part_added(target, attribute),
        ContentChangeEvent::part_changed(enum_type, attribute, "inherited"),
    ];
    for subtype in &subtypes {
        let ty = project.enum_type_mut(subtype)?;
        match ty.attribute_index(attribute) {
            Some(index) => {
                ty.attributes[index] = inherited.clone();
                events.push(ContentChangeEvent::part_changed(subtype, attribute, "inherited"));
            }
            None => {
                ty.push_attribute(inherited.clone());
                events.push(ContentChangeEvent::part_added(subtype, attribute));
            }
        }
    }

    project.after_structural_change();
    tracing::debug!(
        attribute,
        from = enum_type,
        to = target,
        subtypes = subtypes.len(),
        "pulled up enum attribute"
    );
    for event in &events {
        project.fire(event);
    }
    Ok(())
}
