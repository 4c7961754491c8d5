//! Tagged union of all model objects stored in project files

use crate::attribute::Attribute;
use crate::component_type::ComponentType;
use crate::enum_type::{EnumContent, EnumType};
use crate::error::{ModelError, ModelResult};
use crate::events::ContentChangeEvent;
use crate::policy_cmpt_type::PolicyCmptType;
use crate::product_cmpt_type::ProductCmptType;
use crate::table_structure::TableStructure;
use ipsgen_core::naming;
use ipsgen_valueset::ValueSetProperty;
use serde::{Deserialize, Serialize};

/// Kind tag of a model object
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IpsObjectType {
    PolicyCmptType,
    ProductCmptType,
    EnumType,
    EnumContent,
    TableStructure,
}

/// A model object as stored in one project file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IpsObject {
    PolicyCmptType(PolicyCmptType),
    ProductCmptType(ProductCmptType),
    EnumType(EnumType),
    EnumContent(EnumContent),
    TableStructure(TableStructure),
}

impl IpsObject {
    pub fn qualified_name(&self) -> &str {
        match self {
            IpsObject::PolicyCmptType(t) => &t.qualified_name,
            IpsObject::ProductCmptType(t) => &t.qualified_name,
            IpsObject::EnumType(t) => &t.qualified_name,
            IpsObject::EnumContent(c) => &c.qualified_name,
            IpsObject::TableStructure(t) => &t.qualified_name,
        }
    }

    pub fn object_type(&self) -> IpsObjectType {
        match self {
            IpsObject::PolicyCmptType(_) => IpsObjectType::PolicyCmptType,
            IpsObject::ProductCmptType(_) => IpsObjectType::ProductCmptType,
            IpsObject::EnumType(_) => IpsObjectType::EnumType,
            IpsObject::EnumContent(_) => IpsObjectType::EnumContent,
            IpsObject::TableStructure(_) => IpsObjectType::TableStructure,
        }
    }

    pub fn as_component_type(&self) -> Option<&dyn ComponentType> {
        match self {
            IpsObject::PolicyCmptType(t) => Some(t),
            IpsObject::ProductCmptType(t) => Some(t),
            _ => None,
        }
    }

    /// Parse one project file. `path` is only used in errors.
    pub fn from_toml(content: &str, path: &str) -> ModelResult<Self> {
        let mut object: IpsObject = toml::from_str(content).map_err(|source| ModelError::Parse {
            path: path.to_string(),
            source,
        })?;
        object.attach();
        Ok(object)
    }

    pub fn to_toml(&self) -> ModelResult<String> {
        toml::to_string_pretty(self).map_err(|source| ModelError::Serialize {
            qualified_name: self.qualified_name().to_string(),
            source,
        })
    }

    /// Bind owned parts (value sets) to their owners.
    pub(crate) fn attach(&mut self) {
        match self {
            IpsObject::PolicyCmptType(t) => t.attach(),
            IpsObject::ProductCmptType(t) => t.attach(),
            _ => {}
        }
    }

    /// Collect pending value set changes as part events.
    pub(crate) fn drain_value_set_changes(&mut self) -> Vec<ContentChangeEvent> {
        let (type_name, attributes) = match self {
            IpsObject::PolicyCmptType(t) => (t.qualified_name.as_str(), &mut t.attributes),
            IpsObject::ProductCmptType(t) => (t.qualified_name.as_str(), &mut t.attributes),
            _ => return Vec::new(),
        };
        let mut events = Vec::new();
        for attribute in attributes.iter_mut() {
            let part = Attribute::part_id(type_name, &attribute.name);
            for property in attribute.value_set_mut().take_changes() {
                if property == ValueSetProperty::Owner {
                    continue;
                }
                events.push(ContentChangeEvent::part_changed(
                    type_name,
                    part.clone(),
                    format!("valueSet.{}", naming::uncapitalize(&property.to_string())),
                ));
            }
        }
        events
    }
}

impl From<PolicyCmptType> for IpsObject {
    fn from(value: PolicyCmptType) -> Self {
        IpsObject::PolicyCmptType(value)
    }
}

impl From<ProductCmptType> for IpsObject {
    fn from(value: ProductCmptType) -> Self {
        IpsObject::ProductCmptType(value)
    }
}

impl From<EnumType> for IpsObject {
    fn from(value: EnumType) -> Self {
        IpsObject::EnumType(value)
    }
}

impl From<EnumContent> for IpsObject {
    fn from(value: EnumContent) -> Self {
        IpsObject::EnumContent(value)
    }
}

impl From<TableStructure> for IpsObject {
    fn from(value: TableStructure) -> Self {
        IpsObject::TableStructure(value)
    }
}
