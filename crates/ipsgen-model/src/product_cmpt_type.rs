//! Product component types

use crate::association::Association;
use crate::attribute::Attribute;
use crate::component_type::{self, ComponentType, validate_component_type};
use crate::project::IpsProject;
use ipsgen_core::{Message, MessageList};
use ipsgen_valueset::ValueSetContext;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Use of table contents by a product component type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableUsage {
    pub role_name: String,

    /// Qualified names of the allowed table structures.
    pub table_structures: Vec<String>,

    #[serde(default)]
    pub mandatory: bool,
}

/// A product-side type whose instances configure policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductCmptType {
    pub qualified_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supertype: Option<String>,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    /// Policy component type this type configures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_cmpt_type: Option<String>,

    /// Product components carry generations valid from a date.
    #[serde(default = "default_true")]
    pub changing_over_time: bool,

    #[serde(default)]
    pub attributes: Vec<Attribute>,

    #[serde(default)]
    pub associations: Vec<Association>,

    #[serde(default)]
    pub table_usages: Vec<TableUsage>,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductCmptType {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            supertype: None,
            is_abstract: false,
            policy_cmpt_type: None,
            changing_over_time: true,
            attributes: Vec::new(),
            associations: Vec::new(),
            table_usages: Vec::new(),
            deprecated: false,
            description: None,
        }
    }

    /// Whether instances of this type configure policies.
    pub fn is_configuration_for_policy_cmpt_type(&self) -> bool {
        self.policy_cmpt_type.is_some()
    }

    pub(crate) fn attach(&mut self) {
        for attribute in &mut self.attributes {
            attribute.attach(&self.qualified_name);
        }
    }

    pub fn validate(&self, project: &IpsProject, ctx: &ValueSetContext<'_>) -> MessageList {
        let mut messages = validate_component_type(self, project, ctx);
        let name = self.qualified_name.as_str();

        if let Some(policy_type) = &self.policy_cmpt_type {
            match project.policy_cmpt_type(policy_type) {
                None => messages.add(
                    Message::error(
                        codes::POLICY_TYPE_NOT_FOUND,
                        format!("The configured policy type {policy_type} does not exist."),
                    )
                    .with_property(name, "policyCmptType"),
                ),
                Some(found) if found.configured_by.as_deref() != Some(name) => messages.add(
                    Message::error(
                        component_type::codes::CONFIGURATION_MISMATCH,
                        format!("The policy type {policy_type} is not configured by {name}."),
                    )
                    .with_property(name, "policyCmptType"),
                ),
                Some(_) => {}
            }
        }

        for usage in &self.table_usages {
            for structure in &usage.table_structures {
                if project.table_structure(structure).is_none() {
                    messages.add(
                        Message::error(
                            codes::TABLE_STRUCTURE_NOT_FOUND,
                            format!("The table structure {structure} does not exist."),
                        )
                        .with_property(format!("{name}.{}", usage.role_name), "tableStructures"),
                    );
                }
            }
        }

        messages
    }
}

impl ComponentType for ProductCmptType {
    fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    fn supertype(&self) -> Option<&str> {
        self.supertype.as_deref()
    }

    fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attributes
    }

    fn associations(&self) -> &[Association] {
        &self.associations
    }

    fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    fn is_policy_type(&self) -> bool {
        false
    }
}

/// Message codes specific to product component types
pub mod codes {
    pub const POLICY_TYPE_NOT_FOUND: &str = "PRODUCT-POLICY_TYPE_NOT_FOUND";
    pub const TABLE_STRUCTURE_NOT_FOUND: &str = "PRODUCT-TABLE_STRUCTURE_NOT_FOUND";
}
