//! Policy component types

use crate::association::Association;
use crate::attribute::Attribute;
use crate::component_type::{self, ComponentType, validate_component_type};
use crate::project::IpsProject;
use crate::validation_rule::{self, ValidationRule};
use ipsgen_core::{Message, MessageList};
use ipsgen_valueset::ValueSetContext;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A contract-side type, e.g. `HomePolicy` or `Coverage`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyCmptType {
    pub qualified_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supertype: Option<String>,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    /// Product component type configuring this type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configured_by: Option<String>,

    #[serde(default)]
    pub attributes: Vec<Attribute>,

    #[serde(default)]
    pub associations: Vec<Association>,

    #[serde(default)]
    pub rules: Vec<ValidationRule>,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PolicyCmptType {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            supertype: None,
            is_abstract: false,
            configured_by: None,
            attributes: Vec::new(),
            associations: Vec::new(),
            rules: Vec::new(),
            deprecated: false,
            description: None,
        }
    }

    pub fn is_configurable_by_product(&self) -> bool {
        self.configured_by.is_some()
    }

    pub fn rule(&self, name: &str) -> Option<&ValidationRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub(crate) fn attach(&mut self) {
        for attribute in &mut self.attributes {
            attribute.attach(&self.qualified_name);
        }
    }

    pub fn validate(&self, project: &IpsProject, ctx: &ValueSetContext<'_>) -> MessageList {
        let mut messages = validate_component_type(self, project, ctx);
        let name = self.qualified_name.as_str();

        if let Some(product_type) = &self.configured_by {
            match project.product_cmpt_type(product_type) {
                None => messages.add(
                    Message::error(
                        component_type::codes::CONFIGURING_TYPE_NOT_FOUND,
                        format!("The configuring product type {product_type} does not exist."),
                    )
                    .with_property(name, "configuredBy"),
                ),
                Some(found) if found.policy_cmpt_type.as_deref() != Some(name) => messages.add(
                    Message::error(
                        component_type::codes::CONFIGURATION_MISMATCH,
                        format!("The product type {product_type} does not configure {name}."),
                    )
                    .with_property(name, "configuredBy"),
                ),
                Some(_) => {}
            }
        }

        for attribute in &self.attributes {
            if attribute.value_set_configured_by_product && self.configured_by.is_none() {
                messages.add(
                    Message::error(
                        codes::ATTRIBUTE_NOT_CONFIGURABLE,
                        format!(
                            "{} cannot be configured by a product, the type is not configurable.",
                            attribute.name
                        ),
                    )
                    .with_property(Attribute::part_id(name, &attribute.name), "valueSetConfiguredByProduct"),
                );
            }
        }

        let visible = project.visible_attribute_names(name);
        let visible: Vec<&str> = visible.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.name.as_str()) {
                messages.add(
                    Message::error(
                        validation_rule::codes::DUPLICATE_NAME,
                        format!("The rule name {} is used more than once.", rule.name),
                    )
                    .with_property(format!("{name}.{}", rule.name), "name"),
                );
            }
            messages.extend(rule.validate(name, &visible));
        }

        messages
    }
}

impl ComponentType for PolicyCmptType {
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
        true
    }
}

/// Message codes specific to policy component types
pub mod codes {
    pub const ATTRIBUTE_NOT_CONFIGURABLE: &str = "POLICY-ATTRIBUTE_NOT_CONFIGURABLE";
}
