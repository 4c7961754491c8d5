//! Validation rules of policy component types

use ipsgen_core::{Message, MessageList, Severity, naming};
use serde::{Deserialize, Serialize};

fn default_severity() -> Severity {
    Severity::Error
}

fn default_true() -> bool {
    true
}

/// A business rule checked by the generated `validate` method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationRule {
    pub name: String,

    pub message_code: String,

    #[serde(default)]
    pub message_text: String,

    #[serde(default = "default_severity")]
    pub severity: Severity,

    /// Names of the attributes whose values the rule checks.
    #[serde(default)]
    pub validated_attributes: Vec<String>,

    /// Product components can switch the rule on and off.
    #[serde(default)]
    pub configured_by_product: bool,

    #[serde(default = "default_true")]
    pub checked_by_default: bool,

    #[serde(default)]
    pub deprecated: bool,
}

impl ValidationRule {
    pub fn new(name: impl Into<String>, message_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message_code: message_code.into(),
            message_text: String::new(),
            severity: default_severity(),
            validated_attributes: Vec::new(),
            configured_by_product: false,
            checked_by_default: true,
            deprecated: false,
        }
    }

    #[must_use]
    pub fn validating(mut self, attribute: impl Into<String>) -> Self {
        self.validated_attributes.push(attribute.into());
        self
    }

    /// Name of the generated rule method, e.g. `checkAgeLimit`.
    pub fn method_name(&self) -> String {
        format!("check{}", naming::capitalize(&self.name))
    }

    /// Checks against the attribute names visible in the owning type.
    pub fn validate(&self, type_name: &str, attribute_names: &[&str]) -> MessageList {
        let mut messages = MessageList::new();
        let part = format!("{type_name}.{}", self.name);

        if !naming::is_valid_java_identifier(&self.name) {
            messages.add(
                Message::error(codes::INVALID_NAME, format!("'{}' is not a valid rule name.", self.name))
                    .with_property(part.clone(), "name"),
            );
        }
        if self.message_code.trim().is_empty() {
            messages.add(
                Message::error(codes::MESSAGE_CODE_EMPTY, "The rule has no message code.")
                    .with_property(part.clone(), "messageCode"),
            );
        }
        for attribute in &self.validated_attributes {
            if !attribute_names.contains(&attribute.as_str()) {
                messages.add(
                    Message::error(
                        codes::UNKNOWN_VALIDATED_ATTRIBUTE,
                        format!("The validated attribute {attribute} does not exist."),
                    )
                    .with_property(part.clone(), "validatedAttributes"),
                );
            }
        }
        if self.configured_by_product && !self.checked_by_default && self.severity == Severity::Info
        {
            messages.add(
                Message::info(
                    codes::INACTIVE_INFO_RULE,
                    "An informational rule that is inactive by default is rarely useful.",
                )
                .with_property(part, "checkedByDefault"),
            );
        }
        messages
    }
}

/// Message codes reported by rule validation
pub mod codes {
    pub const INVALID_NAME: &str = "RULE-INVALID_NAME";
    pub const DUPLICATE_NAME: &str = "RULE-DUPLICATE_NAME";
    pub const MESSAGE_CODE_EMPTY: &str = "RULE-MESSAGE_CODE_EMPTY";
    pub const UNKNOWN_VALIDATED_ATTRIBUTE: &str = "RULE-UNKNOWN_VALIDATED_ATTRIBUTE";
    pub const INACTIVE_INFO_RULE: &str = "RULE-INACTIVE_INFO_RULE";
}
