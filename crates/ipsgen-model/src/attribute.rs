//! Attributes of policy and product component types

use ipsgen_core::{Message, MessageList, naming};
use ipsgen_valueset::{
    ValueSet, ValueSetContext, ValueSetKind, ValueSetOwnerRef, allowed_value_set_kinds,
};
use serde::{Deserialize, Serialize};

/// How an attribute obtains its value
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    #[default]
    Changeable,
    Constant,
    DerivedOnTheFly,
    DerivedByExplicitMethodCall,
}

impl AttributeKind {
    pub fn is_derived(self) -> bool {
        matches!(
            self,
            AttributeKind::DerivedOnTheFly | AttributeKind::DerivedByExplicitMethodCall
        )
    }

    /// Constant name of the runtime `AttributeKind` in generated code.
    pub fn java_constant(self) -> &'static str {
        match self {
            AttributeKind::Changeable => "CHANGEABLE",
            AttributeKind::Constant => "CONSTANT",
            AttributeKind::DerivedOnTheFly => "DERIVED_ON_THE_FLY",
            AttributeKind::DerivedByExplicitMethodCall => "DERIVED_BY_EXPLICIT_METHOD_CALL",
        }
    }
}

/// Visibility of a model element in the generated API
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    #[default]
    Published,
    Public,
}

fn default_value_set() -> ValueSet {
    ValueSet::unrestricted(ValueSetOwnerRef::default(), "", true)
}

/// A typed attribute with a value set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Attribute {
    pub name: String,

    /// Qualified name of the value datatype.
    pub datatype: String,

    #[serde(default)]
    pub modifier: Modifier,

    #[serde(default)]
    pub kind: AttributeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(default = "default_value_set")]
    value_set: ValueSet,

    /// Product components may restrict the value set further.
    #[serde(default)]
    pub value_set_configured_by_product: bool,

    /// Refines an attribute of the same name in a supertype.
    #[serde(default)]
    pub overrides: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datatype: datatype.into(),
            modifier: Modifier::default(),
            kind: AttributeKind::default(),
            default_value: None,
            value_set: default_value_set(),
            value_set_configured_by_product: false,
            overrides: false,
            deprecated: false,
            description: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: AttributeKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Replace the value set. Ownership is fixed up on [`Self::attach`].
    #[must_use]
    pub fn with_value_set(mut self, value_set: ValueSet) -> Self {
        self.value_set = value_set;
        self
    }

    #[must_use]
    pub fn overriding(mut self) -> Self {
        self.overrides = true;
        self
    }

    pub fn value_set(&self) -> &ValueSet {
        &self.value_set
    }

    pub fn value_set_mut(&mut self) -> &mut ValueSet {
        &mut self.value_set
    }

    pub fn is_derived(&self) -> bool {
        self.kind.is_derived()
    }

    pub fn is_changeable(&self) -> bool {
        self.kind == AttributeKind::Changeable
    }

    /// Identifier used in messages and as value set owner, `Type.attribute`.
    pub fn part_id(type_name: &str, attribute: &str) -> String {
        format!("{type_name}.{attribute}")
    }

    /// Bind the value set to this attribute after loading or copying.
    pub fn attach(&mut self, type_name: &str) {
        let owner_id = Self::part_id(type_name, &self.name);
        let id = if self.value_set.id().is_empty() {
            format!("{owner_id}.valueSet")
        } else {
            self.value_set.id().to_string()
        };
        self.value_set
            .set_owner(ValueSetOwnerRef::new(owner_id, self.datatype.clone()), id);
        self.value_set.take_changes();
    }

    /// Change the datatype. The value set keeps its string values.
    pub fn set_datatype(&mut self, type_name: &str, datatype: impl Into<String>) {
        self.datatype = datatype.into();
        let id = self.value_set.id().to_string();
        self.value_set.set_owner(
            ValueSetOwnerRef::new(Self::part_id(type_name, &self.name), self.datatype.clone()),
            id,
        );
    }

    /// Switch the value set to another kind under a fresh id.
    pub fn change_value_set_kind(&mut self, kind: ValueSetKind) {
        if self.value_set.kind() == kind {
            return;
        }
        let id = uuid::Uuid::new_v4().to_string();
        self.value_set = self.value_set.change_kind(kind, id);
    }

    /// Check the attribute against its datatype and, if it overrides one,
    /// against the supertype's attribute.
    pub fn validate(
        &self,
        type_name: &str,
        overridden: Option<&Attribute>,
        ctx: &ValueSetContext<'_>,
    ) -> MessageList {
        let mut messages = MessageList::new();
        let part = Self::part_id(type_name, &self.name);

        if !naming::is_valid_java_identifier(&self.name) {
            messages.add(
                Message::error(
                    codes::INVALID_NAME,
                    format!("'{}' is not a valid attribute name.", self.name),
                )
                .with_property(part.clone(), "name"),
            );
        }

        let datatype = ctx.resolve(&self.datatype);
        if datatype.is_none() {
            messages.add(
                Message::error(
                    codes::UNKNOWN_DATATYPE,
                    format!("The datatype {} does not exist.", self.datatype),
                )
                .with_property(part.clone(), "datatype"),
            );
        }

        let allowed = allowed_value_set_kinds(datatype);
        if !allowed.contains(&self.value_set.kind()) {
            messages.add(
                Message::error(
                    codes::VALUE_SET_KIND_NOT_ALLOWED,
                    format!(
                        "A {} value set is not allowed for datatype {}.",
                        self.value_set.kind(),
                        self.datatype
                    ),
                )
                .with_property(part.clone(), "valueSet"),
            );
        } else if datatype.is_some() {
            messages.extend(self.value_set.validate(ctx));
        }

        if let (Some(datatype), Some(default)) = (datatype, self.default_value.as_deref()) {
            if !datatype.is_parsable(Some(default)) {
                messages.add(
                    Message::error(
                        codes::DEFAULT_NOT_PARSABLE,
                        format!("The default value {default} is not a valid {} value.", self.datatype),
                    )
                    .with_property(part.clone(), "defaultValue"),
                );
            } else if !self.value_set.is_abstract()
                && !self.value_set.contains_value(Some(default), ctx)
            {
                messages.add(
                    Message::warning(
                        codes::DEFAULT_NOT_IN_VALUE_SET,
                        format!("The default value {default} is not in the value set."),
                    )
                    .with_property(part.clone(), "defaultValue"),
                );
            }
        }

        match (self.overrides, overridden) {
            (true, None) => messages.add(
                Message::error(
                    codes::NOTHING_TO_OVERRIDE,
                    format!("No supertype defines an attribute {} to override.", self.name),
                )
                .with_property(part.clone(), "overrides"),
            ),
            (true, Some(overridden)) => {
                if overridden.datatype != self.datatype {
                    messages.add(
                        Message::error(
                            codes::OVERRIDE_DATATYPE_MISMATCH,
                            format!(
                                "The datatype {} differs from {} of the overridden attribute.",
                                self.datatype, overridden.datatype
                            ),
                        )
                        .with_property(part.clone(), "datatype"),
                    );
                }
                if !self
                    .value_set
                    .is_detailed_specification_of(overridden.value_set(), ctx)
                {
                    messages.add(
                        Message::error(
                            codes::VALUE_SET_NOT_SUBSET,
                            format!(
                                "The value set of {} must be at least as restrictive as the overridden one.",
                                self.name
                            ),
                        )
                        .with_property(part.clone(), "valueSet"),
                    );
                }
            }
            (false, Some(_)) => messages.add(
                Message::warning(
                    codes::HIDES_SUPERTYPE_ATTRIBUTE,
                    format!(
                        "{} hides an attribute of a supertype without overriding it.",
                        self.name
                    ),
                )
                .with_property(part, "overrides"),
            ),
            (false, None) => {}
        }

        messages
    }
}

/// Message codes reported by attribute validation
pub mod codes {
    pub const INVALID_NAME: &str = "ATTRIBUTE-INVALID_NAME";
    pub const UNKNOWN_DATATYPE: &str = "ATTRIBUTE-UNKNOWN_DATATYPE";
    pub const VALUE_SET_KIND_NOT_ALLOWED: &str = "ATTRIBUTE-VALUESET_KIND_NOT_ALLOWED";
    pub const DEFAULT_NOT_PARSABLE: &str = "ATTRIBUTE-DEFAULT_NOT_PARSABLE";
    pub const DEFAULT_NOT_IN_VALUE_SET: &str = "ATTRIBUTE-DEFAULT_NOT_IN_VALUESET";
    pub const NOTHING_TO_OVERRIDE: &str = "ATTRIBUTE-NOTHING_TO_OVERRIDE";
    pub const OVERRIDE_DATATYPE_MISMATCH: &str = "ATTRIBUTE-OVERRIDE_DATATYPE_MISMATCH";
    pub const VALUE_SET_NOT_SUBSET: &str = "ATTRIBUTE-VALUESET_NOT_SUBSET";
    pub const HIDES_SUPERTYPE_ATTRIBUTE: &str = "ATTRIBUTE-HIDES_SUPERTYPE_ATTRIBUTE";
}

#[cfg(test)]
#[path = "attribute/attribute_tests.rs"]
mod attribute_tests;
