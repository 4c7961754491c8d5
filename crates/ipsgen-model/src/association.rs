//! Associations between component types

use ipsgen_core::{Message, MessageList};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kind of an association
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    /// Master-to-detail composition
    Composition,
    /// Detail-to-master back reference of a composition
    CompositionToMaster,
    #[default]
    Association,
    Aggregation,
}

impl AssociationKind {
    /// Constant name of the runtime `AssociationKind` in generated code.
    pub fn java_constant(self) -> &'static str {
        match self {
            AssociationKind::Composition => "Composition",
            AssociationKind::CompositionToMaster => "CompositionToMaster",
            AssociationKind::Association => "Association",
            AssociationKind::Aggregation => "Aggregation",
        }
    }
}

fn default_max_cardinality() -> Option<u32> {
    Some(1)
}

/// Maximum cardinality: a number or `"*"` for unbounded.
mod max_cardinality {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Bounded(u32),
        Unbounded(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(max) => Repr::Bounded(*max),
            None => Repr::Unbounded("*".to_string()),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Bounded(max) => Ok(Some(max)),
            Repr::Unbounded(text) if text == "*" => Ok(None),
            Repr::Unbounded(text) => Err(serde::de::Error::custom(format!(
                "invalid max cardinality '{text}', expected a number or '*'"
            ))),
        }
    }
}

/// A navigable association from one type to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Association {
    /// Qualified name of the target type.
    pub target: String,

    pub target_role_singular: String,

    pub target_role_plural: String,

    #[serde(default)]
    pub min_cardinality: u32,

    /// `None` means unbounded.
    #[serde(default = "default_max_cardinality", with = "max_cardinality")]
    pub max_cardinality: Option<u32>,

    #[serde(default)]
    pub kind: AssociationKind,

    /// Role name of the inverse association in the target type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse: Option<String>,

    #[serde(default)]
    pub derived_union: bool,

    /// Derived union of the source type this association is a subset of.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsetted_derived_union: Option<String>,

    /// Corresponding association on the product (or policy) side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_association: Option<String>,

    #[serde(default)]
    pub deprecated: bool,
}

impl Association {
    pub fn new(
        target: impl Into<String>,
        kind: AssociationKind,
        singular: impl Into<String>,
        plural: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            target_role_singular: singular.into(),
            target_role_plural: plural.into(),
            min_cardinality: 0,
            max_cardinality: default_max_cardinality(),
            kind,
            inverse: None,
            derived_union: false,
            subsetted_derived_union: None,
            matching_association: None,
            deprecated: false,
        }
    }

    #[must_use]
    pub fn with_cardinality(mut self, min: u32, max: Option<u32>) -> Self {
        self.min_cardinality = min;
        self.max_cardinality = max;
        self
    }

    #[must_use]
    pub fn with_inverse(mut self, inverse: impl Into<String>) -> Self {
        self.inverse = Some(inverse.into());
        self
    }

    /// More than one target allowed.
    pub fn is_to_many(&self) -> bool {
        self.max_cardinality.is_none_or(|max| max > 1)
    }

    /// Role name used for the generated accessor.
    pub fn role_name(&self) -> &str {
        if self.is_to_many() {
            &self.target_role_plural
        } else {
            &self.target_role_singular
        }
    }

    pub fn max_cardinality_text(&self) -> String {
        match self.max_cardinality {
            Some(max) => max.to_string(),
            None => "*".to_string(),
        }
    }

    /// Checks that do not need other types. Target and inverse resolution
    /// are checked by the owning type.
    pub fn validate(&self, type_name: &str) -> MessageList {
        let mut messages = MessageList::new();
        let part = format!("{type_name}.{}", self.target_role_singular);

        if self.target_role_singular.trim().is_empty() || self.target_role_plural.trim().is_empty()
        {
            messages.add(
                Message::error(codes::ROLE_NAME_EMPTY, "Both target role names must be set.")
                    .with_property(part.clone(), "targetRole"),
            );
        } else if self.is_to_many() && self.target_role_singular == self.target_role_plural {
            messages.add(
                Message::error(
                    codes::ROLE_NAMES_EQUAL,
                    "Singular and plural role names must differ for to-many associations.",
                )
                .with_property(part.clone(), "targetRolePlural"),
            );
        }

        if let Some(max) = self.max_cardinality {
            if max == 0 {
                messages.add(
                    Message::error(codes::MAX_CARDINALITY_ZERO, "The maximum cardinality must be at least 1.")
                        .with_property(part.clone(), "maxCardinality"),
                );
            } else if self.min_cardinality > max {
                messages.add(
                    Message::error(
                        codes::MIN_GREATER_THAN_MAX,
                        format!(
                            "The minimum cardinality {} exceeds the maximum {max}.",
                            self.min_cardinality
                        ),
                    )
                    .with_property(part.clone(), "minCardinality"),
                );
            }
        }

        if self.kind == AssociationKind::CompositionToMaster && self.inverse.is_none() {
            messages.add(
                Message::error(
                    codes::MASTER_WITHOUT_INVERSE,
                    "A detail-to-master association needs an inverse association.",
                )
                .with_property(part, "inverse"),
            );
        }

        messages
    }
}

/// Message codes reported by association validation
pub mod codes {
    pub const ROLE_NAME_EMPTY: &str = "ASSOCIATION-ROLE_NAME_EMPTY";
    pub const ROLE_NAMES_EQUAL: &str = "ASSOCIATION-ROLE_NAMES_EQUAL";
    pub const MAX_CARDINALITY_ZERO: &str = "ASSOCIATION-MAX_CARDINALITY_ZERO";
    pub const MIN_GREATER_THAN_MAX: &str = "ASSOCIATION-MIN_GREATER_THAN_MAX";
    pub const MASTER_WITHOUT_INVERSE: &str = "ASSOCIATION-MASTER_WITHOUT_INVERSE";
    pub const TARGET_NOT_FOUND: &str = "ASSOCIATION-TARGET_NOT_FOUND";
    pub const INVERSE_NOT_FOUND: &str = "ASSOCIATION-INVERSE_NOT_FOUND";
    pub const INVERSE_MISMATCH: &str = "ASSOCIATION-INVERSE_MISMATCH";
}
