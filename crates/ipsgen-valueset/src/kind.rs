//! Value set kind tags

use ipsgen_core::{DatatypeKind, ValueDatatype};
use serde::{Deserialize, Serialize};

/// Kind tag of a value set
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum ValueSetKind {
    Unrestricted,
    Enum,
    Range,
    StringLength,
    Derived,
}

impl ValueSetKind {
    /// Element name used for the kind inside `<ValueSet>`.
    pub fn xml_tag(self) -> &'static str {
        match self {
            ValueSetKind::Unrestricted => "AllValues",
            ValueSetKind::Enum => "Enum",
            ValueSetKind::Range => "Range",
            ValueSetKind::StringLength => "StringLength",
            ValueSetKind::Derived => "Derived",
        }
    }

    pub fn from_xml_tag(tag: &str) -> Option<Self> {
        match tag {
            "AllValues" => Some(ValueSetKind::Unrestricted),
            "Enum" => Some(ValueSetKind::Enum),
            "Range" => Some(ValueSetKind::Range),
            "StringLength" => Some(ValueSetKind::StringLength),
            "Derived" => Some(ValueSetKind::Derived),
            _ => None,
        }
    }

    /// Name of the runtime `ValueSetKind` constant in generated code.
    pub fn java_constant(self) -> &'static str {
        match self {
            ValueSetKind::Unrestricted => "AllValues",
            ValueSetKind::Enum => "Enum",
            ValueSetKind::Range => "Range",
            ValueSetKind::StringLength => "StringLength",
            ValueSetKind::Derived => "AllValues",
        }
    }
}

/// Value set kinds an owner with the given datatype may use.
///
/// Unresolvable datatypes only allow the kinds that never look at values.
pub fn allowed_value_set_kinds(datatype: Option<&ValueDatatype>) -> Vec<ValueSetKind> {
    let mut kinds = vec![ValueSetKind::Unrestricted];
    let Some(datatype) = datatype else {
        kinds.push(ValueSetKind::Derived);
        return kinds;
    };

    kinds.push(ValueSetKind::Enum);
    if datatype.supports_ranges() {
        kinds.push(ValueSetKind::Range);
    }
    if datatype.kind == DatatypeKind::String {
        kinds.push(ValueSetKind::StringLength);
    }
    kinds.push(ValueSetKind::Derived);
    kinds
}
