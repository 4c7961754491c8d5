//! Enumeration types, their values and separate enum contents
//!
//! An enum type's attribute list includes inherited copies of supertype
//! attributes (flagged `inherited`), so every row of values has one cell
//! per entry of [`EnumType::attributes`].

use crate::project::IpsProject;
use ipsgen_core::{Message, MessageList, naming};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// A column of an enum type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumAttribute {
    pub name: String,

    /// Qualified datatype name; `None` on inherited copies, which take the
    /// datatype of the supertype's attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,

    /// Copy of an attribute defined in a supertype.
    #[serde(default)]
    pub inherited: bool,

    #[serde(default)]
    pub unique: bool,

    /// Values of this column identify enum values at runtime.
    #[serde(default)]
    pub identifier: bool,

    /// Values of this column are shown to users.
    #[serde(default)]
    pub display_name: bool,

    /// The column holding Java literal names.
    #[serde(default)]
    pub literal_name: bool,
}

impl EnumAttribute {
    pub fn new(name: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datatype: Some(datatype.into()),
            inherited: false,
            unique: false,
            identifier: false,
            display_name: false,
            literal_name: false,
        }
    }

    /// Inherited copy of `attribute`. Keeps the column flags, drops the
    /// datatype.
    pub fn inherited_copy(attribute: &EnumAttribute) -> Self {
        Self {
            datatype: None,
            inherited: true,
            ..attribute.clone()
        }
    }

    #[must_use]
    pub fn identifier(mut self) -> Self {
        self.identifier = true;
        self.unique = true;
        self
    }

    #[must_use]
    pub fn display_name(mut self) -> Self {
        self.display_name = true;
        self
    }

    #[must_use]
    pub fn literal_name(mut self) -> Self {
        self.literal_name = true;
        self.unique = true;
        self
    }
}

/// Null cell in project files: an empty inline table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NullCell {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum CellRepr {
    Value(String),
    Null(NullCell),
}

/// One row of an enum type or enum content
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<CellRepr>", into = "Vec<CellRepr>")]
pub struct EnumValue {
    cells: Vec<Option<String>>,
}

impl From<Vec<CellRepr>> for EnumValue {
    fn from(cells: Vec<CellRepr>) -> Self {
        Self {
            cells: cells
                .into_iter()
                .map(|cell| match cell {
                    CellRepr::Value(value) => Some(value),
                    CellRepr::Null(_) => None,
                })
                .collect(),
        }
    }
}

impl From<EnumValue> for Vec<CellRepr> {
    fn from(value: EnumValue) -> Self {
        value
            .cells
            .into_iter()
            .map(|cell| match cell {
                Some(value) => CellRepr::Value(value),
                None => CellRepr::Null(NullCell {}),
            })
            .collect()
    }
}

impl EnumValue {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(|c| c.map(Into::into)).collect(),
        }
    }

    /// Row of non-null cells.
    pub fn of<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(|c| Some(c.into())).collect(),
        }
    }

    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|c| c.as_deref())
    }

    pub(crate) fn push_null(&mut self) {
        self.cells.push(None);
    }
}

/// Anything that holds enum values: an enum type or an enum content
pub trait EnumValueContainer {
    fn qualified_name(&self) -> &str;

    fn enum_values(&self) -> &[EnumValue];

    /// Qualified name of the enum type describing the values.
    fn enum_type_name(&self) -> &str;

    /// Whether values may be stored here at all.
    fn is_capable_of_containing_values(&self, project: &IpsProject) -> bool;

    /// Stable fingerprint of the stored values, used as cache key.
    fn content_fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.enum_type_name().as_bytes());
        for value in self.enum_values() {
            for cell in value.cells() {
                match cell {
                    Some(text) => {
                        hasher.update([1u8]);
                        hasher.update((text.len() as u64).to_le_bytes());
                        hasher.update(text.as_bytes());
                    }
                    None => hasher.update([0u8]),
                }
            }
            hasher.update([0xffu8]);
        }
        hex::encode(hasher.finalize())
    }

    fn find_enum_type<'a>(&self, project: &'a IpsProject) -> Option<&'a EnumType> {
        project.enum_type(self.enum_type_name())
    }
}

/// An enumeration type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumType {
    pub qualified_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supertype: Option<String>,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    /// Values may be added by enum contents.
    #[serde(default)]
    pub extensible: bool,

    /// Qualified name of the enum content holding the extension values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_content_name: Option<String>,

    #[serde(default)]
    pub attributes: Vec<EnumAttribute>,

    #[serde(default)]
    pub values: Vec<EnumValue>,

    #[serde(default)]
    pub deprecated: bool,
}

impl EnumType {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            supertype: None,
            is_abstract: false,
            extensible: false,
            enum_content_name: None,
            attributes: Vec::new(),
            values: Vec::new(),
            deprecated: false,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&EnumAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    /// Attributes defined here, without inherited copies.
    pub fn own_attributes(&self) -> impl Iterator<Item = &EnumAttribute> {
        self.attributes.iter().filter(|a| !a.inherited)
    }

    pub fn identifier_attribute(&self) -> Option<&EnumAttribute> {
        self.attributes.iter().find(|a| a.identifier)
    }

    pub fn literal_name_attribute(&self) -> Option<&EnumAttribute> {
        self.attributes.iter().find(|a| a.literal_name)
    }

    /// Number of value columns including the literal name and inherited copies.
    pub fn column_count(&self) -> usize {
        self.attributes.len()
    }

    /// Identifier values of the values stored in the type itself.
    pub fn identifier_values(&self) -> Vec<String> {
        let Some(index) = self.attributes.iter().position(|a| a.identifier) else {
            return Vec::new();
        };
        self.values
            .iter()
            .filter_map(|v| v.cell(index).map(str::to_string))
            .collect()
    }

    /// Add an attribute and give every existing value a null cell for it.
    pub(crate) fn push_attribute(&mut self, attribute: EnumAttribute) {
        self.attributes.push(attribute);
        for value in &mut self.values {
            value.push_null();
        }
    }

    pub fn validate(&self, project: &IpsProject) -> MessageList {
        let mut messages = MessageList::new();
        let name = self.qualified_name.as_str();

        if let Some(supertype) = &self.supertype {
            match project.enum_type(supertype) {
                None => messages.add(
                    Message::error(
                        codes::SUPERTYPE_NOT_FOUND,
                        format!("The supertype {supertype} does not exist."),
                    )
                    .with_property(name, "supertype"),
                ),
                Some(found) if !found.is_abstract => messages.add(
                    Message::error(
                        codes::SUPERTYPE_NOT_ABSTRACT,
                        format!("The supertype {supertype} must be abstract."),
                    )
                    .with_property(name, "supertype"),
                ),
                Some(_) => {}
            }
        }

        let mut seen = HashSet::new();
        for attribute in &self.attributes {
            let part = format!("{name}.{}", attribute.name);
            if !seen.insert(attribute.name.as_str()) {
                messages.add(
                    Message::error(
                        codes::DUPLICATE_ATTRIBUTE,
                        format!("The attribute name {} is used more than once.", attribute.name),
                    )
                    .with_property(part.clone(), "name"),
                );
            }
            if !naming::is_valid_java_identifier(&attribute.name) {
                messages.add(
                    Message::error(
                        codes::INVALID_ATTRIBUTE_NAME,
                        format!("'{}' is not a valid attribute name.", attribute.name),
                    )
                    .with_property(part.clone(), "name"),
                );
            }
            if attribute.inherited {
                if project.find_enum_attribute_in_supertypes(name, &attribute.name).is_none() {
                    messages.add(
                        Message::error(
                            codes::INHERITED_ATTRIBUTE_NOT_FOUND,
                            format!(
                                "No supertype of {name} defines the inherited attribute {}.",
                                attribute.name
                            ),
                        )
                        .with_property(part, "inherited"),
                    );
                }
            } else {
                match attribute.datatype.as_deref() {
                    None => messages.add(
                        Message::error(
                            codes::DATATYPE_MISSING,
                            format!("The attribute {} has no datatype.", attribute.name),
                        )
                        .with_property(part, "datatype"),
                    ),
                    Some(datatype) if project.resolve_datatype(datatype).is_none() => messages.add(
                        Message::error(
                            codes::UNKNOWN_DATATYPE,
                            format!("The datatype {datatype} does not exist."),
                        )
                        .with_property(part, "datatype"),
                    ),
                    Some(_) => {}
                }
            }
        }

        if !self.is_abstract && self.identifier_attribute().is_none() {
            messages.add(
                Message::error(
                    codes::NO_IDENTIFIER,
                    format!("The enum type {name} needs an identifier attribute."),
                )
                .with_property(name, "attributes"),
            );
        }

        if self.is_abstract && !self.values.is_empty() {
            messages.add(
                Message::error(
                    codes::ABSTRACT_WITH_VALUES,
                    format!("The abstract enum type {name} cannot contain values."),
                )
                .with_property(name, "values"),
            );
        }

        if self.extensible && self.enum_content_name.is_none() {
            messages.add(
                Message::warning(
                    codes::CONTENT_NAME_MISSING,
                    format!("The extensible enum type {name} names no enum content."),
                )
                .with_property(name, "enumContentName"),
            );
        }

        messages.extend(validate_values(self, &self.values, name, project));
        messages
    }
}

impl EnumValueContainer for EnumType {
    fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    fn enum_values(&self) -> &[EnumValue] {
        &self.values
    }

    fn enum_type_name(&self) -> &str {
        &self.qualified_name
    }

    fn is_capable_of_containing_values(&self, _project: &IpsProject) -> bool {
        !self.is_abstract
    }
}

/// Values of an extensible enum type kept outside the type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumContent {
    pub qualified_name: String,

    pub enum_type: String,

    #[serde(default)]
    pub values: Vec<EnumValue>,
}

impl EnumContent {
    pub fn new(qualified_name: impl Into<String>, enum_type: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            enum_type: enum_type.into(),
            values: Vec::new(),
        }
    }

    pub fn validate(&self, project: &IpsProject) -> MessageList {
        let mut messages = MessageList::new();
        let name = self.qualified_name.as_str();
        match project.enum_type(&self.enum_type) {
            None => messages.add(
                Message::error(
                    codes::CONTENT_TYPE_NOT_FOUND,
                    format!("The enum type {} does not exist.", self.enum_type),
                )
                .with_property(name, "enumType"),
            ),
            Some(enum_type) => {
                if !enum_type.extensible {
                    messages.add(
                        Message::error(
                            codes::CONTENT_TYPE_NOT_EXTENSIBLE,
                            format!("The enum type {} is not extensible.", self.enum_type),
                        )
                        .with_property(name, "enumType"),
                    );
                }
                messages.extend(validate_values(enum_type, &self.values, name, project));
            }
        }
        messages
    }
}

impl EnumValueContainer for EnumContent {
    fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    fn enum_values(&self) -> &[EnumValue] {
        &self.values
    }

    fn enum_type_name(&self) -> &str {
        &self.enum_type
    }

    fn is_capable_of_containing_values(&self, project: &IpsProject) -> bool {
        project
            .enum_type(&self.enum_type)
            .is_some_and(|t| t.extensible && !t.is_abstract)
    }
}

fn validate_values(
    enum_type: &EnumType,
    values: &[EnumValue],
    container: &str,
    project: &IpsProject,
) -> MessageList {
    let mut messages = MessageList::new();
    let columns = enum_type.column_count();

    for (row, value) in values.iter().enumerate() {
        if value.cells().len() != columns {
            messages.add(
                Message::error(
                    codes::VALUE_COLUMN_MISMATCH,
                    format!(
                        "Value {} has {} cells but {} defines {columns} attributes.",
                        row + 1,
                        value.cells().len(),
                        enum_type.qualified_name
                    ),
                )
                .with_property(format!("{container}#{}", row + 1), "cells"),
            );
            continue;
        }
        for (index, attribute) in enum_type.attributes.iter().enumerate() {
            let Some(datatype) = project
                .enum_attribute_datatype(&enum_type.qualified_name, &attribute.name)
                .and_then(|dt| project.resolve_datatype(dt))
            else {
                continue;
            };
            let cell = value.cell(index);
            if !datatype.is_parsable(cell) {
                messages.add(
                    Message::error(
                        codes::VALUE_NOT_PARSABLE,
                        format!(
                            "{} is not a valid {} value for {}.",
                            cell.unwrap_or_default(),
                            datatype.qualified_name,
                            attribute.name
                        ),
                    )
                    .with_property(format!("{container}#{}", row + 1), attribute.name.clone()),
                );
            }
        }
    }

    for (index, attribute) in enum_type.attributes.iter().enumerate() {
        if !attribute.unique {
            continue;
        }
        let mut seen = HashSet::new();
        for value in values {
            if let Some(cell) = value.cell(index)
                && !seen.insert(cell)
            {
                messages.add(
                    Message::error(
                        codes::DUPLICATE_UNIQUE_VALUE,
                        format!("The value {cell} of unique attribute {} is not unique.", attribute.name),
                    )
                    .with_property(container, attribute.name.clone()),
                );
            }
        }
    }

    messages
}

/// Message codes reported by enum validation
pub mod codes {
    pub const SUPERTYPE_NOT_FOUND: &str = "ENUMTYPE-SUPERTYPE_NOT_FOUND";
    pub const SUPERTYPE_NOT_ABSTRACT: &str = "ENUMTYPE-SUPERTYPE_NOT_ABSTRACT";
    pub const DUPLICATE_ATTRIBUTE: &str = "ENUMTYPE-DUPLICATE_ATTRIBUTE_NAME";
    pub const INVALID_ATTRIBUTE_NAME: &str = "ENUMTYPE-INVALID_ATTRIBUTE_NAME";
    pub const INHERITED_ATTRIBUTE_NOT_FOUND: &str = "ENUMTYPE-INHERITED_ATTRIBUTE_NOT_FOUND";
    pub const DATATYPE_MISSING: &str = "ENUMTYPE-DATATYPE_MISSING";
    pub const UNKNOWN_DATATYPE: &str = "ENUMTYPE-UNKNOWN_DATATYPE";
    pub const NO_IDENTIFIER: &str = "ENUMTYPE-NO_IDENTIFIER_ATTRIBUTE";
    pub const ABSTRACT_WITH_VALUES: &str = "ENUMTYPE-ABSTRACT_TYPE_WITH_VALUES";
    pub const CONTENT_NAME_MISSING: &str = "ENUMTYPE-ENUM_CONTENT_NAME_MISSING";
    pub const VALUE_COLUMN_MISMATCH: &str = "ENUMVALUE-COLUMN_COUNT_MISMATCH";
    pub const VALUE_NOT_PARSABLE: &str = "ENUMVALUE-VALUE_NOT_PARSABLE";
    pub const DUPLICATE_UNIQUE_VALUE: &str = "ENUMVALUE-DUPLICATE_UNIQUE_VALUE";
    pub const CONTENT_TYPE_NOT_FOUND: &str = "ENUMCONTENT-ENUM_TYPE_NOT_FOUND";
    pub const CONTENT_TYPE_NOT_EXTENSIBLE: &str = "ENUMCONTENT-ENUM_TYPE_NOT_EXTENSIBLE";
}
