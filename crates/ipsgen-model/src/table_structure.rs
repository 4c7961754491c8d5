//! Table structures describing tabular product data

use crate::project::IpsProject;
use ipsgen_core::{Message, MessageList, naming};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Whether a product uses one or several contents of a structure
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum TableStructureKind {
    #[default]
    SingleContent,
    MultipleContents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Column {
    pub name: String,
    pub datatype: String,
}

impl Column {
    pub fn new(name: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datatype: datatype.into(),
        }
    }
}

/// Column combination whose values must be unique per row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UniqueKey {
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableStructure {
    pub qualified_name: String,

    #[serde(default)]
    pub kind: TableStructureKind,

    #[serde(default)]
    pub columns: Vec<Column>,

    #[serde(default)]
    pub unique_keys: Vec<UniqueKey>,

    #[serde(default)]
    pub deprecated: bool,
}

impl TableStructure {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind: TableStructureKind::default(),
            columns: Vec::new(),
            unique_keys: Vec::new(),
            deprecated: false,
        }
    }

    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>, datatype: impl Into<String>) -> Self {
        self.columns.push(Column::new(name, datatype));
        self
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn validate(&self, project: &IpsProject) -> MessageList {
        let mut messages = MessageList::new();
        let name = self.qualified_name.as_str();

        if self.columns.is_empty() {
            messages.add(
                Message::warning(codes::NO_COLUMNS, format!("{name} defines no columns."))
                    .with_property(name, "columns"),
            );
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            let part = format!("{name}.{}", column.name);
            if !seen.insert(column.name.as_str()) {
                messages.add(
                    Message::error(
                        codes::DUPLICATE_COLUMN,
                        format!("The column name {} is used more than once.", column.name),
                    )
                    .with_property(part.clone(), "name"),
                );
            }
            if !naming::is_valid_java_identifier(&column.name) {
                messages.add(
                    Message::error(
                        codes::INVALID_COLUMN_NAME,
                        format!("'{}' is not a valid column name.", column.name),
                    )
                    .with_property(part.clone(), "name"),
                );
            }
            if project.resolve_datatype(&column.datatype).is_none() {
                messages.add(
                    Message::error(
                        codes::UNKNOWN_DATATYPE,
                        format!("The datatype {} does not exist.", column.datatype),
                    )
                    .with_property(part, "datatype"),
                );
            }
        }

        for (index, key) in self.unique_keys.iter().enumerate() {
            if key.items.is_empty() {
                messages.add(
                    Message::error(codes::EMPTY_KEY, format!("Unique key {} has no items.", index + 1))
                        .with_property(name, "uniqueKeys"),
                );
            }
            for item in &key.items {
                if self.column(item).is_none() {
                    messages.add(
                        Message::error(
                            codes::KEY_ITEM_NOT_FOUND,
                            format!("The key item {item} is not a column."),
                        )
                        .with_property(name, "uniqueKeys"),
                    );
                }
            }
        }

        messages
    }
}

/// Message codes reported by table structure validation
pub mod codes {
    pub const NO_COLUMNS: &str = "TABLESTRUCTURE-NO_COLUMNS";
    pub const DUPLICATE_COLUMN: &str = "TABLESTRUCTURE-DUPLICATE_COLUMN_NAME";
    pub const INVALID_COLUMN_NAME: &str = "TABLESTRUCTURE-INVALID_COLUMN_NAME";
    pub const UNKNOWN_DATATYPE: &str = "TABLESTRUCTURE-UNKNOWN_DATATYPE";
    pub const EMPTY_KEY: &str = "TABLESTRUCTURE-EMPTY_UNIQUE_KEY";
    pub const KEY_ITEM_NOT_FOUND: &str = "TABLESTRUCTURE-KEY_ITEM_NOT_FOUND";
}

#[cfg(test)]
#[path = "table_structure/table_structure_tests.rs"]
mod table_structure_tests;
