//! Process-wide memoization of resolved enum value tables

use crate::enum_type::EnumValueContainer;
use crate::error::{ModelError, ModelResult};
use crate::project::IpsProject;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::sync::Arc;

/// Global cache instance
static ENUM_VALUE_CACHE: OnceCell<EnumValueCache> = OnceCell::new();

/// Enum values resolved against their enum type's columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValueTable {
    pub enum_type: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl EnumValueTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let index = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).and_then(|c| c.as_deref()))
                .collect(),
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Cache of enum value tables keyed by container name and content
/// fingerprint
///
/// Entries live as long as the process. A changed container produces a new
/// fingerprint and thus a new entry.
#[derive(Debug, Default)]
pub struct EnumValueCache {
    entries: DashMap<(String, String), Arc<EnumValueTable>>,
}

impl EnumValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global cache instance
    pub fn global() -> &'static EnumValueCache {
        ENUM_VALUE_CACHE.get_or_init(EnumValueCache::new)
    }

    /// Resolve the values of `container`, reusing an earlier resolution of
    /// identical content.
    pub fn get_or_resolve(
        &self,
        container: &dyn EnumValueContainer,
        project: &IpsProject,
    ) -> ModelResult<Arc<EnumValueTable>> {
        let key = (
            container.qualified_name().to_string(),
            container.content_fingerprint(),
        );
        if let Some(table) = self.entries.get(&key) {
            return Ok(Arc::clone(table.value()));
        }

        let enum_type = container
            .find_enum_type(project)
            .ok_or_else(|| ModelError::ObjectNotFound(container.enum_type_name().to_string()))?;
        let table = Arc::new(EnumValueTable {
            enum_type: enum_type.qualified_name.clone(),
            columns: enum_type.attributes.iter().map(|a| a.name.clone()).collect(),
            rows: container
                .enum_values()
                .iter()
                .map(|v| v.cells().to_vec())
                .collect(),
        });
        tracing::trace!(
            container = %key.0,
            rows = table.len(),
            "resolved enum values"
        );
        let entry = self.entries.entry(key).or_insert(table);
        Ok(Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "enum_cache/enum_cache_tests.rs"]
mod enum_cache_tests;
