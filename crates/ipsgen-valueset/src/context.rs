//! Resolution context for value set operations

use ipsgen_core::{DatatypeRegistry, ValueDatatype};

/// Everything a value set needs to know about its surroundings
///
/// Value sets only store the qualified name of their owner's datatype; the
/// context resolves it on demand.
#[derive(Debug, Clone, Copy)]
pub struct ValueSetContext<'a> {
    datatypes: &'a DatatypeRegistry,
    unified_value_sets: bool,
}

impl<'a> ValueSetContext<'a> {
    pub fn new(datatypes: &'a DatatypeRegistry) -> Self {
        Self {
            datatypes,
            unified_value_sets: false,
        }
    }

    /// Allow enum value sets to refine range value sets.
    #[must_use]
    pub fn with_unified_value_sets(mut self, unified: bool) -> Self {
        self.unified_value_sets = unified;
        self
    }

    pub fn datatypes(&self) -> &'a DatatypeRegistry {
        self.datatypes
    }

    pub fn unified_value_sets(&self) -> bool {
        self.unified_value_sets
    }

    pub fn resolve(&self, qualified_name: &str) -> Option<&'a ValueDatatype> {
        self.datatypes.resolve(qualified_name)
    }
}
