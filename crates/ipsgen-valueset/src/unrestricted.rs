//! The value set admitting every value of the datatype

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// All values of the owner's datatype, optionally without null
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnrestrictedValueSet {
    #[serde(default = "default_true")]
    pub contains_null: bool,
}

impl Default for UnrestrictedValueSet {
    fn default() -> Self {
        Self {
            contains_null: true,
        }
    }
}

impl UnrestrictedValueSet {
    pub fn new(contains_null: bool) -> Self {
        Self { contains_null }
    }

    /// The set containing null sorts first.
    pub(crate) fn compare(&self, other: &Self) -> i32 {
        match (self.contains_null, other.contains_null) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}
