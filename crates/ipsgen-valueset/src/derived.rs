//! Value sets computed at runtime

use serde::{Deserialize, Serialize};

/// A value set whose members are computed by generated code
///
/// It carries no state, contains null and every other value set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedValueSet {}
