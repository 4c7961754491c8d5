//! Error types for value set operations

use crate::kind::ValueSetKind;
use thiserror::Error;

/// Result type alias for value set operations
pub type ValueSetResult<T> = Result<T, ValueSetError>;

/// Error type for value set operations
///
/// Validation problems are never reported through this type; they are
/// returned as messages by [`crate::ValueSet::validate`].
#[derive(Debug, Error)]
pub enum ValueSetError {
    /// An unrestricted value set contains all values and cannot be abstract
    #[error("value set {id} is unrestricted and cannot be abstract")]
    AbstractUnrestricted { id: String },

    /// The operation is not defined for the value set kind
    #[error("operation '{operation}' is not supported for {kind} value sets")]
    UnsupportedOperation {
        operation: &'static str,
        kind: ValueSetKind,
    },

    /// Malformed XML input
    #[error("XML error: {0}")]
    Xml(String),

    /// The XML input is well formed but does not describe a value set
    #[error("invalid value set document: {0}")]
    InvalidDocument(String),
}

impl From<roxmltree::Error> for ValueSetError {
    fn from(err: roxmltree::Error) -> Self {
        ValueSetError::Xml(err.to_string())
    }
}

impl From<quick_xml::Error> for ValueSetError {
    fn from(err: quick_xml::Error) -> Self {
        ValueSetError::Xml(err.to_string())
    }
}

impl From<std::io::Error> for ValueSetError {
    fn from(err: std::io::Error) -> Self {
        ValueSetError::Xml(err.to_string())
    }
}
