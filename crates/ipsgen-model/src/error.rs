//! Error types for model loading and model operations

use ipsgen_core::ConfigError;
use ipsgen_valueset::ValueSetError;
use thiserror::Error;

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Error type for model operations
///
/// Inconsistent models are not errors. They load fine and report their
/// problems through [`crate::IpsProject::validate`].
#[derive(Debug, Error)]
pub enum ModelError {
    /// Reading a model file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A model file is not valid TOML or has an unknown shape
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Writing a model object failed
    #[error("failed to serialize {qualified_name}: {source}")]
    Serialize {
        qualified_name: String,
        #[source]
        source: toml::ser::Error,
    },

    /// Project configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Two objects share a qualified name
    #[error("duplicate object {0}")]
    DuplicateObject(String),

    /// No object with that qualified name
    #[error("object {0} not found")]
    ObjectNotFound(String),

    /// The object exists but is of another kind
    #[error("object {qualified_name} is not a {expected}")]
    WrongObjectType {
        qualified_name: String,
        expected: &'static str,
    },

    /// No attribute with that name in the type
    #[error("attribute {attribute} not found in {type_name}")]
    AttributeNotFound { type_name: String, attribute: String },

    /// The attribute is already defined there
    #[error("attribute {attribute} already exists in {type_name}")]
    DuplicateAttribute { type_name: String, attribute: String },

    /// Inherited attributes are owned by a supertype and cannot be moved
    #[error("attribute {attribute} of {type_name} is inherited")]
    AttributeInherited { type_name: String, attribute: String },

    /// The target is not a supertype of the given type
    #[error("{supertype} is not a supertype of {type_name}")]
    NotASupertype { type_name: String, supertype: String },

    /// Value set operation failed
    #[error(transparent)]
    ValueSet(#[from] ValueSetError),
}
