//! Error types for code generation

use ipsgen_model::ModelError;
use thiserror::Error;

/// Result type alias for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Error type for generator operations
///
/// `IllegalArgument` and `IllegalState` are contract violations. They abort
/// the artifact being generated; the build carries on with the next one.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A generator or builder received input it is not designed for
    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    /// An internal invariant does not hold
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// Writing generated files failed
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Model lookup failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// XML output failed
    #[error("XML error: {0}")]
    Xml(String),
}

impl GeneratorError {
    pub fn illegal_argument(message: impl Into<String>) -> Self {
        GeneratorError::IllegalArgument(message.into())
    }

    pub fn illegal_state(message: impl Into<String>) -> Self {
        GeneratorError::IllegalState(message.into())
    }

    /// Whether this error is a contract violation rather than an
    /// environment failure.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            GeneratorError::IllegalArgument(_) | GeneratorError::IllegalState(_)
        )
    }
}

impl From<quick_xml::Error> for GeneratorError {
    fn from(err: quick_xml::Error) -> Self {
        GeneratorError::Xml(err.to_string())
    }
}
