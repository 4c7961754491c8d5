//! ipsgen-core - Shared building blocks for the ipsgen crates
//!
//! This crate provides the types every other ipsgen crate depends on:
//! - [`Message`] and [`MessageList`] for severity-tagged validation results
//! - [`ValueDatatype`] and [`DatatypeRegistry`] for value parsing and ordering
//! - [`IpsProjectConfig`] for `ipsproject.toml` configuration
//! - [`naming`] helpers for Java identifiers and qualified names

mod config;
mod datatype;
mod message;

pub mod naming;

pub use config::{
    ConfigError, GeneratorConfig, IpsProjectConfig, LoggingSection, PROJECT_FILE, ProjectSection,
};
pub use datatype::{DatatypeKind, DatatypeRegistry, ValueDatatype};
pub use message::{Message, MessageList, ObjectProperty, Severity};
pub use rust_decimal::Decimal;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DatatypeKind, DatatypeRegistry, IpsProjectConfig, Message, MessageList, ObjectProperty,
        Severity, ValueDatatype,
    };
}
