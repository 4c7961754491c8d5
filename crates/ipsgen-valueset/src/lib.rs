//! ipsgen-valueset - Value set model
//!
//! A value set describes the permissible values of a typed attribute. Five
//! kinds exist:
//!
//! | Kind | Restricts by | Null |
//! |------|--------------|------|
//! | [`UnrestrictedValueSet`] | nothing | `contains_null` flag |
//! | [`EnumValueSet`] | explicit list of values | `None` entry in the list |
//! | [`RangeValueSet`] | lower/upper bound and step | `contains_null` flag |
//! | [`StringLengthValueSet`] | maximum string length | `contains_null` flag |
//! | [`DerivedValueSet`] | nothing, values are computed | always |
//!
//! Values are kept as strings. The datatype comes from the owning element
//! and is resolved through a [`ValueSetContext`] on every call, so a value
//! set stays editable while the owner's datatype reference is broken.
//!
//! # Example
//!
//! ```
//! use ipsgen_core::DatatypeRegistry;
//! use ipsgen_valueset::{RangeValueSet, ValueSet, ValueSetContext, ValueSetOwnerRef};
//!
//! let registry = DatatypeRegistry::with_builtins();
//! let ctx = ValueSetContext::new(&registry);
//! let owner = ValueSetOwnerRef::new("Policy.age", "Integer");
//!
//! let range = ValueSet::range(owner, "vs-1", RangeValueSet::new(Some("18"), Some("99"), None));
//!
//! assert!(range.contains_value(Some("42"), &ctx));
//! assert!(!range.contains_value(Some("17"), &ctx));
//! ```

mod context;
mod derived;
mod enumeration;
mod error;
mod kind;
mod range;
mod string_length;
mod unrestricted;
mod validation;
mod value_set;
mod xml;

pub use context::ValueSetContext;
pub use derived::DerivedValueSet;
pub use enumeration::EnumValueSet;
pub use error::{ValueSetError, ValueSetResult};
pub use kind::{ValueSetKind, allowed_value_set_kinds};
pub use range::RangeValueSet;
pub use string_length::StringLengthValueSet;
pub use unrestricted::UnrestrictedValueSet;
pub use validation::{ValueSetValidator, codes};
pub use value_set::{ValueSet, ValueSetContent, ValueSetOwnerRef, ValueSetProperty};
pub use xml::XML_TAG;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        EnumValueSet, RangeValueSet, StringLengthValueSet, UnrestrictedValueSet, ValueSet,
        ValueSetContext, ValueSetError, ValueSetKind, ValueSetOwnerRef,
    };
}
