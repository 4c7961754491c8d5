//! ipsgen-model - Design-time object model
//!
//! This crate holds the model the generator works on:
//! - [`PolicyCmptType`] and [`ProductCmptType`] with attributes,
//!   associations and validation rules
//! - [`EnumType`] and [`EnumContent`] with their values
//! - [`TableStructure`]
//! - [`IpsProject`], which loads all of them from TOML files and answers
//!   hierarchy and datatype queries
//!
//! Inconsistent models load without error. Problems are reported by
//! [`IpsProject::validate`] as messages.

mod association;
mod attribute;
mod component_type;
mod enum_cache;
mod enum_type;
mod error;
mod events;
mod object;
mod policy_cmpt_type;
mod product_cmpt_type;
mod project;
mod pull_up;
mod table_structure;
mod validation_rule;

pub use association::{Association, AssociationKind};
pub use attribute::{Attribute, AttributeKind, Modifier};
pub use component_type::ComponentType;
pub use enum_cache::{EnumValueCache, EnumValueTable};
pub use enum_type::{EnumAttribute, EnumContent, EnumType, EnumValue, EnumValueContainer};
pub use error::{ModelError, ModelResult};
pub use events::{ChangeListener, ChangeListeners, ContentChange, ContentChangeEvent, ListenerId};
pub use object::{IpsObject, IpsObjectType};
pub use policy_cmpt_type::PolicyCmptType;
pub use product_cmpt_type::{ProductCmptType, TableUsage};
pub use project::IpsProject;
pub use pull_up::pull_up_enum_attribute;
pub use table_structure::{Column, TableStructure, TableStructureKind, UniqueKey};
pub use validation_rule::ValidationRule;

/// Message codes reported by model validation, per object kind
pub mod codes {
    pub use crate::association::codes as association;
    pub use crate::attribute::codes as attribute;
    pub use crate::component_type::codes as component_type;
    pub use crate::enum_type::codes as enum_type;
    pub use crate::policy_cmpt_type::codes as policy_cmpt_type;
    pub use crate::product_cmpt_type::codes as product_cmpt_type;
    pub use crate::table_structure::codes as table_structure;
    pub use crate::validation_rule::codes as validation_rule;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Association, AssociationKind, Attribute, AttributeKind, ComponentType, EnumAttribute,
        EnumContent, EnumType, EnumValue, EnumValueContainer, IpsObject, IpsProject, ModelError,
        ModelResult, PolicyCmptType, ProductCmptType, TableStructure, ValidationRule,
    };
}
