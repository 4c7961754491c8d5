//! Generator model nodes
//!
//! A node is a read-only view of one design-time element with everything
//! the annotation generators and builders ask about it already resolved:
//! Java class names, datatypes, the configuring product type, the inverse
//! of an association. Nodes own their data and never point back into the
//! project, so a node built for one compilation unit can be shared with any
//! other unit of the same build run.
//!
//! Nodes are created through a [`GeneratorModelContext`], which caches them
//! for the duration of one build run and is dropped afterwards.

use crate::error::{GeneratorError, GeneratorResult};
use crate::jvm_types::{JvmType, map_datatype};
use ipsgen_core::{Severity, ValueDatatype, naming};
use ipsgen_model::{
    Association, AssociationKind, Attribute, AttributeKind, ComponentType, EnumValueCache,
    EnumValueTable, IpsObject, IpsProject, Modifier, ModelError, TableStructureKind,
    ValidationRule,
};
use ipsgen_valueset::{ValueSet, ValueSetKind};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// Component types
// ============================================================================

/// Which kind of component type a [`GenType`] stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum GenTypeKind {
    PolicyCmptType,
    ProductCmptType,
}

/// Policy or product component type
#[derive(Debug, Clone)]
pub struct GenType {
    pub kind: GenTypeKind,
    pub qualified_name: String,
    /// Qualified name of the generated class.
    pub class_name: String,
    pub superclass: Option<String>,
    pub is_abstract: bool,
    pub deprecated: bool,
    pub description: Option<String>,
    /// Product classes only: the class records changes over time.
    pub changing_over_time: bool,
    /// Interface generated next to the class, if enabled.
    pub published_interface: Option<String>,
    pub attributes: Vec<GenAttribute>,
    pub associations: Vec<GenAssociation>,
    /// Product classes only: policy attributes whose value sets and
    /// defaults the product defines.
    pub configured_attributes: Vec<GenAttribute>,
    configuration_partner: Option<String>,
    rules: Vec<GenValidationRule>,
}

impl GenType {
    pub fn simple_class_name(&self) -> &str {
        naming::simple_name(&self.class_name)
    }

    pub fn package(&self) -> &str {
        naming::package_of(&self.class_name)
    }

    pub fn is_policy_type(&self) -> bool {
        self.kind == GenTypeKind::PolicyCmptType
    }

    /// Policy types only: class of the configuring product type.
    pub fn product_class(&self) -> Option<&str> {
        match self.kind {
            GenTypeKind::PolicyCmptType => self.configuration_partner.as_deref(),
            GenTypeKind::ProductCmptType => None,
        }
    }

    /// Product types only: class of the configured policy type.
    pub fn policy_class(&self) -> Option<&str> {
        match self.kind {
            GenTypeKind::ProductCmptType => self.configuration_partner.as_deref(),
            GenTypeKind::PolicyCmptType => None,
        }
    }

    pub fn is_configured_by_product(&self) -> bool {
        self.product_class().is_some()
    }

    pub fn is_configuration_for_policy_cmpt_type(&self) -> bool {
        self.policy_class().is_some()
    }

    /// Rules in declaration order; empty for product types.
    pub fn validation_rules(&self) -> &[GenValidationRule] {
        &self.rules
    }

    pub fn attribute(&self, name: &str) -> Option<&GenAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn association_names(&self) -> Vec<&str> {
        self.associations
            .iter()
            .map(|a| a.role_singular.as_str())
            .collect()
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// Attribute of a component type with its resolved datatype
#[derive(Debug, Clone)]
pub struct GenAttribute {
    pub name: String,
    /// Qualified name of the owning type.
    pub type_name: String,
    pub datatype: ValueDatatype,
    pub jvm_type: JvmType,
    pub kind: AttributeKind,
    pub published: bool,
    pub default_value: Option<String>,
    pub value_set: ValueSet,
    pub overrides: bool,
    pub deprecated: bool,
    configured_by_product: bool,
}

impl GenAttribute {
    fn build(
        project: &IpsProject,
        type_name: &str,
        attribute: &Attribute,
        type_configured: bool,
    ) -> GeneratorResult<Self> {
        let datatype = project
            .resolve_datatype(&attribute.datatype)
            .cloned()
            .ok_or_else(|| {
                GeneratorError::illegal_state(format!(
                    "datatype {} of {type_name}.{} cannot be resolved",
                    attribute.datatype, attribute.name
                ))
            })?;
        Ok(Self {
            name: attribute.name.clone(),
            type_name: type_name.to_string(),
            jvm_type: map_datatype(&datatype),
            datatype,
            kind: attribute.kind,
            published: attribute.modifier == Modifier::Published,
            default_value: attribute.default_value.clone(),
            value_set: attribute.value_set().clone(),
            overrides: attribute.overrides,
            deprecated: attribute.deprecated,
            configured_by_product: type_configured && attribute.value_set_configured_by_product,
        })
    }

    /// Whether a product defines default value and allowed values.
    pub fn is_configured_by_product(&self) -> bool {
        self.configured_by_product
    }

    pub fn is_changeable(&self) -> bool {
        self.kind == AttributeKind::Changeable
    }

    pub fn is_derived(&self) -> bool {
        self.kind.is_derived()
    }

    pub fn value_set_kind(&self) -> ValueSetKind {
        self.value_set.kind()
    }

    pub fn field_name(&self) -> String {
        self.name.clone()
    }

    /// Java type of the field; primitives stay primitive.
    pub fn java_type(&self) -> &str {
        self.jvm_type.java_type(false)
    }

    pub fn getter_name(&self) -> String {
        let prefix = if self.jvm_type.primitive == "boolean" {
            "is"
        } else {
            "get"
        };
        format!("{prefix}{}", naming::capitalize(&self.name))
    }

    pub fn setter_name(&self) -> String {
        format!("set{}", naming::capitalize(&self.name))
    }

    /// Name of the `PROPERTY_` constant holding the attribute name.
    pub fn property_constant(&self) -> String {
        format!("PROPERTY_{}", naming::to_constant_name(&self.name))
    }

    pub fn allowed_values_method_name(&self) -> String {
        format!("getAllowedValuesFor{}", naming::capitalize(&self.name))
    }

    pub fn default_value_method_name(&self) -> String {
        format!("getDefaultValue{}", naming::capitalize(&self.name))
    }

    /// Constant holding the value set defined in the model.
    pub fn max_allowed_values_constant(&self) -> String {
        format!("MAX_ALLOWED_VALUES_FOR_{}", naming::to_constant_name(&self.name))
    }
}

// ============================================================================
// Associations
// ============================================================================

/// Resolved inverse of an association
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenInverseAssociation {
    /// Singular role name of the inverse in the target type.
    pub role_name: String,
    pub to_many: bool,
}

#[derive(Debug, Clone)]
pub struct GenAssociation {
    pub type_name: String,
    pub role_singular: String,
    pub role_plural: String,
    pub target: String,
    pub target_class: String,
    pub kind: AssociationKind,
    pub min_cardinality: u32,
    pub max_cardinality: Option<u32>,
    pub derived_union: bool,
    pub subsetted_derived_union: Option<String>,
    pub matching_association: Option<String>,
    pub deprecated: bool,
    to_many: bool,
    inverse: Option<GenInverseAssociation>,
}

impl GenAssociation {
    fn build(project: &IpsProject, ty: &dyn ComponentType, association: &Association) -> Self {
        let inverse = project
            .find_inverse_association(association)
            .map(|found| GenInverseAssociation {
                role_name: found.target_role_singular.clone(),
                to_many: found.is_to_many(),
            });
        Self {
            type_name: ty.qualified_name().to_string(),
            role_singular: association.target_role_singular.clone(),
            role_plural: association.target_role_plural.clone(),
            target: association.target.clone(),
            target_class: project.java_class_name(&association.target),
            kind: association.kind,
            min_cardinality: association.min_cardinality,
            max_cardinality: association.max_cardinality,
            derived_union: association.derived_union,
            subsetted_derived_union: association.subsetted_derived_union.clone(),
            matching_association: association.matching_association.clone(),
            deprecated: association.deprecated,
            to_many: association.is_to_many(),
            inverse,
        }
    }

    /// The inverse association, when the model names one and it resolves.
    pub fn inverse_association(&self) -> Option<&GenInverseAssociation> {
        self.inverse.as_ref()
    }

    pub fn has_inverse_association(&self) -> bool {
        self.inverse.is_some()
    }

    pub fn is_to_many(&self) -> bool {
        self.to_many
    }

    /// Composition detail pointing back to its master.
    pub fn is_composition_to_master(&self) -> bool {
        self.kind == AssociationKind::CompositionToMaster
    }

    pub fn target_simple_name(&self) -> &str {
        naming::simple_name(&self.target_class)
    }

    pub fn field_name(&self) -> String {
        if self.is_to_many() {
            naming::uncapitalize(&self.role_plural)
        } else {
            naming::uncapitalize(&self.role_singular)
        }
    }

    pub fn getter_name(&self) -> String {
        if self.is_to_many() {
            format!("get{}", naming::capitalize(&self.role_plural))
        } else {
            format!("get{}", naming::capitalize(&self.role_singular))
        }
    }

    pub fn setter_name(&self) -> String {
        format!("set{}", naming::capitalize(&self.role_singular))
    }

    pub fn adder_name(&self) -> String {
        format!("add{}", naming::capitalize(&self.role_singular))
    }

    pub fn remover_name(&self) -> String {
        format!("remove{}", naming::capitalize(&self.role_singular))
    }

    /// Java expression for the maximum cardinality.
    pub fn max_cardinality_literal(&self) -> String {
        match self.max_cardinality {
            Some(max) => max.to_string(),
            None => "Integer.MAX_VALUE".to_string(),
        }
    }
}

// ============================================================================
// Validation rules
// ============================================================================

#[derive(Debug, Clone)]
pub struct GenValidationRule {
    pub name: String,
    pub method_name: String,
    pub message_code: String,
    pub severity: Severity,
    pub validated_attributes: Vec<String>,
    pub configured_by_product: bool,
    pub checked_by_default: bool,
    pub deprecated: bool,
}

impl GenValidationRule {
    fn build(rule: &ValidationRule) -> Self {
        Self {
            name: rule.name.clone(),
            method_name: rule.method_name(),
            message_code: rule.message_code.clone(),
            severity: rule.severity,
            validated_attributes: rule.validated_attributes.clone(),
            configured_by_product: rule.configured_by_product,
            checked_by_default: rule.checked_by_default,
            deprecated: rule.deprecated,
        }
    }

    /// Constant of the runtime `Severity`.
    pub fn severity_constant(&self) -> &'static str {
        match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }

    /// Name of the constant holding the message code.
    pub fn message_code_constant(&self) -> String {
        format!("MSG_CODE_{}", naming::to_constant_name(&self.name))
    }
}

// ============================================================================
// Enumerations
// ============================================================================

/// Column of an enum type with its resolved datatype
#[derive(Debug, Clone)]
pub struct GenEnumAttribute {
    pub name: String,
    /// Position of the column in each value row.
    pub index: usize,
    pub datatype: ValueDatatype,
    pub jvm_type: JvmType,
    pub inherited: bool,
    pub unique: bool,
    pub identifier: bool,
    pub display_name: bool,
    pub literal_name: bool,
}

impl GenEnumAttribute {
    pub fn getter_name(&self) -> String {
        format!("get{}", naming::capitalize(&self.name))
    }
}

#[derive(Debug, Clone)]
pub struct GenEnumType {
    pub qualified_name: String,
    pub class_name: String,
    /// Class generated for the supertype.
    pub superinterface: Option<String>,
    pub is_abstract: bool,
    pub extensible: bool,
    pub enum_content_name: Option<String>,
    pub deprecated: bool,
    pub attributes: Vec<GenEnumAttribute>,
    /// Values stored in the type itself.
    pub values: Arc<EnumValueTable>,
}

impl GenEnumType {
    pub fn simple_class_name(&self) -> &str {
        naming::simple_name(&self.class_name)
    }

    pub fn package(&self) -> &str {
        naming::package_of(&self.class_name)
    }

    /// Generated as a Java `enum`; abstract types become interfaces and
    /// extensible types classes.
    pub fn is_java_enum(&self) -> bool {
        !self.is_abstract && !self.extensible
    }

    pub fn identifier_attribute(&self) -> Option<&GenEnumAttribute> {
        self.attributes.iter().find(|a| a.identifier)
    }

    pub fn literal_name_attribute(&self) -> Option<&GenEnumAttribute> {
        self.attributes.iter().find(|a| a.literal_name)
    }

    /// Attributes stored as fields; the literal name column is not one.
    pub fn field_attributes(&self) -> impl Iterator<Item = &GenEnumAttribute> {
        self.attributes.iter().filter(|a| !a.literal_name)
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Java constant name of a value row.
    ///
    /// Taken from the literal name column, else derived from the identifier.
    pub fn literal_name(&self, row: usize) -> GeneratorResult<String> {
        let cells = self.values.rows.get(row).ok_or_else(|| {
            GeneratorError::illegal_argument(format!(
                "{} has no value at index {row}",
                self.qualified_name
            ))
        })?;
        let source = self
            .literal_name_attribute()
            .or_else(|| self.identifier_attribute())
            .and_then(|a| cells.get(a.index))
            .and_then(|cell| cell.as_deref())
            .ok_or_else(|| {
                GeneratorError::illegal_state(format!(
                    "value {row} of {} has neither literal name nor identifier",
                    self.qualified_name
                ))
            })?;
        let literal = naming::to_constant_name(source)
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
            .collect::<String>();
        if literal.starts_with(|c: char| c.is_ascii_digit()) {
            Ok(format!("_{literal}"))
        } else {
            Ok(literal)
        }
    }
}

// ============================================================================
// Table structures
// ============================================================================

#[derive(Debug, Clone)]
pub struct GenColumn {
    pub name: String,
    pub datatype: ValueDatatype,
    pub jvm_type: JvmType,
}

impl GenColumn {
    pub fn getter_name(&self) -> String {
        format!("get{}", naming::capitalize(&self.name))
    }
}

#[derive(Debug, Clone)]
pub struct GenTableStructure {
    pub qualified_name: String,
    pub class_name: String,
    pub kind: TableStructureKind,
    pub columns: Vec<GenColumn>,
    pub unique_keys: Vec<Vec<String>>,
    pub deprecated: bool,
}

impl GenTableStructure {
    pub fn simple_class_name(&self) -> &str {
        naming::simple_name(&self.class_name)
    }

    pub fn package(&self) -> &str {
        naming::package_of(&self.class_name)
    }

    pub fn row_class_name(&self) -> String {
        format!("{}Row", self.simple_class_name())
    }

    pub fn column(&self, name: &str) -> Option<&GenColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Constant of the runtime `TableStructureKind`.
    pub fn kind_constant(&self) -> &'static str {
        match self.kind {
            TableStructureKind::SingleContent => "SINGLE_CONTENT",
            TableStructureKind::MultipleContents => "MULTIPLE_CONTENTS",
        }
    }
}

// ============================================================================
// Node references
// ============================================================================

/// Reference to any node, the input of annotation generators
#[derive(Debug, Clone, Copy)]
pub enum ModelNode<'a> {
    Type(&'a GenType),
    Attribute(&'a GenAttribute),
    Association(&'a GenAssociation),
    ValidationRule(&'a GenValidationRule),
    EnumType(&'a GenEnumType),
    EnumAttribute(&'a GenEnumAttribute),
    TableStructure(&'a GenTableStructure),
}

impl<'a> ModelNode<'a> {
    pub fn as_type(&self) -> Option<&'a GenType> {
        match *self {
            ModelNode::Type(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&'a GenAttribute> {
        match *self {
            ModelNode::Attribute(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_association(&self) -> Option<&'a GenAssociation> {
        match *self {
            ModelNode::Association(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_validation_rule(&self) -> Option<&'a GenValidationRule> {
        match *self {
            ModelNode::ValidationRule(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_enum_type(&self) -> Option<&'a GenEnumType> {
        match *self {
            ModelNode::EnumType(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_enum_attribute(&self) -> Option<&'a GenEnumAttribute> {
        match *self {
            ModelNode::EnumAttribute(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_table_structure(&self) -> Option<&'a GenTableStructure> {
        match *self {
            ModelNode::TableStructure(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_deprecated(&self) -> bool {
        match self {
            ModelNode::Type(n) => n.deprecated,
            ModelNode::Attribute(n) => n.deprecated,
            ModelNode::Association(n) => n.deprecated,
            ModelNode::ValidationRule(n) => n.deprecated,
            ModelNode::EnumType(n) => n.deprecated,
            ModelNode::EnumAttribute(_) => false,
            ModelNode::TableStructure(n) => n.deprecated,
        }
    }

    /// Short node kind for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ModelNode::Type(_) => "type",
            ModelNode::Attribute(_) => "attribute",
            ModelNode::Association(_) => "association",
            ModelNode::ValidationRule(_) => "validation rule",
            ModelNode::EnumType(_) => "enum type",
            ModelNode::EnumAttribute(_) => "enum attribute",
            ModelNode::TableStructure(_) => "table structure",
        }
    }
}

// ============================================================================
// Context
// ============================================================================

/// Node factory and cache for one build run
///
/// Safe to share between threads building different compilation units.
/// Nodes are immutable once created.
pub struct GeneratorModelContext<'p> {
    project: &'p IpsProject,
    types: Mutex<HashMap<String, Arc<GenType>>>,
    enum_types: Mutex<HashMap<String, Arc<GenEnumType>>>,
    tables: Mutex<HashMap<String, Arc<GenTableStructure>>>,
}

impl<'p> GeneratorModelContext<'p> {
    pub fn new(project: &'p IpsProject) -> Self {
        Self {
            project,
            types: Mutex::new(HashMap::new()),
            enum_types: Mutex::new(HashMap::new()),
            tables: Mutex::new(HashMap::new()),
        }
    }

    pub fn project(&self) -> &'p IpsProject {
        self.project
    }

    /// Number of cached nodes of all kinds.
    pub fn cached_nodes(&self) -> usize {
        self.types.lock().len() + self.enum_types.lock().len() + self.tables.lock().len()
    }

    /// Node of a policy or product component type.
    pub fn gen_type(&self, qualified_name: &str) -> GeneratorResult<Arc<GenType>> {
        if let Some(node) = self.types.lock().get(qualified_name) {
            return Ok(Arc::clone(node));
        }
        let node = Arc::new(self.build_type(qualified_name)?);
        let mut types = self.types.lock();
        let entry = types
            .entry(qualified_name.to_string())
            .or_insert(node);
        Ok(Arc::clone(entry))
    }

    pub fn gen_enum_type(&self, qualified_name: &str) -> GeneratorResult<Arc<GenEnumType>> {
        if let Some(node) = self.enum_types.lock().get(qualified_name) {
            return Ok(Arc::clone(node));
        }
        let node = Arc::new(self.build_enum_type(qualified_name)?);
        let mut enum_types = self.enum_types.lock();
        let entry = enum_types
            .entry(qualified_name.to_string())
            .or_insert(node);
        Ok(Arc::clone(entry))
    }

    pub fn gen_table_structure(
        &self,
        qualified_name: &str,
    ) -> GeneratorResult<Arc<GenTableStructure>> {
        if let Some(node) = self.tables.lock().get(qualified_name) {
            return Ok(Arc::clone(node));
        }
        let node = Arc::new(self.build_table_structure(qualified_name)?);
        let mut tables = self.tables.lock();
        let entry = tables.entry(qualified_name.to_string()).or_insert(node);
        Ok(Arc::clone(entry))
    }

    fn build_type(&self, qualified_name: &str) -> GeneratorResult<GenType> {
        let project = self.project;
        let generator = &project.config().generator;
        let object = project
            .object(qualified_name)
            .ok_or_else(|| ModelError::ObjectNotFound(qualified_name.to_string()))?;
        let ty = object.as_component_type().ok_or_else(|| {
            GeneratorError::illegal_argument(format!(
                "{qualified_name} is a {}, not a component type",
                object.object_type()
            ))
        })?;

        let class_name = project.java_class_name(qualified_name);
        let published_interface = generator.generate_published_interfaces.then(|| {
            naming::qualify(
                naming::package_of(&class_name),
                &format!("I{}", naming::simple_name(&class_name)),
            )
        });

        let (kind, partner, changing_over_time, rules, description) = match object {
            IpsObject::PolicyCmptType(t) => (
                GenTypeKind::PolicyCmptType,
                t.configured_by
                    .as_deref()
                    .filter(|p| project.product_cmpt_type(p).is_some()),
                false,
                t.rules.iter().map(GenValidationRule::build).collect(),
                t.description.clone(),
            ),
            IpsObject::ProductCmptType(t) => (
                GenTypeKind::ProductCmptType,
                t.policy_cmpt_type
                    .as_deref()
                    .filter(|p| project.policy_cmpt_type(p).is_some()),
                t.changing_over_time && generator.changes_over_time,
                Vec::new(),
                t.description.clone(),
            ),
            _ => {
                return Err(GeneratorError::illegal_state(format!(
                    "{qualified_name} has component type behavior but is a {}",
                    object.object_type()
                )));
            }
        };

        let type_configured = kind == GenTypeKind::PolicyCmptType && partner.is_some();
        let attributes = ty
            .attributes()
            .iter()
            .map(|a| GenAttribute::build(project, qualified_name, a, type_configured))
            .collect::<GeneratorResult<Vec<_>>>()?;
        let associations = ty
            .associations()
            .iter()
            .map(|a| GenAssociation::build(project, ty, a))
            .collect();

        let configured_attributes = match (kind, partner) {
            (GenTypeKind::ProductCmptType, Some(policy_name)) => {
                match project.policy_cmpt_type(policy_name) {
                    Some(policy) => policy
                        .attributes
                        .iter()
                        .filter(|a| a.value_set_configured_by_product)
                        .map(|a| GenAttribute::build(project, policy_name, a, true))
                        .collect::<GeneratorResult<Vec<_>>>()?,
                    None => Vec::new(),
                }
            }
            _ => Vec::new(),
        };

        Ok(GenType {
            kind,
            qualified_name: qualified_name.to_string(),
            class_name,
            superclass: ty.supertype().map(|s| project.java_class_name(s)),
            is_abstract: ty.is_abstract(),
            deprecated: ty.is_deprecated(),
            description,
            changing_over_time,
            published_interface,
            attributes,
            associations,
            configured_attributes,
            configuration_partner: partner.map(|p| project.java_class_name(p)),
            rules,
        })
    }

    fn build_enum_type(&self, qualified_name: &str) -> GeneratorResult<GenEnumType> {
        let project = self.project;
        let enum_type = project.enum_type(qualified_name).ok_or_else(|| {
            match project.object(qualified_name) {
                Some(_) => GeneratorError::illegal_argument(format!(
                    "{qualified_name} is not an enum type"
                )),
                None => ModelError::ObjectNotFound(qualified_name.to_string()).into(),
            }
        })?;

        let mut attributes = Vec::with_capacity(enum_type.attributes.len());
        for (index, attribute) in enum_type.attributes.iter().enumerate() {
            let datatype = project
                .enum_attribute_datatype(qualified_name, &attribute.name)
                .and_then(|name| project.resolve_datatype(name))
                .cloned()
                .ok_or_else(|| {
                    GeneratorError::illegal_state(format!(
                        "datatype of {qualified_name}.{} cannot be resolved",
                        attribute.name
                    ))
                })?;
            attributes.push(GenEnumAttribute {
                name: attribute.name.clone(),
                index,
                jvm_type: map_datatype(&datatype),
                datatype,
                inherited: attribute.inherited,
                unique: attribute.unique,
                identifier: attribute.identifier,
                display_name: attribute.display_name,
                literal_name: attribute.literal_name,
            });
        }

        let values = EnumValueCache::global().get_or_resolve(enum_type, project)?;

        Ok(GenEnumType {
            qualified_name: qualified_name.to_string(),
            class_name: project.java_class_name(qualified_name),
            superinterface: enum_type
                .supertype
                .as_deref()
                .map(|s| project.java_class_name(s)),
            is_abstract: enum_type.is_abstract,
            extensible: enum_type.extensible,
            enum_content_name: enum_type.enum_content_name.clone(),
            deprecated: enum_type.deprecated,
            attributes,
            values,
        })
    }

    fn build_table_structure(&self, qualified_name: &str) -> GeneratorResult<GenTableStructure> {
        let project = self.project;
        let table = project.table_structure(qualified_name).ok_or_else(|| {
            match project.object(qualified_name) {
                Some(_) => GeneratorError::illegal_argument(format!(
                    "{qualified_name} is not a table structure"
                )),
                None => ModelError::ObjectNotFound(qualified_name.to_string()).into(),
            }
        })?;

        let columns = table
            .columns
            .iter()
            .map(|column| {
                let datatype = project
                    .resolve_datatype(&column.datatype)
                    .cloned()
                    .ok_or_else(|| {
                        GeneratorError::illegal_state(format!(
                            "datatype {} of column {qualified_name}.{} cannot be resolved",
                            column.datatype, column.name
                        ))
                    })?;
                Ok(GenColumn {
                    name: column.name.clone(),
                    jvm_type: map_datatype(&datatype),
                    datatype,
                })
            })
            .collect::<GeneratorResult<Vec<_>>>()?;

        Ok(GenTableStructure {
            qualified_name: qualified_name.to_string(),
            class_name: project.java_class_name(qualified_name),
            kind: table.kind,
            columns,
            unique_keys: table.unique_keys.iter().map(|k| k.items.clone()).collect(),
            deprecated: table.deprecated,
        })
    }
}

#[cfg(test)]
#[path = "node/node_tests.rs"]
mod node_tests;
