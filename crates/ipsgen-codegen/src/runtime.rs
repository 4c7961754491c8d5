//! Qualified names of the runtime library referenced by generated code

macro_rules! annotation {
    ($name:ident, $simple:literal) => {
        pub const $name: &str = concat!("org.faktorips.runtime.model.annotation.", $simple);
    };
}

annotation!(IPS_POLICY_CMPT_TYPE, "IpsPolicyCmptType");
annotation!(IPS_PRODUCT_CMPT_TYPE, "IpsProductCmptType");
annotation!(IPS_ATTRIBUTES, "IpsAttributes");
annotation!(IPS_ASSOCIATIONS, "IpsAssociations");
annotation!(IPS_CONFIGURED_BY, "IpsConfiguredBy");
annotation!(IPS_CONFIGURES, "IpsConfigures");
annotation!(IPS_CHANGING_OVER_TIME, "IpsChangingOverTime");
annotation!(IPS_VALIDATION_RULES, "IpsValidationRules");
annotation!(IPS_PUBLISHED_INTERFACE, "IpsPublishedInterface");
annotation!(IPS_DOCUMENTED, "IpsDocumented");
annotation!(IPS_ATTRIBUTE, "IpsAttribute");
annotation!(IPS_CONFIGURED_ATTRIBUTE, "IpsConfiguredAttribute");
annotation!(IPS_ATTRIBUTE_SETTER, "IpsAttributeSetter");
annotation!(IPS_ALLOWED_VALUES, "IpsAllowedValues");
annotation!(IPS_DEFAULT_VALUE, "IpsDefaultValue");
annotation!(IPS_ASSOCIATION, "IpsAssociation");
annotation!(IPS_INVERSE_ASSOCIATION, "IpsInverseAssociation");
annotation!(IPS_DERIVED_UNION, "IpsDerivedUnion");
annotation!(IPS_SUBSET_OF_DERIVED_UNION, "IpsSubsetOfDerivedUnion");
annotation!(IPS_MATCHING_ASSOCIATION, "IpsMatchingAssociation");
annotation!(IPS_ASSOCIATION_ADDER, "IpsAssociationAdder");
annotation!(IPS_ASSOCIATION_REMOVER, "IpsAssociationRemover");
annotation!(IPS_VALIDATION_RULE, "IpsValidationRule");
annotation!(IPS_CONFIGURABLE_VALIDATION_RULE, "IpsConfigurableValidationRule");
annotation!(IPS_ENUM_TYPE, "IpsEnumType");
annotation!(IPS_EXTENSIBLE_ENUM, "IpsExtensibleEnum");
annotation!(IPS_ENUM_ATTRIBUTE, "IpsEnumAttribute");
annotation!(IPS_TABLE_STRUCTURE, "IpsTableStructure");

pub const ATTRIBUTE_KIND: &str = "org.faktorips.runtime.model.type.AttributeKind";
pub const VALUE_SET_KIND: &str = "org.faktorips.runtime.model.type.ValueSetKind";
pub const ASSOCIATION_KIND: &str = "org.faktorips.runtime.model.type.AssociationKind";
pub const TABLE_STRUCTURE_KIND: &str = "org.faktorips.runtime.model.table.TableStructureKind";
pub const SEVERITY: &str = "org.faktorips.runtime.Severity";

pub const ABSTRACT_MODEL_OBJECT: &str = "org.faktorips.runtime.internal.AbstractModelObject";
pub const PRODUCT_COMPONENT: &str = "org.faktorips.runtime.internal.ProductComponent";
pub const MESSAGE_LIST: &str = "org.faktorips.runtime.MessageList";
pub const VALIDATION_CONTEXT: &str = "org.faktorips.runtime.IValidationContext";

pub const VALUE_SET: &str = "org.faktorips.valueset.ValueSet";
pub const UNRESTRICTED_VALUE_SET: &str = "org.faktorips.valueset.UnrestrictedValueSet";
pub const ORDERED_VALUE_SET: &str = "org.faktorips.valueset.OrderedValueSet";
pub const DEFAULT_RANGE: &str = "org.faktorips.valueset.DefaultRange";
pub const STRING_LENGTH_VALUE_SET: &str = "org.faktorips.valueset.StringLengthValueSet";

pub const XML_JAVA_TYPE_ADAPTER: &str = "javax.xml.bind.annotation.adapters.XmlJavaTypeAdapter";
pub const DEPRECATED: &str = "java.lang.Deprecated";

pub const LIST: &str = "java.util.List";
pub const ARRAY_LIST: &str = "java.util.ArrayList";
pub const COLLECTIONS: &str = "java.util.Collections";
pub const ARRAYS: &str = "java.util.Arrays";
pub const OBJECTS: &str = "java.util.Objects";
