#![allow(non_snake_case)]

use super::*;
use ipsgen_core::DatatypeRegistry;
use ipsgen_valueset::{EnumValueSet, RangeValueSet};
use test_case::test_case;

fn range_attribute(name: &str, lower: &str, upper: &str) -> Attribute {
    let mut attribute = Attribute::new(name, "Integer").with_value_set(ValueSet::range(
        ValueSetOwnerRef::default(),
        "",
        RangeValueSet::new(Some(lower), Some(upper), None),
    ));
    attribute.attach("Policy");
    attribute
}

// ============================================================================
// Ownership
// ============================================================================

#[test]
fn Attribute___attach___binds_value_set_to_attribute() {
    let mut attribute = Attribute::new("premium", "Money");

    attribute.attach("org.example.Policy");

    assert_eq!(attribute.value_set().owner().id, "org.example.Policy.premium");
    assert_eq!(attribute.value_set().owner().datatype, "Money");
    assert_eq!(attribute.value_set().id(), "org.example.Policy.premium.valueSet");
}

#[test]
fn Attribute___attach_twice___keeps_value_set_id() {
    let mut attribute = Attribute::new("premium", "Money");
    attribute.attach("Policy");
    let id = attribute.value_set().id().to_string();

    attribute.attach("Policy");

    assert_eq!(attribute.value_set().id(), id);
}

#[test]
fn Attribute___set_datatype___updates_value_set_owner() {
    let mut attribute = Attribute::new("age", "Integer");
    attribute.attach("Policy");

    attribute.set_datatype("Policy", "Long");

    assert_eq!(attribute.datatype, "Long");
    assert_eq!(attribute.value_set().owner().datatype, "Long");
}

#[test]
fn Attribute___change_value_set_kind___uses_fresh_id_and_keeps_null_flag() {
    let mut attribute = Attribute::new("age", "Integer");
    attribute.attach("Policy");
    attribute.value_set_mut().set_contains_null(false).unwrap();
    let old_id = attribute.value_set().id().to_string();

    attribute.change_value_set_kind(ValueSetKind::Range);

    assert!(attribute.value_set().is_range());
    assert_ne!(attribute.value_set().id(), old_id);
    assert!(!attribute.value_set().stored_contains_null());
}

#[test]
fn Attribute___change_value_set_kind_to_same_kind___is_noop() {
    let mut attribute = range_attribute("age", "0", "10");
    let before = attribute.clone();

    attribute.change_value_set_kind(ValueSetKind::Range);

    assert_eq!(attribute, before);
}

#[test_case(AttributeKind::Changeable, false, true ; "changeable")]
#[test_case(AttributeKind::Constant, false, false ; "constant")]
#[test_case(AttributeKind::DerivedOnTheFly, true, false ; "derived on the fly")]
#[test_case(AttributeKind::DerivedByExplicitMethodCall, true, false ; "derived by method")]
fn Attribute___kind___classifies(kind: AttributeKind, derived: bool, changeable: bool) {
    let attribute = Attribute::new("a", "String").with_kind(kind);

    assert_eq!(attribute.is_derived(), derived);
    assert_eq!(attribute.is_changeable(), changeable);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn Attribute___validate_valid_attribute___reports_nothing() {
    let registry = DatatypeRegistry::with_builtins();
    let ctx = ValueSetContext::new(&registry);
    let attribute = range_attribute("age", "18", "99");

    let messages = attribute.validate("Policy", None, &ctx);

    assert!(messages.is_empty(), "{messages}");
}

#[test]
fn Attribute___validate_invalid_name___reports_error_on_name() {
    let registry = DatatypeRegistry::with_builtins();
    let ctx = ValueSetContext::new(&registry);
    let mut attribute = Attribute::new("1st", "String");
    attribute.attach("Policy");

    let messages = attribute.validate("Policy", None, &ctx);

    let message = messages.message_by_code(codes::INVALID_NAME).unwrap();
    assert!(message.refers_to("Policy.1st", Some("name")));
}

#[test]
fn Attribute___validate_unknown_datatype___reports_error_and_skips_value_set() {
    let registry = DatatypeRegistry::with_builtins();
    let ctx = ValueSetContext::new(&registry);
    let mut attribute = Attribute::new("age", "Age");
    attribute.attach("Policy");

    let messages = attribute.validate("Policy", None, &ctx);

    assert!(messages.message_by_code(codes::UNKNOWN_DATATYPE).is_some());
    assert_eq!(messages.len(), 1);
}

#[test]
fn Attribute___validate_range_on_string___reports_kind_not_allowed() {
    let registry = DatatypeRegistry::with_builtins();
    let ctx = ValueSetContext::new(&registry);
    let mut attribute = Attribute::new("name", "String");
    attribute.attach("Policy");
    attribute.change_value_set_kind(ValueSetKind::Range);

    let messages = attribute.validate("Policy", None, &ctx);

    assert!(messages.message_by_code(codes::VALUE_SET_KIND_NOT_ALLOWED).is_some());
}

#[test]
fn Attribute___validate_unparsable_default___reports_error() {
    let registry = DatatypeRegistry::with_builtins();
    let ctx = ValueSetContext::new(&registry);
    let mut attribute = Attribute::new("age", "Integer").with_default_value("old");
    attribute.attach("Policy");

    let messages = attribute.validate("Policy", None, &ctx);

    assert!(messages.message_by_code(codes::DEFAULT_NOT_PARSABLE).is_some());
}

#[test]
fn Attribute___validate_default_outside_value_set___reports_warning() {
    let registry = DatatypeRegistry::with_builtins();
    let ctx = ValueSetContext::new(&registry);
    let attribute = range_attribute("age", "18", "99").with_default_value("5");

    let messages = attribute.validate("Policy", None, &ctx);

    let message = messages.message_by_code(codes::DEFAULT_NOT_IN_VALUE_SET).unwrap();
    assert_eq!(message.severity, ipsgen_core::Severity::Warning);
    assert!(!messages.contains_errors());
}

#[test]
fn Attribute___validate_default_with_abstract_value_set___skips_membership_check() {
    let registry = DatatypeRegistry::with_builtins();
    let ctx = ValueSetContext::new(&registry);
    let mut attribute = range_attribute("age", "18", "99").with_default_value("5");
    attribute.value_set_mut().set_abstract(true).unwrap();

    let messages = attribute.validate("Policy", None, &ctx);

    assert!(messages.message_by_code(codes::DEFAULT_NOT_IN_VALUE_SET).is_none());
}

#[test]
fn Attribute___validate_override_without_supertype_attribute___reports_error() {
    let registry = DatatypeRegistry::with_builtins();
    let ctx = ValueSetContext::new(&registry);
    let attribute = range_attribute("age", "18", "99").overriding();

    let messages = attribute.validate("Policy", None, &ctx);

    assert!(messages.message_by_code(codes::NOTHING_TO_OVERRIDE).is_some());
}

#[test]
fn Attribute___validate_override_with_narrower_range___reports_nothing() {
    let registry = DatatypeRegistry::with_builtins();
    let ctx = ValueSetContext::new(&registry);
    let overridden = range_attribute("age", "0", "120");
    let attribute = range_attribute("age", "18", "99").overriding();

    let messages = attribute.validate("Policy", Some(&overridden), &ctx);

    assert!(messages.is_empty(), "{messages}");
}

#[test]
fn Attribute___validate_override_with_wider_range___reports_not_subset() {
    let registry = DatatypeRegistry::with_builtins();
    let ctx = ValueSetContext::new(&registry);
    let overridden = range_attribute("age", "18", "99");
    let attribute = range_attribute("age", "0", "120").overriding();

    let messages = attribute.validate("Policy", Some(&overridden), &ctx);

    assert!(messages.message_by_code(codes::VALUE_SET_NOT_SUBSET).is_some());
}

#[test]
fn Attribute___validate_override_with_other_datatype___reports_mismatch() {
    let registry = DatatypeRegistry::with_builtins();
    let ctx = ValueSetContext::new(&registry);
    let mut overridden = Attribute::new("age", "Long");
    overridden.attach("Super");
    let mut attribute = Attribute::new("age", "Integer").overriding();
    attribute.attach("Policy");

    let messages = attribute.validate("Policy", Some(&overridden), &ctx);

    assert!(messages.message_by_code(codes::OVERRIDE_DATATYPE_MISMATCH).is_some());
}

#[test]
fn Attribute___validate_same_name_without_override_flag___warns_about_hiding() {
    let registry = DatatypeRegistry::with_builtins();
    let ctx = ValueSetContext::new(&registry);
    let overridden = range_attribute("age", "0", "120");
    let attribute = range_attribute("age", "18", "99");

    let messages = attribute.validate("Policy", Some(&overridden), &ctx);

    assert!(messages.message_by_code(codes::HIDES_SUPERTYPE_ATTRIBUTE).is_some());
    assert!(!messages.contains_errors());
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn Attribute___toml_without_value_set___defaults_to_unrestricted_with_null() {
    let attribute: Attribute = toml::from_str(
        r#"
name = "premium"
datatype = "Money"
"#,
    )
    .unwrap();

    assert!(attribute.value_set().is_unrestricted());
    assert!(attribute.value_set().stored_contains_null());
    assert_eq!(attribute.kind, AttributeKind::Changeable);
    assert_eq!(attribute.modifier, Modifier::Published);
}

#[test]
fn Attribute___toml_with_enum_value_set___reads_values() {
    let attribute: Attribute = toml::from_str(
        r#"
name = "payment"
datatype = "Integer"
kind = "constant"

[value_set]
kind = "enum"
values = ["1", "2", "4", "12"]
"#,
    )
    .unwrap();

    assert_eq!(attribute.kind, AttributeKind::Constant);
    assert_eq!(
        attribute.value_set().as_enum(),
        Some(&EnumValueSet::of(["1", "2", "4", "12"]))
    );
}

#[test]
fn Attribute___toml_with_unknown_key___is_rejected() {
    let result: Result<Attribute, _> = toml::from_str(
        r#"
name = "premium"
datatype = "Money"
colour = "red"
"#,
    );

    assert!(result.is_err());
}
