#![allow(non_snake_case)]

use super::*;
use crate::{ValueSet, ValueSetContext, ValueSetOwnerRef};
use ipsgen_core::DatatypeRegistry;
use test_case::test_case;

fn value_set(max: Option<&str>) -> ValueSet {
    let set = StringLengthValueSet {
        maximum_length: max.map(str::to_string),
        contains_null: true,
    };
    ValueSet::string_length(ValueSetOwnerRef::new("Policy.name", "String"), "vs", set)
}

#[test_case(Some("5"), "hello", true ; "at limit")]
#[test_case(Some("5"), "hello!", false ; "over limit")]
#[test_case(Some("3"), "äöü", true ; "counts characters not bytes")]
#[test_case(None, "anything goes here", true ; "unlimited")]
#[test_case(Some("x"), "a", false ; "invalid limit")]
fn StringLengthValueSet___contains_value(max: Option<&str>, value: &str, expected: bool) {
    let registry = DatatypeRegistry::with_builtins();
    let ctx = ValueSetContext::new(&registry);

    assert_eq!(value_set(max).contains_value(Some(value), &ctx), expected);
}

#[test]
fn StringLengthValueSet___contains_shorter_limit_and_short_enum() {
    let registry = DatatypeRegistry::with_builtins();
    let ctx = ValueSetContext::new(&registry);
    let owner = ValueSetOwnerRef::new("Policy.name", "String");
    let short_enum = ValueSet::enumeration(owner.clone(), "e", crate::EnumValueSet::of(["ab", "c"]));
    let long_enum = ValueSet::enumeration(owner, "e", crate::EnumValueSet::of(["abcdefg"]));

    assert!(value_set(Some("5")).contains_value_set(&value_set(Some("3")), &ctx));
    assert!(!value_set(Some("5")).contains_value_set(&value_set(Some("8")), &ctx));
    assert!(!value_set(Some("5")).contains_value_set(&value_set(None), &ctx));
    assert!(value_set(None).contains_value_set(&value_set(Some("8")), &ctx));
    assert!(value_set(Some("5")).contains_value_set(&short_enum, &ctx));
    assert!(!value_set(Some("5")).contains_value_set(&long_enum, &ctx));
}

#[test]
fn StringLengthValueSet___compare___unlimited_first_then_longer() {
    let unlimited = StringLengthValueSet::new(None);
    let long = StringLengthValueSet::new(Some(10));
    let short = StringLengthValueSet::new(Some(3));

    assert_eq!(unlimited.compare(&long), -1);
    assert_eq!(long.compare(&short), -1);
    assert_eq!(short.compare(&long), 1);
    assert_eq!(short.compare(&StringLengthValueSet::new(Some(3))), 0);
}

#[test]
fn StringLengthValueSet___maximum___parses_limit() {
    assert_eq!(StringLengthValueSet::new(Some(7)).maximum(), Some(7));
    assert_eq!(StringLengthValueSet::new(None).maximum(), None);
}
