#![allow(non_snake_case)]

use ipsgen_core::IpsProjectConfig;
use ipsgen_model::{EnumAttribute, EnumType, EnumValue, IpsProject, pull_up_enum_attribute};

fn enum_type(name: &str, supertype: Option<&str>, is_abstract: bool) -> EnumType {
    let mut ty = EnumType::new(name);
    ty.supertype = supertype.map(str::to_string);
    ty.is_abstract = is_abstract;
    ty
}

fn model() -> IpsProject {
    let mut project = IpsProject::new(IpsProjectConfig::new("enums", "org.example.enums"));

    let mut super_type = enum_type("SuperEnumType", None, true);
    super_type
        .attributes
        .push(EnumAttribute::new("id", "String").identifier().display_name());

    let mut sub_type = enum_type("SubEnumType", Some("SuperEnumType"), false);
    sub_type
        .attributes
        .push(EnumAttribute::inherited_copy(&super_type.attributes[0]));
    sub_type.attributes.push(EnumAttribute::new("factor", "Decimal"));
    sub_type.values.push(EnumValue::of(["a", "1.5"]));
    sub_type.values.push(EnumValue::of(["b", "2.0"]));

    let mut other_sub_type = enum_type("OtherSubEnumType", Some("SuperEnumType"), false);
    other_sub_type
        .attributes
        .push(EnumAttribute::inherited_copy(&super_type.attributes[0]));
    other_sub_type.values.push(EnumValue::of(["x"]));

    project.add_object(super_type).unwrap();
    project.add_object(sub_type).unwrap();
    project.add_object(other_sub_type).unwrap();
    project
}

#[test]
fn pull_up___sub_type_attribute_to_abstract_super_type___updates_whole_hierarchy() {
    let mut project = model();
    assert!(project.validate().is_empty(), "{}", project.validate());

    pull_up_enum_attribute(&mut project, "SubEnumType", "factor", "SuperEnumType").unwrap();

    // original becomes an inherited copy
    let sub_type = project.enum_type("SubEnumType").unwrap();
    assert!(sub_type.attribute("factor").unwrap().inherited);

    // super type now defines it
    let super_type = project.enum_type("SuperEnumType").unwrap();
    let defined = super_type.attribute("factor").unwrap();
    assert!(!defined.inherited);
    assert_eq!(defined.datatype.as_deref(), Some("Decimal"));

    // siblings inherit it too
    let other = project.enum_type("OtherSubEnumType").unwrap();
    assert!(other.attribute("factor").unwrap().inherited);
    assert_eq!(other.column_count(), 2);
    assert_eq!(other.values[0].cell(1), None);

    assert!(project.validate().is_empty(), "{}", project.validate());
}

#[test]
fn pull_up___keeps_sub_type_values_readable_through_super_type_datatype() {
    let mut project = model();

    pull_up_enum_attribute(&mut project, "SubEnumType", "factor", "SuperEnumType").unwrap();

    assert_eq!(
        project.enum_attribute_datatype("SubEnumType", "factor"),
        Some("Decimal")
    );
    let sub_type = project.enum_type("SubEnumType").unwrap();
    assert_eq!(sub_type.values[1].cell(1), Some("2.0"));
    assert_eq!(sub_type.identifier_values(), vec!["a", "b"]);
}
