#![allow(non_snake_case)]

use super::*;
use crate::enum_type::{EnumAttribute, EnumType, EnumValue};
use ipsgen_core::IpsProjectConfig;

fn project() -> IpsProject {
    let mut project = IpsProject::new(IpsProjectConfig::new("test", "org.example"));
    let mut enum_type = EnumType::new("Gender");
    enum_type.attributes.push(EnumAttribute::new("id", "String").identifier());
    enum_type.attributes.push(EnumAttribute::new("name", "String"));
    enum_type.values.push(EnumValue::of(["m", "male"]));
    enum_type.values.push(EnumValue::new([Some("x"), None]));
    project.add_object(enum_type).unwrap();
    project
}

#[test]
fn EnumValueCache___get_or_resolve___builds_table() {
    let project = project();
    let cache = EnumValueCache::new();

    let table = cache
        .get_or_resolve(project.enum_type("Gender").unwrap(), &project)
        .unwrap();

    assert_eq!(table.columns, vec!["id", "name"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.column("name").unwrap(), vec![Some("male"), None]);
}

#[test]
fn EnumValueCache___same_content___is_resolved_once() {
    let project = project();
    let cache = EnumValueCache::new();
    let gender = project.enum_type("Gender").unwrap();

    let first = cache.get_or_resolve(gender, &project).unwrap();
    let second = cache.get_or_resolve(gender, &project).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn EnumValueCache___changed_content___gets_new_entry() {
    let mut project = project();
    let cache = EnumValueCache::new();
    let before = cache
        .get_or_resolve(project.enum_type("Gender").unwrap(), &project)
        .unwrap();

    project
        .modify("Gender", |object| {
            if let crate::IpsObject::EnumType(ty) = object {
                ty.values.push(EnumValue::of(["f", "female"]));
            }
        })
        .unwrap();
    let after = cache
        .get_or_resolve(project.enum_type("Gender").unwrap(), &project)
        .unwrap();

    assert_eq!(before.len(), 2);
    assert_eq!(after.len(), 3);
    assert_eq!(cache.len(), 2);
}

#[test]
fn EnumValueCache___content_of_unknown_type___fails() {
    let project = project();
    let cache = EnumValueCache::new();
    let content = crate::EnumContent::new("Orphans", "Unknown");

    let result = cache.get_or_resolve(&content, &project);

    assert!(matches!(result, Err(ModelError::ObjectNotFound(name)) if name == "Unknown"));
    assert!(cache.is_empty());
}

#[test]
fn EnumValueCache___clear___drops_entries() {
    let project = project();
    let cache = EnumValueCache::global();
    cache
        .get_or_resolve(project.enum_type("Gender").unwrap(), &project)
        .unwrap();

    cache.clear();

    assert!(cache.is_empty());
}

#[test]
fn EnumValueTable___to_json___lists_rows() {
    let table = EnumValueTable {
        enum_type: "Gender".into(),
        columns: vec!["id".into()],
        rows: vec![vec![Some("m".into())], vec![None]],
    };

    let json: serde_json::Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();

    assert_eq!(json["rows"][0][0], "m");
    assert!(json["rows"][1][0].is_null());
}
