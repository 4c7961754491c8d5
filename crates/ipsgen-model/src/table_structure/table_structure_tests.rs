#![allow(non_snake_case)]

use super::*;
use ipsgen_core::{IpsProjectConfig, Severity};
use test_case::test_case;

fn project_with(structure: TableStructure) -> IpsProject {
    let mut project = IpsProject::new(IpsProjectConfig::new("test", "org.example"));
    project.add_object(structure).unwrap();
    project
}

fn rates() -> TableStructure {
    TableStructure::new("RateTable")
        .with_column("ageFrom", "Integer")
        .with_column("ageTo", "Integer")
        .with_column("rate", "Decimal")
}

#[test]
fn TableStructure___valid___validates_cleanly() {
    let mut structure = rates();
    structure.unique_keys.push(UniqueKey {
        items: vec!["ageFrom".into(), "ageTo".into()],
    });
    let project = project_with(structure);

    let messages = project.validate_object("RateTable").unwrap();

    assert!(messages.is_empty(), "{messages}");
}

#[test]
fn TableStructure___without_columns___warns() {
    let project = project_with(TableStructure::new("Empty"));

    let messages = project.validate_object("Empty").unwrap();

    assert_eq!(messages.severity(), Some(Severity::Warning));
    assert!(messages.message_by_code(codes::NO_COLUMNS).is_some());
}

#[test_case("rate", "Decimal", codes::DUPLICATE_COLUMN ; "duplicate name")]
#[test_case("2nd", "Decimal", codes::INVALID_COLUMN_NAME ; "invalid name")]
#[test_case("factor", "Percent", codes::UNKNOWN_DATATYPE ; "unknown datatype")]
fn TableStructure___bad_column___reports_error(name: &str, datatype: &str, code: &str) {
    let project = project_with(rates().with_column(name, datatype));

    let messages = project.validate_object("RateTable").unwrap();

    assert!(messages.message_by_code(code).is_some(), "{messages}");
}

#[test]
fn TableStructure___key_with_unknown_item___reports_error() {
    let mut structure = rates();
    structure.unique_keys.push(UniqueKey {
        items: vec!["ageFrom".into(), "gender".into()],
    });
    let project = project_with(structure);

    let messages = project.validate_object("RateTable").unwrap();

    assert!(messages.message_by_code(codes::KEY_ITEM_NOT_FOUND).is_some());
}

#[test]
fn TableStructure___empty_key___reports_error() {
    let mut structure = rates();
    structure.unique_keys.push(UniqueKey { items: Vec::new() });
    let project = project_with(structure);

    let messages = project.validate_object("RateTable").unwrap();

    assert!(messages.message_by_code(codes::EMPTY_KEY).is_some());
}

#[test]
fn TableStructure___column_typed_by_enum_type___resolves() {
    let mut project = project_with(rates().with_column("mode", "PaymentMode"));
    let mut enum_type = crate::EnumType::new("PaymentMode");
    enum_type
        .attributes
        .push(crate::EnumAttribute::new("id", "String").identifier());
    project.add_object(enum_type).unwrap();

    let messages = project.validate_object("RateTable").unwrap();

    assert!(messages.is_empty(), "{messages}");
}

#[test]
fn TableStructure___toml___reads_kind_and_columns() {
    let structure: TableStructure = toml::from_str(
        r#"
qualified_name = "RateTable"
kind = "multiple_contents"

[[columns]]
name = "rate"
datatype = "Decimal"
"#,
    )
    .unwrap();

    assert_eq!(structure.kind, TableStructureKind::MultipleContents);
    assert_eq!(structure.column("rate"), Some(&Column::new("rate", "Decimal")));
}
