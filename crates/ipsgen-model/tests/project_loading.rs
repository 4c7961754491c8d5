#![allow(non_snake_case)]

use ipsgen_model::{EnumValueCache, IpsObjectType, IpsProject, codes};
use std::path::Path;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn home_project(root: &Path) {
    write(
        root,
        "ipsproject.toml",
        r#"
[project]
name = "home"
base_package = "org.example.home"

[generator]
generate_jaxb_support = true
"#,
    );
    write(
        root,
        "model/home/HomePolicy.toml",
        r#"
kind = "policy_cmpt_type"
qualified_name = "home.HomePolicy"
configured_by = "home.HomeProduct"

[[attributes]]
name = "paymentMode"
datatype = "home.PaymentMode"
value_set_configured_by_product = true

[attributes.value_set]
kind = "enum"
values = ["monthly", "annual"]

[[attributes]]
name = "area"
datatype = "Integer"
default_value = "100"

[attributes.value_set]
kind = "range"
lower_bound = "10"
upper_bound = "1000"
step = "10"

[[associations]]
target = "home.Coverage"
target_role_singular = "Coverage"
target_role_plural = "Coverages"
max_cardinality = "*"
kind = "composition"
inverse = "HomePolicy"

[[rules]]
name = "areaRequired"
message_code = "HOME-AREA"
validated_attributes = ["area"]
"#,
    );
    write(
        root,
        "model/home/Coverage.toml",
        r#"
kind = "policy_cmpt_type"
qualified_name = "home.Coverage"

[[associations]]
target = "home.HomePolicy"
target_role_singular = "HomePolicy"
target_role_plural = "HomePolicies"
kind = "composition_to_master"
inverse = "Coverage"
"#,
    );
    write(
        root,
        "model/home/HomeProduct.toml",
        r#"
kind = "product_cmpt_type"
qualified_name = "home.HomeProduct"
policy_cmpt_type = "home.HomePolicy"

[[table_usages]]
role_name = "rates"
table_structures = ["home.RateTable"]
"#,
    );
    write(
        root,
        "model/home/RateTable.toml",
        r#"
kind = "table_structure"
qualified_name = "home.RateTable"

[[columns]]
name = "area"
datatype = "Integer"

[[columns]]
name = "rate"
datatype = "Decimal"
"#,
    );
    write(
        root,
        "model/home/PaymentMode.toml",
        r#"
kind = "enum_type"
qualified_name = "home.PaymentMode"
values = [["monthly", "Monthly"], ["annual", "Annual"]]

[[attributes]]
name = "id"
datatype = "String"
identifier = true
unique = true

[[attributes]]
name = "name"
datatype = "String"
display_name = true
"#,
    );
}

#[test]
fn IpsProject___load_consistent_project___validates_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    home_project(dir.path());

    let project = IpsProject::load(dir.path()).unwrap();
    let messages = project.validate();

    assert_eq!(project.len(), 5);
    assert!(messages.is_empty(), "{messages}");
    assert!(project.config().generator.generate_jaxb_support);
}

#[test]
fn IpsProject___loaded_objects___keep_file_order_by_path() {
    let dir = tempfile::tempdir().unwrap();
    home_project(dir.path());

    let project = IpsProject::load(dir.path()).unwrap();
    let kinds: Vec<IpsObjectType> = project.objects().map(|o| o.object_type()).collect();

    assert_eq!(
        kinds,
        vec![
            IpsObjectType::PolicyCmptType,
            IpsObjectType::PolicyCmptType,
            IpsObjectType::ProductCmptType,
            IpsObjectType::EnumType,
            IpsObjectType::TableStructure,
        ]
    );
}

#[test]
fn IpsProject___enum_value_outside_datatype___is_reported() {
    let dir = tempfile::tempdir().unwrap();
    home_project(dir.path());
    let path = dir.path().join("model/home/HomePolicy.toml");
    let content = std::fs::read_to_string(&path)
        .unwrap()
        .replace("[\"monthly\", \"annual\"]", "[\"monthly\", \"weekly\"]");
    std::fs::write(&path, content).unwrap();

    let project = IpsProject::load(dir.path()).unwrap();
    let messages = project.validate();

    assert!(
        messages
            .message_by_code(ipsgen_valueset::codes::ENUM_VALUE_NOT_PARSABLE)
            .is_some(),
        "{messages}"
    );
}

#[test]
fn IpsProject___missing_table_structure___is_reported_without_stopping() {
    let dir = tempfile::tempdir().unwrap();
    home_project(dir.path());
    std::fs::remove_file(dir.path().join("model/home/RateTable.toml")).unwrap();
    std::fs::write(
        dir.path().join("model/home/Coverage.toml"),
        "kind = \"policy_cmpt_type\"\nqualified_name = \"home.Coverage\"\n",
    )
    .unwrap();

    let project = IpsProject::load(dir.path()).unwrap();
    let messages = project.validate();

    assert!(
        messages
            .message_by_code(codes::product_cmpt_type::TABLE_STRUCTURE_NOT_FOUND)
            .is_some()
    );
    assert!(
        messages
            .message_by_code(codes::association::INVERSE_NOT_FOUND)
            .is_some()
    );
}

#[test]
fn EnumValueCache___loaded_enum___resolves_through_global_cache() {
    let dir = tempfile::tempdir().unwrap();
    home_project(dir.path());
    let project = IpsProject::load(dir.path()).unwrap();

    let table = EnumValueCache::global()
        .get_or_resolve(project.enum_type("home.PaymentMode").unwrap(), &project)
        .unwrap();

    assert_eq!(table.column("id").unwrap(), vec![Some("monthly"), Some("annual")]);
}
