#![allow(non_snake_case)]

use super::*;
use ipsgen_core::IpsProjectConfig;
use ipsgen_model::{
    EnumAttribute, EnumType, EnumValue, PolicyCmptType, ProductCmptType, TableStructure,
    UniqueKey,
};
use test_case::test_case;

fn project() -> IpsProject {
    IpsProject::new(IpsProjectConfig::new("test", "org.example"))
}

fn home_project() -> IpsProject {
    let mut project = project();

    let mut home = PolicyCmptType::new("home.HomePolicy");
    home.configured_by = Some("home.HomeProduct".into());
    home.attributes.push(Attribute::new("area", "Integer"));
    let mut paid = Attribute::new("paid", "boolean");
    paid.value_set_configured_by_product = true;
    home.attributes.push(paid);
    home.associations.push(
        Association::new("home.Coverage", AssociationKind::Composition, "Coverage", "Coverages")
            .with_cardinality(1, None)
            .with_inverse("policy"),
    );
    home.rules.push(ValidationRule::new("areaLimit", "AREA"));
    project.add_object(home).unwrap();

    let mut coverage = PolicyCmptType::new("home.Coverage");
    coverage.associations.push(
        Association::new(
            "home.HomePolicy",
            AssociationKind::CompositionToMaster,
            "policy",
            "policies",
        )
        .with_inverse("Coverage"),
    );
    project.add_object(coverage).unwrap();

    let mut product = ProductCmptType::new("home.HomeProduct");
    product.policy_cmpt_type = Some("home.HomePolicy".into());
    project.add_object(product).unwrap();
    project
}

// ============================================================================
// Component types
// ============================================================================

#[test]
fn gen_type___policy_type___class_name_below_base_package() {
    let project = home_project();
    let nodes = GeneratorModelContext::new(&project);

    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    assert_eq!(ty.kind, GenTypeKind::PolicyCmptType);
    assert_eq!(ty.class_name, "org.example.home.HomePolicy");
    assert_eq!(ty.simple_class_name(), "HomePolicy");
    assert_eq!(ty.package(), "org.example.home");
    assert_eq!(ty.product_class(), Some("org.example.home.HomeProduct"));
    assert_eq!(ty.policy_class(), None);
    assert_eq!(ty.attribute_names(), ["area", "paid"]);
    assert_eq!(ty.association_names(), ["Coverage"]);
    assert_eq!(ty.validation_rules()[0].method_name, "checkAreaLimit");
    assert_eq!(ty.published_interface, None);
}

#[test]
fn gen_type___product_type___configured_attributes_of_policy() {
    let project = home_project();
    let nodes = GeneratorModelContext::new(&project);

    let product = nodes.gen_type("home.HomeProduct").unwrap();

    assert!(product.is_configuration_for_policy_cmpt_type());
    assert_eq!(product.policy_class(), Some("org.example.home.HomePolicy"));
    assert!(product.changing_over_time);
    assert!(product.validation_rules().is_empty());
    assert_eq!(product.configured_attributes.len(), 1);
    assert_eq!(product.configured_attributes[0].name, "paid");
    assert_eq!(product.configured_attributes[0].type_name, "home.HomePolicy");
}

#[test]
fn gen_type___policy_names_missing_product___not_configured() {
    let mut project = project();
    let mut home = PolicyCmptType::new("home.HomePolicy");
    home.configured_by = Some("home.Missing".into());
    let mut paid = Attribute::new("paid", "boolean");
    paid.value_set_configured_by_product = true;
    home.attributes.push(paid);
    project.add_object(home).unwrap();
    let nodes = GeneratorModelContext::new(&project);

    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    assert!(!ty.is_configured_by_product());
    assert!(!ty.attributes[0].is_configured_by_product());
}

#[test]
fn gen_type___published_interfaces_enabled___interface_next_to_class() {
    let mut config = IpsProjectConfig::new("test", "org.example");
    config.generator.generate_published_interfaces = true;
    let mut project = IpsProject::new(config);
    project.add_object(PolicyCmptType::new("home.HomePolicy")).unwrap();
    let nodes = GeneratorModelContext::new(&project);

    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    assert_eq!(
        ty.published_interface.as_deref(),
        Some("org.example.home.IHomePolicy")
    );
}

#[test]
fn gen_type___second_request___same_cached_node() {
    let project = home_project();
    let nodes = GeneratorModelContext::new(&project);

    let first = nodes.gen_type("home.HomePolicy").unwrap();
    let second = nodes.gen_type("home.HomePolicy").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(nodes.cached_nodes(), 1);
}

#[test]
fn gen_type___missing_object___object_not_found() {
    let project = project();
    let nodes = GeneratorModelContext::new(&project);

    let err = nodes.gen_type("home.Missing").unwrap_err();

    assert!(matches!(err, GeneratorError::Model(ModelError::ObjectNotFound(ref n)) if n == "home.Missing"));
    assert_eq!(nodes.cached_nodes(), 0);
}

#[test]
fn gen_type___table_structure___illegal_argument() {
    let mut project = project();
    project.add_object(TableStructure::new("home.Rates")).unwrap();
    let nodes = GeneratorModelContext::new(&project);

    let err = nodes.gen_type("home.Rates").unwrap_err();

    assert!(matches!(err, GeneratorError::IllegalArgument(_)));
}

#[test]
fn gen_type___unknown_datatype___illegal_state() {
    let mut project = project();
    let mut home = PolicyCmptType::new("home.HomePolicy");
    home.attributes.push(Attribute::new("area", "home.NoSuchType"));
    project.add_object(home).unwrap();
    let nodes = GeneratorModelContext::new(&project);

    let err = nodes.gen_type("home.HomePolicy").unwrap_err();

    assert!(matches!(err, GeneratorError::IllegalState(_)));
    assert!(err.to_string().contains("home.NoSuchType"));
}

// ============================================================================
// Attributes and associations
// ============================================================================

#[test_case("area", "Integer", "getArea" ; "reference type")]
#[test_case("paid", "boolean", "isPaid" ; "primitive boolean")]
#[test_case("active", "Boolean", "getActive" ; "boxed boolean")]
fn GenAttribute___getter_name___prefix_follows_datatype(name: &str, datatype: &str, expected: &str) {
    let mut project = project();
    let mut home = PolicyCmptType::new("home.HomePolicy");
    home.attributes.push(Attribute::new(name, datatype));
    project.add_object(home).unwrap();
    let nodes = GeneratorModelContext::new(&project);

    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    assert_eq!(ty.attributes[0].getter_name(), expected);
}

#[test]
fn GenAttribute___names___derived_from_attribute_name() {
    let mut project = project();
    let mut home = PolicyCmptType::new("home.HomePolicy");
    home.attributes.push(Attribute::new("sumInsured", "Money"));
    project.add_object(home).unwrap();
    let nodes = GeneratorModelContext::new(&project);

    let ty = nodes.gen_type("home.HomePolicy").unwrap();
    let attribute = &ty.attributes[0];

    assert_eq!(attribute.setter_name(), "setSumInsured");
    assert_eq!(attribute.property_constant(), "PROPERTY_SUM_INSURED");
    assert_eq!(
        attribute.max_allowed_values_constant(),
        "MAX_ALLOWED_VALUES_FOR_SUM_INSURED"
    );
    assert_eq!(attribute.allowed_values_method_name(), "getAllowedValuesForSumInsured");
    assert_eq!(attribute.default_value_method_name(), "getDefaultValueSumInsured");
    assert_eq!(attribute.java_type(), "org.faktorips.values.Money");
}

#[test]
fn GenAssociation___resolvable_inverse___inverse_recorded() {
    let project = home_project();
    let nodes = GeneratorModelContext::new(&project);

    let ty = nodes.gen_type("home.HomePolicy").unwrap();
    let association = &ty.associations[0];

    assert!(association.is_to_many());
    assert_eq!(
        association.inverse_association(),
        Some(&GenInverseAssociation {
            role_name: "policy".into(),
            to_many: false,
        })
    );
    assert_eq!(association.target_class, "org.example.home.Coverage");
    assert_eq!(association.field_name(), "coverages");
    assert_eq!(association.getter_name(), "getCoverages");
    assert_eq!(association.adder_name(), "addCoverage");
    assert_eq!(association.max_cardinality_literal(), "Integer.MAX_VALUE");
}

#[test]
fn GenAssociation___inverse_role_unknown___no_inverse() {
    let mut project = project();
    let mut home = PolicyCmptType::new("home.HomePolicy");
    home.associations.push(
        Association::new("home.Coverage", AssociationKind::Composition, "Coverage", "Coverages")
            .with_inverse("nothing"),
    );
    project.add_object(home).unwrap();
    project.add_object(PolicyCmptType::new("home.Coverage")).unwrap();
    let nodes = GeneratorModelContext::new(&project);

    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    assert!(!ty.associations[0].has_inverse_association());
    assert_eq!(ty.associations[0].getter_name(), "getCoverage");
    assert_eq!(ty.associations[0].max_cardinality_literal(), "1");
}

#[test]
fn ModelNode___accessors___match_variant_only() {
    let project = home_project();
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    let node = ModelNode::Association(&ty.associations[0]);

    assert!(node.as_association().is_some());
    assert!(node.as_type().is_none());
    assert!(node.as_attribute().is_none());
    assert_eq!(node.kind_name(), "association");
    assert!(!node.is_deprecated());
}

// ============================================================================
// Enum types
// ============================================================================

fn payment_mode_project(values: Vec<EnumValue>) -> IpsProject {
    let mut project = project();
    let mut base = EnumType::new("pay.Mode");
    base.is_abstract = true;
    base.attributes.push(EnumAttribute::new("id", "String").identifier());
    project.add_object(base).unwrap();

    let mut concrete = EnumType::new("pay.PaymentMode");
    concrete.supertype = Some("pay.Mode".into());
    let id = EnumAttribute::new("id", "String").identifier();
    concrete.attributes.push(EnumAttribute::inherited_copy(&id));
    concrete.attributes.push(EnumAttribute::new("name", "String").display_name());
    concrete.attributes.push(EnumAttribute::new("installments", "int"));
    concrete.values = values;
    project.add_object(concrete).unwrap();
    project
}

#[test]
fn gen_enum_type___inherited_attribute___datatype_from_supertype() {
    let project = payment_mode_project(vec![EnumValue::of(["monthly", "Monthly", "12"])]);
    let nodes = GeneratorModelContext::new(&project);

    let enum_type = nodes.gen_enum_type("pay.PaymentMode").unwrap();
    let id = &enum_type.attributes[0];

    assert!(id.inherited);
    assert!(id.identifier);
    assert_eq!(id.datatype.java_class, "java.lang.String");
    assert_eq!(id.index, 0);
    assert_eq!(enum_type.superinterface.as_deref(), Some("org.example.pay.Mode"));
    assert!(enum_type.is_java_enum());
    assert_eq!(enum_type.attribute_names(), ["id", "name", "installments"]);
    assert_eq!(enum_type.attributes[2].jvm_type.java_type(false), "int");
}

#[test_case("monthly", "MONTHLY" ; "lower case")]
#[test_case("semiAnnual", "SEMI_ANNUAL" ; "camel case")]
#[test_case("2years", "_2YEARS" ; "leading digit")]
#[test_case("one.off", "ONE_OFF" ; "punctuation")]
fn GenEnumType___literal_name___derived_from_identifier(id: &str, expected: &str) {
    let project = payment_mode_project(vec![EnumValue::of([id, "Label", "1"])]);
    let nodes = GeneratorModelContext::new(&project);
    let enum_type = nodes.gen_enum_type("pay.PaymentMode").unwrap();

    assert_eq!(enum_type.literal_name(0).unwrap(), expected);
}

#[test]
fn GenEnumType___literal_name_column___preferred_over_identifier() {
    let mut project = project();
    let mut gender = EnumType::new("person.Gender");
    gender.attributes.push(EnumAttribute::new("code", "String").identifier());
    gender.attributes.push(EnumAttribute::new("literal", "String").literal_name());
    gender.values.push(EnumValue::of(["m", "male"]));
    project.add_object(gender).unwrap();
    let nodes = GeneratorModelContext::new(&project);

    let enum_type = nodes.gen_enum_type("person.Gender").unwrap();

    assert_eq!(enum_type.literal_name(0).unwrap(), "MALE");
    assert_eq!(enum_type.field_attributes().count(), 1);
}

#[test]
fn GenEnumType___row_out_of_range___illegal_argument() {
    let project = payment_mode_project(Vec::new());
    let nodes = GeneratorModelContext::new(&project);
    let enum_type = nodes.gen_enum_type("pay.PaymentMode").unwrap();

    assert!(matches!(
        enum_type.literal_name(0),
        Err(GeneratorError::IllegalArgument(_))
    ));
}

#[test]
fn GenEnumType___null_identifier___illegal_state() {
    let project = payment_mode_project(vec![EnumValue::new([None, Some("Label"), Some("1")])]);
    let nodes = GeneratorModelContext::new(&project);
    let enum_type = nodes.gen_enum_type("pay.PaymentMode").unwrap();

    assert!(matches!(
        enum_type.literal_name(0),
        Err(GeneratorError::IllegalState(_))
    ));
}

#[test]
fn gen_enum_type___policy_type___illegal_argument() {
    let project = home_project();
    let nodes = GeneratorModelContext::new(&project);

    assert!(matches!(
        nodes.gen_enum_type("home.HomePolicy"),
        Err(GeneratorError::IllegalArgument(_))
    ));
}

// ============================================================================
// Table structures
// ============================================================================

#[test]
fn gen_table_structure___columns_and_keys___resolved() {
    let mut project = project();
    let mut table = TableStructure::new("home.Rates")
        .with_column("zone", "String")
        .with_column("rate", "Decimal");
    table.unique_keys.push(UniqueKey {
        items: vec!["zone".into()],
    });
    project.add_object(table).unwrap();
    let nodes = GeneratorModelContext::new(&project);

    let table = nodes.gen_table_structure("home.Rates").unwrap();

    assert_eq!(table.class_name, "org.example.home.Rates");
    assert_eq!(table.row_class_name(), "RatesRow");
    assert_eq!(table.column_names(), ["zone", "rate"]);
    assert_eq!(table.unique_keys, [vec!["zone".to_string()]]);
    assert_eq!(table.kind_constant(), "SINGLE_CONTENT");
    assert_eq!(table.column("rate").unwrap().getter_name(), "getRate");
    assert!(table.column("missing").is_none());
}

#[test]
fn gen_table_structure___missing___object_not_found() {
    let project = project();
    let nodes = GeneratorModelContext::new(&project);

    assert!(matches!(
        nodes.gen_table_structure("home.Rates"),
        Err(GeneratorError::Model(ModelError::ObjectNotFound(_)))
    ));
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn GeneratorModelContext___concurrent_requests___one_node_per_object() {
    let project = home_project();
    let nodes = GeneratorModelContext::new(&project);

    let results: Vec<Arc<GenType>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| nodes.gen_type("home.HomePolicy").unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(nodes.cached_nodes(), 1);
}
