#![allow(non_snake_case)]

use super::*;
use crate::node::GeneratorModelContext;
use ipsgen_core::IpsProjectConfig;
use ipsgen_model::{
    Association, AssociationKind, Attribute, AttributeKind, EnumAttribute, EnumType, EnumValue,
    IpsProject, PolicyCmptType, ProductCmptType, TableStructure, ValidationRule,
};
use ipsgen_valueset::{RangeValueSet, ValueSet, ValueSetOwnerRef};
use strum::IntoEnumIterator;
use test_case::test_case;

// ============================================================================
// Fixtures
// ============================================================================

fn project_with(objects: Vec<ipsgen_model::IpsObject>) -> IpsProject {
    let mut project = IpsProject::new(IpsProjectConfig::new("test", "org.example"));
    for object in objects {
        project.add_object(object).unwrap();
    }
    project
}

fn policy(rules: &[&str]) -> PolicyCmptType {
    let mut policy = PolicyCmptType::new("home.HomePolicy");
    policy.attributes.push(Attribute::new("premium", "Money"));
    policy.attributes.push(Attribute::new("area", "Integer"));
    for rule in rules {
        policy.rules.push(ValidationRule::new(*rule, format!("{rule}.code")));
    }
    policy
}

/// Policy and product configuring each other; the policy has a coverage
/// association whose inverse is `policy`.
fn configured_project() -> IpsProject {
    let mut home = policy(&[]);
    home.configured_by = Some("home.HomeProduct".into());
    home.attributes[1].value_set_configured_by_product = true;
    home.associations.push(
        Association::new("home.Coverage", AssociationKind::Composition, "Coverage", "Coverages")
            .with_cardinality(0, None)
            .with_inverse("policy"),
    );

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

    let mut product = ProductCmptType::new("home.HomeProduct");
    product.policy_cmpt_type = Some("home.HomePolicy".into());

    project_with(vec![home.into(), coverage.into(), product.into()])
}

// ============================================================================
// Declaration
// ============================================================================

#[test]
fn PolicyCmptDeclClassAnnGen___no_rules___no_validation_rules_annotation() {
    let project = project_with(vec![policy(&[]).into()]);
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    let code = PolicyCmptDeclClassAnnGen
        .create_annotation(&ModelNode::Type(&ty))
        .unwrap();

    assert_eq!(
        code.source(),
        "@IpsPolicyCmptType(name = \"home.HomePolicy\")\n@IpsAttributes({\"premium\", \"area\"})\n"
    );
    assert!(!ValidationRulesAnnGen.is_generate_annotation_for(&ModelNode::Type(&ty)));
}

#[test]
fn PolicyCmptDeclClassAnnGen___two_rules___single_annotation_in_declaration_order() {
    let project = project_with(vec![policy(&["R1", "R2"]).into()]);
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    let code = PolicyCmptDeclClassAnnGen
        .create_annotation(&ModelNode::Type(&ty))
        .unwrap();

    assert_eq!(code.source().matches("@IpsValidationRules").count(), 1);
    assert!(code.source().ends_with("@IpsValidationRules({\"R1\", \"R2\"})\n"));
    assert!(
        code.imports()
            .contains("org.faktorips.runtime.model.annotation.IpsValidationRules")
    );
}

#[test]
fn PolicyCmptDeclClassAnnGen___configured_policy___configured_by_after_parts() {
    let project = configured_project();
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    let code = PolicyCmptDeclClassAnnGen
        .create_annotation(&ModelNode::Type(&ty))
        .unwrap();

    assert_eq!(
        code.source(),
        "@IpsPolicyCmptType(name = \"home.HomePolicy\")\n\
         @IpsAttributes({\"premium\", \"area\"})\n\
         @IpsAssociations({\"Coverage\"})\n\
         @IpsConfiguredBy(HomeProduct.class)\n"
    );
    assert!(code.imports().contains("org.example.home.HomeProduct"));
}

#[test]
fn PolicyCmptDeclClassAnnGen___product_node___not_applicable() {
    let project = configured_project();
    let nodes = GeneratorModelContext::new(&project);
    let product = nodes.gen_type("home.HomeProduct").unwrap();

    assert!(!PolicyCmptDeclClassAnnGen.is_generate_annotation_for(&ModelNode::Type(&product)));
    assert!(ProductCmptDeclClassAnnGen.is_generate_annotation_for(&ModelNode::Type(&product)));
}

#[test]
fn ProductCmptDeclClassAnnGen___configuring_product___configures_then_changing_over_time() {
    let project = configured_project();
    let nodes = GeneratorModelContext::new(&project);
    let product = nodes.gen_type("home.HomeProduct").unwrap();

    let code = ProductCmptDeclClassAnnGen
        .create_annotation(&ModelNode::Type(&product))
        .unwrap();

    assert_eq!(
        code.source(),
        "@IpsProductCmptType(name = \"home.HomeProduct\")\n\
         @IpsAttributes({})\n\
         @IpsConfigures(HomePolicy.class)\n\
         @IpsChangingOverTime\n"
    );
}

#[test]
fn ChangingOverTimeAnnGen___disabled_in_generator_settings___not_applicable() {
    let mut config = IpsProjectConfig::new("test", "org.example");
    config.generator.changes_over_time = false;
    let mut project = IpsProject::new(config);
    project
        .add_object(ProductCmptType::new("home.HomeProduct"))
        .unwrap();
    let nodes = GeneratorModelContext::new(&project);
    let product = nodes.gen_type("home.HomeProduct").unwrap();

    assert!(!ChangingOverTimeAnnGen.is_generate_annotation_for(&ModelNode::Type(&product)));
}

#[test]
fn DocumentedAnnGen___type_node___names_bundle_below_base_package() {
    let project = project_with(vec![policy(&[]).into()]);
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    let code = DocumentedAnnGen::new("org.example", "de")
        .create_annotation(&ModelNode::Type(&ty))
        .unwrap();

    assert_eq!(
        code.source(),
        "@IpsDocumented(bundleName = \"org.example.model-label-and-descriptions\", defaultLocale = \"de\")\n"
    );
}

#[test]
fn PublishedInterfaceAnnGen___interfaces_enabled___names_implementation() {
    let mut config = IpsProjectConfig::new("test", "org.example");
    config.generator.generate_published_interfaces = true;
    let mut project = IpsProject::new(config);
    project.add_object(policy(&[])).unwrap();
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    let code = PublishedInterfaceAnnGen
        .create_annotation(&ModelNode::Type(&ty))
        .unwrap();

    assert_eq!(
        code.source(),
        "@IpsPublishedInterface(implementation = HomePolicy.class)\n"
    );
}

// ============================================================================
// Attributes
// ============================================================================

#[test_case(AttributeKind::Changeable, "CHANGEABLE", true, true ; "changeable")]
#[test_case(AttributeKind::Constant, "CONSTANT", false, true ; "constant")]
#[test_case(AttributeKind::DerivedOnTheFly, "DERIVED_ON_THE_FLY", false, false ; "derived on the fly")]
fn AttributeAnnGens___attribute_kind___getter_setter_and_allowed_values(
    kind: AttributeKind,
    constant: &str,
    has_setter: bool,
    has_allowed_values: bool,
) {
    let mut home = PolicyCmptType::new("home.HomePolicy");
    home.attributes.push(Attribute::new("area", "Integer").with_kind(kind));
    let project = project_with(vec![home.into()]);
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();
    let node = ModelNode::Attribute(&ty.attributes[0]);

    let getter = AttributeGetterAnnGen.create_annotation(&node).unwrap();

    assert_eq!(
        getter.source(),
        format!(
            "@IpsAttribute(name = \"area\", kind = AttributeKind.{constant}, valueSetKind = ValueSetKind.AllValues)\n"
        )
    );
    assert_eq!(AttributeSetterAnnGen.is_generate_annotation_for(&node), has_setter);
    assert_eq!(AllowedValuesAnnGen.is_generate_annotation_for(&node), has_allowed_values);
}

#[test]
fn AttributeGetterAnnGen___range_value_set___range_kind() {
    let mut home = PolicyCmptType::new("home.HomePolicy");
    home.attributes.push(
        Attribute::new("area", "Integer").with_value_set(ValueSet::range(
            ValueSetOwnerRef::default(),
            "",
            RangeValueSet::new(Some("10"), Some("1000"), None),
        )),
    );
    let project = project_with(vec![home.into()]);
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    let getter = AttributeGetterAnnGen
        .create_annotation(&ModelNode::Attribute(&ty.attributes[0]))
        .unwrap();

    assert!(getter.source().contains("valueSetKind = ValueSetKind.Range"));
}

#[test]
fn DefaultValueAnnGen___configured_attribute___annotated() {
    let project = configured_project();
    let nodes = GeneratorModelContext::new(&project);
    let product = nodes.gen_type("home.HomeProduct").unwrap();
    let configured = &product.configured_attributes[0];

    let code = DefaultValueAnnGen
        .create_annotation(&ModelNode::Attribute(configured))
        .unwrap();

    assert_eq!(code.source(), "@IpsDefaultValue(\"area\")\n");
}

#[test]
fn DefaultValueAnnGen___unconfigured_attribute___not_applicable() {
    let project = configured_project();
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();
    let premium = ty.attribute("premium").unwrap();

    assert!(!DefaultValueAnnGen.is_generate_annotation_for(&ModelNode::Attribute(premium)));
}

// ============================================================================
// JAXB
// ============================================================================

#[test]
fn JaxbFieldAdapterAnnGen___registered_java_class___adapter_annotation() {
    let project = project_with(vec![policy(&[]).into()]);
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();
    let premium = ModelNode::Attribute(ty.attribute("premium").unwrap());
    let generator = JaxbFieldAdapterAnnGen::with_default_adapters();

    let code = generator.create_annotation(&premium).unwrap();

    assert_eq!(code.source(), "@XmlJavaTypeAdapter(MoneyXmlAdapter.class)\n");
    assert!(code.imports().contains("org.faktorips.runtime.jaxb.MoneyXmlAdapter"));
}

#[test]
fn JaxbFieldAdapterAnnGen___unregistered_java_class___not_applicable() {
    let project = project_with(vec![policy(&[]).into()]);
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();
    let area = ModelNode::Attribute(ty.attribute("area").unwrap());
    let generator = JaxbFieldAdapterAnnGen::with_default_adapters();

    assert!(!generator.is_generate_annotation_for(&area));
    assert!(matches!(
        generator.create_annotation(&area),
        Err(GeneratorError::IllegalArgument(_))
    ));
}

#[test]
fn JaxbFieldAdapterAnnGen___superclass_registered___exact_lookup_only() {
    let mut generator = JaxbFieldAdapterAnnGen::new();
    generator.add_adapter("java.lang.Number", "org.example.NumberAdapter");

    assert_eq!(generator.adapter_for("java.lang.Integer"), None);
    assert_eq!(
        generator.adapter_for("java.lang.Number"),
        Some("org.example.NumberAdapter")
    );
}

// ============================================================================
// Associations
// ============================================================================

#[test]
fn AssociationAnnGen___resolvable_inverse___inverse_annotation() {
    let project = configured_project();
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    let code = AssociationAnnGen
        .create_annotation(&ModelNode::Association(&ty.associations[0]))
        .unwrap();

    assert_eq!(
        code.source(),
        "@IpsAssociation(name = \"Coverage\", pluralName = \"Coverages\", \
         kind = AssociationKind.Composition, targetClass = Coverage.class, \
         min = 0, max = Integer.MAX_VALUE)\n\
         @IpsInverseAssociation(\"policy\")\n"
    );
}

#[test]
fn AssociationAnnGen___no_inverse___no_inverse_annotation() {
    let mut home = PolicyCmptType::new("home.HomePolicy");
    home.associations.push(Association::new(
        "home.Address",
        AssociationKind::Association,
        "Address",
        "Addresses",
    ));
    let address = PolicyCmptType::new("home.Address");
    let project = project_with(vec![home.into(), address.into()]);
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    let code = AssociationAnnGen
        .create_annotation(&ModelNode::Association(&ty.associations[0]))
        .unwrap();

    assert_eq!(
        code.source(),
        "@IpsAssociation(name = \"Address\", kind = AssociationKind.Association, \
         targetClass = Address.class, min = 0, max = 1)\n"
    );
}

#[test]
fn AssociationAnnGen___derived_union___no_adder_or_remover() {
    let mut home = PolicyCmptType::new("home.HomePolicy");
    let mut union = Association::new("home.Coverage", AssociationKind::Composition, "Part", "Parts")
        .with_cardinality(0, None);
    union.derived_union = true;
    home.associations.push(union);
    let project = project_with(vec![home.into(), PolicyCmptType::new("home.Coverage").into()]);
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();
    let node = ModelNode::Association(&ty.associations[0]);

    let code = AssociationAnnGen.create_annotation(&node).unwrap();

    assert!(code.source().ends_with("@IpsDerivedUnion\n"));
    assert!(!AssociationAdderAnnGen.is_generate_annotation_for(&node));
    assert!(!AssociationRemoverAnnGen.is_generate_annotation_for(&node));
}

#[test]
fn AssociationRemoverAnnGen___to_one___not_applicable() {
    let project = configured_project();
    let nodes = GeneratorModelContext::new(&project);
    let coverage = nodes.gen_type("home.Coverage").unwrap();
    let node = ModelNode::Association(&coverage.associations[0]);

    assert!(AssociationAdderAnnGen.is_generate_annotation_for(&node));
    assert!(!AssociationRemoverAnnGen.is_generate_annotation_for(&node));
    assert_eq!(
        AssociationAdderAnnGen.create_annotation(&node).unwrap().source(),
        "@IpsAssociationAdder(association = \"policy\")\n"
    );
}

// ============================================================================
// Rules, enums, tables, deprecation
// ============================================================================

#[test]
fn ValidationRuleAnnGen___configurable_rule___both_annotations() {
    let mut home = PolicyCmptType::new("home.HomePolicy");
    let mut rule = ValidationRule::new("checkArea", "AREA_TOO_SMALL");
    rule.configured_by_product = true;
    rule.checked_by_default = false;
    home.rules.push(rule);
    let project = project_with(vec![home.into()]);
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    let code = ValidationRuleAnnGen
        .create_annotation(&ModelNode::ValidationRule(&ty.validation_rules()[0]))
        .unwrap();

    assert_eq!(
        code.source(),
        "@IpsValidationRule(name = \"checkArea\", msgCode = \"AREA_TOO_SMALL\", severity = Severity.ERROR)\n\
         @IpsConfigurableValidationRule(defaultActivated = false)\n"
    );
}

#[test]
fn EnumAnnGens___extensible_type___extensible_marker_and_attribute_flags() {
    let mut payment = EnumType::new("home.PaymentMode");
    payment.extensible = true;
    payment.enum_content_name = Some("home.PaymentModes".into());
    payment.attributes.push(EnumAttribute::new("id", "String").identifier());
    payment.attributes.push(EnumAttribute::new("name", "String").display_name());
    payment.values.push(EnumValue::of(["monthly", "Monthly"]));
    let project = project_with(vec![payment.into()]);
    let nodes = GeneratorModelContext::new(&project);
    let enum_type = nodes.gen_enum_type("home.PaymentMode").unwrap();

    let type_code = EnumTypeAnnGen
        .create_annotation(&ModelNode::EnumType(&enum_type))
        .unwrap();
    let id_code = EnumAttributeAnnGen
        .create_annotation(&ModelNode::EnumAttribute(&enum_type.attributes[0]))
        .unwrap();
    let name_code = EnumAttributeAnnGen
        .create_annotation(&ModelNode::EnumAttribute(&enum_type.attributes[1]))
        .unwrap();

    assert_eq!(
        type_code.source(),
        "@IpsEnumType(name = \"home.PaymentMode\", attributeNames = {\"id\", \"name\"})\n\
         @IpsExtensibleEnum(enumContentName = \"home.PaymentModes\")\n"
    );
    assert_eq!(
        id_code.source(),
        "@IpsEnumAttribute(name = \"id\", identifier = true, unique = true)\n"
    );
    assert_eq!(
        name_code.source(),
        "@IpsEnumAttribute(name = \"name\", displayName = true)\n"
    );
}

#[test]
fn TableStructureAnnGen___table___kind_and_columns() {
    let table = TableStructure::new("home.RateTable")
        .with_column("zone", "String")
        .with_column("rate", "Decimal");
    let project = project_with(vec![table.into()]);
    let nodes = GeneratorModelContext::new(&project);
    let table = nodes.gen_table_structure("home.RateTable").unwrap();

    let code = TableStructureAnnGen
        .create_annotation(&ModelNode::TableStructure(&table))
        .unwrap();

    assert_eq!(
        code.source(),
        "@IpsTableStructure(name = \"home.RateTable\", type = TableStructureKind.SINGLE_CONTENT, columns = {\"zone\", \"rate\"})\n"
    );
}

#[test]
fn DeprecationAnnGen___deprecated_attribute___deprecated_marker() {
    let mut home = PolicyCmptType::new("home.HomePolicy");
    let mut old = Attribute::new("legacyArea", "Integer");
    old.deprecated = true;
    home.attributes.push(old);
    home.attributes.push(Attribute::new("area", "Integer"));
    let project = project_with(vec![home.into()]);
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();

    let deprecated = ModelNode::Attribute(&ty.attributes[0]);
    let current = ModelNode::Attribute(&ty.attributes[1]);

    assert_eq!(
        DeprecationAnnGen.create_annotation(&deprecated).unwrap().source(),
        "@Deprecated\n"
    );
    assert!(!DeprecationAnnGen.is_generate_annotation_for(&current));
}

// ============================================================================
// Contract violations
// ============================================================================

#[test]
fn AnnotationGenerator___wrong_node_kind___illegal_argument() {
    let project = project_with(vec![policy(&[]).into()]);
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();
    let type_node = ModelNode::Type(&ty);
    let attribute_node = ModelNode::Attribute(&ty.attributes[0]);

    let err = AttributeGetterAnnGen.create_annotation(&type_node).unwrap_err();
    assert!(err.is_contract_violation());
    assert!(err.to_string().contains("AttributeGetterAnnGen cannot annotate a type node"));

    assert!(matches!(
        PolicyCmptDeclClassAnnGen.create_annotation(&attribute_node),
        Err(GeneratorError::IllegalArgument(_))
    ));
    assert!(matches!(
        ValidationRuleAnnGen.create_annotation(&attribute_node),
        Err(GeneratorError::IllegalArgument(_))
    ));
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn AnnotationGeneratorRegistry___defaults___declaration_then_documented() {
    let config = IpsProjectConfig::new("test", "org.example");
    let registry = AnnotationGeneratorRegistry::with_defaults(&config.generator, "org.example");

    let names: Vec<&str> = registry
        .generators_for(AnnotatedJavaElementType::PolicyCmptDeclClass)
        .iter()
        .map(|g| g.name())
        .collect();

    assert_eq!(names, ["PolicyCmptDeclClassAnnGen", "DocumentedAnnGen"]);
}

#[test]
fn AnnotationGeneratorRegistry___jaxb_disabled___no_field_generators() {
    let mut config = IpsProjectConfig::new("test", "org.example");
    let registry = AnnotationGeneratorRegistry::with_defaults(&config.generator, "org.example");
    assert!(registry
        .generators_for(AnnotatedJavaElementType::PolicyCmptDeclClassAttributeField)
        .is_empty());

    config.generator.generate_jaxb_support = true;
    let registry = AnnotationGeneratorRegistry::with_defaults(&config.generator, "org.example");
    assert_eq!(
        registry
            .generators_for(AnnotatedJavaElementType::PolicyCmptDeclClassAttributeField)
            .len(),
        1
    );
}

#[test]
fn AnnotationGeneratorRegistry___empty_registry___empty_fragment_for_every_element() {
    let project = project_with(vec![policy(&["R1"]).into()]);
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();
    let registry = AnnotationGeneratorRegistry::new();

    for element_type in AnnotatedJavaElementType::iter() {
        let code = registry
            .create_annotations(element_type, &ModelNode::Type(&ty))
            .unwrap();
        assert!(code.is_empty(), "{element_type} produced annotations");
    }
}

#[test]
fn AnnotationGeneratorRegistry___registration_order___concatenated_in_order() {
    let project = project_with(vec![policy(&[]).into()]);
    let nodes = GeneratorModelContext::new(&project);
    let mut home = nodes.gen_type("home.HomePolicy").unwrap().as_ref().clone();
    home.deprecated = true;

    let mut registry = AnnotationGeneratorRegistry::new();
    registry.register(AnnotatedJavaElementType::PolicyCmptDeclClass, DeprecationAnnGen);
    registry.register(AnnotatedJavaElementType::PolicyCmptDeclClass, ConfiguredByAnnGen);
    registry.register(AnnotatedJavaElementType::PolicyCmptDeclClass, PolicyCmptDeclClassAnnGen);

    let code = registry
        .create_annotations(AnnotatedJavaElementType::PolicyCmptDeclClass, &ModelNode::Type(&home))
        .unwrap();

    assert!(code.source().starts_with("@Deprecated\n@IpsPolicyCmptType"));
    assert!(!code.source().contains("@IpsConfiguredBy"));
}

#[test]
fn AnnotationGeneratorRegistry___failing_generator___error_propagates() {
    struct Broken;

    impl AnnotationGenerator for Broken {
        fn name(&self) -> &'static str {
            "Broken"
        }

        fn is_generate_annotation_for(&self, _node: &ModelNode<'_>) -> bool {
            true
        }

        fn create_annotation(&self, _node: &ModelNode<'_>) -> GeneratorResult<JavaCodeFragment> {
            Err(GeneratorError::illegal_state("broken"))
        }
    }

    let project = project_with(vec![policy(&[]).into()]);
    let nodes = GeneratorModelContext::new(&project);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();
    let mut registry = AnnotationGeneratorRegistry::new();
    registry.register(AnnotatedJavaElementType::PolicyCmptDeclClass, Broken);

    let result =
        registry.create_annotations(AnnotatedJavaElementType::PolicyCmptDeclClass, &ModelNode::Type(&ty));

    assert!(matches!(result, Err(GeneratorError::IllegalState(_))));
}
