#![allow(non_snake_case)]

use super::*;
use crate::error::GeneratorError;
use ipsgen_core::IpsProjectConfig;
use ipsgen_model::{
    Association, AssociationKind, Attribute, AttributeKind, EnumAttribute, EnumContent, EnumType,
    EnumValue, EnumValueTable, PolicyCmptType, ProductCmptType, TableStructure, UniqueKey,
    ValidationRule,
};

// ============================================================================
// Fixtures
// ============================================================================

fn config() -> IpsProjectConfig {
    IpsProjectConfig::new("test", "org.example")
}

fn registry(config: &IpsProjectConfig) -> AnnotationGeneratorRegistry {
    AnnotationGeneratorRegistry::with_defaults(&config.generator, &config.project.base_package)
}

/// Units of `builder` for `name`, rendered with the default generators.
fn render<B: JavaSourceFileBuilder>(builder: &B, project: &IpsProject, name: &str) -> Vec<(String, String)> {
    let registry = registry(project.config());
    let nodes = GeneratorModelContext::new(project);
    let ctx = BuildContext::new(&nodes, &registry);
    builder
        .compilation_units(name, &ctx)
        .unwrap()
        .iter()
        .map(|unit| (unit.qualified_name().to_string(), unit.render()))
        .collect()
}

fn build_error<B: ArtifactBuilder>(builder: &B, project: &IpsProject, name: &str) -> GeneratorError {
    let registry = registry(project.config());
    let nodes = GeneratorModelContext::new(project);
    let ctx = BuildContext::new(&nodes, &registry);
    builder.build(name, &ctx).unwrap_err()
}

fn home_project(config: IpsProjectConfig) -> IpsProject {
    let mut project = IpsProject::new(config);

    let mut home = PolicyCmptType::new("home.HomePolicy");
    home.configured_by = Some("home.HomeProduct".into());
    home.attributes
        .push(Attribute::new("area", "Integer").with_default_value("100"));
    let mut premium = Attribute::new("premium", "Money");
    premium.value_set_configured_by_product = true;
    home.attributes.push(premium);
    home.attributes.push(
        Attribute::new("taxRate", "Decimal")
            .with_kind(AttributeKind::Constant)
            .with_default_value("0.19"),
    );
    home.associations.push(
        Association::new("home.Coverage", AssociationKind::Composition, "Coverage", "Coverages")
            .with_cardinality(0, None)
            .with_inverse("policy"),
    );
    home.rules.push(ValidationRule::new("areaLimit", "AREA_LIMIT").validating("area"));
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
    product
        .attributes
        .push(Attribute::new("productName", "String"));
    project.add_object(product).unwrap();
    project
}

// ============================================================================
// Policy classes
// ============================================================================

#[test]
fn PolicyCmptClassBuilder___configured_policy___annotated_class() {
    let project = home_project(config());

    let units = render(&PolicyCmptClassBuilder, &project, "home.HomePolicy");

    assert_eq!(units.len(), 1);
    let (name, source) = &units[0];
    assert_eq!(name, "org.example.home.HomePolicy");
    assert!(source.starts_with("package org.example.home;\n\n"));
    assert!(source.contains("import org.faktorips.runtime.model.annotation.IpsPolicyCmptType;\n"));
    assert!(!source.contains("import org.example.home.HomeProduct;"));
    assert!(source.contains("@IpsPolicyCmptType(name = \"home.HomePolicy\")\n"));
    assert!(source.contains("@IpsConfiguredBy(HomeProduct.class)\n"));
    assert!(source.contains("@IpsValidationRules({\"areaLimit\"})\n"));
    assert!(source.contains("public class HomePolicy extends AbstractModelObject {"));
}

#[test]
fn PolicyCmptClassBuilder___attributes___constants_fields_and_accessors() {
    let project = home_project(config());

    let units = render(&PolicyCmptClassBuilder, &project, "home.HomePolicy");
    let source = &units[0].1;

    assert!(source.contains("public static final String PROPERTY_AREA = \"area\";"));
    assert!(source.contains(
        "public static final ValueSet<Integer> MAX_ALLOWED_VALUES_FOR_AREA = new UnrestrictedValueSet<Integer>(true);"
    ));
    assert!(source.contains("private Integer area = Integer.valueOf(100);"));
    assert!(source.contains(
        "@IpsAttribute(name = \"area\", kind = AttributeKind.CHANGEABLE, valueSetKind = ValueSetKind.AllValues)\n    public Integer getArea() {"
    ));
    assert!(source.contains("@IpsAttributeSetter(\"area\")\n    public void setArea(Integer newValue) {"));
    assert!(source.contains("public ValueSet<Integer> getAllowedValuesForArea(IValidationContext context) {"));
}

#[test]
fn PolicyCmptClassBuilder___constant_attribute___getter_returns_literal_without_field() {
    let project = home_project(config());

    let units = render(&PolicyCmptClassBuilder, &project, "home.HomePolicy");
    let source = &units[0].1;

    assert!(!source.contains("private Decimal taxRate"));
    assert!(source.contains("return Decimal.valueOf(\"0.19\");"));
    assert!(!source.contains("setTaxRate"));
}

#[test]
fn PolicyCmptClassBuilder___configured_attribute___allowed_values_from_product() {
    let project = home_project(config());

    let units = render(&PolicyCmptClassBuilder, &project, "home.HomePolicy");
    let source = &units[0].1;

    assert!(source.contains("if (getHomeProduct() == null) {"));
    assert!(source.contains("return getHomeProduct().getAllowedValuesForPremium(context);"));
    assert!(source.contains("public void setHomeProduct(HomeProduct productCmpt) {"));
}

#[test]
fn PolicyCmptClassBuilder___to_many_association___list_with_adder_and_remover() {
    let project = home_project(config());

    let units = render(&PolicyCmptClassBuilder, &project, "home.HomePolicy");
    let source = &units[0].1;

    assert!(source.contains("private List<Coverage> coverages = new ArrayList<>();"));
    assert!(source.contains("@IpsInverseAssociation(\"policy\")\n    public List<? extends Coverage> getCoverages() {"));
    assert!(source.contains("@IpsAssociationAdder(association = \"Coverage\")\n    public void addCoverage(Coverage objectToAdd) {"));
    assert!(source.contains("@IpsAssociationRemover(association = \"Coverage\")\n    public void removeCoverage(Coverage objectToRemove) {"));
}

#[test]
fn PolicyCmptClassBuilder___to_one_association___setter_annotated_as_adder() {
    let project = home_project(config());

    let units = render(&PolicyCmptClassBuilder, &project, "home.Coverage");
    let source = &units[0].1;

    assert!(source.contains("private HomePolicy policy;"));
    assert!(source.contains("@IpsAssociationAdder(association = \"policy\")\n    public void setPolicy(HomePolicy newObject) {"));
    assert!(!source.contains("@IpsAssociationRemover"));
}

#[test]
fn PolicyCmptClassBuilder___validation_rule___annotated_rule_method() {
    let project = home_project(config());

    let units = render(&PolicyCmptClassBuilder, &project, "home.HomePolicy");
    let source = &units[0].1;

    assert!(source.contains("public static final String MSG_CODE_AREA_LIMIT = \"AREA_LIMIT\";"));
    assert!(source.contains(
        "@IpsValidationRule(name = \"areaLimit\", msgCode = \"AREA_LIMIT\", severity = Severity.ERROR)\n    public boolean checkAreaLimit(MessageList ml, IValidationContext context) {"
    ));
}

#[test]
fn PolicyCmptClassBuilder___derived_union___collects_subsets() {
    let mut project = IpsProject::new(config());
    let mut home = PolicyCmptType::new("home.HomePolicy");
    let mut parts = Association::new("home.Coverage", AssociationKind::Composition, "Part", "Parts")
        .with_cardinality(0, None);
    parts.derived_union = true;
    let mut main = Association::new("home.Coverage", AssociationKind::Composition, "MainCoverage", "MainCoverages");
    main.subsetted_derived_union = Some("Part".into());
    let mut extras = Association::new("home.Coverage", AssociationKind::Composition, "Extra", "Extras")
        .with_cardinality(0, None);
    extras.subsetted_derived_union = Some("Part".into());
    home.associations.extend([parts, main, extras]);
    project.add_object(home).unwrap();
    project.add_object(PolicyCmptType::new("home.Coverage")).unwrap();

    let units = render(&PolicyCmptClassBuilder, &project, "home.HomePolicy");
    let source = &units[0].1;

    assert!(source.contains("@IpsDerivedUnion\n    public List<? extends Coverage> getParts() {"));
    assert!(source.contains("if (getMainCoverage() != null) {"));
    assert!(source.contains("result.addAll(getExtras());"));
    assert!(!source.contains("addPart("));
    assert!(!source.contains("private List<Coverage> parts"));
    assert!(source.contains("@IpsSubsetOfDerivedUnion(\"Part\")"));
}

#[test]
fn PolicyCmptClassBuilder___published_interfaces___class_implements_interface() {
    let mut config = config();
    config.generator.generate_published_interfaces = true;
    let project = home_project(config);

    let units = render(&PolicyCmptClassBuilder, &project, "home.HomePolicy");

    assert_eq!(units.len(), 2);
    assert!(units[0].1.contains("public class HomePolicy extends AbstractModelObject implements IHomePolicy {"));
    assert_eq!(units[1].0, "org.example.home.IHomePolicy");
    assert!(units[1].1.contains("@IpsPublishedInterface(implementation = HomePolicy.class)\npublic interface IHomePolicy {"));
    assert!(units[1].1.contains("    Integer getArea();"));
}

#[test]
fn PolicyCmptClassBuilder___product_type_name___illegal_argument() {
    let project = home_project(config());

    let err = build_error(&PolicyCmptClassBuilder, &project, "home.HomeProduct");

    assert!(matches!(err, GeneratorError::IllegalArgument(_)));
}

#[test]
fn PolicyCmptClassBuilder___artifacts_for_product___configured_policy() {
    let project = home_project(config());
    let product = project.object("home.HomeProduct").unwrap();
    let coverage = project.object("home.Coverage").unwrap();

    assert_eq!(
        PolicyCmptClassBuilder.artifacts_for(product, &project),
        ["home.HomePolicy"]
    );
    assert_eq!(
        PolicyCmptClassBuilder.artifacts_for(coverage, &project),
        ["home.Coverage"]
    );
    assert!(!PolicyCmptClassBuilder.is_builder_for(product));
}

// ============================================================================
// Product classes
// ============================================================================

#[test]
fn ProductCmptClassBuilder___configuring_product___configured_defaults_and_create_policy() {
    let project = home_project(config());

    let units = render(&ProductCmptClassBuilder, &project, "home.HomeProduct");
    let source = &units[0].1;

    assert!(source.contains("@IpsProductCmptType(name = \"home.HomeProduct\")\n"));
    assert!(source.contains("@IpsConfigures(HomePolicy.class)\n@IpsChangingOverTime\n"));
    assert!(source.contains("public class HomeProduct extends ProductComponent {"));
    assert!(source.contains("private Money defaultValuePremium = null;"));
    assert!(source.contains("@IpsDefaultValue(\"premium\")\n    public Money getDefaultValuePremium() {"));
    assert!(source.contains("public ValueSet<Money> getAllowedValuesForPremium(IValidationContext context) {"));
    assert!(source.contains("public HomePolicy createHomePolicy() {"));
    assert!(source.contains("policy.setHomeProduct(this);"));
    assert!(source.contains("public String getProductName() {"));
}

#[test]
fn ProductCmptClassBuilder___policy_not_configured_back___no_product_link() {
    let mut project = IpsProject::new(config());
    project.add_object(PolicyCmptType::new("home.HomePolicy")).unwrap();
    let mut product = ProductCmptType::new("home.HomeProduct");
    product.policy_cmpt_type = Some("home.HomePolicy".into());
    project.add_object(product).unwrap();

    let units = render(&ProductCmptClassBuilder, &project, "home.HomeProduct");
    let source = &units[0].1;

    assert!(source.contains("public HomePolicy createHomePolicy() {"));
    assert!(!source.contains("policy.setHomeProduct(this);"));
}

#[test]
fn ProductCmptClassBuilder___artifacts_for_policy___configuring_product_only_when_mutual() {
    let project = home_project(config());
    let home = project.object("home.HomePolicy").unwrap();
    let coverage = project.object("home.Coverage").unwrap();

    assert_eq!(
        ProductCmptClassBuilder.artifacts_for(home, &project),
        ["home.HomeProduct"]
    );
    assert!(ProductCmptClassBuilder.artifacts_for(coverage, &project).is_empty());
}

// ============================================================================
// Enum classes
// ============================================================================

fn enum_project() -> IpsProject {
    let mut project = IpsProject::new(config());

    let mut base = EnumType::new("pay.AbstractMode");
    base.is_abstract = true;
    base.attributes.push(EnumAttribute::new("id", "String").identifier());
    project.add_object(base).unwrap();

    let mut mode = EnumType::new("pay.BillingMode");
    mode.supertype = Some("pay.AbstractMode".into());
    let id = EnumAttribute::new("id", "String").identifier();
    mode.attributes.push(EnumAttribute::inherited_copy(&id));
    mode.attributes.push(EnumAttribute::new("name", "String").display_name());
    mode.attributes.push(EnumAttribute::new("installments", "Integer"));
    mode.values.push(EnumValue::of(["monthly", "Monthly", "12"]));
    mode.values.push(EnumValue::new([Some("annual"), Some("Annual"), None]));
    project.add_object(mode).unwrap();

    let mut region = EnumType::new("pay.Region");
    region.extensible = true;
    region.enum_content_name = Some("pay.Regions".into());
    region.attributes.push(EnumAttribute::new("code", "Integer").identifier());
    region.values.push(EnumValue::of(["1"]));
    project.add_object(region).unwrap();

    let mut regions = EnumContent::new("pay.Regions", "pay.Region");
    regions.values.push(EnumValue::of(["2"]));
    regions.values.push(EnumValue::new([None::<&str>]));
    project.add_object(regions).unwrap();
    project
}

#[test]
fn EnumClassBuilder___closed_type___java_enum_with_literals() {
    let project = enum_project();

    let units = render(&EnumClassBuilder, &project, "pay.BillingMode");
    let source = &units[0].1;

    assert!(source.contains(
        "@IpsEnumType(name = \"pay.BillingMode\", attributeNames = {\"id\", \"name\", \"installments\"})\npublic enum BillingMode implements AbstractMode {"
    ));
    assert!(source.contains("    MONTHLY(\"monthly\", \"Monthly\", Integer.valueOf(12)),\n"));
    assert!(source.contains("    ANNUAL(\"annual\", \"Annual\", null);\n"));
    assert!(source.contains("    BillingMode(String id, String name, Integer installments) {"));
    assert!(source.contains("@IpsEnumAttribute(name = \"id\", identifier = true, unique = true)\n    @Override\n    public String getId() {"));
    assert!(source.contains("public static BillingMode getValueById(String id) {"));
    assert!(source.contains("for (BillingMode value : values()) {"));
    assert!(source.contains("if (id.equals(value.id)) {"));
}

#[test]
fn EnumClassBuilder___abstract_type___interface_with_own_getters() {
    let project = enum_project();

    let units = render(&EnumClassBuilder, &project, "pay.AbstractMode");
    let source = &units[0].1;

    assert!(source.contains("public interface AbstractMode {"));
    assert!(source.contains("    String getId();"));
    assert!(!source.contains("getValueById"));
}

#[test]
fn EnumClassBuilder___extensible_type___final_class_with_constants() {
    let project = enum_project();

    let units = render(&EnumClassBuilder, &project, "pay.Region");
    let source = &units[0].1;

    assert!(source.contains("@IpsExtensibleEnum(enumContentName = \"pay.Regions\")\npublic final class Region {"));
    assert!(source.contains("public static final Region _1 = new Region(Integer.valueOf(1));"));
    assert!(source.contains(
        "private static final List<Region> VALUES = Collections.unmodifiableList(Arrays.asList(_1));"
    ));
    assert!(source.contains("    public Region(Integer code) {"));
    assert!(source.contains("if (id.equals(String.valueOf(value.code))) {"));
    assert!(source.contains("for (Region value : VALUES) {"));
}

#[test]
fn EnumClassBuilder___closed_type_without_values___lone_semicolon() {
    let mut project = IpsProject::new(config());
    let mut empty = EnumType::new("pay.Unused");
    empty.attributes.push(EnumAttribute::new("id", "String").identifier());
    project.add_object(empty).unwrap();

    let units = render(&EnumClassBuilder, &project, "pay.Unused");

    assert!(units[0].1.contains("public enum Unused {\n\n    ;\n"));
}

#[test]
fn EnumClassBuilder___artifacts_for_supertype___includes_subtypes() {
    let project = enum_project();
    let base = project.object("pay.AbstractMode").unwrap();

    assert_eq!(
        EnumClassBuilder.artifacts_for(base, &project),
        ["pay.AbstractMode", "pay.BillingMode"]
    );
}

// ============================================================================
// Enum content XML
// ============================================================================

#[test]
fn EnumContentXmlBuilder___content___xml_next_to_classes() {
    let project = enum_project();
    let registry = registry(project.config());
    let nodes = GeneratorModelContext::new(&project);
    let ctx = BuildContext::new(&nodes, &registry);

    let files = EnumContentXmlBuilder.build("pay.Regions", &ctx).unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, std::path::Path::new("org/example/pay/Regions.xml"));
    assert_eq!(files[0].builder, "EnumContentXmlBuilder");
    assert!(files[0].content.contains("<EnumContent enumType=\"pay.Region\">"));
    assert!(files[0].content.contains("<EnumAttributeValue attribute=\"code\">2</EnumAttributeValue>"));
    assert!(files[0].content.contains("<EnumAttributeValue attribute=\"code\" isNull=\"true\"/>"));
}

#[test]
fn EnumContentXmlBuilder___enum_type_name___illegal_argument() {
    let project = enum_project();

    let err = build_error(&EnumContentXmlBuilder, &project, "pay.Region");

    assert!(matches!(err, GeneratorError::IllegalArgument(_)));
}

#[test]
fn EnumContentXmlBuilder___artifacts_for_enum_type___referencing_contents() {
    let project = enum_project();
    let region = project.object("pay.Region").unwrap();
    let mode = project.object("pay.BillingMode").unwrap();

    assert_eq!(
        EnumContentXmlBuilder.artifacts_for(region, &project),
        ["pay.Regions"]
    );
    assert!(EnumContentXmlBuilder.artifacts_for(mode, &project).is_empty());
}

#[test]
fn enum_content_xml___special_characters___escaped() {
    let table = EnumValueTable {
        enum_type: "pay.Region".into(),
        columns: vec!["code".into()],
        rows: vec![vec![Some("<north & south>".into())]],
    };

    let xml = enum_content_xml(&table).unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("&lt;north &amp; south&gt;"));
}

// ============================================================================
// Table structures
// ============================================================================

fn table_project(key: &[&str]) -> IpsProject {
    let mut project = IpsProject::new(config());
    let mut table = TableStructure::new("home.Rates")
        .with_column("zone", "String")
        .with_column("age", "int")
        .with_column("rate", "Decimal");
    if !key.is_empty() {
        table.unique_keys.push(UniqueKey {
            items: key.iter().map(|k| k.to_string()).collect(),
        });
    }
    project.add_object(table).unwrap();
    project
}

#[test]
fn TableStructureClassBuilder___unique_key___table_and_row_class_with_find_row() {
    let project = table_project(&["zone", "age"]);

    let units = render(&TableStructureClassBuilder, &project, "home.Rates");

    assert_eq!(units.len(), 2);
    let (table_name, table) = &units[0];
    let (row_name, row) = &units[1];
    assert_eq!(table_name, "org.example.home.Rates");
    assert_eq!(row_name, "org.example.home.RatesRow");
    assert!(table.contains("@IpsTableStructure(name = \"home.Rates\", type = TableStructureKind.SINGLE_CONTENT, columns = {\"zone\", \"age\", \"rate\"})\npublic class Rates {"));
    assert!(table.contains("public RatesRow findRow(String zone, Integer age) {"));
    assert!(table.contains("if (Objects.equals(row.getZone(), zone) && Objects.equals(row.getAge(), age)) {"));
    assert!(row.contains("private final Integer age;"));
    assert!(row.contains("public RatesRow(String zone, Integer age, Decimal rate) {"));
}

#[test]
fn TableStructureClassBuilder___no_unique_key___no_find_row() {
    let project = table_project(&[]);

    let units = render(&TableStructureClassBuilder, &project, "home.Rates");

    assert!(!units[0].1.contains("findRow"));
    assert!(units[0].1.contains("public List<RatesRow> getAllRows() {"));
}

#[test]
fn TableStructureClassBuilder___key_names_unknown_column___illegal_state() {
    let project = table_project(&["missing"]);

    let err = build_error(&TableStructureClassBuilder, &project, "home.Rates");

    assert!(matches!(err, GeneratorError::IllegalState(_)));
}

// ============================================================================
// Helpers
// ============================================================================

#[test]
fn javadoc___multi_line_text___comment_block() {
    let mut code = JavaCodeFragmentBuilder::new();

    javadoc(&mut code, "First line.\n\nSecond line.");

    assert_eq!(
        code.build().source(),
        "/**\n * First line.\n *\n * Second line.\n */\n"
    );
}

#[test]
fn javadoc___blank_text___nothing() {
    let mut code = JavaCodeFragmentBuilder::new();

    javadoc(&mut code, "   ");

    assert!(code.is_empty());
}

#[test]
fn BuildContext___deprecated_node___deprecated_after_element_annotations() {
    let mut project = IpsProject::new(config());
    let mut home = PolicyCmptType::new("home.HomePolicy");
    home.deprecated = true;
    project.add_object(home).unwrap();
    let registry = registry(project.config());
    let nodes = GeneratorModelContext::new(&project);
    let ctx = BuildContext::new(&nodes, &registry);
    let ty = nodes.gen_type("home.HomePolicy").unwrap();
    let mut code = JavaCodeFragmentBuilder::new();

    ctx.annotate(
        &mut code,
        AnnotatedJavaElementType::PolicyCmptDeclClass,
        ModelNode::Type(&ty),
    )
    .unwrap();

    assert!(code.build().source().ends_with("@Deprecated\n"));
}
