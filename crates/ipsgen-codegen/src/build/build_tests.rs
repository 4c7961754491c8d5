#![allow(non_snake_case)]

use super::*;
use crate::error::GeneratorError;
use ipsgen_core::Message;
use ipsgen_model::{
    Attribute, EnumAttribute, EnumContent, EnumType, EnumValue, PolicyCmptType, ProductCmptType,
    TableStructure,
};

fn project() -> IpsProject {
    let mut project = IpsProject::new(IpsProjectConfig::new("test", "org.example"));

    let mut home = PolicyCmptType::new("home.HomePolicy");
    home.configured_by = Some("home.HomeProduct".into());
    home.attributes.push(Attribute::new("area", "Integer"));
    project.add_object(home).unwrap();

    let mut product = ProductCmptType::new("home.HomeProduct");
    product.policy_cmpt_type = Some("home.HomePolicy".into());
    project.add_object(product).unwrap();

    let mut zone = EnumType::new("geo.Zone");
    zone.extensible = true;
    zone.enum_content_name = Some("geo.Zones".into());
    zone.attributes.push(EnumAttribute::new("id", "String").identifier());
    project.add_object(zone).unwrap();

    let mut zones = EnumContent::new("geo.Zones", "geo.Zone");
    zones.values.push(EnumValue::of(["north"]));
    project.add_object(zones).unwrap();

    project
        .add_object(TableStructure::new("home.Rates").with_column("rate", "Decimal"))
        .unwrap();
    project
}

/// Fails on one object, succeeds with an empty file list on all others.
struct FailingBuilder {
    fails_on: &'static str,
}

impl ArtifactBuilder for FailingBuilder {
    fn name(&self) -> &'static str {
        "FailingBuilder"
    }

    fn is_builder_for(&self, _object: &IpsObject) -> bool {
        true
    }

    fn artifacts_for(&self, object: &IpsObject, _project: &IpsProject) -> Vec<String> {
        vec![object.qualified_name().to_string()]
    }

    fn build(
        &self,
        qualified_name: &str,
        _ctx: &BuildContext<'_>,
    ) -> GeneratorResult<Vec<GeneratedFile>> {
        if qualified_name == self.fails_on {
            Err(GeneratorError::illegal_state("cannot build"))
        } else {
            Ok(Vec::new())
        }
    }
}

// ============================================================================
// Full builds
// ============================================================================

#[test]
fn build___full_scope___files_for_every_object() {
    let project = project();
    let builders = BuilderSet::with_defaults(project.config());

    let report = builders.build(&project, &BuildScope::Full);

    assert!(report.is_success(), "{:?}", report.aborted);
    assert!(report.skipped.is_empty());
    assert!(report.file("org/example/home/HomePolicy.java").is_some());
    assert!(report.file("org/example/home/HomeProduct.java").is_some());
    assert!(report.file("org/example/geo/Zone.java").is_some());
    assert!(report.file("org/example/geo/Zones.xml").is_some());
    assert!(report.file("org/example/home/Rates.java").is_some());
    assert!(report.file("org/example/home/RatesRow.java").is_some());
    assert_eq!(report.files.len(), 6);
    assert_eq!(report.files_for("home.Rates").count(), 2);
}

#[test]
fn build___object_with_validation_error___skipped_others_built() {
    let mut project = project();
    let mut broken = PolicyCmptType::new("home.Broken");
    broken.supertype = Some("home.Missing".into());
    project.add_object(broken).unwrap();
    let builders = BuilderSet::with_defaults(project.config());

    let report = builders.build(&project, &BuildScope::Full);

    assert_eq!(report.skipped, ["home.Broken"]);
    assert!(report.files_for("home.Broken").next().is_none());
    assert!(report.file("org/example/home/HomePolicy.java").is_some());
    assert!(report.messages.contains_errors());
    assert!(!report.is_success());
}

#[test]
fn build___error_on_part___object_skipped() {
    let mut project = project();
    let mut broken = PolicyCmptType::new("home.Broken");
    broken.attributes.push(Attribute::new("area", "home.NoSuchType"));
    project.add_object(broken).unwrap();
    let builders = BuilderSet::with_defaults(project.config());

    let report = builders.build(&project, &BuildScope::Full);

    assert!(report.skipped.contains(&"home.Broken".to_string()));
}

#[test]
fn build___failing_builder___only_that_artifact_aborted() {
    let project = project();
    let mut builders = BuilderSet::with_defaults(project.config());
    builders.add_builder(FailingBuilder {
        fails_on: "home.HomeProduct",
    });

    let report = builders.build(&project, &BuildScope::Full);

    assert_eq!(report.aborted.len(), 1);
    assert_eq!(report.aborted[0].object, "home.HomeProduct");
    assert_eq!(report.aborted[0].builder, "FailingBuilder");
    assert_eq!(
        report.aborted[0].to_string(),
        "home.HomeProduct (FailingBuilder): illegal state: cannot build"
    );
    assert!(report.file("org/example/home/HomeProduct.java").is_some());
    assert!(report.file("org/example/home/HomePolicy.java").is_some());
    assert!(!report.is_success());
}

#[test]
fn build___scope_names_missing_object___skipped() {
    let project = project();
    let builders = BuilderSet::with_defaults(project.config());

    let report = builders.build(&project, &BuildScope::objects(["home.Gone", "home.Rates"]));

    assert_eq!(report.skipped, ["home.Gone"]);
    assert_eq!(report.files.len(), 2);
}

// ============================================================================
// Incremental scope
// ============================================================================

#[test]
fn affected_by___changed_product___configured_policy_regenerated() {
    let project = project();
    let builders = BuilderSet::with_defaults(project.config());

    let scope = BuildScope::affected_by(&["home.HomeProduct"], &project, &builders);

    assert!(scope.contains("home.HomeProduct"));
    assert!(scope.contains("home.HomePolicy"));
    assert!(!scope.contains("home.Rates"));
}

#[test]
fn affected_by___changed_enum_type___contents_regenerated() {
    let project = project();
    let builders = BuilderSet::with_defaults(project.config());

    let scope = BuildScope::affected_by(&["geo.Zone"], &project, &builders);

    assert_eq!(scope.resolve(&project), ["geo.Zone", "geo.Zones"]);
}

#[test]
fn affected_by___removed_object___ignored() {
    let project = project();
    let builders = BuilderSet::with_defaults(project.config());

    let scope = BuildScope::affected_by(&["home.Deleted"], &project, &builders);

    assert_eq!(scope, BuildScope::Objects(IndexSet::new()));
}

#[test]
fn BuildScope___full___contains_everything_in_project_order() {
    let project = project();

    assert!(BuildScope::Full.contains("anything"));
    assert_eq!(
        BuildScope::Full.resolve(&project),
        ["home.HomePolicy", "home.HomeProduct", "geo.Zone", "geo.Zones", "home.Rates"]
    );
}

// ============================================================================
// Report
// ============================================================================

#[test]
fn BuildReport___write_to___files_below_output_dir() {
    let project = project();
    let builders = BuilderSet::with_defaults(project.config());
    let report = builders.build(&project, &BuildScope::objects(["home.Rates"]));
    let dir = tempfile::tempdir().unwrap();

    let written = report.write_to(dir.path()).unwrap();

    assert_eq!(written, 2);
    let content = std::fs::read_to_string(dir.path().join("org/example/home/RatesRow.java")).unwrap();
    assert!(content.starts_with("package org.example.home;"));
}

#[test]
fn has_errors_for___messages_on_parts_and_other_objects___prefix_match_only() {
    let mut messages = MessageList::new();
    messages.add(Message::error("E", "bad").with_property("home.Policy.area", "datatype"));
    messages.add(Message::warning("W", "meh").with_property("home.Other", "name"));

    assert!(has_errors_for(&messages, "home.Policy"));
    assert!(!has_errors_for(&messages, "home.Pol"));
    assert!(!has_errors_for(&messages, "home.Other"));
}

#[test]
fn BuilderSet___debug___lists_builder_names() {
    let builders = BuilderSet::with_defaults(&IpsProjectConfig::new("test", "org.example"));

    let debug = format!("{builders:?}");

    assert!(debug.contains("PolicyCmptClassBuilder"));
    assert!(debug.contains("TableStructureClassBuilder"));
    assert_eq!(builders.builders().count(), 5);
}
