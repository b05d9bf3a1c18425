mod support;

use anyhow::Result;
use capstan_deploy::{
    BucketDeployment, CacheControl, DEPLOYMENT_RECORD_KIND, DeploymentOptions, DeploymentRecord,
    Source,
};
use capstan_types::{BucketRef, DistributionRef};
use pretty_assertions::assert_eq;
use serde_json::Value;

use support::{archive_options, init_tracing, make_definition};

fn record_json(deployment: &BucketDeployment) -> Value {
    serde_json::to_value(deployment.record()).unwrap()
}

// --- Core shape ---

#[test]
fn record_carries_parallel_source_lists_in_order() {
    let mut definition = make_definition();
    let options = DeploymentOptions::new(BucketRef::from_name("site-assets"))
        .with_source(Source::bucket_archive(
            BucketRef::from_name("artifact-store"),
            "bundles/a.zip",
        ))
        .with_source(Source::bucket_archive(
            BucketRef::from_name("legacy-store"),
            "bundles/b.zip",
        ));

    let deployment = BucketDeployment::new(&mut definition, "web", options).unwrap();
    let json = record_json(&deployment);

    assert_eq!(json["SourceBucketNames"][0], "artifact-store");
    assert_eq!(json["SourceBucketNames"][1], "legacy-store");
    assert_eq!(json["SourceObjectKeys"][0], "bundles/a.zip");
    assert_eq!(json["SourceObjectKeys"][1], "bundles/b.zip");
    assert_eq!(json["DestinationBucketName"], "site-assets");
}

#[test]
fn unset_flags_default_to_true() {
    let mut definition = make_definition();
    let deployment = BucketDeployment::new(&mut definition, "web", archive_options()).unwrap();
    let json = record_json(&deployment);

    assert_eq!(json["RetainOnDelete"], true);
    assert_eq!(json["Prune"], true);
}

#[test]
fn minimal_record_omits_absent_optionals() {
    let mut definition = make_definition();
    let deployment = BucketDeployment::new(&mut definition, "web", archive_options()).unwrap();
    let json = record_json(&deployment);

    let object = json.as_object().unwrap();
    for absent in [
        "SourceMarkers",
        "DestinationBucketKeyPrefix",
        "Exclude",
        "Include",
        "UserMetadata",
        "SystemMetadata",
        "DistributionId",
        "DistributionPaths",
    ] {
        assert!(!object.contains_key(absent), "{absent} should be omitted");
    }
}

#[test]
fn full_record_uses_exact_wire_keys() {
    init_tracing();
    let mut definition = make_definition();
    let options = archive_options()
        .with_source(Source::data("config.json", "{\"api\":\"${api.url}\"}"))
        .with_key_prefix("static/")
        .with_prune(false)
        .with_retain_on_delete(false)
        .with_exclude(["*.tmp"])
        .with_include(["*.html"])
        .with_user_metadata("Build-Id", "42")
        .with_cache_control(vec![CacheControl::Public])
        .with_distribution(DistributionRef::from_id("EDFDVBD6EXAMPLE"))
        .with_distribution_paths(["/index.html"]);

    let deployment = BucketDeployment::new(&mut definition, "web", options).unwrap();
    let json = record_json(&deployment);
    let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();

    let mut expected = vec![
        "SourceBucketNames",
        "SourceObjectKeys",
        "SourceMarkers",
        "DestinationBucketName",
        "DestinationBucketKeyPrefix",
        "RetainOnDelete",
        "Prune",
        "Exclude",
        "Include",
        "UserMetadata",
        "SystemMetadata",
        "DistributionId",
        "DistributionPaths",
    ];
    expected.sort_unstable();
    assert_eq!(keys, expected);
}

// --- Optional fields ---

#[test]
fn key_prefix_and_filters_are_emitted() {
    let mut definition = make_definition();
    let options = archive_options()
        .with_key_prefix("static/")
        .with_exclude(["*.tmp", "*.bak"])
        .with_include(["*.html"]);

    let deployment = BucketDeployment::new(&mut definition, "web", options).unwrap();
    let json = record_json(&deployment);

    assert_eq!(json["DestinationBucketKeyPrefix"], "static/");
    assert_eq!(json["Exclude"][1], "*.bak");
    assert_eq!(json["Include"][0], "*.html");
}

#[test]
fn explicit_false_flags_are_emitted() {
    let mut definition = make_definition();
    let options = archive_options().with_prune(false).with_retain_on_delete(false);

    let deployment = BucketDeployment::new(&mut definition, "web", options).unwrap();
    let json = record_json(&deployment);

    assert_eq!(json["Prune"], false);
    assert_eq!(json["RetainOnDelete"], false);
}

#[test]
fn distribution_fields_are_emitted() {
    let mut definition = make_definition();
    let options = archive_options()
        .with_distribution(DistributionRef::from_id("EDFDVBD6EXAMPLE"))
        .with_distribution_paths(["/index.html", "/images/*"]);

    let deployment = BucketDeployment::new(&mut definition, "web", options).unwrap();
    let json = record_json(&deployment);

    assert_eq!(json["DistributionId"], "EDFDVBD6EXAMPLE");
    assert_eq!(json["DistributionPaths"][1], "/images/*");
}

#[test]
fn deferred_destination_serializes_as_placeholder() {
    let mut definition = make_definition();
    let options = DeploymentOptions::new(BucketRef::from_attributes("web-bucket")).with_source(
        Source::bucket_archive(BucketRef::from_name("artifact-store"), "bundles/web.zip"),
    );

    let deployment = BucketDeployment::new(&mut definition, "web", options).unwrap();
    let json = record_json(&deployment);

    assert_eq!(json["DestinationBucketName"], "${web-bucket.name}");
}

// --- Definition bookkeeping ---

#[test]
fn one_deployment_record_per_construction() {
    let mut definition = make_definition();
    BucketDeployment::new(&mut definition, "web", archive_options()).unwrap();
    BucketDeployment::new(&mut definition, "docs", archive_options()).unwrap();

    let deployments: Vec<_> = definition
        .records()
        .iter()
        .filter(|r| r.kind == DEPLOYMENT_RECORD_KIND)
        .collect();
    assert_eq!(deployments.len(), 2);
    assert_eq!(deployments[0].id, "web");
    assert_eq!(deployments[1].id, "docs");
}

#[test]
fn emitted_record_matches_definition_copy() {
    let mut definition = make_definition();
    let deployment = BucketDeployment::new(&mut definition, "web", archive_options()).unwrap();

    let stored = definition.record("web").unwrap();
    assert_eq!(stored.kind, DEPLOYMENT_RECORD_KIND);
    assert_eq!(stored.properties, record_json(&deployment));
}

#[test]
fn record_roundtrips_through_serde() {
    let mut definition = make_definition();
    let options = archive_options()
        .with_key_prefix("static/")
        .with_user_metadata("build", "42");
    let deployment = BucketDeployment::new(&mut definition, "web", options).unwrap();

    let json = serde_json::to_string(deployment.record()).unwrap();
    let parsed: DeploymentRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(&parsed, deployment.record());
}

#[test]
fn manifest_written_to_disk_roundtrips() -> Result<()> {
    let mut definition = make_definition();
    BucketDeployment::new(&mut definition, "web", archive_options())?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("manifest.json");
    std::fs::write(&path, serde_json::to_string_pretty(&definition.manifest())?)?;

    let loaded: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    let resources = loaded["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0]["kind"], "deploy::sync-handler");
    assert_eq!(resources[1]["kind"], "deploy::bucket-sync");
    assert_eq!(resources[1]["properties"]["DestinationBucketName"], "site-assets");
    Ok(())
}
