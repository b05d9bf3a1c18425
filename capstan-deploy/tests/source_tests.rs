mod support;

use std::collections::BTreeMap;

use capstan_deploy::{BucketDeployment, ContentSource, Source};
use capstan_types::{BucketRef, ExecutionRole};
use pretty_assertions::assert_eq;
use serde_json::json;

use support::{archive_options, make_definition};

// --- Archive sources ---

#[test]
fn archive_source_binds_to_its_bucket() {
    let mut definition = make_definition();
    let role = ExecutionRole::new("sync-role");
    let source = Source::bucket_archive(BucketRef::from_name("artifact-store"), "bundles/web.zip");

    let bound = source.bind(&mut definition, &role).unwrap();
    assert_eq!(bound.bucket.name().render(), "artifact-store");
    assert_eq!(bound.object_key.render(), "bundles/web.zip");
    assert!(bound.markers.is_empty());
}

#[test]
fn archive_bind_grants_read_on_its_bucket() {
    let mut definition = make_definition();
    let role = ExecutionRole::new("sync-role");
    Source::bucket_archive(BucketRef::from_name("artifact-store"), "bundles/web.zip")
        .bind(&mut definition, &role)
        .unwrap();

    let statements = role.statements();
    assert_eq!(statements.len(), 1);
    assert!(statements[0].has_action("s3:GetObject*"));
    assert!(
        statements[0]
            .resources
            .contains(&"arn:aws:s3:::artifact-store/*".to_string())
    );
}

// --- Data sources ---

#[test]
fn data_source_stages_into_staging_bucket() {
    let mut definition = make_definition();
    let role = ExecutionRole::new("sync-role");

    let bound = Source::data("config.json", "{}").bind(&mut definition, &role).unwrap();
    assert_eq!(bound.bucket.name().render(), "${app-staging.name}");
    let key = bound.object_key.render();
    assert!(key.starts_with("data/"), "unexpected key {key}");
    assert!(key.ends_with(".zip"), "unexpected key {key}");
}

#[test]
fn data_bind_grants_read_on_staging_bucket() {
    let mut definition = make_definition();
    let role = ExecutionRole::new("sync-role");
    Source::data("config.json", "{}").bind(&mut definition, &role).unwrap();

    let statements = role.statements();
    assert_eq!(statements.len(), 1);
    assert!(
        statements[0]
            .resources
            .contains(&"${app-staging.arn}".to_string())
    );
}

#[test]
fn identical_bodies_share_one_staging_key() {
    let mut definition = make_definition();
    let role = ExecutionRole::new("sync-role");

    let first = Source::data("config.json", "same").bind(&mut definition, &role).unwrap();
    let second = Source::data("config.json", "same").bind(&mut definition, &role).unwrap();
    assert_eq!(first.object_key, second.object_key);
}

#[test]
fn distinct_bodies_get_distinct_keys() {
    let mut definition = make_definition();
    let role = ExecutionRole::new("sync-role");

    let first = Source::data("config.json", "one").bind(&mut definition, &role).unwrap();
    let second = Source::data("config.json", "two").bind(&mut definition, &role).unwrap();
    assert_ne!(first.object_key, second.object_key);
}

#[test]
fn distinct_paths_get_distinct_keys() {
    let mut definition = make_definition();
    let role = ExecutionRole::new("sync-role");

    let first = Source::data("a.json", "same").bind(&mut definition, &role).unwrap();
    let second = Source::data("b.json", "same").bind(&mut definition, &role).unwrap();
    assert_ne!(first.object_key, second.object_key);
}

// --- Markers ---

#[test]
fn placeholder_becomes_marker() {
    let mut definition = make_definition();
    let role = ExecutionRole::new("sync-role");

    let bound = Source::data("config.json", "{\"api\":\"${api.url}\"}")
        .bind(&mut definition, &role)
        .unwrap();

    let expected =
        BTreeMap::from([("<<sub:0>>".to_string(), "${api.url}".to_string())]);
    assert_eq!(bound.markers, expected);
}

#[test]
fn multiple_placeholders_numbered_in_order() {
    let mut definition = make_definition();
    let role = ExecutionRole::new("sync-role");

    let bound = Source::data("config.json", "${a.b} and ${c.d}")
        .bind(&mut definition, &role)
        .unwrap();

    assert_eq!(bound.markers.len(), 2);
    assert_eq!(bound.markers["<<sub:0>>"], "${a.b}");
    assert_eq!(bound.markers["<<sub:1>>"], "${c.d}");
}

#[test]
fn unterminated_placeholder_is_left_verbatim() {
    let mut definition = make_definition();
    let role = ExecutionRole::new("sync-role");

    let bound = Source::data("config.json", "prefix ${open")
        .bind(&mut definition, &role)
        .unwrap();
    assert!(bound.markers.is_empty());
}

#[test]
fn marker_bodies_hash_by_staged_form() {
    let mut definition = make_definition();
    let role = ExecutionRole::new("sync-role");

    // Both bodies stage to `<<sub:0>>`, so they share a staging object; the
    // referenced attributes differ only in the marker maps.
    let first = Source::data("c.json", "${a.b}").bind(&mut definition, &role).unwrap();
    let second = Source::data("c.json", "${a.c}").bind(&mut definition, &role).unwrap();
    assert_eq!(first.object_key, second.object_key);
    assert_ne!(first.markers, second.markers);
    assert_eq!(second.markers["<<sub:0>>"], "${a.c}");
}

// --- Rendered sources ---

#[test]
fn json_data_renders_like_inline_data() {
    let mut definition = make_definition();
    let role = ExecutionRole::new("sync-role");

    let rendered = Source::json_data("cfg.json", &json!({"a": 1}))
        .unwrap()
        .bind(&mut definition, &role)
        .unwrap();
    let inline = Source::data("cfg.json", "{\"a\":1}").bind(&mut definition, &role).unwrap();
    assert_eq!(rendered.object_key, inline.object_key);
}

#[test]
fn yaml_data_renders_like_inline_data() {
    let mut definition = make_definition();
    let role = ExecutionRole::new("sync-role");

    let rendered = Source::yaml_data("cfg.yaml", &json!({"a": 1}))
        .unwrap()
        .bind(&mut definition, &role)
        .unwrap();
    let inline = Source::data("cfg.yaml", "a: 1\n").bind(&mut definition, &role).unwrap();
    assert_eq!(rendered.object_key, inline.object_key);
}

// --- Through a full deployment ---

#[test]
fn markers_flow_into_deployment_record() {
    let mut definition = make_definition();
    let options = archive_options()
        .with_source(Source::data("config.json", "{\"api\":\"${api.url}\"}"));

    let deployment = BucketDeployment::new(&mut definition, "web", options).unwrap();
    let markers = deployment.record().source_markers.as_ref().unwrap();

    // Parallel to the source list: the archive source contributes an empty
    // map, the data source its substitutions.
    assert_eq!(markers.len(), 2);
    assert!(markers[0].is_empty());
    assert_eq!(markers[1]["<<sub:0>>"], "${api.url}");
}

#[test]
fn marker_free_deployment_omits_marker_list() {
    let mut definition = make_definition();
    let deployment = BucketDeployment::new(&mut definition, "web", archive_options()).unwrap();
    assert!(deployment.record().source_markers.is_none());
}
