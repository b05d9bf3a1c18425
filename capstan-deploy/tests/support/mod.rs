//! Shared helpers for deployment descriptor tests.

use capstan_deploy::{DeploymentOptions, Source};
use capstan_types::{BucketRef, Definition};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("capstan_deploy=debug,capstan_types=debug"))
        .with_test_writer()
        .try_init();
}

/// A fresh definition for one test.
pub fn make_definition() -> Definition {
    Definition::new("app")
}

/// Options with a single archive source and a fixed destination bucket.
pub fn archive_options() -> DeploymentOptions {
    DeploymentOptions::new(BucketRef::from_name("site-assets")).with_source(Source::bucket_archive(
        BucketRef::from_name("artifact-store"),
        "bundles/web.zip",
    ))
}
