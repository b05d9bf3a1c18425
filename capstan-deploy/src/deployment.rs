//! Bucket deployment construction.
//!
//! `BucketDeployment::new` is the single entry point: it validates the
//! options, resolves the shared sync handler, grants it what it needs,
//! binds every source, normalizes metadata, and appends exactly one
//! deployment record to the definition.

use tracing::info;

use capstan_types::{BucketRef, Definition, ResourceRecord, SingletonFunction};

use crate::config::HandlerConfig;
use crate::error::{DeployError, DeployResult};
use crate::handler::resolve_handler;
use crate::metadata::{map_system_metadata, map_user_metadata};
use crate::options::DeploymentOptions;
use crate::record::{DEPLOYMENT_RECORD_KIND, DeploymentRecord};

/// A bucket deployment added to a definition.
#[derive(Debug)]
pub struct BucketDeployment {
    id: String,
    handler: SingletonFunction,
    destination: BucketRef,
    record: DeploymentRecord,
}

impl BucketDeployment {
    /// Adds a deployment named `id` to `definition` with default handler
    /// sizing.
    pub fn new(
        definition: &mut Definition,
        id: impl Into<String>,
        options: DeploymentOptions,
    ) -> DeployResult<Self> {
        Self::with_config(definition, id, options, &HandlerConfig::default())
    }

    /// Adds a deployment named `id` to `definition`.
    pub fn with_config(
        definition: &mut Definition,
        id: impl Into<String>,
        options: DeploymentOptions,
        config: &HandlerConfig,
    ) -> DeployResult<Self> {
        let id = id.into();
        validate(&options)?;

        let handler = resolve_handler(definition, &options, config)?;
        let role = handler
            .role()
            .cloned()
            .ok_or_else(|| DeployError::MissingHandlerRole(handler.identity().to_string()))?;

        options.destination.grant_read_write(&role);
        if let Some(distribution) = &options.distribution {
            distribution.grant_invalidation(&role);
        }

        let mut source_bucket_names = Vec::with_capacity(options.sources.len());
        let mut source_object_keys = Vec::with_capacity(options.sources.len());
        let mut source_markers = Vec::with_capacity(options.sources.len());
        let mut has_markers = false;
        for source in &options.sources {
            let bound = source.bind(definition, &role)?;
            has_markers |= !bound.markers.is_empty();
            source_bucket_names.push(bound.bucket.name().clone());
            source_object_keys.push(bound.object_key);
            source_markers.push(bound.markers);
        }

        let record = DeploymentRecord {
            source_bucket_names,
            source_object_keys,
            source_markers: has_markers.then_some(source_markers),
            destination_bucket_name: options.destination.name().clone(),
            destination_bucket_key_prefix: options.destination_key_prefix.clone(),
            retain_on_delete: options.retain_on_delete.unwrap_or(true),
            prune: options.prune.unwrap_or(true),
            exclude: options.exclude.clone(),
            include: options.include.clone(),
            user_metadata: map_user_metadata(&options.user_metadata),
            system_metadata: map_system_metadata(&options),
            distribution_id: options.distribution.as_ref().map(|d| d.id().clone()),
            distribution_paths: options.distribution_paths.clone(),
        };
        definition.add_record(ResourceRecord::new(
            id.clone(),
            DEPLOYMENT_RECORD_KIND,
            serde_json::to_value(&record)?,
        ));

        let sources = record.source_object_keys.len();
        let destination = record.destination_bucket_name.render();
        info!("bucket deployment {id}: {sources} source(s) -> {destination}");

        Ok(Self {
            id,
            handler,
            destination: options.destination.clone(),
            record,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The shared sync handler this deployment resolved.
    pub fn handler(&self) -> &SingletonFunction {
        &self.handler
    }

    /// The bucket the content lands in.
    pub fn deployed_bucket(&self) -> &BucketRef {
        &self.destination
    }

    /// The emitted property bag, as appended to the definition.
    pub fn record(&self) -> &DeploymentRecord {
        &self.record
    }
}

/// Checks the option record in a fixed order so callers see stable errors.
fn validate(options: &DeploymentOptions) -> DeployResult<()> {
    if let Some(paths) = &options.distribution_paths {
        if options.distribution.is_none() {
            return Err(DeployError::DistributionRequired);
        }
        // Deferred paths are resolved by the engine and skipped here.
        let non_absolute = paths
            .iter()
            .any(|path| path.as_static().is_some_and(|p| !p.starts_with('/')));
        if non_absolute {
            return Err(DeployError::DistributionPathNotAbsolute);
        }
    }
    if let Some(hint) = &options.memory_limit {
        if !hint.is_static() {
            return Err(DeployError::DeferredMemoryLimit);
        }
    }
    if options.sources.is_empty() {
        return Err(DeployError::NoSources);
    }
    Ok(())
}
