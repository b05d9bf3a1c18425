//! Deployment options.

use std::collections::BTreeMap;
use std::sync::Arc;

use capstan_types::{BucketRef, DistributionRef, ExecutionRole, TokenNumber, TokenString};

use crate::metadata::{
    BucketAccessControl, CacheControl, Expires, ServerSideEncryption, StorageClass,
};
use crate::source::ContentSource;

/// Everything a bucket deployment can be configured with.
///
/// Only `destination` and a non-empty source list are required; every other
/// field keeps its default when the matching `with_` method is not called.
#[derive(Clone)]
pub struct DeploymentOptions {
    pub sources: Vec<Arc<dyn ContentSource>>,
    pub destination: BucketRef,
    pub destination_key_prefix: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub include: Option<Vec<String>>,
    /// Remove destination objects absent from the sources. Defaults to true.
    pub prune: Option<bool>,
    /// Keep synced content on teardown. Defaults to true.
    pub retain_on_delete: Option<bool>,
    pub distribution: Option<DistributionRef>,
    pub distribution_paths: Option<Vec<TokenString>>,
    /// Memory sizing for the sync handler; must be statically known.
    pub memory_limit: Option<TokenNumber>,
    pub vpc: Option<String>,
    pub subnets: Vec<String>,
    /// Execution role override for a handler created by this deployment.
    pub role: Option<ExecutionRole>,
    pub user_metadata: BTreeMap<String, String>,
    pub cache_control: Vec<CacheControl>,
    pub expires: Option<Expires>,
    pub content_disposition: Option<String>,
    pub content_encoding: Option<String>,
    pub content_language: Option<String>,
    pub content_type: Option<String>,
    pub server_side_encryption: Option<ServerSideEncryption>,
    pub sse_kms_key_id: Option<String>,
    pub sse_customer_algorithm: Option<String>,
    pub storage_class: Option<StorageClass>,
    pub website_redirect_location: Option<String>,
    pub access_control: Option<BucketAccessControl>,
}

impl DeploymentOptions {
    pub fn new(destination: BucketRef) -> Self {
        Self {
            sources: Vec::new(),
            destination,
            destination_key_prefix: None,
            exclude: None,
            include: None,
            prune: None,
            retain_on_delete: None,
            distribution: None,
            distribution_paths: None,
            memory_limit: None,
            vpc: None,
            subnets: Vec::new(),
            role: None,
            user_metadata: BTreeMap::new(),
            cache_control: Vec::new(),
            expires: None,
            content_disposition: None,
            content_encoding: None,
            content_language: None,
            content_type: None,
            server_side_encryption: None,
            sse_kms_key_id: None,
            sse_customer_algorithm: None,
            storage_class: None,
            website_redirect_location: None,
            access_control: None,
        }
    }

    pub fn with_source(mut self, source: impl ContentSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    pub fn with_shared_source(mut self, source: Arc<dyn ContentSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.destination_key_prefix = Some(prefix.into());
        self
    }

    pub fn with_exclude<I>(mut self, patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.exclude = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_include<I>(mut self, patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.include = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_prune(mut self, prune: bool) -> Self {
        self.prune = Some(prune);
        self
    }

    pub fn with_retain_on_delete(mut self, retain: bool) -> Self {
        self.retain_on_delete = Some(retain);
        self
    }

    pub fn with_distribution(mut self, distribution: DistributionRef) -> Self {
        self.distribution = Some(distribution);
        self
    }

    pub fn with_distribution_paths<I>(mut self, paths: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TokenString>,
    {
        self.distribution_paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_memory_limit(mut self, memory: impl Into<TokenNumber>) -> Self {
        self.memory_limit = Some(memory.into());
        self
    }

    /// Places a handler created by this deployment inside a network.
    pub fn with_placement<I>(mut self, vpc: impl Into<String>, subnets: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.vpc = Some(vpc.into());
        self.subnets = subnets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_role(mut self, role: ExecutionRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_user_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.user_metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_cache_control(mut self, directives: Vec<CacheControl>) -> Self {
        self.cache_control = directives;
        self
    }

    pub fn with_expires(mut self, expires: Expires) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn with_content_disposition(mut self, value: impl Into<String>) -> Self {
        self.content_disposition = Some(value.into());
        self
    }

    pub fn with_content_encoding(mut self, value: impl Into<String>) -> Self {
        self.content_encoding = Some(value.into());
        self
    }

    pub fn with_content_language(mut self, value: impl Into<String>) -> Self {
        self.content_language = Some(value.into());
        self
    }

    pub fn with_content_type(mut self, value: impl Into<String>) -> Self {
        self.content_type = Some(value.into());
        self
    }

    pub fn with_server_side_encryption(mut self, mode: ServerSideEncryption) -> Self {
        self.server_side_encryption = Some(mode);
        self
    }

    pub fn with_sse_kms_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.sse_kms_key_id = Some(key_id.into());
        self
    }

    pub fn with_sse_customer_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.sse_customer_algorithm = Some(algorithm.into());
        self
    }

    pub fn with_storage_class(mut self, class: StorageClass) -> Self {
        self.storage_class = Some(class);
        self
    }

    pub fn with_website_redirect(mut self, location: impl Into<String>) -> Self {
        self.website_redirect_location = Some(location.into());
        self
    }

    pub fn with_access_control(mut self, acl: BucketAccessControl) -> Self {
        self.access_control = Some(acl);
        self
    }
}
