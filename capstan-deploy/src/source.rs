//! Content sources and definition-time binding.
//!
//! A source contributes one archive to a deployment: either one that already
//! sits in a bucket, or an inline body staged into the definition's staging
//! bucket. Binding grants the handler role read access to wherever the
//! archive lives and reports the bucket/key pair for the emitted record.

use std::collections::BTreeMap;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use capstan_types::{BucketRef, Definition, ExecutionRole, TokenString};

use crate::error::DeployResult;

/// Object-key prefix for bodies staged by data sources.
const STAGING_PREFIX: &str = "data/";

/// A source's contribution to a deployment after binding.
#[derive(Clone, Debug)]
pub struct BoundSource {
    pub bucket: BucketRef,
    pub object_key: TokenString,
    /// Substitution markers the handler replaces with live values, keyed by
    /// marker. Empty for sources without deferred content.
    pub markers: BTreeMap<String, String>,
}

/// Archive content that can attach itself to a definition.
pub trait ContentSource: Send + Sync {
    /// Stages or references the content, granting the handler role read
    /// access to it.
    fn bind(&self, definition: &mut Definition, handler_role: &ExecutionRole)
    -> DeployResult<BoundSource>;
}

/// Factory namespace for the built-in source kinds.
pub struct Source;

impl Source {
    /// An archive already present in `bucket` at `object_key`.
    pub fn bucket_archive(bucket: BucketRef, object_key: impl Into<TokenString>) -> ArchiveSource {
        ArchiveSource {
            bucket,
            object_key: object_key.into(),
        }
    }

    /// Inline text staged for deployment at `object_path` inside the
    /// destination.
    pub fn data(object_path: impl Into<String>, body: impl Into<String>) -> DataSource {
        DataSource {
            object_path: object_path.into(),
            body: body.into(),
        }
    }

    /// `value` rendered as JSON, then staged like [`Source::data`].
    pub fn json_data<T: Serialize>(
        object_path: impl Into<String>,
        value: &T,
    ) -> DeployResult<DataSource> {
        Ok(Source::data(object_path, serde_json::to_string(value)?))
    }

    /// `value` rendered as YAML, then staged like [`Source::data`].
    pub fn yaml_data<T: Serialize>(
        object_path: impl Into<String>,
        value: &T,
    ) -> DeployResult<DataSource> {
        Ok(Source::data(object_path, serde_yaml::to_string(value)?))
    }
}

/// An archive that already exists in some bucket.
#[derive(Clone, Debug)]
pub struct ArchiveSource {
    bucket: BucketRef,
    object_key: TokenString,
}

impl ContentSource for ArchiveSource {
    fn bind(
        &self,
        _definition: &mut Definition,
        handler_role: &ExecutionRole,
    ) -> DeployResult<BoundSource> {
        self.bucket.grant_read(handler_role);
        Ok(BoundSource {
            bucket: self.bucket.clone(),
            object_key: self.object_key.clone(),
            markers: BTreeMap::new(),
        })
    }
}

/// An inline body staged into the definition's staging bucket.
#[derive(Clone, Debug)]
pub struct DataSource {
    object_path: String,
    body: String,
}

impl ContentSource for DataSource {
    fn bind(
        &self,
        definition: &mut Definition,
        handler_role: &ExecutionRole,
    ) -> DeployResult<BoundSource> {
        let (staged_body, markers) = extract_markers(&self.body);

        // Content-addressed by destination path and staged body, so identical
        // sources collapse to one staging object.
        let mut hasher = Sha256::new();
        hasher.update(self.object_path.as_bytes());
        hasher.update([0u8]);
        hasher.update(staged_body.as_bytes());
        let digest = hex::encode(hasher.finalize());
        let object_key = format!("{STAGING_PREFIX}{digest}.zip");

        let path = &self.object_path;
        let marker_count = markers.len();
        debug!("staging data source {path} at {object_key} ({marker_count} markers)");

        let bucket = definition.staging_bucket();
        bucket.grant_read(handler_role);
        Ok(BoundSource {
            bucket,
            object_key: TokenString::literal(object_key),
            markers,
        })
    }
}

/// Replaces each `${resource.attribute}` placeholder in `body` with a stable
/// substitution marker, returning the rewritten body and the marker map.
fn extract_markers(body: &str) -> (String, BTreeMap<String, String>) {
    let mut staged = String::with_capacity(body.len());
    let mut markers = BTreeMap::new();
    let mut remaining = body;
    let mut index = 0usize;

    while let Some(start) = remaining.find("${") {
        let Some(length) = remaining[start..].find('}') else {
            break;
        };
        let end = start + length + 1;
        staged.push_str(&remaining[..start]);
        let marker = format!("<<sub:{index}>>");
        markers.insert(marker.clone(), remaining[start..end].to_string());
        staged.push_str(&marker);
        index += 1;
        remaining = &remaining[end..];
    }
    staged.push_str(remaining);
    (staged, markers)
}
