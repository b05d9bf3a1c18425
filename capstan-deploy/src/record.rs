//! The property bag handed to the evaluating engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use capstan_types::TokenString;

/// Record kind emitted for bucket sync deployments.
pub const DEPLOYMENT_RECORD_KIND: &str = "deploy::bucket-sync";

/// Properties of one bucket sync deployment.
///
/// The serialized field names are the wire contract with the sync handler;
/// deferred values serialize as `${resource.attribute}` placeholders and
/// unset optional fields are omitted entirely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentRecord {
    pub source_bucket_names: Vec<TokenString>,
    pub source_object_keys: Vec<TokenString>,
    /// Per-source substitution markers, parallel to the source lists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_markers: Option<Vec<BTreeMap<String, String>>>,
    pub destination_bucket_name: TokenString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_bucket_key_prefix: Option<String>,
    pub retain_on_delete: bool,
    pub prune: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_metadata: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution_id: Option<TokenString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution_paths: Option<Vec<TokenString>>,
}
