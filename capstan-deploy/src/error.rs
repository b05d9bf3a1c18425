//! Deployment descriptor error types.

use thiserror::Error;

/// Result type for deployment descriptor construction.
pub type DeployResult<T> = Result<T, DeployError>;

/// Errors raised while validating options or assembling a deployment record.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Distribution must be specified if distribution paths are specified")]
    DistributionRequired,

    #[error("Distribution paths must start with /")]
    DistributionPathNotAbsolute,

    #[error("memory limit must be statically known to select a singleton handler")]
    DeferredMemoryLimit,

    #[error("at least one source is required")]
    NoSources,

    #[error("handler for identity {0} has no execution role to grant against")]
    MissingHandlerRole(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
