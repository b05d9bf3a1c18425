//! Declarative bucket deployments for Capstan definitions.
//!
//! Turns "put this content in that bucket" into the property-bag record an
//! evaluating engine executes later: sources staged or referenced, the
//! destination granted to a shared singleton sync handler, metadata
//! normalized into the exact keys the handler expects. Nothing here touches
//! the network; construction is synchronous and the only outputs are records
//! on the caller's [`capstan_types::Definition`].

pub mod config;
pub mod deployment;
pub mod error;
pub mod handler;
pub mod metadata;
pub mod options;
pub mod record;
pub mod source;

pub use config::HandlerConfig;
pub use deployment::BucketDeployment;
pub use error::{DeployError, DeployResult};
pub use handler::{SYNC_HANDLER_IDENTITY, handler_identity};
pub use metadata::{
    BucketAccessControl, CacheControl, Expires, ServerSideEncryption, StorageClass,
    map_system_metadata, map_user_metadata,
};
pub use options::DeploymentOptions;
pub use record::{DEPLOYMENT_RECORD_KIND, DeploymentRecord};
pub use source::{ArchiveSource, BoundSource, ContentSource, DataSource, Source};
