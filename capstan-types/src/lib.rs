//! Core definition model shared by the Capstan crates.
//!
//! - [`Definition`]: ordered record sink plus the singleton registry
//! - [`TokenString`] / [`TokenNumber`]: values that are literal now or
//!   resolved by the evaluating engine later
//! - [`ExecutionRole`], [`BucketRef`], [`DistributionRef`]: handles that
//!   accumulate grants while a definition is built

pub mod bucket;
pub mod definition;
pub mod distribution;
pub mod function;
pub mod policy;
pub mod role;
pub mod token;

pub use bucket::{BUCKET_READ_ACTIONS, BUCKET_WRITE_ACTIONS, BucketRef};
pub use definition::{Definition, ResourceRecord};
pub use distribution::{DistributionRef, INVALIDATION_ACTIONS};
pub use function::{
    DEFAULT_FUNCTION_MEMORY_MIB, DEFAULT_FUNCTION_TIMEOUT_SECS, FUNCTION_RECORD_KIND,
    SingletonFunction,
};
pub use policy::{PolicyEffect, PolicyStatement};
pub use role::ExecutionRole;
pub use token::{AttrRef, TokenNumber, TokenString};
