//! Bucket references and grant helpers.

use tracing::debug;

use crate::policy::PolicyStatement;
use crate::role::ExecutionRole;
use crate::token::TokenString;

/// Actions needed to read a bucket and its objects.
pub const BUCKET_READ_ACTIONS: [&str; 3] = ["s3:GetObject*", "s3:GetBucket*", "s3:List*"];

/// Additional actions needed to write and prune a bucket's objects.
pub const BUCKET_WRITE_ACTIONS: [&str; 3] = ["s3:DeleteObject*", "s3:PutObject*", "s3:Abort*"];

/// A reference to a storage bucket, by fixed name or by deferred attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BucketRef {
    name: TokenString,
    arn: TokenString,
}

impl BucketRef {
    /// References an existing bucket by its fixed name.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let arn = format!("arn:aws:s3:::{name}");
        Self {
            name: TokenString::literal(name),
            arn: TokenString::literal(arn),
        }
    }

    /// References a bucket whose name and ARN resolve at evaluation time.
    pub fn from_attributes(resource_id: impl Into<String>) -> Self {
        let resource_id = resource_id.into();
        Self {
            name: TokenString::deferred(&resource_id, "name"),
            arn: TokenString::deferred(&resource_id, "arn"),
        }
    }

    pub fn name(&self) -> &TokenString {
        &self.name
    }

    pub fn arn(&self) -> &TokenString {
        &self.arn
    }

    /// ARN covering objects in this bucket that match `pattern`.
    pub fn object_arn(&self, pattern: &str) -> String {
        format!("{}/{pattern}", self.arn.render())
    }

    /// Grants read access over the bucket and all objects in it.
    pub fn grant_read(&self, role: &ExecutionRole) {
        let bucket = self.name.render();
        debug!("bucket {bucket}: granting read to role {}", role.name());
        role.attach_statement(PolicyStatement::allow(
            BUCKET_READ_ACTIONS,
            [self.arn.render(), self.object_arn("*")],
        ));
    }

    /// Grants read, write, and delete access over the bucket and its objects.
    pub fn grant_read_write(&self, role: &ExecutionRole) {
        let bucket = self.name.render();
        debug!("bucket {bucket}: granting read/write to role {}", role.name());
        role.attach_statement(PolicyStatement::allow(
            BUCKET_READ_ACTIONS.into_iter().chain(BUCKET_WRITE_ACTIONS),
            [self.arn.render(), self.object_arn("*")],
        ));
    }
}
