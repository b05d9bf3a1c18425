//! Content distribution references.

use tracing::debug;

use crate::policy::PolicyStatement;
use crate::role::ExecutionRole;
use crate::token::TokenString;

/// Actions needed to create and track cache invalidations.
pub const INVALIDATION_ACTIONS: [&str; 2] =
    ["cloudfront:GetInvalidation", "cloudfront:CreateInvalidation"];

/// A reference to a content distribution in front of a bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionRef {
    id: TokenString,
    domain_name: Option<TokenString>,
}

impl DistributionRef {
    /// References an existing distribution by its fixed id.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: TokenString::literal(id),
            domain_name: None,
        }
    }

    /// References a distribution whose attributes resolve at evaluation time.
    pub fn from_attributes(resource_id: impl Into<String>) -> Self {
        let resource_id = resource_id.into();
        Self {
            id: TokenString::deferred(&resource_id, "id"),
            domain_name: Some(TokenString::deferred(&resource_id, "domain-name")),
        }
    }

    pub fn id(&self) -> &TokenString {
        &self.id
    }

    pub fn domain_name(&self) -> Option<&TokenString> {
        self.domain_name.as_ref()
    }

    /// Grants permission to invalidate cached paths.
    ///
    /// The invalidation APIs do not support resource-level scoping, so the
    /// statement applies to every distribution.
    pub fn grant_invalidation(&self, role: &ExecutionRole) {
        let distribution = self.id.render();
        debug!("distribution {distribution}: granting invalidation to role {}", role.name());
        role.attach_statement(PolicyStatement::allow(INVALIDATION_ACTIONS, ["*"]));
    }
}
