//! Object metadata options and their normal forms.
//!
//! User metadata keys are lower-cased; the sync handler prefixes them on
//! upload. System metadata renders each option into the exact header-style
//! key the handler understands.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::options::DeploymentOptions;

/// IMF-fixdate layout, e.g. `Fri, 01 Jan 2021 00:00:00 GMT`.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Cache-control directives applied to synced objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheControl {
    MustRevalidate,
    NoCache,
    NoTransform,
    Public,
    Private,
    ProxyRevalidate,
    /// `max-age=<seconds>`.
    MaxAge(Duration),
    /// `s-maxage=<seconds>`.
    SMaxAge(Duration),
    /// Escape hatch for directives without a variant.
    Custom(String),
}

impl fmt::Display for CacheControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MustRevalidate => f.write_str("must-revalidate"),
            Self::NoCache => f.write_str("no-cache"),
            Self::NoTransform => f.write_str("no-transform"),
            Self::Public => f.write_str("public"),
            Self::Private => f.write_str("private"),
            Self::ProxyRevalidate => f.write_str("proxy-revalidate"),
            Self::MaxAge(age) => write!(f, "max-age={}", age.as_secs()),
            Self::SMaxAge(age) => write!(f, "s-maxage={}", age.as_secs()),
            Self::Custom(value) => f.write_str(value),
        }
    }
}

/// Expiry for synced objects, resolved to its wire string at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expires {
    value: String,
}

impl Expires {
    /// Expires at the given instant.
    pub fn at_date(when: DateTime<Utc>) -> Self {
        Self {
            value: when.format(HTTP_DATE_FORMAT).to_string(),
        }
    }

    /// Expires at a unix timestamp in milliseconds.
    ///
    /// Returns `None` when the timestamp is outside the representable range.
    pub fn at_timestamp(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self::at_date)
    }

    /// Expires the given duration from now.
    pub fn after(duration: Duration) -> Self {
        Self::at_date(Utc::now() + chrono::Duration::seconds(duration.as_secs() as i64))
    }

    /// Passes a pre-rendered value through untouched.
    pub fn from_string(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Server-side encryption modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServerSideEncryption {
    Aes256,
    AwsKms,
}

impl fmt::Display for ServerSideEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aes256 => f.write_str("AES256"),
            Self::AwsKms => f.write_str("aws:kms"),
        }
    }
}

/// Storage classes for synced objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageClass {
    Standard,
    ReducedRedundancy,
    StandardIa,
    OnezoneIa,
    IntelligentTiering,
    Glacier,
    DeepArchive,
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wire = match self {
            Self::Standard => "STANDARD",
            Self::ReducedRedundancy => "REDUCED_REDUNDANCY",
            Self::StandardIa => "STANDARD_IA",
            Self::OnezoneIa => "ONEZONE_IA",
            Self::IntelligentTiering => "INTELLIGENT_TIERING",
            Self::Glacier => "GLACIER",
            Self::DeepArchive => "DEEP_ARCHIVE",
        };
        f.write_str(wire)
    }
}

/// Canned access control settings for synced objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BucketAccessControl {
    Private,
    PublicRead,
    PublicReadWrite,
    AuthenticatedRead,
    LogDeliveryWrite,
    BucketOwnerRead,
    BucketOwnerFullControl,
    AwsExecRead,
}

impl fmt::Display for BucketAccessControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wire = match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
            Self::AuthenticatedRead => "authenticated-read",
            Self::LogDeliveryWrite => "log-delivery-write",
            Self::BucketOwnerRead => "bucket-owner-read",
            Self::BucketOwnerFullControl => "bucket-owner-full-control",
            Self::AwsExecRead => "aws-exec-read",
        };
        f.write_str(wire)
    }
}

/// Lower-cases user metadata keys; values pass through.
///
/// Returns `None` when the caller supplied no entries.
pub fn map_user_metadata(
    metadata: &BTreeMap<String, String>,
) -> Option<BTreeMap<String, String>> {
    if metadata.is_empty() {
        return None;
    }
    Some(
        metadata
            .iter()
            .map(|(key, value)| (key.to_lowercase(), value.clone()))
            .collect(),
    )
}

/// Renders every set system metadata option under its fixed key name.
///
/// Returns `None` when no option is set.
pub fn map_system_metadata(options: &DeploymentOptions) -> Option<BTreeMap<String, String>> {
    let mut mapped = BTreeMap::new();

    if !options.cache_control.is_empty() {
        let directives = options
            .cache_control
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        mapped.insert("cache-control".to_string(), directives);
    }
    if let Some(expires) = &options.expires {
        mapped.insert("expires".to_string(), expires.value().to_string());
    }
    if let Some(disposition) = &options.content_disposition {
        mapped.insert("content-disposition".to_string(), disposition.clone());
    }
    if let Some(encoding) = &options.content_encoding {
        mapped.insert("content-encoding".to_string(), encoding.clone());
    }
    if let Some(language) = &options.content_language {
        mapped.insert("content-language".to_string(), language.clone());
    }
    if let Some(content_type) = &options.content_type {
        mapped.insert("content-type".to_string(), content_type.clone());
    }
    if let Some(encryption) = &options.server_side_encryption {
        mapped.insert("sse".to_string(), encryption.to_string());
    }
    if let Some(class) = &options.storage_class {
        mapped.insert("storage-class".to_string(), class.to_string());
    }
    if let Some(target) = &options.website_redirect_location {
        mapped.insert("website-redirect".to_string(), target.clone());
    }
    if let Some(key_id) = &options.sse_kms_key_id {
        mapped.insert("sse-kms-key-id".to_string(), key_id.clone());
    }
    if let Some(algorithm) = &options.sse_customer_algorithm {
        mapped.insert("sse-c-copy-source".to_string(), algorithm.clone());
    }
    if let Some(acl) = &options.access_control {
        mapped.insert("acl".to_string(), acl.to_string());
    }

    if mapped.is_empty() { None } else { Some(mapped) }
}
