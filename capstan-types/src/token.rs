//! Literal-or-deferred values used throughout definition records.
//!
//! A definition is assembled before the evaluating engine runs, so some
//! values (generated bucket names, role ARNs) are not known yet. Tokens
//! carry either a literal value or a reference to an attribute of another
//! resource, rendered in the wire form `${resource.attribute}`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reference to an attribute of another resource in the same definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrRef {
    pub resource: String,
    pub attribute: String,
}

impl AttrRef {
    pub fn new(resource: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            attribute: attribute.into(),
        }
    }
}

impl fmt::Display for AttrRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${{{}.{}}}", self.resource, self.attribute)
    }
}

/// A string that is either known now or resolved by the engine later.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenString {
    Literal(String),
    Deferred(AttrRef),
}

impl TokenString {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    pub fn deferred(resource: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::Deferred(AttrRef::new(resource, attribute))
    }

    /// Returns the literal value, or `None` for deferred tokens.
    pub fn as_static(&self) -> Option<&str> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Deferred(_) => None,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Wire form: literals verbatim, deferred tokens as `${resource.attribute}`.
    pub fn render(&self) -> String {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Deferred(attr) => attr.to_string(),
        }
    }

    /// Parses a rendered value back into a token.
    ///
    /// Only a string that is exactly one `${resource.attribute}` placeholder
    /// becomes deferred; everything else stays literal.
    pub fn from_rendered(raw: &str) -> Self {
        if let Some(inner) = raw.strip_prefix("${").and_then(|r| r.strip_suffix('}')) {
            if !inner.contains("${") {
                if let Some((resource, attribute)) = inner.split_once('.') {
                    if !resource.is_empty() && !attribute.is_empty() {
                        return Self::Deferred(AttrRef::new(resource, attribute));
                    }
                }
            }
        }
        Self::Literal(raw.to_string())
    }
}

impl fmt::Display for TokenString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for TokenString {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for TokenString {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<AttrRef> for TokenString {
    fn from(attr: AttrRef) -> Self {
        Self::Deferred(attr)
    }
}

impl Serialize for TokenString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.render())
    }
}

impl<'de> Deserialize<'de> for TokenString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_rendered(&raw))
    }
}

/// A numeric counterpart to [`TokenString`], used for sizing hints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenNumber {
    Literal(u32),
    Deferred(AttrRef),
}

impl TokenNumber {
    pub fn literal(value: u32) -> Self {
        Self::Literal(value)
    }

    pub fn deferred(resource: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::Deferred(AttrRef::new(resource, attribute))
    }

    /// Returns the literal value, or `None` for deferred tokens.
    pub fn as_static(&self) -> Option<u32> {
        match self {
            Self::Literal(value) => Some(*value),
            Self::Deferred(_) => None,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl fmt::Display for TokenNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Deferred(attr) => attr.fmt(f),
        }
    }
}

impl From<u32> for TokenNumber {
    fn from(value: u32) -> Self {
        Self::Literal(value)
    }
}

impl From<AttrRef> for TokenNumber {
    fn from(attr: AttrRef) -> Self {
        Self::Deferred(attr)
    }
}
