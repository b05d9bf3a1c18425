//! Definition contexts.
//!
//! A [`Definition`] is the sink everything declarative lands in: an ordered
//! list of resource records plus the singleton registry shared by every
//! deployment added to it. Serializing the manifest hands the whole thing
//! to an evaluating engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::bucket::BucketRef;
use crate::function::SingletonFunction;

/// One declarative resource in a definition manifest.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    pub kind: String,
    pub properties: Value,
}

impl ResourceRecord {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, properties: Value) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            properties,
        }
    }
}

/// An in-progress definition.
#[derive(Debug)]
pub struct Definition {
    name: String,
    records: Vec<ResourceRecord>,
    singletons: BTreeMap<String, SingletonFunction>,
}

impl Definition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
            singletons: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a record; manifest order is insertion order.
    pub fn add_record(&mut self, record: ResourceRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// Looks up a record by id.
    pub fn record(&self, id: &str) -> Option<&ResourceRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Returns the function registered under `identity`, creating it on
    /// first use.
    ///
    /// The first caller's `create` result wins; later calls get a clone of
    /// the registered handle and their closures never run. A managed
    /// function's record is appended exactly once, at creation.
    pub fn singleton_function<F>(&mut self, identity: &str, create: F) -> SingletonFunction
    where
        F: FnOnce() -> SingletonFunction,
    {
        if let Some(existing) = self.singletons.get(identity) {
            return existing.clone();
        }
        let function = create();
        if let Some(record) = function.record() {
            self.records.push(record);
        }
        let definition = &self.name;
        debug!("definition {definition}: registered singleton function {identity}");
        self.singletons.insert(identity.to_string(), function.clone());
        function
    }

    pub fn has_singleton(&self, identity: &str) -> bool {
        self.singletons.contains_key(identity)
    }

    pub fn singleton(&self, identity: &str) -> Option<&SingletonFunction> {
        self.singletons.get(identity)
    }

    /// The definition-scoped staging bucket.
    ///
    /// The engine provisions one staging bucket per definition, so its name
    /// and ARN stay deferred until evaluation.
    pub fn staging_bucket(&self) -> BucketRef {
        BucketRef::from_attributes(format!("{}-staging", self.name))
    }

    /// Serializes the full manifest for handoff to an evaluating engine.
    pub fn manifest(&self) -> Value {
        json!({
            "definition": self.name,
            "resources": self.records,
        })
    }
}
