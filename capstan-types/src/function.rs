//! Singleton execution functions.

use serde_json::json;

use crate::definition::ResourceRecord;
use crate::role::ExecutionRole;

/// Record kind emitted for managed singleton functions.
pub const FUNCTION_RECORD_KIND: &str = "deploy::sync-handler";

/// Default memory ceiling for a managed function, in MiB.
pub const DEFAULT_FUNCTION_MEMORY_MIB: u32 = 128;

/// Default execution timeout for a managed function, in seconds.
pub const DEFAULT_FUNCTION_TIMEOUT_SECS: u64 = 900;

/// An execution function created at most once per identity in a definition.
///
/// A managed function carries the role its grants accumulate on and emits a
/// record when first registered. A handle imported with [`Self::from_existing`]
/// has no role and emits nothing; the engine is expected to know it already.
#[derive(Clone, Debug)]
pub struct SingletonFunction {
    identity: String,
    function_name: String,
    role: Option<ExecutionRole>,
    runtime: Option<String>,
    memory_mib: u32,
    timeout_secs: u64,
    vpc: Option<String>,
    subnets: Vec<String>,
}

impl SingletonFunction {
    /// Creates a managed function under `identity` with default sizing.
    pub fn new(identity: impl Into<String>, role: ExecutionRole) -> Self {
        let identity = identity.into();
        let function_name = format!("sync-handler-{identity}");
        Self {
            identity,
            function_name,
            role: Some(role),
            runtime: None,
            memory_mib: DEFAULT_FUNCTION_MEMORY_MIB,
            timeout_secs: DEFAULT_FUNCTION_TIMEOUT_SECS,
            vpc: None,
            subnets: Vec::new(),
        }
    }

    /// Wraps a function that already exists outside the definition.
    pub fn from_existing(identity: impl Into<String>, function_name: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            function_name: function_name.into(),
            role: None,
            runtime: None,
            memory_mib: DEFAULT_FUNCTION_MEMORY_MIB,
            timeout_secs: DEFAULT_FUNCTION_TIMEOUT_SECS,
            vpc: None,
            subnets: Vec::new(),
        }
    }

    pub fn with_function_name(mut self, function_name: impl Into<String>) -> Self {
        self.function_name = function_name.into();
        self
    }

    /// Tags the runtime the engine should provision the function with.
    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    pub fn with_memory(mut self, memory_mib: u32) -> Self {
        self.memory_mib = memory_mib;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Places the function inside a network, restricted to the given subnets.
    pub fn with_placement(mut self, vpc: impl Into<String>, subnets: Vec<String>) -> Self {
        self.vpc = Some(vpc.into());
        self.subnets = subnets;
        self
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// The role grants accumulate on, absent for imported functions.
    pub fn role(&self) -> Option<&ExecutionRole> {
        self.role.as_ref()
    }

    pub fn runtime(&self) -> Option<&str> {
        self.runtime.as_deref()
    }

    pub fn memory_mib(&self) -> u32 {
        self.memory_mib
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn vpc(&self) -> Option<&str> {
        self.vpc.as_deref()
    }

    pub fn subnets(&self) -> &[String] {
        &self.subnets
    }

    /// The record declaring this function, or `None` for imported handles.
    pub fn record(&self) -> Option<ResourceRecord> {
        let role = self.role.as_ref()?;
        let mut properties = json!({
            "FunctionName": self.function_name,
            "Role": role.arn().render(),
            "MemoryLimit": self.memory_mib,
            "TimeoutSeconds": self.timeout_secs,
        });
        if let Some(runtime) = &self.runtime {
            properties["Runtime"] = json!(runtime);
        }
        if let Some(vpc) = &self.vpc {
            properties["VpcId"] = json!(vpc);
        }
        if !self.subnets.is_empty() {
            properties["SubnetIds"] = json!(self.subnets);
        }
        Some(ResourceRecord::new(
            self.identity.clone(),
            FUNCTION_RECORD_KIND,
            properties,
        ))
    }
}
