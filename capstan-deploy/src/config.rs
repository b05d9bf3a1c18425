//! Sync handler configuration.

use serde::{Deserialize, Serialize};

use capstan_types::{DEFAULT_FUNCTION_MEMORY_MIB, DEFAULT_FUNCTION_TIMEOUT_SECS};

/// Sizing applied to the singleton sync handler when a deployment does not
/// override it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Memory ceiling in MiB.
    pub memory_limit_mib: u32,

    /// Execution timeout in seconds.
    pub timeout_secs: u64,

    /// Runtime tag the engine provisions the handler with.
    pub runtime: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            memory_limit_mib: DEFAULT_FUNCTION_MEMORY_MIB,
            timeout_secs: DEFAULT_FUNCTION_TIMEOUT_SECS, // 15 minutes
            runtime: "python3.12".to_string(),
        }
    }
}

impl HandlerConfig {
    /// Creates a config with small limits for tests.
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            memory_limit_mib: 64,
            timeout_secs: 30,
            runtime: "python3.12".to_string(),
        }
    }
}
