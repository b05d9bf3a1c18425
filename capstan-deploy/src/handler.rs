//! Singleton sync handler resolution.
//!
//! Every deployment in a definition shares one handler per memory sizing.
//! The identity is a pure function of the memory hint, so two deployments
//! asking for the same sizing land on the same registry entry.

use tracing::debug;
use uuid::Uuid;

use capstan_types::{Definition, ExecutionRole, SingletonFunction};

use crate::config::HandlerConfig;
use crate::error::{DeployError, DeployResult};
use crate::options::DeploymentOptions;

/// Base identity of the sync handler, shared across definitions.
pub const SYNC_HANDLER_IDENTITY: Uuid = Uuid::from_u128(0x3c0a_59d1_7b2e_4f86_9d41_c8a4_e5b2_7f19);

/// The registry identity for a handler with the given memory override.
pub fn handler_identity(memory_limit_mib: Option<u32>) -> String {
    match memory_limit_mib {
        Some(mib) => format!("{SYNC_HANDLER_IDENTITY}-{mib}MiB"),
        None => SYNC_HANDLER_IDENTITY.to_string(),
    }
}

/// Resolves the handler for `options`, creating it in the definition's
/// registry on first use.
pub(crate) fn resolve_handler(
    definition: &mut Definition,
    options: &DeploymentOptions,
    config: &HandlerConfig,
) -> DeployResult<SingletonFunction> {
    let memory_override = match &options.memory_limit {
        Some(hint) => Some(hint.as_static().ok_or(DeployError::DeferredMemoryLimit)?),
        None => None,
    };
    let identity = handler_identity(memory_override);

    let function = definition.singleton_function(&identity, || {
        let role = options
            .role
            .clone()
            .unwrap_or_else(|| ExecutionRole::new(format!("{identity}-role")));
        let mut function = SingletonFunction::new(identity.clone(), role)
            .with_runtime(config.runtime.clone())
            .with_memory(memory_override.unwrap_or(config.memory_limit_mib))
            .with_timeout_secs(config.timeout_secs);
        if let Some(vpc) = &options.vpc {
            function = function.with_placement(vpc.clone(), options.subnets.clone());
        }
        function
    });

    debug!("deployment resolves sync handler {identity}");
    Ok(function)
}
