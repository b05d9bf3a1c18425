//! Execution role handles.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::policy::PolicyStatement;
use crate::token::TokenString;

/// A named execution role that collects grants while a definition is built.
///
/// Handles are cheap to clone and share one statement list, so a grant made
/// through any clone is visible through all of them.
#[derive(Clone, Debug)]
pub struct ExecutionRole {
    name: String,
    statements: Arc<Mutex<Vec<PolicyStatement>>>,
}

impl ExecutionRole {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            statements: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The role ARN, resolved when the engine creates the role.
    pub fn arn(&self) -> TokenString {
        TokenString::deferred(&self.name, "arn")
    }

    /// Appends a statement to the role's policy.
    pub fn attach_statement(&self, statement: PolicyStatement) {
        let role = &self.name;
        let actions = statement.actions.len();
        debug!("role {role}: attached statement with {actions} action(s)");
        self.statements.lock().unwrap().push(statement);
    }

    /// Snapshot of every statement attached so far, in attachment order.
    pub fn statements(&self) -> Vec<PolicyStatement> {
        self.statements.lock().unwrap().clone()
    }
}
