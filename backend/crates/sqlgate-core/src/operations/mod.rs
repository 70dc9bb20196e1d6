//! Extended operations
//!
//! Statements the gateway handles itself. Each variant owns its parsed
//! statement; [`registry::OperationRegistry`] decides which one applies.

pub mod add_custom_jar;
pub mod execute_jar;
pub mod registry;
pub mod show_fragments;

pub use add_custom_jar::AddCustomJarOperation;
pub use execute_jar::ExecuteJarOperation;
pub use registry::OperationRegistry;
pub use show_fragments::ShowFragmentsOperation;

use crate::context::ExecutionContext;
use crate::error::Result;
use crate::result::ExecutionResult;

#[derive(Debug, Clone)]
pub enum Operation {
    ExecuteJar(ExecuteJarOperation),
    AddCustomJar(AddCustomJarOperation),
    ShowFragments(ShowFragmentsOperation),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ExecuteJar(_) => "EXECUTE JAR",
            Operation::AddCustomJar(_) => "ADD CUSTOMJAR",
            Operation::ShowFragments(_) => "SHOW FRAGMENTS",
        }
    }

    pub fn statement(&self) -> &str {
        match self {
            Operation::ExecuteJar(op) => op.statement(),
            Operation::AddCustomJar(op) => op.statement(),
            Operation::ShowFragments(op) => op.statement(),
        }
    }

    /// Whether the operation replaces normal SQL execution of its statement
    pub fn no_execute(&self) -> bool {
        match self {
            Operation::ExecuteJar(_) => ExecuteJarOperation::NO_EXECUTE,
            Operation::AddCustomJar(_) => AddCustomJarOperation::NO_EXECUTE,
            Operation::ShowFragments(_) => ShowFragmentsOperation::NO_EXECUTE,
        }
    }

    pub fn execute(&self, ctx: &ExecutionContext) -> Result<Option<ExecutionResult>> {
        let result = match self {
            Operation::ExecuteJar(op) => op.execute(ctx)?,
            Operation::AddCustomJar(op) => op.execute(ctx)?,
            Operation::ShowFragments(op) => op.execute(ctx)?,
        };
        Ok(Some(result))
    }
}
