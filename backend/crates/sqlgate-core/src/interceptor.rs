//! Statement interception
//!
//! Callers run every statement through [`pretreat_statement`] and then
//! [`build`]. When the returned [`InterceptorResult`] has `no_execute` set, the
//! statement was fully handled here and must not be sent down the normal SQL
//! path.

use crate::context::ExecutionContext;
use crate::error::Result;
use crate::operations::OperationRegistry;
use crate::result::ExecutionResult;
use once_cell::sync::Lazy;
use sqlgate_sql::{redact_sensitive_sql, remove_comments, VariableManager};

static DEFAULT_REGISTRY: Lazy<OperationRegistry> = Lazy::new(OperationRegistry::new);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterceptorResult {
    /// The statement was handled and must not be executed as SQL
    pub no_execute: bool,
    pub result: Option<ExecutionResult>,
}

impl InterceptorResult {
    /// Nothing matched; run the statement as ordinary SQL.
    pub fn pass_through() -> Self {
        Self::default()
    }

    pub fn handled(result: Option<ExecutionResult>) -> Self {
        Self {
            no_execute: true,
            result,
        }
    }
}

/// Strip comments and, when fragments are enabled, expand `${name}` references.
pub fn pretreat_statement(ctx: &ExecutionContext, statement: &str) -> Result<String> {
    let statement = remove_comments(statement);
    if !ctx.use_sql_fragment() {
        return Ok(statement);
    }
    let expanded = ctx.variables().parse_variable(&statement)?;
    Ok(expanded.trim().to_string())
}

/// Dispatch a pretreated statement with the built-in operations.
pub fn build(ctx: &ExecutionContext, statement: &str) -> Result<InterceptorResult> {
    build_with(&DEFAULT_REGISTRY, ctx, statement)
}

/// Dispatch a pretreated statement with `registry`.
///
/// With fragments enabled, a `name := value` statement is registered in the
/// session variable table and reported as handled.
pub fn build_with(
    registry: &OperationRegistry,
    ctx: &ExecutionContext,
    statement: &str,
) -> Result<InterceptorResult> {
    if ctx.use_sql_fragment() && VariableManager::is_definition(statement) {
        if let Some(name) = ctx.variables().try_register_definition(statement)? {
            log::debug!("Defined fragment '{}'", name);
            return Ok(InterceptorResult::handled(None));
        }
    }

    let Some(operation) = registry.build_operation(statement)? else {
        return Ok(InterceptorResult::pass_through());
    };

    log::debug!(
        "Dispatching {} operation: {}",
        operation.name(),
        redact_sensitive_sql(statement)
    );
    let result = operation.execute(ctx)?;

    Ok(InterceptorResult {
        no_execute: operation.no_execute(),
        result,
    })
}
