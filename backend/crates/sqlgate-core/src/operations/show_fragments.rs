use crate::context::ExecutionContext;
use crate::error::{GatewayError, Result};
use crate::result::ExecutionResult;
use sqlgate_sql::ShowFragmentsStatement;

/// `SHOW FRAGMENTS`: list the session's fragment names
#[derive(Debug, Clone)]
pub struct ShowFragmentsOperation {
    statement: String,
}

impl ShowFragmentsOperation {
    pub const NO_EXECUTE: bool = true;

    pub fn new(statement: &str) -> Result<Self> {
        ShowFragmentsStatement::parse(statement).map_err(GatewayError::Validation)?;
        Ok(Self {
            statement: statement.to_string(),
        })
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn execute(&self, ctx: &ExecutionContext) -> Result<ExecutionResult> {
        let rows = ctx
            .variables()
            .names()
            .into_iter()
            .map(|name| vec![name])
            .collect();

        Ok(ExecutionResult::Rows {
            columns: vec!["fragment".to_string()],
            rows,
        })
    }
}
