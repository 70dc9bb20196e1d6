use crate::context::ExecutionContext;
use crate::error::{GatewayError, Result};
use crate::result::ExecutionResult;
use sqlgate_sql::AddCustomJarStatement;

/// `ADD CUSTOMJAR '<uri>'`: resolve a jar and make it visible to the session
#[derive(Debug, Clone)]
pub struct AddCustomJarOperation {
    statement: String,
    parsed: AddCustomJarStatement,
}

impl AddCustomJarOperation {
    pub const NO_EXECUTE: bool = true;

    pub fn new(statement: &str) -> Result<Self> {
        let parsed = AddCustomJarStatement::parse(statement).map_err(GatewayError::Validation)?;
        Ok(Self {
            statement: statement.to_string(),
            parsed,
        })
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn uri(&self) -> &str {
        &self.parsed.uri
    }

    /// The jar is registered on the engine and added to the classpath of every
    /// later submission in this session.
    pub fn execute(&self, ctx: &ExecutionContext) -> Result<ExecutionResult> {
        let jar = ctx.resolver().resolve(&self.parsed.uri)?;
        ctx.engine().add_jar(&jar)?;
        ctx.add_user_classpath(&jar);

        log::info!("Added custom jar {} ({})", self.parsed.uri, jar.display());
        Ok(ExecutionResult::Success(format!(
            "Added custom jar {}",
            self.parsed.uri
        )))
    }
}
