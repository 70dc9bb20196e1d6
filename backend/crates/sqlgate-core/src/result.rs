/// Outcome of an extended operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    Success(String),
    JobSubmitted { job_id: String },
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl ExecutionResult {
    pub fn ok() -> Self {
        ExecutionResult::Success("OK".to_string())
    }

    pub fn job_id(&self) -> Option<&str> {
        match self {
            ExecutionResult::JobSubmitted { job_id } => Some(job_id),
            _ => None,
        }
    }
}
