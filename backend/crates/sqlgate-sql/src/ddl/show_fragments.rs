//! SHOW FRAGMENTS statement parser

use crate::ddl::parsing::normalize_and_upper;
use crate::ddl::DdlResult;

/// SHOW FRAGMENTS statement
///
/// Lists the names defined with `name := value` in the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowFragmentsStatement;

impl ShowFragmentsStatement {
    pub fn matches(sql: &str) -> bool {
        normalize_and_upper(sql) == "SHOW FRAGMENTS"
    }

    pub fn parse(sql: &str) -> DdlResult<Self> {
        if Self::matches(sql) {
            Ok(Self)
        } else {
            Err("Expected SHOW FRAGMENTS statement".to_string())
        }
    }
}
