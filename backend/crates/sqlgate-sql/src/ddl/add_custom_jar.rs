//! ADD CUSTOMJAR statement parser
//!
//! Parses statements like:
//! - ADD CUSTOMJAR 'rs:/udf/my-functions.jar'
//! - add customjar 'file:///opt/jars/connector.jar';

use crate::ddl::parsing::{parse_quoted, strip_keywords};
use crate::ddl::DdlResult;

/// ADD CUSTOMJAR statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCustomJarStatement {
    pub uri: String,
}

impl AddCustomJarStatement {
    pub fn matches(sql: &str) -> bool {
        strip_keywords(sql, &["ADD", "CUSTOMJAR"]).is_some()
    }

    /// Parse an ADD CUSTOMJAR statement from SQL
    pub fn parse(sql: &str) -> DdlResult<Self> {
        let rest = strip_keywords(sql, &["ADD", "CUSTOMJAR"])
            .ok_or_else(|| "Expected ADD CUSTOMJAR statement".to_string())?;

        let (uri, trailing) = parse_quoted(rest.trim_start())?;
        let trailing = trailing.trim().trim_end_matches(';').trim();
        if !trailing.is_empty() {
            return Err(format!(
                "Unexpected tokens after ADD CUSTOMJAR: '{}'",
                trailing
            ));
        }

        let uri = uri.trim();
        if uri.is_empty() {
            return Err("ADD CUSTOMJAR requires a non-blank jar location".to_string());
        }

        Ok(Self {
            uri: uri.to_string(),
        })
    }
}
