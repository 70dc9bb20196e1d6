//! Operation registry for extended statement routing
//!
//! Recognizers are tried in registration order and the first match builds the
//! operation. A statement no recognizer claims is ordinary SQL.

use super::{AddCustomJarOperation, ExecuteJarOperation, Operation, ShowFragmentsOperation};
use crate::error::Result;
use sqlgate_sql::{AddCustomJarStatement, JarSubmitParam, ShowFragmentsStatement};

/// Shape check plus constructor for one operation kind
#[derive(Clone, Copy)]
pub struct Recognizer {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub build: fn(&str) -> Result<Operation>,
}

pub struct OperationRegistry {
    recognizers: Vec<Recognizer>,
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationRegistry {
    /// Registry with the built-in operations, in precedence order
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register(Recognizer {
            name: "EXECUTE JAR",
            matches: JarSubmitParam::matches,
            build: |sql| ExecuteJarOperation::new(sql).map(Operation::ExecuteJar),
        });
        registry.register(Recognizer {
            name: "ADD CUSTOMJAR",
            matches: AddCustomJarStatement::matches,
            build: |sql| AddCustomJarOperation::new(sql).map(Operation::AddCustomJar),
        });
        registry.register(Recognizer {
            name: "SHOW FRAGMENTS",
            matches: ShowFragmentsStatement::matches,
            build: |sql| ShowFragmentsOperation::new(sql).map(Operation::ShowFragments),
        });

        registry
    }

    pub fn empty() -> Self {
        Self {
            recognizers: Vec::new(),
        }
    }

    /// Append a recognizer; earlier registrations take precedence.
    pub fn register(&mut self, recognizer: Recognizer) {
        self.recognizers.push(recognizer);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.recognizers.iter().map(|r| r.name).collect()
    }

    /// Build the operation for `statement`, or `None` for ordinary SQL.
    pub fn build_operation(&self, statement: &str) -> Result<Option<Operation>> {
        match self.recognizers.iter().find(|r| (r.matches)(statement)) {
            Some(recognizer) => {
                log::debug!("Statement matched {}", recognizer.name);
                (recognizer.build)(statement).map(Some)
            },
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;

    #[test]
    fn test_builtin_order() {
        assert_eq!(
            OperationRegistry::new().names(),
            vec!["EXECUTE JAR", "ADD CUSTOMJAR", "SHOW FRAGMENTS"]
        );
    }

    #[test]
    fn test_plain_sql_not_matched() {
        let registry = OperationRegistry::new();
        for sql in ["SELECT 1", "INSERT INTO t SELECT * FROM s", "SHOW TABLES", ""] {
            assert!(registry.build_operation(sql).unwrap().is_none(), "{}", sql);
        }
    }

    #[test]
    fn test_builds_matching_operation() {
        let registry = OperationRegistry::new();

        let op = registry
            .build_operation("execute jar with ('uri'='a.jar')")
            .unwrap()
            .unwrap();
        assert!(matches!(op, Operation::ExecuteJar(_)));
        assert!(op.no_execute());

        let op = registry.build_operation("ADD CUSTOMJAR 'a.jar'").unwrap().unwrap();
        assert_eq!(op.name(), "ADD CUSTOMJAR");

        let op = registry.build_operation("show fragments").unwrap().unwrap();
        assert_eq!(op.name(), "SHOW FRAGMENTS");
        assert_eq!(op.statement(), "show fragments");
    }

    #[test]
    fn test_malformed_match_is_validation_error() {
        let registry = OperationRegistry::new();
        let err = registry
            .build_operation("EXECUTE JAR WITH ('main-class'='a.B')")
            .unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = OperationRegistry::empty();
        registry.register(Recognizer {
            name: "ANY FRAGMENTS",
            matches: |sql| sql.to_ascii_uppercase().contains("FRAGMENTS"),
            build: |sql| ShowFragmentsOperation::new(sql).map(Operation::ShowFragments),
        });
        registry.register(Recognizer {
            name: "SHOW FRAGMENTS",
            matches: ShowFragmentsStatement::matches,
            build: |_| unreachable!("shadowed by the earlier recognizer"),
        });

        let op = registry.build_operation("SHOW FRAGMENTS").unwrap().unwrap();
        assert_eq!(op.name(), "SHOW FRAGMENTS");
    }
}
