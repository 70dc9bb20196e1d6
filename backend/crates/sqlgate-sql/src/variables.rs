//! Session variable table
//!
//! Holds the statement fragments defined with `name := value` and expands
//! `${name}` references in later statements.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use thiserror::Error;

static VARIABLE_REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());
static VARIABLE_DEFINITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s*([A-Za-z0-9_\-]+)\s*:=(.*)$").unwrap());
static VARIABLE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").unwrap());

/// Errors raised while defining or resolving variables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    #[error("Variable '{0}' is not defined")]
    Undefined(String),

    #[error("Invalid variable name '{0}': only letters, digits, '_' and '-' are allowed")]
    InvalidName(String),
}

/// Session-scoped `name -> value` table.
#[derive(Debug, Default)]
pub struct VariableManager {
    variables: RwLock<BTreeMap<String, String>>,
}

impl VariableManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or replace a variable.
    pub fn register(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), VariableError> {
        let name = name.into();
        if !VARIABLE_NAME.is_match(&name) {
            return Err(VariableError::InvalidName(name));
        }
        self.variables.write().insert(name, value.into());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.variables.read().get(name).cloned()
    }

    /// Defined names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.variables.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.variables.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.read().is_empty()
    }

    /// Replace every `${name}` in `text` with its value.
    ///
    /// Fails on the first reference to an undefined name.
    pub fn parse_variable(&self, text: &str) -> Result<String, VariableError> {
        if !text.contains("${") {
            return Ok(text.to_string());
        }

        let variables = self.variables.read();
        let mut missing = None;
        let replaced = VARIABLE_REFERENCE.replace_all(text, |caps: &Captures<'_>| {
            let name = caps[1].trim();
            match variables.get(name) {
                Some(value) => value.clone(),
                None => {
                    missing.get_or_insert_with(|| name.to_string());
                    String::new()
                },
            }
        });

        match missing {
            Some(name) => Err(VariableError::Undefined(name)),
            None => Ok(replaced.into_owned()),
        }
    }

    /// Whether `statement` has the `name := value` shape.
    pub fn is_definition(statement: &str) -> bool {
        VARIABLE_DEFINITION.is_match(statement)
    }

    /// Register `statement` if it is a fragment definition.
    ///
    /// Expects a statement that already went through [`Self::parse_variable`];
    /// the value is stored as written, so `${...}` text that survived the
    /// single expansion pass stays literal. Returns the defined name, or
    /// `None` when the statement is not a definition.
    pub fn try_register_definition(&self, statement: &str) -> Result<Option<String>, VariableError> {
        let Some(caps) = VARIABLE_DEFINITION.captures(statement) else {
            return Ok(None);
        };

        let name = caps[1].to_string();
        let value = caps[2].trim().trim_end_matches(';').trim_end().to_string();

        log::debug!("Registering fragment '{}'", name);
        self.register(name.clone(), value)?;
        Ok(Some(name))
    }
}
