//! EXECUTE JAR statement parser
//!
//! Parses statements like:
//! ```text
//! EXECUTE JAR WITH (
//!     'uri'='rs:/jobs/wordcount.jar',
//!     'main-class'='org.example.WordCount',
//!     'args'='--input /data/in --name ''my job''',
//!     'parallelism'='4',
//!     'savepoint-path'='s3://bucket/savepoints/sp-1',
//!     'allow-nonrestored-state'='true'
//! )
//! ```

use crate::ddl::parsing::{parse_bool_option, parse_option_list, strip_keywords};
use crate::ddl::DdlResult;

/// Restore tolerance used when `allow-nonrestored-state` is not given.
pub const DEFAULT_ALLOW_NON_RESTORED_STATE: bool = false;

pub const KEY_URI: &str = "uri";
pub const KEY_MAIN_CLASS: &str = "main-class";
pub const KEY_ARGS: &str = "args";
pub const KEY_PARALLELISM: &str = "parallelism";
pub const KEY_SAVEPOINT_PATH: &str = "savepoint-path";
pub const KEY_ALLOW_NON_RESTORED_STATE: &str = "allow-nonrestored-state";

/// Parameters of an `EXECUTE JAR` submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JarSubmitParam {
    /// Artifact location (`rs:/...`, `file:/...` or a local path). Never blank.
    pub uri: String,
    /// Program entry point. `None` leaves the choice to the artifact manifest.
    pub main_class: Option<String>,
    /// Raw argument string, tokenized later with [`crate::extract_args`]
    pub args: Option<String>,
    /// Raw parallelism text; only a plain integer literal is honored
    pub parallelism: Option<String>,
    pub savepoint_path: Option<String>,
    pub allow_non_restored_state: bool,
}

impl JarSubmitParam {
    /// Whether `sql` starts with `EXECUTE JAR`.
    ///
    /// Statements that match but are malformed are reported by [`parse`](Self::parse)
    /// instead of being passed through as ordinary SQL.
    pub fn matches(sql: &str) -> bool {
        strip_keywords(sql, &["EXECUTE", "JAR"]).is_some()
    }

    /// Parse an EXECUTE JAR statement from SQL
    ///
    /// Unknown option keys are ignored; when a key repeats the last value wins.
    pub fn parse(sql: &str) -> DdlResult<Self> {
        let options_text = strip_keywords(sql, &["EXECUTE", "JAR", "WITH"])
            .ok_or_else(|| "Expected EXECUTE JAR WITH (...) statement".to_string())?;
        let options = parse_option_list(options_text)?;

        let mut uri = None;
        let mut main_class = None;
        let mut args = None;
        let mut parallelism = None;
        let mut savepoint_path = None;
        let mut allow_non_restored_state = DEFAULT_ALLOW_NON_RESTORED_STATE;

        for (key, value) in options {
            match key.as_str() {
                KEY_URI => uri = Some(value),
                KEY_MAIN_CLASS => main_class = non_blank(value),
                KEY_ARGS => args = non_blank(value),
                KEY_PARALLELISM => parallelism = non_blank(value),
                KEY_SAVEPOINT_PATH => savepoint_path = non_blank(value),
                KEY_ALLOW_NON_RESTORED_STATE => {
                    allow_non_restored_state = parse_bool_option(&key, &value)?
                },
                other => log::debug!("Ignoring unknown EXECUTE JAR option '{}'", other),
            }
        }

        let uri = uri
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| "EXECUTE JAR requires a non-blank 'uri' option".to_string())?;

        Ok(Self {
            uri,
            main_class,
            args,
            parallelism,
            savepoint_path,
            allow_non_restored_state,
        })
    }

    /// Raw argument string, empty when none was given
    pub fn args_or_empty(&self) -> &str {
        self.args.as_deref().unwrap_or("")
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
