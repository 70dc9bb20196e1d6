//! Secret redaction for statements that end up in logs

use once_cell::sync::Lazy;
use regex::Regex;

const REDACTED: &str = "[REDACTED]";

/// `'fs.s3a.secret-key'='...'` style options
static SENSITIVE_OPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)('[^']*(?:password|secret|access[-_.]?key|token)[^']*'\s*=\s*)'(?:[^']|'')*'",
    )
    .unwrap()
});

/// `PASSWORD '...'` clauses
static PASSWORD_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\bPASSWORD\s+)'(?:[^']|'')*'").unwrap());

/// Mask secret values in `sql` so it can be logged.
pub fn redact_sensitive_sql(sql: &str) -> String {
    let masked = SENSITIVE_OPTION.replace_all(sql, format!("${{1}}'{}'", REDACTED).as_str());
    PASSWORD_CLAUSE
        .replace_all(&masked, format!("${{1}}'{}'", REDACTED).as_str())
        .into_owned()
}
