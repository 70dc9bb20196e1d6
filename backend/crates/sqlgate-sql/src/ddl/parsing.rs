//! Common parsing utilities for the extended statements

use crate::ddl::DdlResult;

/// Normalize SQL and convert to uppercase for pattern matching
///
/// Collapses whitespace runs, drops trailing semicolons and uppercases.
#[inline]
pub fn normalize_and_upper(sql: &str) -> String {
    sql.trim()
        .trim_end_matches(';')
        .split_whitespace()
        .map(|word| word.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Match a run of keywords at the start of `sql`.
///
/// Keywords compare case-insensitively and may be separated by any amount of
/// whitespace. A keyword must end at a word boundary, so `EXECUTE JARS` does
/// not match `["EXECUTE", "JAR"]`. Returns the text after the last keyword.
pub fn strip_keywords<'a>(sql: &'a str, keywords: &[&str]) -> Option<&'a str> {
    let mut rest = sql;
    for keyword in keywords {
        rest = rest.trim_start();
        let head = rest.get(..keyword.len())?;
        if !head.eq_ignore_ascii_case(keyword) {
            return None;
        }
        rest = &rest[keyword.len()..];
        if rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_') {
            return None;
        }
    }
    Some(rest)
}

/// Parse a single-quoted literal at the start of `input`.
///
/// `''` inside the literal is an escaped quote. Returns the unescaped value
/// and the text after the closing quote.
pub fn parse_quoted(input: &str) -> DdlResult<(String, &str)> {
    let body = input
        .strip_prefix('\'')
        .ok_or_else(|| format!("Expected a quoted string at '{}'", preview(input)))?;

    let mut value = String::new();
    let mut chars = body.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if c != '\'' {
            value.push(c);
            continue;
        }
        if let Some((_, '\'')) = chars.peek() {
            value.push('\'');
            chars.next();
            continue;
        }
        return Ok((value, &body[idx + 1..]));
    }

    Err(format!("Unterminated quoted string: '{}", preview(body)))
}

/// Parse a parenthesized `'key'='value'` list such as
/// `('uri'='rs:/a.jar', 'args'='--x 1')`.
///
/// Entries keep their order; a trailing `;` after the closing parenthesis is
/// allowed, anything else is rejected.
pub fn parse_option_list(input: &str) -> DdlResult<Vec<(String, String)>> {
    let mut rest = input
        .trim_start()
        .strip_prefix('(')
        .ok_or_else(|| "Expected '(' to open the option list".to_string())?;

    let mut options = Vec::new();
    loop {
        rest = rest.trim_start();
        if options.is_empty() {
            if let Some(after) = rest.strip_prefix(')') {
                rest = after;
                break;
            }
        }

        let (key, after_key) = parse_quoted(rest)?;
        let after_eq = after_key
            .trim_start()
            .strip_prefix('=')
            .ok_or_else(|| format!("Expected '=' after option '{}'", key))?;
        let (value, after_value) = parse_quoted(after_eq.trim_start())?;
        options.push((key, value));

        rest = after_value.trim_start();
        if let Some(after) = rest.strip_prefix(',') {
            rest = after;
        } else if let Some(after) = rest.strip_prefix(')') {
            rest = after;
            break;
        } else {
            return Err(format!(
                "Expected ',' or ')' in option list at '{}'",
                preview(rest)
            ));
        }
    }

    let trailing = rest.trim().trim_end_matches(';').trim();
    if !trailing.is_empty() {
        return Err(format!(
            "Unexpected tokens after option list: '{}'",
            preview(trailing)
        ));
    }

    Ok(options)
}

/// Parse a boolean option value (`true/false/1/0/yes/no`, any case).
pub fn parse_bool_option(key: &str, value: &str) -> DdlResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(format!(
            "Invalid value '{}' for '{}': expected true or false",
            other, key
        )),
    }
}

fn preview(text: &str) -> String {
    const MAX: usize = 32;
    match text.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
