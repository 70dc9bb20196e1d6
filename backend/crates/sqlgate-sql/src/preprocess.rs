//! Comment stripping for incoming statements
//!
//! Removes `-- line` and `/* block */` comments while leaving quoted text and
//! optimizer hints (`/*+ ... */`) untouched.

/// Remove SQL comments from `sql` and trim the result.
///
/// Non-breaking spaces become plain spaces and runs of line breaks collapse
/// into a single `\n` before comments are scanned.
pub fn remove_comments(sql: &str) -> String {
    if sql.trim().is_empty() {
        return String::new();
    }

    let chars: Vec<char> = normalize_line_breaks(sql).chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match c {
            '\'' | '"' => {
                i = copy_quoted(&chars, i, c, &mut out);
            },
            '-' if next == Some('-') => {
                // Line comment: drop up to (not including) the line break
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            },
            '/' if next == Some('*') => {
                let is_hint = chars.get(i + 2) == Some(&'+');
                let end = find_block_end(&chars, i + 2);
                if is_hint {
                    out.extend(&chars[i..end]);
                }
                i = end;
            },
            _ => {
                out.push(c);
                i += 1;
            },
        }
    }

    out.trim().to_string()
}

fn normalize_line_breaks(sql: &str) -> String {
    let mut normalized = String::with_capacity(sql.len());
    let mut in_break = false;
    for c in sql.chars() {
        match c {
            '\r' | '\n' => {
                if !in_break {
                    normalized.push('\n');
                    in_break = true;
                }
            },
            '\u{00A0}' => {
                normalized.push(' ');
                in_break = false;
            },
            _ => {
                normalized.push(c);
                in_break = false;
            },
        }
    }
    normalized
}

/// Copy a quoted run starting at `start` and return the index after it.
/// A doubled quote (`''`) simply closes and reopens, so it stays verbatim.
fn copy_quoted(chars: &[char], start: usize, quote: char, out: &mut String) -> usize {
    out.push(quote);
    let mut i = start + 1;
    while i < chars.len() {
        out.push(chars[i]);
        if chars[i] == quote {
            return i + 1;
        }
        i += 1;
    }
    i
}

/// Index just past the closing `*/`, or the end of input when unterminated.
fn find_block_end(chars: &[char], from: usize) -> usize {
    let mut i = from;
    while i + 1 < chars.len() {
        if chars[i] == '*' && chars[i + 1] == '/' {
            return i + 2;
        }
        i += 1;
    }
    chars.len()
}
