//! Program argument tokenizer
//!
//! Splits the free-form `args` option of `EXECUTE JAR` into the positional
//! argument vector handed to the program entry point.

/// Split `args` on whitespace, keeping quoted substrings together.
///
/// A fragment that starts with `'` or `"` absorbs the following fragments
/// (joined with a single space) until one ends with the same quote. The
/// enclosing quotes are removed. An unterminated quote runs to the end of the
/// input and still yields a single token.
///
/// ```
/// use sqlgate_sql::args::extract_args;
///
/// assert_eq!(
///     extract_args("--name 'a b c' --x 1"),
///     vec!["--name", "a b c", "--x", "1"]
/// );
/// ```
pub fn extract_args(args: &str) -> Vec<String> {
    let mut program_args = Vec::new();
    let mut fragments = args.split_whitespace();

    while let Some(fragment) = fragments.next() {
        let quote = match fragment.chars().next() {
            Some(c @ ('\'' | '"')) => c,
            _ => {
                program_args.push(fragment.to_string());
                continue;
            },
        };

        let mut value = fragment.to_string();
        while !is_closed(&value, quote) {
            match fragments.next() {
                Some(next) => {
                    value.push(' ');
                    value.push_str(next);
                },
                None => break,
            }
        }

        program_args.push(strip_quotes(&value, quote));
    }

    program_args
}

/// The opening quote alone does not close the token.
fn is_closed(value: &str, quote: char) -> bool {
    value.len() > 1 && value.ends_with(quote)
}

fn strip_quotes(value: &str, quote: char) -> String {
    // Quote characters are ASCII, so byte offsets are safe here
    let inner = &value[1..];
    if is_closed(value, quote) {
        inner[..inner.len() - 1].to_string()
    } else {
        // Unterminated: only the opening quote is markup, the tail is data
        inner.to_string()
    }
}
