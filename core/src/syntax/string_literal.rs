/// String literal escaping and unescaping.
///
/// This module converts between:
/// - Runtime strings (e.g., "hello\n" with an actual newline character)
/// - Source code string literals (e.g., "hello\n" with a backslash-n sequence)
///
/// The tokenizer translates escapes one character at a time through
/// [`unescape_char`]; the value printer goes the other way with
/// [`escape_string`].
use core::fmt;

/// Translate the character following a backslash inside a string literal.
///
/// `\a \b \f \n \r \t \v` map to their control characters; any other
/// character stands for itself, so `\"` is a quote and `\\` a backslash.
pub fn unescape_char(c: char) -> char {
    match c {
        'a' => '\x07',
        'b' => '\x08',
        'f' => '\x0C',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\x0B',
        other => other,
    }
}

/// The escape letter for `c`, if `c` must be written as a backslash escape.
pub fn escape_char(c: char) -> Option<char> {
    match c {
        '\x07' => Some('a'),
        '\x08' => Some('b'),
        '\x0C' => Some('f'),
        '\n' => Some('n'),
        '\r' => Some('r'),
        '\t' => Some('t'),
        '\x0B' => Some('v'),
        '"' => Some('"'),
        '\\' => Some('\\'),
        _ => None,
    }
}

/// Write `s` as a double-quoted string literal.
///
/// At most `max_chars` characters of `s` are written; when the string is
/// cut short, `...` is appended after the closing quote.
///
/// # Example
///
/// ```
/// use remexpr_core::syntax::string_literal::escape_string;
///
/// let mut out = String::new();
/// escape_string(&mut out, "say \"hi\"\n", None).unwrap();
/// assert_eq!(out, r#""say \"hi\"\n""#);
/// ```
pub fn escape_string(f: &mut impl fmt::Write, s: &str, max_chars: Option<usize>) -> fmt::Result {
    f.write_char('"')?;
    let mut truncated = false;
    for (i, ch) in s.chars().enumerate() {
        if max_chars.is_some_and(|max| i >= max) {
            truncated = true;
            break;
        }
        match escape_char(ch) {
            Some(letter) => {
                f.write_char('\\')?;
                f.write_char(letter)?;
            }
            None => f.write_char(ch)?,
        }
    }
    f.write_char('"')?;
    if truncated {
        f.write_str("...")?;
    }
    Ok(())
}
