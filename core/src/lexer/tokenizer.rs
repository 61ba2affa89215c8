//! Token scanner.
//!
//! There is no token enum: each token is left as text in a
//! [`TokenBuffer`] and the evaluator inspects its first and last
//! characters. Structural tokens are a single character; operators are one
//! or two characters; string and date literals keep their delimiters; any
//! other token is an identifier-like run that may end in `(` to signal a
//! function call.

use super::buffer::TokenBuffer;
use crate::evaluator::EvalError;
use crate::syntax::string_literal::unescape_char;

/// Marks the end of an expression embedded in surrounding text.
pub const END_OF_EXPR: char = ']';

pub const COMMA: char = ',';

/// Whitespace skipped between tokens.
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Characters that may start or continue an identifier.
pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A read position in the source text.
///
/// Positions are byte offsets and always lie on a character boundary.
#[derive(Debug, Clone)]
pub struct Cursor<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Cursor<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn source(&self) -> &'s str {
        self.src
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move back (or forward) to a position previously returned by
    /// [`Cursor::position`].
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(self.src.is_char_boundary(pos));
        self.pos = pos.min(self.src.len());
    }

    pub fn remaining(&self) -> &'s str {
        &self.src[self.pos..]
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.bump();
        }
    }

    /// The next character that is not whitespace, without consuming
    /// anything.
    pub fn peek_non_space(&self) -> Option<char> {
        self.remaining().chars().find(|&c| !is_space(c))
    }
}

/// Scan one token into `buf`, replacing its previous content.
///
/// At end of input the buffer is left empty.
pub fn next_token(
    cursor: &mut Cursor<'_>,
    buf: &mut TokenBuffer,
    time_sep: char,
) -> Result<(), EvalError> {
    buf.clear();
    cursor.skip_whitespace();

    let Some(c) = cursor.bump() else {
        return Ok(());
    };
    buf.push(c)?;

    match c {
        COMMA | END_OF_EXPR | '+' | '-' | '*' | '/' | '(' | ')' | '%' => return Ok(()),
        '&' | '|' | '=' => {
            if cursor.peek() == Some(c) {
                cursor.bump();
                buf.push(c)?;
            }
            return Ok(());
        }
        '!' | '<' | '>' => {
            if cursor.peek() == Some('=') {
                cursor.bump();
                buf.push('=')?;
            }
            return Ok(());
        }
        '"' => return scan_string(cursor, buf),
        '\'' => return scan_date(cursor, buf),
        _ => {}
    }

    if !is_ident_char(c) && c != '$' {
        return Err(EvalError::IllegalChar(c));
    }

    while let Some(c) = cursor
        .peek()
        .filter(|&c| is_ident_char(c) || c == ':' || c == '.' || c == time_sep)
    {
        cursor.bump();
        buf.push(c)?;
    }

    cursor.skip_whitespace();
    if cursor.peek() == Some('(') {
        cursor.bump();
        buf.push('(')?;
    }
    Ok(())
}

/// Scan the rest of a double-quoted literal, translating escapes.
fn scan_string(cursor: &mut Cursor<'_>, buf: &mut TokenBuffer) -> Result<(), EvalError> {
    loop {
        match cursor.bump() {
            None => return Err(EvalError::MissingQuote),
            Some('\\') => {
                let escaped = cursor.bump().ok_or(EvalError::MissingQuote)?;
                buf.push(unescape_char(escaped))?;
            }
            Some('"') => return buf.push('"'),
            Some(c) => buf.push(c)?,
        }
    }
}

/// Scan the rest of a single-quoted date literal verbatim.
fn scan_date(cursor: &mut Cursor<'_>, buf: &mut TokenBuffer) -> Result<(), EvalError> {
    loop {
        let c = cursor.bump().ok_or(EvalError::MissingQuote)?;
        buf.push(c)?;
        if c == '\'' {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(src: &str) -> Result<Vec<String>, EvalError> {
        let mut cursor = Cursor::new(src);
        let mut buf = TokenBuffer::new();
        let mut out = Vec::new();
        loop {
            next_token(&mut cursor, &mut buf, ':')?;
            if buf.is_empty() {
                return Ok(out);
            }
            out.push(buf.as_str().to_string());
        }
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tokens("(1+2)*3%4/5-6,7]").unwrap(),
            ["(", "1", "+", "2", ")", "*", "3", "%", "4", "/", "5", "-", "6", ",", "7", "]"]
        );
    }

    #[test]
    fn test_doubled_operators() {
        assert_eq!(
            tokens("a&&b||c==d").unwrap(),
            ["a", "&&", "b", "||", "c", "==", "d"]
        );
        assert_eq!(tokens("a & b = c").unwrap(), ["a", "&", "b", "=", "c"]);
    }

    #[test]
    fn test_operators_followed_by_equals() {
        assert_eq!(
            tokens("a!=b<=c>=d<e>f !g").unwrap(),
            ["a", "!=", "b", "<=", "c", ">=", "d", "<", "e", ">", "f", "!", "g"]
        );
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(tokens(r#""a\tb""#).unwrap(), ["\"a\tb\""]);
        assert_eq!(tokens(r#""say \"hi\"""#).unwrap(), ["\"say \"hi\"\""]);
        assert_eq!(tokens(r#""\q\\""#).unwrap(), ["\"q\\\""]);
    }

    #[test]
    fn test_unterminated_literals() {
        assert_eq!(tokens("\"abc"), Err(EvalError::MissingQuote));
        assert_eq!(tokens("\"abc\\"), Err(EvalError::MissingQuote));
        assert_eq!(tokens("\""), Err(EvalError::MissingQuote));
        assert_eq!(tokens("'2024-01-01"), Err(EvalError::MissingQuote));
    }

    #[test]
    fn test_date_literal_is_verbatim() {
        assert_eq!(
            tokens(r"'2024-01-01@10:00' + 1").unwrap(),
            ["'2024-01-01@10:00'", "+", "1"]
        );
        assert_eq!(tokens(r"'\n'").unwrap(), [r"'\n'"]);
    }

    #[test]
    fn test_identifiers_include_time_separators() {
        assert_eq!(tokens("12:30 + x.y").unwrap(), ["12:30", "+", "x.y"]);
        assert_eq!(tokens("$DateSep").unwrap(), ["$DateSep"]);
    }

    #[test]
    fn test_custom_time_separator() {
        let mut cursor = Cursor::new("12h30");
        let mut buf = TokenBuffer::new();
        next_token(&mut cursor, &mut buf, 'h').unwrap();
        assert_eq!(buf.as_str(), "12h30");
    }

    #[test]
    fn test_function_call_token_swallows_space() {
        assert_eq!(tokens("max (1, 2)").unwrap(), ["max(", "1", ",", "2", ")"]);
        assert_eq!(tokens("today()").unwrap(), ["today(", ")"]);
    }

    #[test]
    fn test_illegal_character() {
        assert_eq!(tokens("1 # 2"), Err(EvalError::IllegalChar('#')));
        assert_eq!(tokens("é"), Err(EvalError::IllegalChar('é')));
    }

    #[test]
    fn test_whitespace_and_end() {
        assert_eq!(tokens(" \t\n\x0B\x0C\r ").unwrap(), Vec::<String>::new());
        assert_eq!(tokens("").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_cursor_peeking() {
        let mut cursor = Cursor::new("  )x");
        assert_eq!(cursor.peek_non_space(), Some(')'));
        assert_eq!(cursor.position(), 0);
        cursor.skip_whitespace();
        assert_eq!(cursor.bump(), Some(')'));
        assert_eq!(cursor.remaining(), "x");
        cursor.set_position(0);
        assert_eq!(cursor.remaining(), "  )x");
    }
}
