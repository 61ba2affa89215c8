//! Bracket depth of a partially typed expression, so the REPL knows when a
//! line needs continuing.

use logos::Logos;

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\n\f\r]+")]
pub enum Token {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    // Double-quoted string; backslash escapes the next character
    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    StringDouble,

    // Single-quoted date literal, taken verbatim
    #[regex(r#"'[^']*'"#)]
    StringSingle,

    #[regex(r#"[^ \t\n\f\r()"']+"#)]
    Other,
}

/// Count unclosed parentheses in `buffer`.
///
/// Returns `None` when the text cannot be tokenized (an unterminated
/// literal), leaving the evaluator to report it.
pub fn calculate_depth(buffer: &str) -> Option<usize> {
    let mut depth: isize = 0;

    for token_res in Token::lexer(buffer) {
        match token_res {
            Ok(Token::LParen) => depth += 1,
            Ok(Token::RParen) => depth -= 1,
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    Some(depth.max(0) as usize)
}

/// Accepts a line once its parentheses balance.
pub struct ExprValidator;

impl reedline::Validator for ExprValidator {
    fn validate(&self, line: &str) -> reedline::ValidationResult {
        match calculate_depth(line) {
            Some(depth) if depth > 0 => reedline::ValidationResult::Incomplete,
            _ => reedline::ValidationResult::Complete,
        }
    }
}
