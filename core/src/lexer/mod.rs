//! Tokenization of expression text.

mod buffer;
mod tokenizer;

pub use buffer::TokenBuffer;
pub use tokenizer::{COMMA, Cursor, END_OF_EXPR, is_ident_char, is_space, next_token};

use crate::evaluator::EvalError;

/// Byte range of a token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both.
    pub fn join(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<Span> for core::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// The current token and where it came from.
///
/// The lexer owns cursor bookkeeping: it remembers where the current token
/// started so a caller can put a terminating delimiter back.
#[derive(Debug, Default)]
pub struct Lexer {
    buf: TokenBuffer,
    span: Span,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the next token from `cursor`.
    ///
    /// On failure the buffer is empty and [`Lexer::span`] covers the text
    /// consumed by the failed token.
    pub fn advance(&mut self, cursor: &mut Cursor<'_>, time_sep: char) -> Result<(), EvalError> {
        cursor.skip_whitespace();
        let start = cursor.position();
        let result = next_token(cursor, &mut self.buf, time_sep);
        let consumed = cursor.source()[start..cursor.position()].trim_end_matches(is_space);
        self.span = Span::new(start, start + consumed.len().max(1));
        if result.is_err() {
            self.buf.clear();
        }
        result
    }

    pub fn token(&self) -> &str {
        self.buf.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn first(&self) -> Option<char> {
        self.buf.first()
    }

    pub fn last(&self) -> Option<char> {
        self.buf.last()
    }

    pub fn token_start(&self) -> usize {
        self.span.start
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Turn a function-call token `name(` into `name`.
    pub fn strip_call_paren(&mut self) -> bool {
        if self.buf.last() == Some('(') {
            self.buf.pop();
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// If a token is pending, move `cursor` back to its start so the token
    /// can be read again, and forget it.
    pub fn unread(&mut self, cursor: &mut Cursor<'_>) {
        if !self.buf.is_empty() {
            cursor.set_position(self.span.start);
            self.buf.clear();
        }
    }
}
