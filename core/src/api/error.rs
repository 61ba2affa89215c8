//! Public error types for the remexpr API.
//!
//! This module defines the stable error types exposed to library users.
//! Internal [`EvalError`]s are converted to these public types at the
//! [`Engine`](super::Engine) boundary, where the source text and the span of
//! the offending token are still known.

use core::fmt;

use crate::env::DefinitionError;
use crate::evaluator::{ErrorCategory, EvalError};
use crate::lexer::Span;

/// Public error type for all remexpr operations.
#[derive(Debug)]
pub enum Error {
    /// Invalid API usage, such as a malformed definition.
    Api(String),

    /// The source text is not a well-formed expression (lexical, syntax and
    /// literal errors).
    Syntax {
        error: EvalError,
        diagnostic: Diagnostic,
        source: String,
    },

    /// The expression is well-formed but could not be evaluated.
    Runtime {
        error: EvalError,
        diagnostic: Diagnostic,
        source: String,
    },

    /// A resource limit was hit: stack capacity, nesting depth or memory.
    ResourceExceeded {
        error: EvalError,
        diagnostic: Diagnostic,
        source: String,
    },
}

impl Error {
    /// Wrap an evaluation failure of `source`. `span` is clamped to the
    /// source text.
    pub fn from_eval(error: EvalError, source: &str, span: Span) -> Self {
        let len = source.len();
        let span = Span::new(span.start.min(len), span.end.min(len));
        let diagnostic = Diagnostic::from_eval(&error, span);
        let source = source.to_string();
        match error.category() {
            ErrorCategory::Resource => Error::ResourceExceeded {
                error,
                diagnostic,
                source,
            },
            ErrorCategory::Lexical | ErrorCategory::Syntax | ErrorCategory::Literal => {
                Error::Syntax {
                    error,
                    diagnostic,
                    source,
                }
            }
            _ => Error::Runtime {
                error,
                diagnostic,
                source,
            },
        }
    }

    /// The underlying evaluation error, if any.
    pub fn eval_error(&self) -> Option<&EvalError> {
        match self {
            Error::Api(_) => None,
            Error::Syntax { error, .. }
            | Error::Runtime { error, .. }
            | Error::ResourceExceeded { error, .. } => Some(error),
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Error::Api(_) => None,
            Error::Syntax { diagnostic, .. }
            | Error::Runtime { diagnostic, .. }
            | Error::ResourceExceeded { diagnostic, .. } => Some(diagnostic),
        }
    }

    /// The text the error points into.
    pub fn source_text(&self) -> Option<&str> {
        match self {
            Error::Api(_) => None,
            Error::Syntax { source, .. }
            | Error::Runtime { source, .. }
            | Error::ResourceExceeded { source, .. } => Some(source),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Api(msg) => write!(f, "API error: {}", msg),
            Error::Syntax { error, .. } => write!(f, "Syntax error: {}", error),
            Error::Runtime { error, .. } => write!(f, "Runtime error: {}", error),
            Error::ResourceExceeded { error, .. } => {
                write!(f, "Resource limit exceeded: {}", error)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.eval_error()
            .map(|error| error as &(dyn std::error::Error + 'static))
    }
}

impl From<DefinitionError> for Error {
    fn from(err: DefinitionError) -> Self {
        Error::Api(err.to_string())
    }
}

/// A diagnostic message with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Byte range of the offending token in the source.
    pub span: Span,

    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,

    /// Error code (e.g., "E011") for documentation lookup.
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn from_eval(error: &EvalError, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            message: error.to_string(),
            span,
            help: help_for(error).map(String::from),
            code: Some(error.code().to_string()),
        }
    }
}

fn help_for(error: &EvalError) -> Option<&'static str> {
    use EvalError::*;
    Some(match error {
        MissingQuote => "close the literal with the same quote that opened it",
        MissingRightParen => "add the missing `)`",
        ExpectingBinaryOp => "two values must be joined by an operator such as `+` or `==`",
        ExpectComma => "separate function arguments with `,`",
        ExpectingEnd => "remove the text after the expression",
        BadDate => "dates are written 'YYYY-MM-DD' or 'YYYY-MM-DD@HH:MM'",
        BadTime => "times are written HH:MM, optionally followed by am or pm",
        NestingTooDeep { .. } => "simplify the expression or raise the nesting limit",
        StringTooLong => "raise $MaxStringLen, or set it to 0 to disable the limit",
        _ => return None,
    })
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - evaluation cannot succeed.
    Error,
    /// Warning - suspicious code that might be wrong.
    Warning,
    /// Info - informational message.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}
