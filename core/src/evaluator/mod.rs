//! Two-stack precedence evaluator for remexpr expressions.
//!
//! The evaluator reads tokens from a [`Cursor`](crate::lexer::Cursor) and
//! keeps an operator stack and a value stack. Operators are applied as soon
//! as a following operator of lower or equal precedence (or the end of the
//! expression) is seen, so equal precedences associate to the left.
//!
//! ## Design Principles
//!
//! - **Never panic**: All adversarial inputs must be handled gracefully
//! - **Bounded**: Both stacks have a fixed capacity and nesting depth is
//!   counted, so deep input fails with an error instead of overflowing
//! - **Clean failure**: A failed evaluation leaves both stacks exactly as
//!   they were before it started
//!
//! ## Example
//!
//! ```
//! use remexpr_core::api::{EvaluatorOptions, Settings};
//! use remexpr_core::env::SymbolTable;
//! use remexpr_core::evaluator::{Evaluator, ParseContext};
//! use remexpr_core::lexer::Cursor;
//! use remexpr_core::values::Value;
//!
//! let mut symbols = SymbolTable::new(Settings::default());
//! let mut evaluator = Evaluator::new(EvaluatorOptions::default(), &mut symbols);
//!
//! let mut cursor = Cursor::new("1 + 2, rest");
//! let value = evaluator.eval_expr(&mut cursor, &mut ParseContext::default()).unwrap();
//! assert_eq!(value, Value::Int(3));
//! assert_eq!(cursor.remaining(), ", rest");
//! ```

mod error;
mod eval;
mod operators;


pub use error::{ErrorCategory, EvalError};
pub use eval::{Evaluator, ParseContext};

use crate::api::EvaluatorOptions;
use crate::env::Environment;
use crate::lexer::Cursor;
use crate::values::Value;

/// Evaluate `source` as one expression with a fresh evaluator.
///
/// Text after the expression is left unread; use
/// [`Engine::eval`](crate::api::Engine::eval) to reject it.
pub fn eval(env: &mut dyn Environment, source: &str) -> Result<Value, EvalError> {
    eval_with_options(env, source, EvaluatorOptions::default())
}

/// Like [`eval`], with explicit limits.
pub fn eval_with_options(
    env: &mut dyn Environment,
    source: &str,
    options: EvaluatorOptions,
) -> Result<Value, EvalError> {
    let mut evaluator = Evaluator::new(options, env);
    let mut cursor = Cursor::new(source);
    evaluator.eval_expr(&mut cursor, &mut ParseContext::default())
}
