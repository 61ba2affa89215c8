//! remexpr - the expression language of reminder files
//!
//! # Overview
//!
//! remexpr evaluates the small, dynamically-typed expressions found inside
//! reminder definitions: integer arithmetic, comparisons, logic, strings,
//! dates, times and datetimes, with builtin and user-defined functions.
//! Values are one of five kinds (`INT`, `STRING`, `TIME`, `DATE`,
//! `DATETIME`) and operators coerce between them where the combination
//! makes sense.
//!
//! # Quick Start
//!
//! ```
//! use remexpr::{Engine, EngineOptions, Value};
//!
//! let mut engine = Engine::new(EngineOptions::default());
//!
//! // Variables are evaluated once, when defined
//! engine.define("deadline = '2024-04-15'").unwrap();
//!
//! // Function bodies are evaluated at every call
//! engine.define("days_until(d) = deadline - d").unwrap();
//!
//! let left = engine.eval("days_until('2024-03-15')").unwrap();
//! assert_eq!(left, Value::Int(31));
//! ```
//!
//! # Errors
//!
//! Every failure is an [`Error`] carrying a [`Diagnostic`] that points at
//! the offending token. [`render_error`] prints it with the source line.

mod error_renderer;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

// Re-export public API from remexpr_core
pub use remexpr_core::api::{
    Diagnostic, Engine, EngineOptions, Error, EvaluatorOptions, Settings, Severity,
};

// Re-export commonly used types and values
pub use remexpr_core::env::{Clock, SymbolTable};
pub use remexpr_core::values::{self, Value, ValueKind};

// Re-export errors
pub use remexpr_core::evaluator::{ErrorCategory, EvalError};
