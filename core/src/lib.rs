//! Core of the remexpr expression language.
//!
//! remexpr is the small, dynamically-typed expression language used by
//! reminder files: arithmetic, comparisons, logic, strings, dates, times and
//! datetimes, plus builtin and user-defined function calls.
//!
//! The pipeline is deliberately flat. There is no syntax tree: the
//! [`lexer`] hands tokens straight to the [`evaluator`], which runs a
//! two-stack precedence-climbing algorithm over them and applies operators as
//! soon as precedence allows.
//!
//! ```
//! use remexpr_core::api::{Engine, EngineOptions};
//! use remexpr_core::values::Value;
//!
//! let mut engine = Engine::new(EngineOptions::default());
//! assert_eq!(engine.eval("2 + 3 * 4").unwrap(), Value::Int(14));
//! assert_eq!(engine.eval("'2024-02-28' + 1").unwrap().to_string(), "2024-02-29");
//! ```

pub mod api;
pub mod calendar;
pub mod casting;
pub mod env;
pub mod evaluator;
pub mod lexer;
pub mod literal;
pub mod registry;
pub mod scope_stack;
pub mod stdlib;
pub mod syntax;
pub mod values;
pub mod vm;

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_operator_trace() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
