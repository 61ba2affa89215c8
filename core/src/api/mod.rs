//! Public API for the remexpr expression language.
//!
//! [`Engine`] is the entry point: it owns a symbol table, evaluates whole
//! expressions, processes definitions and turns internal errors into
//! [`Error`] values that carry a [`Diagnostic`] pointing into the source.
//!
//! # Example
//!
//! ```
//! use remexpr_core::api::{Engine, EngineOptions, Error};
//!
//! let mut engine = Engine::new(EngineOptions::default());
//! engine.define("limit = 10").unwrap();
//! assert_eq!(engine.eval("limit * 3").unwrap().to_string(), "30");
//!
//! match engine.eval("limit / 0") {
//!     Err(Error::Runtime { diagnostic, .. }) => {
//!         assert_eq!(diagnostic.message, "Division by zero");
//!         assert_eq!(diagnostic.span.start, 6);
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

pub mod engine;
pub mod error;
pub mod options;

pub use engine::Engine;
pub use error::{Diagnostic, Error, Severity};
pub use options::{EngineOptions, EvaluatorOptions, Settings};
