//! The remexpr evaluation engine.

use std::io::Write;

use tracing::debug;

use super::{EngineOptions, Error};
use crate::env::{Clock, Definition, Environment, SymbolTable, parse_definition};
use crate::evaluator::{EvalError, Evaluator, ParseContext};
use crate::lexer::{Cursor, Span};
use crate::values::Value;

/// The remexpr evaluation engine.
///
/// The engine owns:
/// - A symbol table (variables, system-variable settings, user functions)
/// - Runtime configuration (EngineOptions)
///
/// Every call to [`Engine::eval`] uses a fresh evaluator, so a failed
/// evaluation never leaves state behind.
///
/// # Example
///
/// ```
/// use remexpr_core::api::{Engine, EngineOptions};
/// use remexpr_core::values::Value;
///
/// let mut engine = Engine::new(EngineOptions::default());
/// engine.define("sq(x) = x * x").unwrap();
/// engine.define("base = 3").unwrap();
/// assert_eq!(engine.eval("sq(base) + 1").unwrap(), Value::Int(10));
/// ```
pub struct Engine {
    symbols: SymbolTable,
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            symbols: SymbolTable::new(options.settings.clone()),
            options,
        }
    }

    /// Freeze the clock behind `today()`, `now()` and `$Today`.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.symbols.set_clock(clock);
        self
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    /// Evaluate `source` as a single expression. Text after the expression
    /// is an error.
    pub fn eval(&mut self, source: &str) -> Result<Value, Error> {
        self.run(source, None).map(|(value, _)| value)
    }

    /// Like [`Engine::eval`], also reporting whether the result depends on
    /// anything but the source text (the clock, system variables).
    pub fn eval_with_context(&mut self, source: &str) -> Result<(Value, ParseContext), Error> {
        self.run(source, None)
    }

    /// Evaluate `source`, writing the debug trace to `writer`.
    pub fn eval_traced(&mut self, source: &str, writer: &mut dyn Write) -> Result<Value, Error> {
        self.run(source, Some(writer)).map(|(value, _)| value)
    }

    /// Process a definition: `NAME=EXPR`, `$SYSVAR=EXPR` or
    /// `name(a, b)=EXPR`.
    ///
    /// Variable and system-variable definitions evaluate `EXPR` immediately;
    /// function bodies are stored as text and evaluated at each call.
    pub fn define(&mut self, text: &str) -> Result<(), Error> {
        match parse_definition(text)? {
            Definition::Variable { name, expr } => {
                let value = self.eval(expr)?;
                self.symbols
                    .set_var(name, value)
                    .map_err(|err| Error::from_eval(err, text, Span::new(0, text.len())))
            }
            Definition::SystemVariable { name, expr } => {
                let value = self.eval(expr)?;
                self.symbols
                    .set_sys_var(name, value)
                    .map_err(|err| Error::from_eval(err, text, Span::new(0, name.len() + 1)))
            }
            Definition::Function(function) => {
                self.symbols.define_function(function);
                Ok(())
            }
        }
    }

    /// Set a variable directly, without evaluating anything.
    pub fn set_var(&mut self, name: &str, value: impl Into<Value>) {
        // The symbol table accepts every value.
        let _ = self.symbols.set_var(name, value.into());
    }

    fn run(
        &mut self,
        source: &str,
        trace: Option<&mut dyn Write>,
    ) -> Result<(Value, ParseContext), Error> {
        let mut evaluator = Evaluator::new(self.options.evaluator.clone(), &mut self.symbols);
        if let Some(writer) = trace {
            evaluator = evaluator.with_trace(writer);
        }

        let mut cursor = Cursor::new(source);
        let mut ctx = ParseContext::default();
        let value = match evaluator.eval_expr(&mut cursor, &mut ctx) {
            Ok(value) => value,
            Err(err) => {
                let span = evaluator.error_span().unwrap_or_default();
                debug!(error = %err, start = span.start, end = span.end, "evaluation failed");
                return Err(Error::from_eval(err, source, span));
            }
        };

        cursor.skip_whitespace();
        if !cursor.is_at_end() {
            let span = Span::new(cursor.position(), source.len());
            return Err(Error::from_eval(EvalError::ExpectingEnd, source, span));
        }
        Ok((value, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Settings;
    use pretty_assertions::assert_eq;

    fn engine() -> Engine {
        Engine::new(EngineOptions::default()).with_clock(Clock::Fixed {
            date: 12492,
            minutes: 615,
        })
    }

    #[test]
    fn test_eval() {
        let mut engine = engine();
        assert_eq!(engine.eval("2 + 3 * 4").unwrap(), Value::Int(14));
        assert_eq!(engine.eval("  7  ").unwrap(), Value::Int(7));
    }

    #[test]
    fn test_trailing_text_is_rejected() {
        let mut engine = engine();
        for source in ["1 + 2, 3", "1)", "1 ] x"] {
            let err = engine.eval(source).unwrap_err();
            assert_eq!(err.eval_error(), Some(&EvalError::ExpectingEnd), "{source}");
        }
        let err = engine.eval("1 + 2, 3").unwrap_err();
        assert_eq!(err.diagnostic().unwrap().span, Span::new(5, 8));
    }

    #[test]
    fn test_error_kinds() {
        let mut engine = engine();
        assert!(matches!(engine.eval("1 +"), Err(Error::Syntax { .. })));
        assert!(matches!(engine.eval("1 / 0"), Err(Error::Runtime { .. })));

        engine.options.evaluator.max_depth = 3;
        assert!(matches!(
            engine.eval("((((1))))"),
            Err(Error::ResourceExceeded { .. })
        ));
    }

    #[test]
    fn test_define_variable() {
        let mut engine = engine();
        engine.define("total = 1 + 2").unwrap();
        assert_eq!(engine.eval("total * 2").unwrap(), Value::Int(6));

        engine.set_var("name", "Ann");
        assert_eq!(engine.eval("\"Hi \" + name").unwrap(), Value::from("Hi Ann"));
    }

    #[test]
    fn test_define_system_variable() {
        let mut engine = engine();
        engine.define("$DateSep = \"/\"").unwrap();
        assert_eq!(engine.symbols().settings().date_sep, '/');
        assert_eq!(
            engine.eval("coerce(\"string\", '2024-03-15')").unwrap(),
            Value::from("2024/03/15")
        );

        let err = engine.define("$Today = 1").unwrap_err();
        assert_eq!(
            err.eval_error(),
            Some(&EvalError::ReadOnlySysVar("Today".into()))
        );
    }

    #[test]
    fn test_define_function() {
        let mut engine = engine();
        engine.define("add3(a, b, c) = a + b + c").unwrap();
        assert_eq!(engine.eval("add3(1, 2, 3)").unwrap(), Value::Int(6));
    }

    #[test]
    fn test_define_errors() {
        let mut engine = engine();
        assert!(matches!(engine.define("no equals"), Err(Error::Api(_))));
        assert!(matches!(engine.define("f(x, x) = x"), Err(Error::Api(_))));
        assert!(matches!(engine.define("x = 1 +"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_eval_with_context() {
        let mut engine = engine();
        let (_, ctx) = engine.eval_with_context("1 + 1").unwrap();
        assert!(!ctx.nonconst_expr);
        let (value, ctx) = engine.eval_with_context("today() + 1").unwrap();
        assert_eq!(value, Value::Date(12493));
        assert!(ctx.nonconst_expr);
    }

    #[test]
    fn test_eval_traced() {
        let mut engine = engine();
        let mut out = Vec::new();
        let value = engine.eval_traced("1 + 2", &mut out).unwrap();
        assert_eq!(value, Value::Int(3));
        assert_eq!(String::from_utf8(out).unwrap(), "1 + 2 => 3\n");
    }

    #[test]
    fn test_settings_come_from_options() {
        let options = EngineOptions {
            settings: Settings {
                time_sep: '.',
                ..Settings::default()
            },
            ..EngineOptions::default()
        };
        let mut engine = Engine::new(options);
        assert_eq!(engine.eval("coerce(\"string\", 10:30)").unwrap(), Value::from("10.30"));
    }
}
