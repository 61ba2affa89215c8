//! Shared setup for the integration tests.
//!
//! Every engine runs against a frozen clock: Friday 2024-03-15, 10:15.

#![allow(dead_code)]

use remexpr::{Clock, Engine, EngineOptions};

pub const TODAY: i64 = 12492;
pub const NOW: i64 = 10 * 60 + 15;

pub fn engine() -> Engine {
    engine_with(EngineOptions::default())
}

pub fn engine_with(options: EngineOptions) -> Engine {
    Engine::new(options).with_clock(Clock::Fixed {
        date: TODAY,
        minutes: NOW,
    })
}

/// Define a test that evaluates `input` and checks the outcome.
///
/// ```ignore
/// test_case!(name, input: "1 + 2", value: Value::Int(3));
/// test_case!(name, input: "'2024-01-31' + 1", printed: "2024-02-01");
/// test_case!(name, input: "1 / 0", error: EvalError::DivisionByZero);
/// test_case!(name, defs: ["x = 2"], input: "x * x", value: Value::Int(4));
/// ```
macro_rules! test_case {
    (
        $name:ident,
        $(defs: [$($def:expr),* $(,)?],)?
        input: $input:expr,
        $kind:ident: $expected:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            let mut engine = crate::cases::engine();
            $($(
                engine
                    .define($def)
                    .unwrap_or_else(|e| panic!("definition {:?} failed: {}", $def, e));
            )*)?
            let result = engine.eval($input);
            expect!(result, $input, $kind: $expected);
        }
    };
}

macro_rules! expect {
    ($result:expr, $input:expr, value: $expected:expr) => {
        match $result {
            Ok(value) => pretty_assertions::assert_eq!(value, $expected, "input: {}", $input),
            Err(e) => panic!("input: {}: unexpected error: {}", $input, e),
        }
    };
    ($result:expr, $input:expr, printed: $expected:expr) => {
        match $result {
            Ok(value) => pretty_assertions::assert_eq!(value.to_string(), $expected, "input: {}", $input),
            Err(e) => panic!("input: {}: unexpected error: {}", $input, e),
        }
    };
    ($result:expr, $input:expr, error: $expected:expr) => {
        match $result {
            Ok(value) => panic!("input: {}: expected an error, got {}", $input, value),
            Err(e) => pretty_assertions::assert_eq!(e.eval_error(), Some(&$expected), "input: {}", $input),
        }
    };
}
