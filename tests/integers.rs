#[macro_use]
mod cases;

use remexpr::{EvalError, Value};

test_case!(
    simple_int,
    input: "42",
    value: Value::Int(42),
);

test_case!(
    int_with_leading_zeros_spaces,
    input: "  007  ",
    value: Value::Int(7),
);

test_case!(
    precedence,
    input: "2 + 3 * 4",
    value: Value::Int(14),
);

test_case!(
    parentheses,
    input: "(2 + 3) * 4",
    value: Value::Int(20),
);
// Parentheses override precedence

test_case!(
    left_associative_subtraction,
    input: "8 - 3 - 2",
    value: Value::Int(3),
);

test_case!(
    left_associative_division,
    input: "100 / 10 / 5",
    value: Value::Int(2),
);

test_case!(
    truncating_division,
    input: "-7 / 2",
    value: Value::Int(-3),
);
// Division rounds toward zero

test_case!(
    remainder_takes_sign_of_dividend,
    input: "-7 % 3",
    value: Value::Int(-1),
);

test_case!(
    unary_minus_binds_tightest,
    input: "-2 * -3",
    value: Value::Int(6),
);

test_case!(
    double_negation,
    input: "- -5",
    value: Value::Int(5),
);

test_case!(
    unary_plus_is_ignored,
    input: "+5 - +2",
    value: Value::Int(3),
);

test_case!(
    not_operator,
    input: "!0 + !7",
    value: Value::Int(1),
);

test_case!(
    max_int_literal,
    input: "9223372036854775807",
    value: Value::Int(i64::MAX),
);

test_case!(
    min_int_by_subtraction,
    input: "-9223372036854775807 - 1",
    value: Value::Int(i64::MIN),
);

test_case!(
    literal_too_high,
    input: "9223372036854775808",
    error: EvalError::TooHigh,
);

test_case!(
    addition_overflow,
    input: "9223372036854775807 + 1",
    error: EvalError::TooHigh,
);

test_case!(
    multiplication_overflow,
    input: "4611686018427387904 * 2",
    error: EvalError::TooHigh,
);

test_case!(
    negation_overflow,
    input: "-(-9223372036854775807 - 1)",
    error: EvalError::TooHigh,
);

test_case!(
    min_div_minus_one_overflows,
    input: "(-9223372036854775807 - 1) / -1",
    error: EvalError::TooHigh,
);

test_case!(
    min_mod_minus_one_is_zero,
    input: "(-9223372036854775807 - 1) % -1",
    value: Value::Int(0),
);

test_case!(
    division_by_zero,
    input: "1 / 0",
    error: EvalError::DivisionByZero,
);

test_case!(
    modulo_by_zero,
    input: "5 % (3 - 3)",
    error: EvalError::DivisionByZero,
);

test_case!(
    trailing_letters_are_a_bad_number,
    input: "12ab",
    error: EvalError::BadNumber,
);

test_case!(
    arithmetic_on_strings,
    input: "\"a\" * 2",
    error: EvalError::BadType,
);

test_case!(
    negating_a_string,
    input: "-\"a\"",
    error: EvalError::BadType,
);
