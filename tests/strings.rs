#[macro_use]
mod cases;

use remexpr::{EvalError, Value};

test_case!(
    string_literal,
    input: "\"hello\"",
    value: Value::from("hello"),
);

test_case!(
    empty_string,
    input: "\"\"",
    value: Value::from(""),
);

test_case!(
    escapes_are_translated,
    input: r#""a\tb\nc""#,
    value: Value::from("a\tb\nc"),
);

test_case!(
    unknown_escape_keeps_character,
    input: r#""say \"hi\" \q""#,
    value: Value::from("say \"hi\" q"),
);

test_case!(
    concatenation,
    input: "\"ab\" + \"cd\"",
    value: Value::from("abcd"),
);

test_case!(
    concatenation_with_int,
    input: "\"n=\" + 5",
    value: Value::from("n=5"),
);

test_case!(
    concatenation_int_first,
    input: "5 + \"x\"",
    value: Value::from("5x"),
);

test_case!(
    concatenation_with_date,
    input: "\"due \" + '2024-03-15'",
    value: Value::from("due 2024-03-15"),
);

test_case!(
    concatenation_with_time,
    input: "\"at \" + 9:05",
    value: Value::from("at 09:05"),
);

test_case!(
    concatenation_with_datetime,
    input: "'2024-03-15@18:30' + \"\"",
    value: Value::from("2024-03-15@18:30"),
);

test_case!(
    concatenation_is_left_associative,
    input: "1 + 2 + \"x\"",
    value: Value::from("3x"),
);

test_case!(
    concatenation_within_limit,
    defs: ["$MaxStringLen = 5"],
    input: "\"ab\" + \"cde\"",
    value: Value::from("abcde"),
);

test_case!(
    concatenation_over_limit,
    defs: ["$MaxStringLen = 5"],
    input: "\"abc\" + \"def\"",
    error: EvalError::StringTooLong,
);

test_case!(
    zero_limit_disables_check,
    defs: ["$MaxStringLen = 0", "s = \"0123456789\""],
    input: "s + s + s + s + s + s + s + s",
    value: Value::from("0123456789".repeat(8).as_str()),
);

test_case!(
    subtraction_on_strings,
    input: "\"abc\" - \"c\"",
    error: EvalError::BadType,
);

test_case!(
    unterminated_string,
    input: "\"abc",
    error: EvalError::MissingQuote,
);

test_case!(
    strlen_counts_characters,
    input: "strlen(\"héllo\")",
    value: Value::Int(5),
);

test_case!(
    upper_and_lower,
    input: "upper(\"MiXed\") + lower(\"MiXed\")",
    value: Value::from("MIXEDmixed"),
);

test_case!(
    substr_to_end,
    input: "substr(\"reminder\", 3)",
    value: Value::from("minder"),
);

test_case!(
    substr_inclusive_range,
    input: "substr(\"reminder\", 3, 5)",
    value: Value::from("min"),
);

test_case!(
    index_found,
    input: "index(\"reminder\", \"mind\")",
    value: Value::Int(3),
);

test_case!(
    index_missing,
    input: "index(\"reminder\", \"x\")",
    value: Value::Int(0),
);

test_case!(
    case_insensitive_function_names,
    input: "STRLEN(\"abc\")",
    value: Value::Int(3),
);
