//! REPL input: either an expression or one of the definition commands.
//!
//! ```text
//! set NAME EXPR              define a variable
//! fset NAME(ARGS) EXPR       define a function
//! unset NAME                 remove a variable
//! funset NAME                remove a function
//! ```

#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Eval(&'a str),
    /// Definition text in the `NAME=EXPR` form the engine accepts.
    Define(String),
    Unset(&'a str),
    FunUnset(&'a str),
}

/// Split `word rest` where `word` matches `keyword` case-insensitively.
fn keyword<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    let (word, rest) = input.split_once(char::is_whitespace)?;
    word.eq_ignore_ascii_case(keyword).then(|| rest.trim())
}

fn strip_equals(body: &str) -> &str {
    let body = body.trim_start();
    body.strip_prefix('=').unwrap_or(body).trim()
}

pub fn parse(input: &str) -> Command<'_> {
    let input = input.trim();

    if let Some(rest) = keyword(input, "set") {
        let (name, body) = rest
            .split_once(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or((rest, ""));
        return Command::Define(format!("{}={}", name, strip_equals(body)));
    }

    if let Some(rest) = keyword(input, "fset") {
        return match rest.find(')') {
            Some(close) => {
                let (head, body) = rest.split_at(close + 1);
                Command::Define(format!("{}={}", head.trim(), strip_equals(body)))
            }
            // Let the definition parser report the missing parenthesis.
            None => Command::Define(rest.to_string()),
        };
    }

    if let Some(name) = keyword(input, "unset") {
        return Command::Unset(name);
    }

    if let Some(name) = keyword(input, "funset") {
        return Command::FunUnset(name);
    }

    Command::Eval(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression() {
        assert_eq!(parse("  1 + 2 "), Command::Eval("1 + 2"));
        assert_eq!(parse("settle(1)"), Command::Eval("settle(1)"));
    }

    #[test]
    fn test_set() {
        assert_eq!(parse("set x 1 + 2"), Command::Define("x=1 + 2".into()));
        assert_eq!(parse("SET x = 5"), Command::Define("x=5".into()));
        assert_eq!(parse("set x=5"), Command::Define("x=5".into()));
        assert_eq!(parse("set $DateSep \"/\""), Command::Define("$DateSep=\"/\"".into()));
    }

    #[test]
    fn test_fset() {
        assert_eq!(
            parse("fset sq(x) x * x"),
            Command::Define("sq(x)=x * x".into())
        );
        assert_eq!(
            parse("FSET add(a, b) = a + b"),
            Command::Define("add(a, b)=a + b".into())
        );
        assert_eq!(parse("fset broken x"), Command::Define("broken x".into()));
    }

    #[test]
    fn test_unset() {
        assert_eq!(parse("unset x"), Command::Unset("x"));
        assert_eq!(parse("funset sq"), Command::FunUnset("sq"));
    }
}
