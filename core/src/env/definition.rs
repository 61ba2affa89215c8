//! Parsing of `NAME=EXPR` definitions.
//!
//! Three forms are accepted:
//!
//! - `total=1+2` assigns a variable,
//! - `$DateSep="/"` assigns a system variable,
//! - `sq(x)=x*x` defines a user function.
//!
//! Only the left-hand side is parsed here; the right-hand side is returned
//! as text for the caller to evaluate (or store, for functions).

use thiserror::Error;

use super::UserFunction;
use crate::lexer::is_ident_char;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition<'a> {
    Variable { name: &'a str, expr: &'a str },
    SystemVariable { name: &'a str, expr: &'a str },
    Function(UserFunction),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("Missing `=' in definition")]
    MissingEquals,

    #[error("Invalid name: `{0}'")]
    BadName(String),

    #[error("Invalid parameter list for `{0}'")]
    BadParameterList(String),

    #[error("Duplicate parameter `{0}'")]
    DuplicateParameter(String),

    #[error("Missing expression after `='")]
    EmptyBody,
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(is_ident_char)
}

pub fn parse_definition(text: &str) -> Result<Definition<'_>, DefinitionError> {
    let (lhs, rhs) = text.split_once('=').ok_or(DefinitionError::MissingEquals)?;
    let lhs = lhs.trim();
    let expr = rhs.trim();
    if expr.is_empty() {
        return Err(DefinitionError::EmptyBody);
    }

    if let Some(name) = lhs.strip_prefix('$') {
        if !is_identifier(name) {
            return Err(DefinitionError::BadName(lhs.to_string()));
        }
        return Ok(Definition::SystemVariable { name, expr });
    }

    let Some((name, params)) = lhs.split_once('(') else {
        if !is_identifier(lhs) {
            return Err(DefinitionError::BadName(lhs.to_string()));
        }
        return Ok(Definition::Variable { name: lhs, expr });
    };

    let name = name.trim_end();
    if !is_identifier(name) {
        return Err(DefinitionError::BadName(name.to_string()));
    }
    let params = params
        .strip_suffix(')')
        .ok_or_else(|| DefinitionError::BadParameterList(name.to_string()))?
        .trim();

    let mut names: Vec<String> = Vec::new();
    if !params.is_empty() {
        for param in params.split(',').map(str::trim) {
            if !is_identifier(param) {
                return Err(DefinitionError::BadParameterList(name.to_string()));
            }
            if names.iter().any(|p| p.eq_ignore_ascii_case(param)) {
                return Err(DefinitionError::DuplicateParameter(param.to_string()));
            }
            names.push(param.to_string());
        }
    }

    Ok(Definition::Function(UserFunction {
        name: name.to_string(),
        params: names,
        body: expr.to_string(),
    }))
}
