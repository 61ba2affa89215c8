//! The evaluation environment.
//!
//! The evaluator never owns variables, system variables or user functions;
//! it reaches them through the [`Environment`] trait. [`SymbolTable`] is the
//! default implementation.

mod definition;
mod symbols;
mod sysvar;

pub use definition::{Definition, DefinitionError, parse_definition};
pub use symbols::{Clock, MAX_NAME_LEN, SymbolTable};
pub use sysvar::{
    DATE_SEPARATORS, DATETIME_SEPARATORS, SYSTEM_VARIABLES, SysVar, TIME_SEPARATORS, find_sys_var,
    parse_separator,
};

use std::rc::Rc;

use crate::api::Settings;
use crate::evaluator::EvalError;
use crate::values::Value;

/// A function defined in the expression language: `name(p1, p2) = body`.
///
/// The body is kept as source text and evaluated at each call with the
/// parameters bound as local variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFunction {
    pub name: String,
    pub params: Vec<String>,
    pub body: String,
}

/// Services the evaluator needs from its host.
pub trait Environment {
    fn settings(&self) -> &Settings;

    fn get_var(&self, name: &str) -> Result<Value, EvalError>;

    fn set_var(&mut self, name: &str, value: Value) -> Result<(), EvalError>;

    /// Read a system variable; `name` has no leading `$`.
    fn get_sys_var(&self, name: &str) -> Result<Value, EvalError>;

    fn set_sys_var(&mut self, name: &str, value: Value) -> Result<(), EvalError>;

    fn user_function(&self, name: &str) -> Option<Rc<UserFunction>>;

    /// Current date as a Julian day.
    fn today(&self) -> i64;

    /// Current time of day in minutes since midnight.
    fn now(&self) -> i64;
}
