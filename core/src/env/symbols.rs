use std::rc::Rc;

use chrono::{Local, NaiveDateTime};
use hashbrown::HashMap;
use tracing::debug;

use super::sysvar::find_sys_var;
use super::{Environment, UserFunction};
use crate::api::Settings;
use crate::calendar::from_naive;
use crate::evaluator::EvalError;
use crate::values::Value;

/// Significant length of variable and function names. Longer names are
/// truncated, so two names sharing this prefix denote the same symbol.
pub const MAX_NAME_LEN: usize = 64;

/// Source of `today()`, `now()` and `$Today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// The system clock, read in the local time zone.
    #[default]
    System,
    /// A frozen instant, for reproducible evaluation.
    Fixed { date: i64, minutes: i64 },
}

impl Clock {
    /// A clock frozen at a wall-clock date and time.
    pub fn at(datetime: NaiveDateTime) -> Self {
        let (date, minutes) = from_naive(datetime);
        Clock::Fixed { date, minutes }
    }

    /// Current `(julian day, minutes since midnight)`.
    pub fn read(&self) -> (i64, i64) {
        match *self {
            Clock::Fixed { date, minutes } => (date, minutes),
            Clock::System => {
                let (day, minutes) = from_naive(Local::now().naive_local());
                (day.max(0), minutes)
            }
        }
    }
}

/// Default [`Environment`]: variables, user functions, settings and a
/// clock.
///
/// Variable and function names are case-insensitive.
#[derive(Debug, Default)]
pub struct SymbolTable {
    vars: HashMap<String, Value>,
    functions: HashMap<String, Rc<UserFunction>>,
    settings: Settings,
    clock: Clock,
}

/// Canonical spelling of a symbol name.
fn key(name: &str) -> String {
    name.chars()
        .take(MAX_NAME_LEN)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl SymbolTable {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn today(&self) -> i64 {
        self.clock.read().0
    }

    pub fn now(&self) -> i64 {
        self.clock.read().1
    }

    pub fn define_function(&mut self, function: UserFunction) {
        debug!(name = %function.name, params = ?function.params, "defining function");
        self.functions.insert(key(&function.name), Rc::new(function));
    }

    pub fn remove_function(&mut self, name: &str) -> bool {
        self.functions.remove(&key(name)).is_some()
    }

    pub fn remove_var(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(&key(name))
    }

    /// Variable names and values, in no particular order.
    pub fn vars(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn functions(&self) -> impl Iterator<Item = &UserFunction> {
        self.functions.values().map(|f| f.as_ref())
    }
}

impl Environment for SymbolTable {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn get_var(&self, name: &str) -> Result<Value, EvalError> {
        self.vars
            .get(&key(name))
            .cloned()
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))
    }

    fn set_var(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        debug!(name, value = %value, "setting variable");
        self.vars.insert(key(name), value);
        Ok(())
    }

    fn get_sys_var(&self, name: &str) -> Result<Value, EvalError> {
        find_sys_var(name)
            .map(|var| var.get(self))
            .ok_or_else(|| EvalError::UndefinedSysVar(name.to_string()))
    }

    fn set_sys_var(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        let var = find_sys_var(name).ok_or_else(|| EvalError::UndefinedSysVar(name.to_string()))?;
        debug!(name = var.name, value = %value, "setting system variable");
        var.set(&mut self.settings, value)
    }

    fn user_function(&self, name: &str) -> Option<Rc<UserFunction>> {
        self.functions.get(&key(name)).cloned()
    }

    fn today(&self) -> i64 {
        SymbolTable::today(self)
    }

    fn now(&self) -> i64 {
        SymbolTable::now(self)
    }
}
