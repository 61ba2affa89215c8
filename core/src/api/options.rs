//! Configuration options for the remexpr engine.

/// Formatting and limit settings shared by literals, coercion and
/// operators.
///
/// Most of these are also reachable from expressions as system variables
/// (`$DateSep`, `$TimeSep`, `$DateTimeSep`, `$MaxStringLen`).
///
/// # Example
///
/// ```
/// use remexpr_core::api::Settings;
///
/// let settings = Settings {
///     date_sep: '/',
///     ..Settings::default()
/// };
/// assert_eq!(settings.time_sep, ':');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Separator used when rendering dates. Default: `-`
    pub date_sep: char,

    /// Separator used when rendering times; also accepted inside time
    /// literals. Default: `:`
    pub time_sep: char,

    /// Separator between the date and time of a rendered datetime.
    /// Default: `@`
    pub datetime_sep: char,

    /// Longest string concatenation may produce, in bytes. Zero disables
    /// the check.
    ///
    /// Default: 65535
    pub max_string_len: usize,
}

impl Settings {
    pub const DEFAULT: Settings = Settings {
        date_sep: '-',
        time_sep: ':',
        datetime_sep: '@',
        max_string_len: 65535,
    };
}

impl Default for Settings {
    fn default() -> Self {
        Settings::DEFAULT
    }
}

/// Resource limits and diagnostics for one evaluator.
///
/// # Example
///
/// ```
/// use remexpr_core::api::EvaluatorOptions;
///
/// let options = EvaluatorOptions {
///     max_depth: 64,
///     ..EvaluatorOptions::default()
/// };
/// assert_eq!(options.val_stack_size, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatorOptions {
    /// Maximum nesting of parentheses, argument lists and user-function
    /// bodies.
    ///
    /// Default: 1000
    pub max_depth: usize,

    /// Capacity of the operator stack. Default: 100
    pub op_stack_size: usize,

    /// Capacity of the value stack. Default: 500
    pub val_stack_size: usize,

    /// Echo every operator and function application to the trace writer.
    ///
    /// Default: false
    pub debug_trace: bool,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            op_stack_size: 100,
            val_stack_size: 500,
            debug_trace: false,
        }
    }
}

/// Configuration options for the remexpr engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Initial settings of the engine's symbol table.
    pub settings: Settings,

    /// Options for every evaluator the engine creates.
    pub evaluator: EvaluatorOptions,
}
