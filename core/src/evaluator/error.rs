//! Evaluation errors.
//!
//! Every failure of the tokenizer, the literal parser, the evaluator, the
//! coercion engine, the operators and the builtin functions is reported as
//! an [`EvalError`]. Errors are values: nothing in the evaluator panics on
//! adversarial input.
//!
//! # Error Categories
//!
//! - **Resource**: allocation failure, stack overflow, nesting too deep.
//!   The engine reports these as `Error::ResourceExceeded`.
//! - **Lexical**, **Syntax**, **Literal**: malformed source text.
//! - **Type**, **Arithmetic**, **Lookup**: the expression is well-formed
//!   but cannot be evaluated.
//! - **Machine**: internal consistency checks of the evaluation stacks.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Resource,
    Lexical,
    Syntax,
    Type,
    Arithmetic,
    Literal,
    Machine,
    Lookup,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Out of memory")]
    OutOfMemory,

    #[error("Illegal character `{0}'")]
    IllegalChar(char),

    #[error("Missing quote")]
    MissingQuote,

    #[error("Expecting binary operator")]
    ExpectingBinaryOp,

    #[error("Expecting comma")]
    ExpectComma,

    #[error("Missing ')'")]
    MissingRightParen,

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Expecting end of expression")]
    ExpectingEnd,

    #[error("Type mismatch")]
    BadType,

    #[error("Can't coerce")]
    CantCoerce,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Number too high")]
    TooHigh,

    #[error("Number too low")]
    TooLow,

    #[error("Date overflow")]
    DateOverflow,

    #[error("String too long")]
    StringTooLong,

    #[error("Ill-formed number")]
    BadNumber,

    #[error("Bad date specification")]
    BadDate,

    #[error("Bad time specification")]
    BadTime,

    #[error("Operator stack overflow")]
    OpStackOverflow,

    #[error("Operator stack underflow")]
    OpStackUnderflow,

    #[error("Value stack overflow")]
    ValStackOverflow,

    #[error("Value stack underflow")]
    ValStackUnderflow,

    #[error("Expression stack error")]
    StackError,

    #[error("Expression nested too deeply: depth {depth} exceeds maximum of {max_depth}")]
    NestingTooDeep { depth: usize, max_depth: usize },

    #[error("Too few arguments")]
    TooFewArgs,

    #[error("Too many arguments")]
    TooManyArgs,

    #[error("Domain error")]
    Domain,

    #[error("Undefined function: `{0}'")]
    UndefinedFunction(String),

    #[error("Undefined variable: `{0}'")]
    UndefinedVariable(String),

    #[error("Undefined system variable: `${0}'")]
    UndefinedSysVar(String),

    #[error("System variable `${0}' is read-only")]
    ReadOnlySysVar(String),

    #[error("Recursive function call: `{0}'")]
    RecursiveCall(String),
}

impl EvalError {
    pub fn category(&self) -> ErrorCategory {
        use EvalError::*;
        match self {
            OutOfMemory | OpStackOverflow | ValStackOverflow | NestingTooDeep { .. } => {
                ErrorCategory::Resource
            }
            IllegalChar(_) | MissingQuote => ErrorCategory::Lexical,
            ExpectingBinaryOp | ExpectComma | MissingRightParen | UnexpectedEnd
            | ExpectingEnd => ErrorCategory::Syntax,
            BadType | CantCoerce | TooFewArgs | TooManyArgs => ErrorCategory::Type,
            DivisionByZero | TooHigh | TooLow | DateOverflow | StringTooLong | Domain => {
                ErrorCategory::Arithmetic
            }
            BadNumber | BadDate | BadTime => ErrorCategory::Literal,
            OpStackUnderflow | ValStackUnderflow | StackError => ErrorCategory::Machine,
            UndefinedFunction(_) | UndefinedVariable(_) | UndefinedSysVar(_)
            | ReadOnlySysVar(_) | RecursiveCall(_) => ErrorCategory::Lookup,
        }
    }

    /// Stable identifier of the error kind, for documentation lookup.
    pub fn code(&self) -> &'static str {
        use EvalError::*;
        match self {
            OutOfMemory => "E001",
            IllegalChar(_) => "E002",
            MissingQuote => "E003",
            ExpectingBinaryOp => "E004",
            ExpectComma => "E005",
            MissingRightParen => "E006",
            UnexpectedEnd => "E007",
            ExpectingEnd => "E008",
            BadType => "E009",
            CantCoerce => "E010",
            DivisionByZero => "E011",
            TooHigh => "E012",
            TooLow => "E013",
            DateOverflow => "E014",
            StringTooLong => "E015",
            BadNumber => "E016",
            BadDate => "E017",
            BadTime => "E018",
            OpStackOverflow => "E019",
            OpStackUnderflow => "E020",
            ValStackOverflow => "E021",
            ValStackUnderflow => "E022",
            StackError => "E023",
            NestingTooDeep { .. } => "E024",
            TooFewArgs => "E025",
            TooManyArgs => "E026",
            Domain => "E027",
            UndefinedFunction(_) => "E028",
            UndefinedVariable(_) => "E029",
            UndefinedSysVar(_) => "E030",
            ReadOnlySysVar(_) => "E031",
            RecursiveCall(_) => "E032",
        }
    }

    pub fn is_resource_exhaustion(&self) -> bool {
        self.category() == ErrorCategory::Resource
    }
}
