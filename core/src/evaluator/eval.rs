//! Core evaluation logic.

use std::fmt;
use std::io::{self, Write};

use tracing::{debug, trace};

use crate::api::{EvaluatorOptions, Settings};
use crate::env::{Environment, UserFunction};
use crate::evaluator::EvalError;
use crate::evaluator::operators::{apply_binary, apply_unary};
use crate::lexer::{COMMA, Cursor, END_OF_EXPR, Lexer, Span, is_ident_char};
use crate::literal::{Literal, parse_literal};
use crate::registry::{Args, Arity, BuiltinFunction, Operator, find_binary, find_builtin, find_unary};
use crate::scope_stack::{Frame, ScopeStack};
use crate::values::Value;
use crate::vm::{Stack, StackKind};

/// Facts collected while parsing one expression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseContext {
    /// Set when the expression read a system variable or called a builtin
    /// that is not constant, so its value cannot be cached.
    pub nonconst_expr: bool,
}

/// An operator waiting on the operator stack, with the span of its token.
#[derive(Debug, Clone, Copy)]
struct PendingOp {
    op: &'static Operator,
    span: Span,
}

type TraceSink<'env> = Option<Box<dyn Write + 'env>>;

/// Remaining stack below which a nesting level runs on a fresh segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each stack segment added for deep nesting.
const STACK_GROW_SIZE: usize = 1024 * 1024;

/// Two-stack evaluator for expression text.
///
/// One `Evaluator` owns its operator and value stacks; nothing is shared
/// between evaluators. Tokens are read from a [`Cursor`] and applied as soon
/// as operator precedence allows; there is no intermediate tree.
pub struct Evaluator<'env> {
    options: EvaluatorOptions,
    env: &'env mut dyn Environment,
    ops: Stack<PendingOp>,
    vals: Stack<Value>,
    lexer: Lexer,
    /// Parameters of the user functions being called.
    locals: ScopeStack<Value>,
    /// Lower-case names of the user functions being called, outermost first.
    active: Vec<String>,
    depth: usize,
    error_span: Option<Span>,
    trace: TraceSink<'env>,
}

impl<'env> Evaluator<'env> {
    /// Create an evaluator. With `options.debug_trace` set, the trace is
    /// written to stderr until [`Evaluator::with_trace`] redirects it.
    pub fn new(options: EvaluatorOptions, env: &'env mut dyn Environment) -> Self {
        let trace: TraceSink<'env> = if options.debug_trace {
            Some(Box::new(io::stderr()))
        } else {
            None
        };
        Self {
            ops: Stack::new(options.op_stack_size, StackKind::Operator),
            vals: Stack::new(options.val_stack_size, StackKind::Value),
            options,
            env,
            lexer: Lexer::new(),
            locals: ScopeStack::new(),
            active: Vec::new(),
            depth: 0,
            error_span: None,
            trace,
        }
    }

    /// Write the debug trace to `writer`, enabling it.
    pub fn with_trace(mut self, writer: impl Write + 'env) -> Self {
        self.trace = Some(Box::new(writer));
        self
    }

    pub fn env(&self) -> &dyn Environment {
        &*self.env
    }

    /// Current heights of the operator and value stacks.
    pub fn stack_depths(&self) -> (usize, usize) {
        (self.ops.len(), self.vals.len())
    }

    /// Byte span of the token or operator that caused the last failure of
    /// [`Evaluator::eval_expr`].
    pub fn error_span(&self) -> Option<Span> {
        self.error_span
    }

    /// Evaluate one expression starting at `cursor`.
    ///
    /// On success the cursor rests on the delimiter that ended the
    /// expression (`,`, `)` or `]`), or at the end of the input. On failure
    /// both stacks are back at their height on entry.
    pub fn eval_expr(
        &mut self,
        cursor: &mut Cursor<'_>,
        ctx: &mut ParseContext,
    ) -> Result<Value, EvalError> {
        let op_base = self.ops.len();
        let val_base = self.vals.len();
        let frames = self.locals.depth();
        let active = self.active.len();
        self.error_span = None;

        let result = self.evaluate(cursor, ctx);
        if let Err(err) = result {
            debug!(
                error = %err,
                ops = self.ops.len() - op_base,
                vals = self.vals.len() - val_base,
                "Unwinding evaluation stacks"
            );
            if self.error_span.is_none() {
                self.error_span = Some(self.lexer.span());
            }
            self.ops.truncate(op_base);
            self.vals.truncate(val_base);
            self.locals.truncate(frames);
            self.active.truncate(active);
            self.lexer.clear();
            return Err(err);
        }

        self.lexer.unread(cursor);
        let value = self.vals.pop()?;
        self.ops.truncate(op_base);
        self.vals.truncate(val_base);
        Ok(value)
    }

    /// One nesting level: a whole (sub-)expression, leaving its value on
    /// the value stack and its terminating token in the lexer.
    fn evaluate(&mut self, cursor: &mut Cursor<'_>, ctx: &mut ParseContext) -> Result<(), EvalError> {
        if self.depth >= self.options.max_depth {
            return Err(EvalError::NestingTooDeep {
                depth: self.depth,
                max_depth: self.options.max_depth,
            });
        }

        self.depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.evaluate_inner(cursor, ctx)
        });
        self.depth -= 1;

        result
    }

    fn evaluate_inner(
        &mut self,
        cursor: &mut Cursor<'_>,
        ctx: &mut ParseContext,
    ) -> Result<(), EvalError> {
        let op_base = self.ops.len();
        let val_base = self.vals.len();

        loop {
            self.seek_value(cursor, ctx)?;

            // A value is on the stack: expect a binary operator or the end.
            self.advance(cursor)?;
            if self.at_expression_end() {
                while self.ops.len() > op_base {
                    self.apply_top()?;
                }
                if self.vals.len() != val_base + 1 {
                    return Err(EvalError::StackError);
                }
                return Ok(());
            }

            let op = find_binary(self.lexer.token()).ok_or(EvalError::ExpectingBinaryOp)?;
            let span = self.lexer.span();
            self.lexer.clear();

            while self.ops.len() > op_base
                && self
                    .ops
                    .peek()
                    .is_some_and(|pending| pending.op.precedence >= op.precedence)
            {
                self.apply_top()?;
            }
            self.ops.push(PendingOp { op, span })?;
        }
    }

    /// Read tokens until an atomic value has been pushed, stacking any unary
    /// operators met on the way.
    fn seek_value(&mut self, cursor: &mut Cursor<'_>, ctx: &mut ParseContext) -> Result<(), EvalError> {
        loop {
            self.advance(cursor)?;

            let Some(first) = self.lexer.first() else {
                return Err(EvalError::UnexpectedEnd);
            };

            if first == '(' {
                self.evaluate(cursor, ctx)?;
                if self.lexer.first() != Some(')') {
                    self.lexer.clear();
                    return Err(EvalError::MissingRightParen);
                }
                return Ok(());
            }

            if first == '+' && self.lexer.token().len() == 1 {
                continue;
            }

            if self.lexer.last() == Some('(') {
                return self.call(cursor, ctx);
            }

            if let Some(op) = find_unary(self.lexer.token()) {
                let span = self.lexer.span();
                self.lexer.clear();
                self.ops.push(PendingOp { op, span })?;
                continue;
            }

            if !is_ident_char(first) && !matches!(first, '$' | '"' | '\'') {
                return Err(EvalError::IllegalChar(first));
            }

            let value = self.literal_value(ctx)?;
            self.lexer.clear();
            return self.vals.push(value);
        }
    }

    fn advance(&mut self, cursor: &mut Cursor<'_>) -> Result<(), EvalError> {
        let time_sep = self.env.settings().time_sep;
        self.lexer.advance(cursor, time_sep)
    }

    fn at_expression_end(&self) -> bool {
        match self.lexer.first() {
            None => true,
            Some(c) => self.lexer.token().len() == 1 && matches!(c, COMMA | END_OF_EXPR | ')'),
        }
    }

    /// Resolve the current token as a literal, variable or system variable.
    fn literal_value(&mut self, ctx: &mut ParseContext) -> Result<Value, EvalError> {
        let settings = self.env.settings();
        match parse_literal(self.lexer.token(), settings)? {
            Literal::Value(value) => Ok(value),
            Literal::Variable(name) => {
                let value = match self.locals.lookup(name) {
                    Some(local) => local.clone(),
                    None => self.env.get_var(name)?,
                };
                emit(
                    &mut self.trace,
                    format_args!("{} => {}", name, value.printed(self.env.settings()).truncated()),
                );
                Ok(value)
            }
            Literal::SystemVariable(name) => {
                ctx.nonconst_expr = true;
                let value = self.env.get_sys_var(name)?;
                emit(
                    &mut self.trace,
                    format_args!("${} => {}", name, value.printed(self.env.settings()).truncated()),
                );
                Ok(value)
            }
        }
    }

    /// Pop the top operator and apply it to the value stack.
    fn apply_top(&mut self) -> Result<(), EvalError> {
        let pending = self.ops.pop()?;
        let result = self.apply(pending.op);
        if result.is_err() {
            self.error_span = Some(pending.span);
        }
        result
    }

    fn apply(&mut self, op: &'static Operator) -> Result<(), EvalError> {
        match op.arity {
            Arity::Unary => {
                let value = self.vals.peek_mut().ok_or(EvalError::ValStackUnderflow)?;
                if self.trace.is_none() {
                    return apply_unary(op.op, value);
                }
                let before = value.clone();
                let result = apply_unary(op.op, value);
                let settings = self.env.settings();
                let shown = Outcome::new(result.as_ref().map(|_| &*value), settings);
                emit(
                    &mut self.trace,
                    format_args!("{} {} => {}", op, before.printed(settings).truncated(), shown),
                );
                result
            }
            Arity::Binary => {
                let right = self.vals.pop()?;
                let left = self.vals.pop()?;
                let settings = self.env.settings();
                if self.trace.is_none() {
                    let value = apply_binary(op.op, left, right, settings)?;
                    return self.vals.push(value);
                }
                let line = format!(
                    "{} {} {}",
                    left.printed(settings).truncated(),
                    op,
                    right.printed(settings).truncated()
                );
                let result = apply_binary(op.op, left, right, settings);
                emit(
                    &mut self.trace,
                    format_args!("{} => {}", line, Outcome::new(result.as_ref(), settings)),
                );
                self.vals.push(result?)
            }
        }
    }

    /// Evaluate a call whose `name(` token is in the lexer.
    fn call(&mut self, cursor: &mut Cursor<'_>, ctx: &mut ParseContext) -> Result<(), EvalError> {
        self.lexer.strip_call_paren();
        let span = self.lexer.span();
        let name = self.lexer.token().to_string();
        let builtin = find_builtin(&name);
        self.lexer.clear();

        if cursor.peek_non_space() == Some(')') {
            self.invoke(&name, builtin, 0, span, ctx)?;
            // Consume the `)`.
            self.advance(cursor)?;
            self.lexer.clear();
            return Ok(());
        }

        let mut nargs = 0;
        loop {
            nargs += 1;
            self.evaluate(cursor, ctx)?;
            match self.lexer.first() {
                Some(')') => break,
                Some(COMMA) => {}
                _ => {
                    self.lexer.clear();
                    return Err(EvalError::ExpectComma);
                }
            }
        }
        self.lexer.clear();
        self.invoke(&name, builtin, nargs, span, ctx)
    }

    /// Call a builtin or user function on the top `nargs` values.
    fn invoke(
        &mut self,
        name: &str,
        builtin: Option<&'static BuiltinFunction>,
        nargs: usize,
        span: Span,
        ctx: &mut ParseContext,
    ) -> Result<(), EvalError> {
        let result = match builtin {
            Some(function) => {
                if !function.is_constant {
                    ctx.nonconst_expr = true;
                }
                self.call_builtin(function, nargs)
            }
            None => match self.env.user_function(name) {
                Some(function) => self.call_user(&function, nargs, ctx),
                None => Err(EvalError::UndefinedFunction(name.to_string())),
            },
        };
        if result.is_err() {
            self.error_span = Some(span);
        }
        result
    }

    fn call_builtin(&mut self, function: &BuiltinFunction, nargs: usize) -> Result<(), EvalError> {
        let args: Args = self.vals.pop_n(nargs)?.collect();
        let shown = self.trace.is_some().then(|| {
            let settings = self.env.settings();
            args.iter()
                .map(|arg| arg.printed(settings).truncated().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        });

        let result = function.call(&*self.env, args);

        trace!(function = function.name, ok = result.is_ok(), "Builtin call");
        if let Some(shown) = shown {
            let settings = self.env.settings();
            emit(
                &mut self.trace,
                format_args!(
                    "{}({}) => {}",
                    function.name,
                    shown,
                    Outcome::new(result.as_ref(), settings)
                ),
            );
        }
        self.vals.push(result?)
    }

    /// Bind the top `nargs` values to the parameters of `function` and
    /// evaluate its body with this evaluator.
    fn call_user(
        &mut self,
        function: &UserFunction,
        nargs: usize,
        ctx: &mut ParseContext,
    ) -> Result<(), EvalError> {
        if nargs < function.params.len() {
            return Err(EvalError::TooFewArgs);
        }
        if nargs > function.params.len() {
            return Err(EvalError::TooManyArgs);
        }
        let key = function.name.to_ascii_lowercase();
        if self.active.contains(&key) {
            return Err(EvalError::RecursiveCall(function.name.clone()));
        }

        let args: Vec<Value> = self.vals.pop_n(nargs)?.collect();
        let shown = self.trace.is_some().then(|| {
            let settings = self.env.settings();
            args.iter()
                .map(|arg| arg.printed(settings).truncated().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        });
        let frame = Frame::new(function.params.iter().cloned().zip(args));
        self.locals.push(frame);
        self.active.push(key);
        debug!(function = %function.name, depth = self.depth, "Calling user function");

        let mut body = Cursor::new(&function.body);
        let result = self.evaluate(&mut body, ctx).and_then(|()| {
            if self.lexer.is_empty() {
                Ok(())
            } else {
                Err(EvalError::ExpectingEnd)
            }
        });
        self.lexer.clear();

        self.active.pop();
        self.locals.pop().map_err(|_| EvalError::StackError)?;
        // Spans inside the body do not point into the caller's text.
        self.error_span = None;

        if let Some(shown) = shown {
            let settings = self.env.settings();
            let underflow = EvalError::ValStackUnderflow;
            let outcome = match &result {
                Ok(()) => self.vals.peek().ok_or(&underflow),
                Err(err) => Err(err),
            };
            emit(
                &mut self.trace,
                format_args!(
                    "{}({}) => {}",
                    function.name,
                    shown,
                    Outcome::new(outcome, settings)
                ),
            );
        }
        result
    }
}

/// Write one debug-trace line and mirror it as a `tracing` event.
fn emit(trace: &mut TraceSink<'_>, line: fmt::Arguments<'_>) {
    trace!("{}", line);
    if let Some(out) = trace {
        // Trace output is best effort.
        let _ = writeln!(out, "{}", line);
    }
}

/// The right-hand side of a trace line: a value or an error message.
struct Outcome<'a> {
    result: Result<&'a Value, &'a EvalError>,
    settings: &'a Settings,
}

impl<'a> Outcome<'a> {
    fn new(result: Result<&'a Value, &'a EvalError>, settings: &'a Settings) -> Self {
        Self { result, settings }
    }
}

impl fmt::Display for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.result {
            Ok(value) => write!(f, "{}", value.printed(self.settings).truncated()),
            Err(err) => write!(f, "{}", err),
        }
    }
}
