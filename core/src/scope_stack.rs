//! Scope stack for user-function parameters.
//!
//! Each call of a user function pushes one [`Frame`] binding its
//! parameters to the argument values. Names are case-insensitive.
//!
//! Only the innermost frame is searched: a function body sees its own
//! parameters and global variables, never the parameters of its caller.
//! ```text
//! f(x) = g(1) + x
//! g(y) = x + y      // `x` here is the global, not f's parameter
//! ```

use thiserror::Error;

/// Parameter bindings of one function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<T> {
    bindings: Vec<(String, T)>,
}

impl<T> Frame<T> {
    /// Pair names with values, in order.
    pub fn new(bindings: impl IntoIterator<Item = (String, T)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.bindings
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[derive(Debug)]
pub struct ScopeStack<T> {
    frames: Vec<Frame<T>>,
}

impl<T> Default for ScopeStack<T> {
    fn default() -> Self {
        Self { frames: Vec::new() }
    }
}

impl<T> ScopeStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame<T>) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Result<Frame<T>, PopError> {
        self.frames.pop().ok_or(PopError::EmptyStack)
    }

    /// Look up a name in the innermost frame.
    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.frames.last().and_then(|frame| frame.lookup(name))
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Discard frames above `depth`, as after an aborted call.
    pub fn truncate(&mut self, depth: usize) {
        self.frames.truncate(depth);
    }
}

/// Error when trying to pop a scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PopError {
    #[error("Cannot pop from empty scope stack")]
    EmptyStack,
}
