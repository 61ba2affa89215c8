use crate::evaluator::EvalError;

/// Which evaluation stack a [`Stack`] is; selects the overflow and
/// underflow errors it reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackKind {
    Operator,
    Value,
}

impl StackKind {
    fn overflow(self) -> EvalError {
        match self {
            StackKind::Operator => EvalError::OpStackOverflow,
            StackKind::Value => EvalError::ValStackOverflow,
        }
    }

    fn underflow(self) -> EvalError {
        match self {
            StackKind::Operator => EvalError::OpStackUnderflow,
            StackKind::Value => EvalError::ValStackUnderflow,
        }
    }
}

/// A bounded stack.
///
/// Pushing beyond the maximum size is a recoverable error, not a panic.
///
/// # Examples
///
/// ```
/// use remexpr_core::vm::{Stack, StackKind};
///
/// let mut stack = Stack::new(2, StackKind::Value);
/// stack.push(42).unwrap();
/// stack.push(17).unwrap();
/// assert!(stack.push(1).is_err());
/// assert_eq!(stack.pop(), Ok(17));
/// assert_eq!(stack.peek(), Some(&42));
/// ```
#[derive(Debug)]
pub struct Stack<T> {
    items: Vec<T>,
    max_size: usize,
    kind: StackKind,
}

impl<T> Stack<T> {
    pub fn new(max_size: usize, kind: StackKind) -> Self {
        // Most expressions stay shallow; avoid reserving the full capacity.
        let initial_capacity = max_size.min(32);

        Self {
            items: Vec::with_capacity(initial_capacity),
            max_size,
            kind,
        }
    }

    #[inline]
    pub fn push(&mut self, value: T) -> Result<(), EvalError> {
        if self.items.len() >= self.max_size {
            return Err(self.kind.overflow());
        }
        self.items.push(value);
        Ok(())
    }

    #[inline]
    pub fn pop(&mut self) -> Result<T, EvalError> {
        self.items.pop().ok_or_else(|| self.kind.underflow())
    }

    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    #[inline]
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Drop everything above depth `len`.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Remove the top `n` elements, returned bottom to top.
    pub fn pop_n(&mut self, n: usize) -> Result<impl Iterator<Item = T> + '_, EvalError> {
        let len = self.items.len();
        if n > len {
            return Err(self.kind.underflow());
        }
        Ok(self.items.drain(len - n..))
    }

    /// Iterate from bottom to top.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}
