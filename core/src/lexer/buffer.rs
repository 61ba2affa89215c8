use crate::evaluator::EvalError;

/// Growable buffer holding the text of the current token.
///
/// Appends never abort on allocation failure; they report
/// [`EvalError::OutOfMemory`] instead.
#[derive(Debug, Default)]
pub struct TokenBuffer {
    text: String,
}

impl TokenBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, c: char) -> Result<(), EvalError> {
        self.text
            .try_reserve(c.len_utf8())
            .map_err(|_| EvalError::OutOfMemory)?;
        self.text.push(c);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Remove and return the last character.
    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn first(&self) -> Option<char> {
        self.text.chars().next()
    }

    pub fn last(&self) -> Option<char> {
        self.text.chars().next_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_view() {
        let mut buf = TokenBuffer::new();
        assert!(buf.is_empty());
        buf.push('a').unwrap();
        buf.push('é').unwrap();
        assert_eq!(buf.as_str(), "aé");
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.first(), Some('a'));
        assert_eq!(buf.last(), Some('é'));
    }

    #[test]
    fn test_pop_and_clear() {
        let mut buf = TokenBuffer::new();
        for c in "abs(".chars() {
            buf.push(c).unwrap();
        }
        assert_eq!(buf.pop(), Some('('));
        assert_eq!(buf.as_str(), "abs");
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.pop(), None);
    }
}
