use crate::error::{CollectionError, Result};

/// Last in, first out.
#[derive(Debug, Clone, Default)]
pub struct Stack<T> {
    storage: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
        }
    }

    /// Adds a new value on top of the stack.
    pub fn push(&mut self, value: T) {
        self.storage.push(value);
    }

    /// Removes the value on top of the stack and returns it.
    pub fn pop(&mut self) -> Result<T> {
        self.storage.pop().ok_or(CollectionError::EmptyStructure)
    }

    /// The value on top of the stack, left where it is.
    pub fn peek(&self) -> Result<&T> {
        self.storage.last().ok_or(CollectionError::EmptyStructure)
    }

    pub fn size(&self) -> usize {
        self.storage.len()
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Throws away everything on the stack.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Exchanges the two topmost values.
    pub fn swap(&mut self) -> Result<()> {
        let len = self.storage.len();
        if len < 2 {
            return Err(CollectionError::InsufficientElements { required: 2, len });
        }

        self.storage.swap(len - 1, len - 2);
        Ok(())
    }
}
