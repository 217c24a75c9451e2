use std::collections::VecDeque;

use crate::error::{CollectionError, Result};

/// First in, first out.
#[derive(Debug, Clone, Default)]
pub struct Queue<T> {
    storage: VecDeque<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            storage: VecDeque::new(),
        }
    }

    /// Adds a new value at the back of the queue.
    pub fn enqueue(&mut self, value: T) {
        self.storage.push_back(value);
    }

    /// Removes the oldest value in the queue and returns it.
    pub fn dequeue(&mut self) -> Result<T> {
        self.storage
            .pop_front()
            .ok_or(CollectionError::EmptyStructure)
    }

    /// The oldest value in the queue, left where it is.
    pub fn peek(&self) -> Result<&T> {
        self.storage.front().ok_or(CollectionError::EmptyStructure)
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
}
