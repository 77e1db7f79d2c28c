//! Fixed-capacity ranking that keeps the K best items seen so far.
//!
//! Items are kept sorted, best first. A new item is placed after every item
//! that ranks at least as high, so among equal items the earlier insertion
//! stays ahead. Past capacity the lowest-ranked item is dropped.

use crate::error::{ChessError, Result};
use std::collections::VecDeque;

// Large capacities grow on demand instead of allocating up front
const PREALLOC_LIMIT: usize = 64;

#[derive(Debug, Clone)]
pub struct BoundedTopK<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T: Ord> BoundedTopK<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.min(PREALLOC_LIMIT) + 1),
            capacity,
        }
    }

    pub fn insert(&mut self, item: T) {
        let pos = self
            .items
            .iter()
            .position(|existing| *existing < item)
            .unwrap_or(self.items.len());
        self.items.insert(pos, item);
        if self.items.len() > self.capacity {
            self.items.pop_back();
        }
    }

    /// Remove and return the highest-ranked item
    pub fn pop_best(&mut self) -> Result<T> {
        self.items.pop_front().ok_or(ChessError::EmptyCollection)
    }

    pub fn peek_best(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Best-first view without draining
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}
