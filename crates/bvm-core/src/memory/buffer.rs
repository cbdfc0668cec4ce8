//! Dynamic Buffer
//!
//! Growable contiguous storage used for instruction bytes, line tables and
//! constant pools. Capacity is tracked explicitly so the growth policy is
//! observable: empty buffers own no heap storage, and every growth step
//! doubles the capacity (starting at [`MIN_CAPACITY`]).

use std::ops::Index;

use crate::error::{BvmError, BvmResult};

/// Capacity of a buffer after its first growth step
pub const MIN_CAPACITY: usize = 8;

/// Next capacity for a buffer currently holding `capacity` slots.
///
/// `None` when doubling would overflow `usize`.
pub fn grow_capacity(capacity: usize) -> Option<usize> {
    if capacity < MIN_CAPACITY {
        Some(MIN_CAPACITY)
    } else {
        capacity.checked_mul(2)
    }
}

/// Append-only growable array
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicBuffer<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> DynamicBuffer<T> {
    /// Create an empty buffer. No storage is allocated until the first append.
    pub fn new() -> Self {
        DynamicBuffer {
            items: Vec::new(),
            capacity: 0,
        }
    }

    /// Make room for one more element, growing if the buffer is full.
    ///
    /// On failure the buffer is left untouched.
    pub fn reserve_one(&mut self) -> BvmResult<()> {
        self.reserve(1)
    }

    /// Make room for `additional` more elements, doubling as many times as
    /// needed. On failure the buffer is left untouched.
    pub fn reserve(&mut self, additional: usize) -> BvmResult<()> {
        let needed = self
            .items
            .len()
            .checked_add(additional)
            .ok_or(BvmError::OutOfMemory { requested: usize::MAX })?;
        if needed <= self.capacity {
            return Ok(());
        }

        let mut requested = self.capacity;
        while requested < needed {
            requested = grow_capacity(requested)
                .ok_or(BvmError::OutOfMemory { requested: usize::MAX })?;
        }
        self.items
            .try_reserve_exact(requested - self.items.len())
            .map_err(|_| BvmError::OutOfMemory { requested })?;
        self.capacity = requested;
        Ok(())
    }

    /// Append a value, returning the index it was stored at.
    pub fn append(&mut self, value: T) -> BvmResult<usize> {
        self.reserve_one()?;
        let index = self.items.len();
        self.items.push(value);
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Number of live elements
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Number of allocated slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Release all storage and return to the empty state.
    pub fn free(&mut self) {
        self.items = Vec::new();
        self.capacity = 0;
    }
}

impl<T> Default for DynamicBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for DynamicBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a DynamicBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
