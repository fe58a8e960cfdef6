//! Fixed-capacity ring buffer
//!
//! Backs the bounce path and the snake body. Storage is an inline array;
//! pushing past capacity is an error rather than a silent overwrite.

use thiserror::Error;

/// Returned when pushing into a full buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("ring buffer is full (capacity {capacity})")]
pub struct CapacityError {
    pub capacity: usize,
}

/// Bounded double-ended queue with inline storage
#[derive(Debug, Clone)]
pub struct RingBuffer<T: Copy + Default, const N: usize> {
    items: [T; N],
    head: usize,
    len: usize,
}

impl<T: Copy + Default, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default, const N: usize> RingBuffer<T, N> {
    pub fn new() -> Self {
        Self {
            items: [T::default(); N],
            head: 0,
            len: 0,
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    #[inline]
    fn slot(&self, index: usize) -> usize {
        (self.head + index) % N
    }

    /// Append to the back
    pub fn push_back(&mut self, item: T) -> Result<(), CapacityError> {
        if self.is_full() {
            return Err(CapacityError { capacity: N });
        }
        let slot = self.slot(self.len);
        self.items[slot] = item;
        self.len += 1;
        Ok(())
    }

    /// Prepend to the front
    pub fn push_front(&mut self, item: T) -> Result<(), CapacityError> {
        if self.is_full() {
            return Err(CapacityError { capacity: N });
        }
        self.head = (self.head + N - 1) % N;
        self.items[self.head] = item;
        self.len += 1;
        Ok(())
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.items[self.head];
        self.head = (self.head + 1) % N;
        self.len -= 1;
        Some(item)
    }

    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.len -= 1;
        Some(self.items[self.slot(self.len)])
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        (index < self.len).then(|| &self.items[self.slot(index)])
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            let slot = self.slot(index);
            Some(&mut self.items[slot])
        } else {
            None
        }
    }

    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterate front to back
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        (0..self.len).map(move |i| &self.items[self.slot(i)])
    }

    /// Copy the contents, front to back, into a `Vec`
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().copied().collect()
    }
}

impl<T: Copy + Default + PartialEq, const N: usize> PartialEq for RingBuffer<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}
