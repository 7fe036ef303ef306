// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::ops::{Index, IndexMut};

use dynarr_buffer::{Buffer, BufferError};
#[cfg(any(test, feature = "test-utils"))]
use dynarr_buffer::BufferBehaviour;

use crate::error::DynArrayError;

/// A resizable array with amortized O(1) append and bounds-checked access.
///
/// `DynArray` holds a [`Buffer`] and forwards storage management to it. It has
/// no state of its own: length, capacity and the allocation all live in the
/// buffer.
///
/// # Element Requirements
///
/// - [`erase`](Self::erase) requires `T: PartialEq` to find the element.
/// - [`from_elem`](Self::from_elem) and `Clone` require `T: Clone`.
///
/// # Example
///
/// ```rust
/// use dynarr::DynArray;
///
/// let mut a = DynArray::from_elem(2, 'a').unwrap();
/// let mut b = a.clone();
/// b.push('b').unwrap();
///
/// // Copies are independent
/// assert_eq!(a.as_slice(), &['a', 'a']);
/// assert_eq!(b.as_slice(), &['a', 'a', 'b']);
///
/// // Moving out leaves the source empty
/// let c = a.take();
/// assert_eq!(c.len(), 2);
/// assert!(a.is_empty());
/// ```
pub struct DynArray<T> {
    buffer: Buffer<T>,
}

impl<T> DynArray<T> {
    /// Creates an empty array without allocating.
    pub const fn new() -> Self {
        Self {
            buffer: Buffer::new(),
        }
    }

    /// Creates an empty array with exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::Buffer`] if `capacity` slots cannot be laid out.
    pub fn with_capacity(capacity: usize) -> Result<Self, DynArrayError> {
        Ok(Self {
            buffer: Buffer::with_capacity(capacity)?,
        })
    }

    /// Creates an array of `n` copies of `value`, with `len == capacity == n`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::Buffer`] if `n` slots cannot be laid out.
    pub fn from_elem(n: usize, value: T) -> Result<Self, DynArrayError>
    where
        T: Clone,
    {
        Ok(Self {
            buffer: Buffer::from_elem(n, value)?,
        })
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the array contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns `true` if the array owns storage (`capacity != 0`).
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.buffer.is_allocated()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::OutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T, DynArrayError> {
        let len = self.len();
        self.buffer
            .as_slice()
            .get(index)
            .ok_or(DynArrayError::OutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::OutOfRange`] if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, DynArrayError> {
        let len = self.len();
        self.buffer
            .as_mut_slice()
            .get_mut(index)
            .ok_or(DynArrayError::OutOfRange { index, len })
    }

    /// Appends `value` to the end of the array.
    ///
    /// Reserves capacity `1` when empty and `2 * len` when full, so a run of
    /// `N` pushes costs `O(N)` relocations overall.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrayError::Buffer`] if the grown capacity cannot be laid
    /// out. The array is unchanged and `value` is dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynarr::DynArray;
    ///
    /// let mut array = DynArray::new();
    /// let mut capacities = Vec::new();
    /// for i in 0..5 {
    ///     array.push(i).unwrap();
    ///     capacities.push(array.capacity());
    /// }
    ///
    /// assert_eq!(capacities, [1, 2, 4, 4, 8]);
    /// ```
    pub fn push(&mut self, value: T) -> Result<(), DynArrayError> {
        let len = self.len();

        if len == 0 {
            self.buffer.reserve(1)?;
        } else if len == self.capacity() {
            let doubled = len.saturating_mul(2);
            log::trace!("dynarr: full at {}, doubling to {}", len, doubled);
            self.buffer.reserve(doubled)?;
        }

        self.buffer
            .push_within_capacity(value)
            .map_err(|_| BufferError::CapacityExhausted {
                capacity: self.buffer.capacity(),
            })?;
        Ok(())
    }

    /// Removes the first element equal to `value`, preserving order.
    ///
    /// Returns the removed element, or `None` if nothing matched (in which
    /// case the array is untouched).
    pub fn erase(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.buffer.erase(value)
    }

    /// Ensures `capacity() >= capacity`. Never shrinks.
    ///
    /// # Errors
    ///
    /// - [`DynArrayError::Buffer`] wrapping `InvalidArgument` if
    ///   `capacity < len()`.
    /// - [`DynArrayError::Buffer`] wrapping `AllocationFailure` if the
    ///   capacity cannot be laid out.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), DynArrayError> {
        self.buffer.reserve(capacity)?;
        Ok(())
    }

    /// Removes all elements. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Exchanges contents and storage with `other`. Never fails.
    pub fn swap(&mut self, other: &mut Self) {
        self.buffer.swap(&mut other.buffer);
    }

    /// Moves the contents out, leaving `self` empty and unallocated.
    pub fn take(&mut self) -> Self {
        Self {
            buffer: self.buffer.take(),
        }
    }

    /// Move-assignment: replaces the contents of `self` with `other`.
    ///
    /// The previous contents are dropped after the swap.
    pub fn assign(&mut self, other: Self) {
        let mut tmp = other;
        self.swap(&mut tmp);
    }

    /// Returns the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.buffer.as_slice()
    }

    /// Returns the elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buffer.as_mut_slice()
    }

    /// Changes the failure-injection behaviour of the underlying buffer.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn change_behaviour(&mut self, behaviour: BufferBehaviour) {
        self.buffer.change_behaviour(behaviour);
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
        }
    }

    /// Copy-assignment through a temporary and a swap.
    ///
    /// A panicking `clone()` leaves `self` unmodified.
    fn clone_from(&mut self, source: &Self) {
        let mut tmp = source.clone();
        self.swap(&mut tmp);
    }
}

impl<T> Index<usize> for DynArray<T> {
    type Output = T;

    /// Panics with the [`DynArrayError::OutOfRange`] message if out of range.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(item) => item,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> IndexMut<usize> for DynArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(item) => item,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DynArray")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("data", &self.as_slice())
            .finish()
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.buffer == other.buffer
    }
}

impl<T: Eq> Eq for DynArray<T> {}
