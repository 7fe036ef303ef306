// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::alloc::{Layout, alloc, dealloc, handle_alloc_error};
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};

#[cfg(any(test, feature = "test-utils"))]
use crate::error::BufferBehaviour;
use crate::error::BufferError;

/// Owning, contiguous storage of `capacity` slots with `len` live elements.
///
/// Slots `[0, len)` are initialized; slots `[len, capacity)` are allocated but
/// hold no value and are never read. For sized `T`, `capacity == 0` exactly
/// when nothing is allocated. Zero-sized element types track capacity without
/// ever requesting memory.
///
/// # Growth
///
/// [`reserve`](Self::reserve) grows to exactly the requested capacity:
///
/// 1. Allocate a temporary buffer of the new capacity
/// 2. Move the live elements into it, in order
/// 3. [`swap`](Self::swap) the temporary into place
/// 4. Drop the temporary, which now owns the old (emptied) allocation
///
/// If step 1 fails, `self` has not been touched.
///
/// # Example
///
/// ```rust
/// use dynarr_buffer::Buffer;
///
/// let mut buffer: Buffer<u8> = Buffer::new();
/// assert!(!buffer.is_allocated());
///
/// buffer.reserve(4).unwrap();
/// buffer.push_within_capacity(1).unwrap();
/// buffer.push_within_capacity(2).unwrap();
///
/// assert_eq!(buffer.len(), 2);
/// assert_eq!(buffer.capacity(), 4);
/// ```
pub struct Buffer<T> {
    ptr: NonNull<T>,
    len: usize,
    capacity: usize,
    #[cfg(any(test, feature = "test-utils"))]
    behaviour: BufferBehaviour,
    _marker: PhantomData<T>,
}

// SAFETY: Buffer uniquely owns its allocation and the elements in it, so it is
// exactly as thread-safe as the elements themselves.
unsafe impl<T: Send> Send for Buffer<T> {}
unsafe impl<T: Sync> Sync for Buffer<T> {}

impl<T> Buffer<T> {
    /// Creates an empty buffer without allocating.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            capacity: 0,
            #[cfg(any(test, feature = "test-utils"))]
            behaviour: BufferBehaviour::None,
            _marker: PhantomData,
        }
    }

    /// Creates an empty buffer with exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailure`] if `capacity` slots of `T`
    /// exceed the maximum allocation size.
    pub fn with_capacity(capacity: usize) -> Result<Self, BufferError> {
        let mut buffer = Self::new();
        buffer.ptr = Self::allocate(capacity)?;
        buffer.capacity = capacity;

        Ok(buffer)
    }

    /// Creates a buffer holding `n` copies of `value`, with `capacity == n`.
    ///
    /// The buffer is filled as a local temporary and only returned once
    /// complete. If a `clone()` panics, the copies made so far are dropped and
    /// the storage is released.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailure`] if `n` slots cannot be laid out.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynarr_buffer::Buffer;
    ///
    /// let buffer = Buffer::from_elem(3, 'x').unwrap();
    /// assert_eq!(buffer.as_slice(), &['x', 'x', 'x']);
    /// assert_eq!(buffer.capacity(), 3);
    /// ```
    pub fn from_elem(n: usize, value: T) -> Result<Self, BufferError>
    where
        T: Clone,
    {
        let mut tmp = Self::with_capacity(n)?;

        if n == 0 {
            return Ok(tmp);
        }

        for _ in 1..n {
            // SAFETY (PRECONDITIONS ARE MET): tmp.len < n - 1 < n == tmp.capacity
            unsafe { tmp.write_at_len(value.clone()) };
        }
        // SAFETY (PRECONDITIONS ARE MET): tmp.len == n - 1 < n == tmp.capacity
        unsafe { tmp.write_at_len(value) };

        debug_assert_eq!(tmp.len, n);
        Ok(tmp)
    }

    /// Returns the number of initialized elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the buffer owns storage (`capacity != 0`).
    ///
    /// For zero-sized `T` this reports the logical capacity only: such a
    /// buffer never holds heap memory, even when this returns `true`.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.capacity != 0
    }

    /// Returns the initialized elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: ptr is valid (or dangling and aligned when len == 0) for len
        // initialized elements.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Returns the initialized elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in as_slice, and &mut self guarantees unique access.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Exchanges storage, length and capacity with `other`.
    ///
    /// No element is moved and no memory is touched. Every fallible mutation
    /// commits through this call.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Moves the storage out, leaving `self` empty and unallocated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynarr_buffer::Buffer;
    ///
    /// let mut source = Buffer::from_elem(2, 5u8).unwrap();
    /// let target = source.take();
    ///
    /// assert_eq!(target.as_slice(), &[5, 5]);
    /// assert_eq!(source.len(), 0);
    /// assert!(!source.is_allocated());
    /// ```
    pub fn take(&mut self) -> Self {
        let mut taken = Self::new();
        taken.swap(self);
        taken
    }

    /// Drops every element. Capacity and storage are kept.
    pub fn clear(&mut self) {
        let len = self.len;
        // Length first: a panicking destructor must not lead to a second drop.
        self.len = 0;

        // SAFETY (PRECONDITIONS ARE MET): [0, len) were initialized and are no
        // longer reachable through self.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), len));
        }
    }

    /// Removes the first element equal to `value` and returns it.
    ///
    /// Subsequent elements are shifted down one slot by pairwise exchange,
    /// preserving their order. Returns `None` and leaves the buffer untouched
    /// when no element matches.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dynarr_buffer::Buffer;
    ///
    /// let mut buffer = Buffer::with_capacity(4).unwrap();
    /// for i in 1..=4 {
    ///     buffer.push_within_capacity(i).unwrap();
    /// }
    ///
    /// assert_eq!(buffer.erase(&2), Some(2));
    /// assert_eq!(buffer.as_slice(), &[1, 3, 4]);
    /// assert_eq!(buffer.erase(&9), None);
    /// ```
    pub fn erase(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let index = self.as_slice().iter().position(|item| item == value)?;

        let slice = self.as_mut_slice();
        for j in index..slice.len() - 1 {
            slice.swap(j, j + 1);
        }

        self.len -= 1;

        // SAFETY (PRECONDITIONS ARE MET): slot `len` held the matched element
        // and is now outside [0, len), so ownership moves to the caller.
        Some(unsafe { ptr::read(self.ptr.as_ptr().add(self.len)) })
    }

    /// Ensures `capacity() >= new_capacity`, growing to exactly `new_capacity`.
    ///
    /// Never shrinks: a request at or below the current capacity is a no-op.
    /// An unallocated buffer allocates directly; an allocated one builds a
    /// temporary of the new size, moves the elements over and swaps it in.
    ///
    /// # Errors
    ///
    /// - [`BufferError::InvalidArgument`] if `new_capacity < len()`.
    /// - [`BufferError::AllocationFailure`] if `new_capacity` slots cannot be
    ///   laid out.
    ///
    /// In both cases length, capacity and contents are unchanged.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), BufferError> {
        if new_capacity < self.len {
            return Err(BufferError::InvalidArgument {
                requested: new_capacity,
                len: self.len,
            });
        }

        if new_capacity <= self.capacity {
            return Ok(());
        }

        #[cfg(any(test, feature = "test-utils"))]
        if matches!(self.behaviour, BufferBehaviour::FailAtReserve) {
            return Err(BufferError::AllocationFailure {
                requested: new_capacity,
            });
        }

        if self.capacity == 0 {
            self.ptr = Self::allocate(new_capacity)?;
            self.capacity = new_capacity;
            return Ok(());
        }

        self.grow_to(new_capacity)
    }

    #[cold]
    #[inline(never)]
    fn grow_to(&mut self, new_capacity: usize) -> Result<(), BufferError> {
        let mut tmp = Self::with_capacity(new_capacity)?;

        log::trace!(
            "buffer: relocating {} elements, capacity {} -> {}",
            self.len,
            self.capacity,
            new_capacity
        );

        // SAFETY (PRECONDITIONS ARE MET): distinct allocations, tmp has room for
        // self.len elements since new_capacity > self.capacity >= self.len.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), tmp.ptr.as_ptr(), self.len);
        }
        // Ownership of the elements moved with the bits.
        tmp.len = self.len;
        self.len = 0;

        self.swap(&mut tmp);

        // tmp now holds the old, empty allocation and releases it on drop.
        Ok(())
    }

    /// Appends `value` into the next free slot without reallocating.
    ///
    /// # Errors
    ///
    /// Hands `value` back as `Err(value)` if `len() == capacity()`. The buffer
    /// is unchanged.
    pub fn push_within_capacity(&mut self, value: T) -> Result<(), T> {
        if self.len >= self.capacity {
            return Err(value);
        }

        // SAFETY (PRECONDITIONS ARE MET): len < capacity checked above.
        unsafe { self.write_at_len(value) };
        Ok(())
    }

    /// Changes the failure-injection behaviour of this buffer.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn change_behaviour(&mut self, behaviour: BufferBehaviour) {
        self.behaviour = behaviour;
    }

    /// Writes `value` into slot `len` and bumps `len`.
    ///
    /// # Safety
    ///
    /// `self.len < self.capacity` must hold.
    #[inline]
    unsafe fn write_at_len(&mut self, value: T) {
        debug_assert!(self.len < self.capacity);

        // SAFETY: caller guarantees slot `len` is allocated and uninitialized.
        unsafe { self.ptr.as_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    fn allocate(capacity: usize) -> Result<NonNull<T>, BufferError> {
        if capacity == 0 || mem::size_of::<T>() == 0 {
            return Ok(NonNull::dangling());
        }

        let layout = Layout::array::<T>(capacity)
            .map_err(|_| BufferError::AllocationFailure { requested: capacity })?;

        log::trace!("buffer: allocating {} slots ({} bytes)", capacity, layout.size());

        // SAFETY (PRECONDITIONS ARE MET): layout has non-zero size since
        // capacity > 0 and T is not zero-sized.
        let ptr = unsafe { alloc(layout) }.cast::<T>();

        match NonNull::new(ptr) {
            Some(ptr) => Ok(ptr),
            None => handle_alloc_error(layout),
        }
    }

    fn deallocate(ptr: NonNull<T>, capacity: usize) {
        if capacity == 0 || mem::size_of::<T>() == 0 {
            return;
        }

        if let Ok(layout) = Layout::array::<T>(capacity) {
            log::trace!("buffer: releasing {} slots", capacity);

            // SAFETY (PRECONDITIONS ARE MET): ptr was returned by `alloc` with
            // this very layout in `allocate`.
            unsafe { dealloc(ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}

/// Releases a raw allocation when dropped, including while unwinding.
struct ReleaseOnDrop<T> {
    ptr: NonNull<T>,
    capacity: usize,
}

impl<T> Drop for ReleaseOnDrop<T> {
    fn drop(&mut self) {
        Buffer::<T>::deallocate(self.ptr, self.capacity);
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        // Armed before the elements go: a panicking element destructor must
        // not skip the release of the storage.
        let _release = ReleaseOnDrop {
            ptr: self.ptr,
            capacity: self.capacity,
        };

        self.clear();
    }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Buffer<T> {
    /// Deep copy with the source's capacity, not just its length.
    fn clone(&self) -> Self {
        // A live buffer of this capacity proves its layout is representable.
        let mut tmp = match Self::with_capacity(self.capacity) {
            Ok(tmp) => tmp,
            Err(_) => unreachable!("capacity {} already has a valid layout", self.capacity),
        };

        for item in self.as_slice() {
            // SAFETY (PRECONDITIONS ARE MET): tmp.len < self.len <= tmp.capacity
            unsafe { tmp.write_at_len(item.clone()) };
        }

        tmp
    }

    /// Copy-assignment: clone into a temporary, then swap it into place.
    ///
    /// A panicking `clone()` leaves `self` unmodified.
    fn clone_from(&mut self, source: &Self) {
        let mut tmp = source.clone();
        self.swap(&mut tmp);
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("data", &self.as_slice())
            .finish()
    }
}

impl<T: PartialEq> PartialEq for Buffer<T> {
    fn eq(&self, other: &Self) -> bool {
        // Capacity is headroom, not content
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Buffer<T> {}
