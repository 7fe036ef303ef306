// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for dynarr-buffer.

use thiserror::Error;

/// Errors that can occur when managing buffer storage.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum BufferError {
    /// Requested capacity is smaller than the number of stored elements.
    #[error("requested capacity {requested} is less than the current length {len}")]
    InvalidArgument {
        /// Capacity passed to `reserve`.
        requested: usize,
        /// Length of the buffer at the time of the call.
        len: usize,
    },

    /// The requested slot count has no representable memory layout.
    ///
    /// Raised when `requested * size_of::<T>()` would exceed `isize::MAX`.
    /// Exhaustion of the global allocator is not reported here; it aborts
    /// through `handle_alloc_error`.
    #[error("cannot allocate {requested} slots: layout exceeds isize::MAX bytes")]
    AllocationFailure {
        /// Slot count that could not be allocated.
        requested: usize,
    },

    /// An append found no free slot, even after growth was attempted.
    #[error("capacity exhausted: all {capacity} slots are in use")]
    CapacityExhausted {
        /// Capacity of the full buffer.
        capacity: usize,
    },
}

/// Test behaviour for injecting failures in `Buffer` operations.
///
/// This is only available with the `test-utils` feature and lets callers
/// exercise their error paths without exhausting memory.
///
/// The behaviour is sticky - once set, it remains active until changed.
///
/// # Example
///
/// ```rust
/// // test-utils feature required in dev-dependencies
/// use dynarr_buffer::{Buffer, BufferBehaviour, BufferError};
///
/// #[cfg(test)]
/// mod tests {
///     use super::*;
///
///     #[test]
///     fn test_handles_growth_failure() -> Result<(), BufferError> {
///         let mut buffer = Buffer::from_elem(2, 1u8)?;
///
///         // Inject failure
///         buffer.change_behaviour(BufferBehaviour::FailAtReserve);
///         assert!(buffer.reserve(4).is_err());
///         assert_eq!(buffer.capacity(), 2);
///
///         // Reset to normal behaviour
///         buffer.change_behaviour(BufferBehaviour::None);
///         buffer.reserve(4)?;
///         Ok(())
///     }
/// }
/// ```
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BufferBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// Every `reserve()` that would allocate fails with `AllocationFailure`.
    FailAtReserve,
}
