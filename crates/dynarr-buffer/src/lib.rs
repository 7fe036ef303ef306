// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable contiguous storage with all-or-nothing reallocation.
//!
//! [`Buffer<T>`] owns a single heap allocation of `capacity` slots, of which the
//! first `len` hold initialized elements. It is the storage engine behind
//! `dynarr::DynArray`, and exposes the primitives the container composes:
//! exact reservation, append within capacity, removal by value and an
//! infallible [`Buffer::swap`].
//!
//! # Core Guarantees
//!
//! - **Construct-then-swap**: every operation that can fail builds its result in
//!   a temporary buffer and commits it with `swap`. On error (or a panicking
//!   `Clone`) the target is left exactly as it was.
//! - **Single ownership**: exactly one live `Buffer` owns an allocation. Copies
//!   allocate their own storage, [`Buffer::take`] hands the allocation over and
//!   leaves the source empty and unallocated.
//! - **No shrinking**: `reserve` only grows. Capacity never decreases except by
//!   dropping or taking the buffer.
//! - **Exactly-once destruction**: each element is dropped once, by `clear`,
//!   by `Drop`, or by its new owner after `erase` returns it.
//!
//! Allocation failure from the global allocator is fatal and routed through
//! `handle_alloc_error`. A request whose byte size cannot be represented is
//! reported as [`BufferError::AllocationFailure`] instead.
//!
//! # Example
//!
//! ```rust
//! use dynarr_buffer::{Buffer, BufferError};
//!
//! fn example() -> Result<(), BufferError> {
//!     let mut buffer = Buffer::from_elem(3, 7u32)?;
//!     assert_eq!(buffer.as_slice(), &[7, 7, 7]);
//!     assert_eq!(buffer.capacity(), 3);
//!
//!     // Full: the value is handed back until capacity is reserved
//!     assert_eq!(buffer.push_within_capacity(8), Err(8));
//!
//!     buffer.reserve(6)?;
//!     assert_eq!(buffer.push_within_capacity(8), Ok(()));
//!     assert_eq!(buffer.as_slice(), &[7, 7, 7, 8]);
//!
//!     // Cannot shrink below the current length
//!     assert!(matches!(
//!         buffer.reserve(2),
//!         Err(BufferError::InvalidArgument { requested: 2, len: 4 })
//!     ));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Test Utilities
//!
//! Enable the `test-utils` feature to inject growth failures:
//!
//! ```toml
//! [dev-dependencies]
//! dynarr-buffer = { version = "*", features = ["test-utils"] }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod buffer;
mod error;

pub use buffer::Buffer;
pub use error::BufferError;

#[cfg(any(test, feature = "test-utils"))]
pub use error::BufferBehaviour;
