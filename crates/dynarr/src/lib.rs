// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Resizable array with bounds-checked access and amortized O(1) append.
//!
//! [`DynArray<T>`] is a homogeneous, ordered sequence built by composition over
//! [`buffer::Buffer`]. The buffer owns the storage; the array adds the growth
//! policy, checked indexing and assignment.
//!
//! # Growth Policy
//!
//! [`DynArray::push`] reserves capacity `1` on an empty array and doubles the
//! capacity whenever the array is full (`0 → 1 → 2 → 4 → 8 ...`), so `N`
//! appends relocate `O(N)` elements in total.
//!
//! # Failure Semantics
//!
//! Every fallible operation returns a [`DynArrayError`] synchronously, and a
//! failed operation leaves the array exactly as it was. Mutations that need
//! new storage build it off to the side and commit with an infallible swap.
//!
//! # Example
//!
//! ```rust
//! use dynarr::{DynArray, DynArrayError};
//!
//! fn example() -> Result<(), DynArrayError> {
//!     let mut array = DynArray::new();
//!     for i in 1..=4 {
//!         array.push(i)?;
//!     }
//!     assert_eq!(array.len(), 4);
//!     assert_eq!(array.capacity(), 4);
//!
//!     *array.get_mut(0)? = 10;
//!     assert_eq!(*array.get(0)?, 10);
//!
//!     // Indexing past the end is reported, not undefined
//!     assert!(matches!(
//!         array.get(4),
//!         Err(DynArrayError::OutOfRange { index: 4, len: 4 })
//!     ));
//!
//!     array.erase(&2);
//!     assert_eq!(array.as_slice(), &[10, 3, 4]);
//!
//!     array.clear();
//!     assert!(array.is_empty());
//!     assert_eq!(array.capacity(), 4);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Concurrency
//!
//! `DynArray` performs no internal synchronization. It is `Send`/`Sync` when
//! `T` is, like any uniquely-owning container; shared mutation must be
//! serialized by the caller (for example one lock per array).

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod dyn_array;
mod error;

/// Storage engine re-exported from `dynarr-buffer`.
pub use dynarr_buffer as buffer;

pub use dyn_array::DynArray;
pub use error::DynArrayError;
