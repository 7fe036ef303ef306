// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for dynarr.

use dynarr_buffer::BufferError;
use thiserror::Error;

/// Errors that can occur when working with a [`DynArray`](crate::DynArray).
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum DynArrayError {
    /// Index is not less than the array length.
    #[error("index {index} is out of range for length {len}")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the array at the time of the call.
        len: usize,
    },

    /// An error occurred in the underlying buffer.
    #[error("BufferError: {0}")]
    Buffer(#[from] BufferError),
}
