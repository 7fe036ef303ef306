// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use dynarr_buffer::BufferError;

use crate::DynArrayError;

#[test]
fn test_out_of_range_message() {
    let err = DynArrayError::OutOfRange { index: 3, len: 3 };

    assert_eq!(err.to_string(), "index 3 is out of range for length 3");
}

#[test]
fn test_buffer_error_conversion() {
    let err: DynArrayError = BufferError::InvalidArgument {
        requested: 1,
        len: 2,
    }
    .into();

    assert!(matches!(
        err,
        DynArrayError::Buffer(BufferError::InvalidArgument {
            requested: 1,
            len: 2
        })
    ));
    assert_eq!(
        err.to_string(),
        "BufferError: requested capacity 1 is less than the current length 2"
    );
}
