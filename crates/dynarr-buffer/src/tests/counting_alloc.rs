// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Global allocator for the test binary that tracks live bytes per thread.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

thread_local! {
    static OUTSTANDING: Cell<isize> = const { Cell::new(0) };
}

struct CountingAlloc;

fn record(delta: isize) {
    let _ = OUTSTANDING.try_with(|bytes| bytes.set(bytes.get() + delta));
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY (PRECONDITIONS ARE MET): forwarded from our own caller.
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record(layout.size() as isize);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        record(-(layout.size() as isize));
        // SAFETY (PRECONDITIONS ARE MET): forwarded from our own caller.
        unsafe { System.dealloc(ptr, layout) };
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

/// Bytes allocated and not yet released by the calling thread.
pub(crate) fn outstanding_bytes() -> isize {
    OUTSTANDING.with(Cell::get)
}
