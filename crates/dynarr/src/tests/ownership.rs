// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::panic::{AssertUnwindSafe, catch_unwind};

use dynarr_buffer::BufferBehaviour;
use dynarr_test_utils::{DropLedger, Tracked};

use crate::DynArray;

fn values(array: &DynArray<Tracked>) -> Vec<u32> {
    array.as_slice().iter().map(Tracked::value).collect()
}

#[test]
fn test_growth_never_drops_or_duplicates() {
    let ledger = DropLedger::new();
    let mut array = DynArray::new();

    for i in 0..100 {
        array.push(ledger.track(i)).expect("Failed to push(..)");
    }

    assert_eq!(ledger.created(), 100);
    assert_eq!(ledger.dropped(), 0);
    assert_eq!(values(&array), (0..100).collect::<Vec<_>>());

    drop(array);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn test_failed_push_drops_value_and_keeps_contents() {
    let ledger = DropLedger::new();
    let mut array = DynArray::new();
    array.push(ledger.track(1)).expect("Failed to push(..)");
    array.change_behaviour(BufferBehaviour::FailAtReserve);

    assert!(array.push(ledger.track(2)).is_err());

    assert_eq!(values(&array), vec![1]);
    assert_eq!(ledger.live(), 1);
}

#[test]
fn test_clone_from_panicking_leaves_target_intact() {
    let ledger = DropLedger::new();
    let mut source = DynArray::new();
    let mut target = DynArray::new();
    for i in 0..4 {
        source.push(ledger.track(i)).expect("Failed to push(..)");
    }
    target.push(ledger.track(42)).expect("Failed to push(..)");
    ledger.panic_after_clones(3);

    let result = catch_unwind(AssertUnwindSafe(|| target.clone_from(&source)));

    assert!(result.is_err());
    assert_eq!(values(&target), vec![42]);
    assert_eq!(ledger.live(), 5);

    ledger.allow_clones();
    drop(source);
    drop(target);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn test_assign_drops_previous_contents() {
    let ledger = DropLedger::new();
    let mut a = DynArray::from_elem(3, ledger.track(1)).expect("Failed to from_elem(..)");
    let b = DynArray::from_elem(2, ledger.track(2)).expect("Failed to from_elem(..)");

    a.assign(b);

    assert_eq!(values(&a), vec![2, 2]);
    assert_eq!(ledger.live(), 2);
}

#[test]
fn test_clear_and_erase_drop_exactly_once() {
    let ledger = DropLedger::new();
    let mut array = DynArray::new();
    for i in 0..5 {
        array.push(ledger.track(i)).expect("Failed to push(..)");
    }

    let removed = array.erase(&ledger.track(3));
    assert!(removed.is_some());
    drop(removed);
    assert_eq!(ledger.live(), 4);

    array.clear();
    assert_eq!(ledger.live(), 0);

    drop(array);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn test_take_source_safe_to_drop() {
    let ledger = DropLedger::new();
    let mut source = DynArray::from_elem(4, ledger.track(9)).expect("Failed to from_elem(..)");

    let target = source.take();
    drop(source);

    assert_eq!(values(&target), vec![9, 9, 9, 9]);
    assert_eq!(ledger.live(), 4);
}
