// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Counters {
    created: Cell<usize>,
    dropped: Cell<usize>,
    clone_budget: Cell<Option<usize>>,
}

/// Shared bookkeeping for [`Tracked`] values.
///
/// Every `Tracked` handed out by [`DropLedger::track`], and every clone of one,
/// counts as created; every drop counts as dropped. A container that neither
/// leaks nor double-drops ends with `created() == dropped()`.
///
/// # Example
///
/// ```rust
/// use dynarr_test_utils::DropLedger;
///
/// let ledger = DropLedger::new();
/// let a = ledger.track(1);
/// let b = a.clone();
///
/// assert_eq!(ledger.live(), 2);
/// drop(a);
/// drop(b);
/// assert_eq!(ledger.live(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DropLedger {
    counters: Rc<Counters>,
}

impl DropLedger {
    /// Creates a ledger with all counters at zero and unlimited clones.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new tracked value bound to this ledger.
    pub fn track(&self, value: u32) -> Tracked {
        self.bump_created();

        Tracked {
            value,
            counters: Rc::clone(&self.counters),
        }
    }

    /// Number of tracked values created (including clones).
    pub fn created(&self) -> usize {
        self.counters.created.get()
    }

    /// Number of tracked values dropped.
    pub fn dropped(&self) -> usize {
        self.counters.dropped.get()
    }

    /// Number of tracked values currently alive.
    ///
    /// Panics if more values were dropped than created.
    pub fn live(&self) -> usize {
        self.created()
            .checked_sub(self.dropped())
            .expect("Failed to compute live(): more drops than creations (double drop)")
    }

    /// Allows `n` more successful clones; the next one after that panics.
    pub fn panic_after_clones(&self, n: usize) {
        self.counters.clone_budget.set(Some(n));
    }

    /// Removes any clone limit.
    pub fn allow_clones(&self) {
        self.counters.clone_budget.set(None);
    }

    fn bump_created(&self) {
        let created = &self.counters.created;
        created.set(created.get() + 1);
    }
}

/// Element type that reports its lifecycle to a [`DropLedger`].
///
/// Equality and `Debug` only look at the carried value.
pub struct Tracked {
    value: u32,
    counters: Rc<Counters>,
}

impl Tracked {
    /// Returns the carried value.
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        let budget = &self.counters.clone_budget;
        match budget.get() {
            Some(0) => panic!("Tracked::clone: clone budget exhausted"),
            Some(n) => budget.set(Some(n - 1)),
            None => {}
        }

        let created = &self.counters.created;
        created.set(created.get() + 1);

        Self {
            value: self.value,
            counters: Rc::clone(&self.counters),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        let dropped = &self.counters.dropped;
        dropped.set(dropped.get() + 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tracked {}

impl core::fmt::Debug for Tracked {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Tracked").field(&self.value).finish()
    }
}
