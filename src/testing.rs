//! Per-thread bookkeeping of memoizer outcomes, used by the test suite.

use std::cell::Cell;

/// Outcome counters of the memoized calls made on one thread.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Outcomes {
    /// How many calls returned a cached result.
    pub hits: usize,
    /// How many calls invoked their combiner.
    pub misses: usize,
    /// Whether the most recent call was a hit.
    pub last_was_hit: bool,
}

thread_local! {
    static OUTCOMES: Cell<Outcomes> = const {
        Cell::new(Outcomes { hits: 0, misses: 0, last_was_hit: false })
    };
}

/// Whether the last memoized call on this thread was a hit.
pub fn last_was_hit() -> bool {
    outcomes().last_was_hit
}

/// The counters accumulated on this thread since the last [`reset`].
pub fn outcomes() -> Outcomes {
    OUTCOMES.with(Cell::get)
}

/// Zero this thread's counters.
pub fn reset() {
    OUTCOMES.with(|cell| cell.set(Outcomes::default()))
}

pub(crate) fn register_hit() {
    OUTCOMES.with(|cell| {
        let mut outcomes = cell.get();
        outcomes.hits += 1;
        outcomes.last_was_hit = true;
        cell.set(outcomes);
    })
}

pub(crate) fn register_miss() {
    OUTCOMES.with(|cell| {
        let mut outcomes = cell.get();
        outcomes.misses += 1;
        outcomes.last_was_hit = false;
        cell.set(outcomes);
    })
}
