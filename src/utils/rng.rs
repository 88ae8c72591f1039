use rand::Rng;
use std::{
    ops::Range,
    sync::atomic::{AtomicU64, Ordering},
};

/// Returns a process-unique, monotonically increasing entity identifier.
///
/// Ids start at 1 so that 0 never names a live entity. The counter is shared by every
/// session in the process, which keeps ids unique even when tests run sessions in
/// parallel.
pub fn next_entity_id() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Rolls a launch power uniformly from `range`.
///
/// An empty range collapses to its start instead of panicking.
pub fn roll_power<R: Rng + ?Sized>(rng: &mut R, range: Range<f64>) -> f64 {
    if range.start >= range.end {
        return range.start;
    }
    rng.random_range(range)
}
