//! The Stats Counter.
//!
//! A lightweight set of monotonic counters, grounded in the teacher's
//! `WALMetrics` (`wal/metrics.rs`): plain `AtomicU64`s updated with
//! `Ordering::Relaxed`, giving thread-safe increments without a lock. The
//! spec explicitly allows either "counters under whichever stripe lock the
//! operation already holds" or atomics as an equivalent alternative (§9);
//! atomics are used here so `stat()` never needs to touch the lock table.

use kvengine_core::StatsSnapshot;

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Stats {
    total_requests: AtomicU64,
    set_count: AtomicU64,
    get_count: AtomicU64,
    getprefix_count: AtomicU64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_set(&self) {
        self.set_count.fetch_add(1, Ordering::Relaxed);
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_get(&self) {
        self.get_count.fetch_add(1, Ordering::Relaxed);
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a `get_prefix` as a single request, per §9's preserved
    /// open-question resolution: the per-key re-read phase does not bump
    /// counters a second time.
    pub fn record_getprefix(&self) {
        self.getprefix_count.fetch_add(1, Ordering::Relaxed);
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, key_count: u64, start_time: &str) -> StatsSnapshot {
        StatsSnapshot {
            key_count,
            total_requests: self.total_requests.load(Ordering::Relaxed),
            set_count: self.set_count.load(Ordering::Relaxed),
            get_count: self.get_count.load(Ordering::Relaxed),
            getprefix_count: self.getprefix_count.load(Ordering::Relaxed),
            start_time: start_time.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let stats = Stats::new();
        let snap = stats.snapshot(0, "t0");
        assert_eq!(snap.total_requests, 0);
        assert_eq!(snap.set_count, 0);
        assert_eq!(snap.get_count, 0);
        assert_eq!(snap.getprefix_count, 0);
    }

    #[test]
    fn each_operation_bumps_its_own_and_total() {
        let stats = Stats::new();
        stats.record_set();
        stats.record_get();
        stats.record_getprefix();

        let snap = stats.snapshot(0, "t0");
        assert_eq!(snap.set_count, 1);
        assert_eq!(snap.get_count, 1);
        assert_eq!(snap.getprefix_count, 1);
        assert_eq!(snap.total_requests, 3);
    }

    #[test]
    fn counters_are_monotonic_under_concurrency() {
        use std::sync::Arc;
        use std::thread;

        let stats = Arc::new(Stats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    for _ in 0..500 {
                        stats.record_set();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let snap = stats.snapshot(0, "t0");
        assert_eq!(snap.set_count, 4000);
        assert_eq!(snap.total_requests, 4000);
    }
}
