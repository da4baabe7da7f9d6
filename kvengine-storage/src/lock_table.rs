//! Striped lock table.
//!
//! `L` independent mutexes, each guarding its own shard of the index
//! (`HashMap<Key, Value>`). A key maps to exactly one stripe via
//! `hash(key) & (L-1)`. This fuses the spec's separately-described "Index"
//! and "Lock Table" components into a single type: the only way to reach a
//! shard's map is through that shard's guard, so "must only be called
//! while holding the stripe lock for `key`" (§4.1) is enforced by the type
//! system rather than left as a documented caller obligation.
//!
//! The hash function is `std::collections::hash_map::DefaultHasher`,
//! deterministic within one process lifetime only, per the contract — a
//! fresh process may map the same key to a different stripe, which is
//! fine since no stripe metadata is ever persisted to the WAL.

use kvengine_core::{Key, Value};

use parking_lot::Mutex;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Number of independent lock stripes. Must be a power of two so that
/// `hash & (L - 1)` is equivalent to `hash % L`.
pub const NUM_STRIPES: usize = 256;

fn stripe_of(key: &str) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    (hasher.finish() as usize) & (NUM_STRIPES - 1)
}

/// One independently-locked shard of the index.
type Shard = Mutex<HashMap<Key, Value>>;

/// The striped lock table plus the index it guards.
pub struct LockTable {
    shards: Vec<Shard>,
}

impl Default for LockTable {
    fn default() -> Self {
        Self::new()
    }
}

impl LockTable {
    pub fn new() -> Self {
        let shards = (0..NUM_STRIPES).map(|_| Mutex::new(HashMap::new())).collect();
        Self { shards }
    }

    /// Locks the stripe that owns `key` and gives access to that shard's
    /// map. Holders may `put`/`get`/remove-nothing across arbitrary
    /// in-memory work; there is no delete in this design (§9).
    pub fn lock(&self, key: &str) -> parking_lot::MutexGuard<'_, HashMap<Key, Value>> {
        self.shards[stripe_of(key)].lock()
    }

    /// Acquires every stripe in ascending index order and returns a guard
    /// whose `Drop` releases them in descending order — the single total
    /// order the design relies on to avoid deadlock (§4.3). Used only by
    /// `get_prefix`'s snapshot phase.
    pub fn lock_all(&self) -> AllStripesGuard<'_> {
        let mut guards = Vec::with_capacity(self.shards.len());
        for shard in &self.shards {
            guards.push(shard.lock());
        }
        AllStripesGuard { guards }
    }

    /// Approximate total entry count across all shards. May be called
    /// without holding any lock; the result can be stale the instant it's
    /// read, which the spec's stats contract explicitly allows.
    pub fn approx_len(&self) -> usize {
        self.shards.iter().map(|s| s.lock().len()).sum()
    }
}

/// RAII guard holding every stripe lock simultaneously, acquired ascending
/// and released descending via `Vec`'s drop order (last pushed, first
/// dropped matches `Vec<T>`'s field order only if we reverse — `Vec`'s
/// `Drop` impl drops elements front-to-back, so stripes are released in
/// ascending order by default. To honor "release in descending order" we
/// reverse explicitly in `Drop` below.
pub struct AllStripesGuard<'a> {
    guards: Vec<parking_lot::MutexGuard<'a, HashMap<Key, Value>>>,
}

impl<'a> AllStripesGuard<'a> {
    /// A consistent copy of every key currently present across all shards.
    pub fn key_snapshot(&self) -> Vec<Key> {
        self.guards.iter().flat_map(|g| g.keys().cloned()).collect()
    }
}

impl<'a> Drop for AllStripesGuard<'a> {
    fn drop(&mut self) {
        // Drain from the back so stripe L-1 is released before stripe 0,
        // matching the descending release order the spec requires.
        while self.guards.pop().is_some() {}
    }
}
