//! Shared value types for keys, values, timestamps, and the stats snapshot.

use serde::{Deserialize, Serialize};

/// A non-empty UTF-8 string. Emptiness is enforced at the RPC boundary
/// (`Engine::put`/`get`), not by this alias itself.
pub type Key = String;

/// An opaque byte sequence. The engine never interprets its contents.
pub type Value = Vec<u8>;

/// Durability level for a WAL append.
///
/// The client-facing `put` path always uses `Full` — "one write = one
/// fsync" is the durability contract this spec measures against. `None`
/// and `Normal` exist so the benchmark harness can quantify the
/// throughput/durability trade-off the fsync floor imposes; they are not
/// reachable through the gRPC service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Write to the OS page cache only; no flush, no fsync.
    None,
    /// Flush user-space buffers but skip fsync.
    Normal,
    /// Flush and fsync. The only mode the RPC-facing `put` path uses.
    Full,
}

/// Point-in-time snapshot of the engine's monotonic counters plus the
/// current key count. Not serialized against concurrent writers; this is
/// intentional, per the engine's stats contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub key_count: u64,
    pub total_requests: u64,
    pub set_count: u64,
    pub get_count: u64,
    pub getprefix_count: u64,
    pub start_time: String,
}
