//! The durable, striped key-value storage core.
//!
//! Composes three cooperating pieces — the striped lock table
//! ([`lock_table`], which also holds the in-memory index), the
//! write-ahead log ([`wal`]), and the stats counter ([`stats`]) — behind a
//! single [`Engine`] that implements the five operations the RPC
//! collaborator needs: `put`, `get`, `get_prefix`, `stat`, and `close`.
//!
//! This crate is deliberately synchronous: the only suspension points are
//! stripe-lock acquisition and the WAL's fsync, both blocking primitives.
//! The `async`/worker-pool concern belongs to the RPC collaborator
//! (`kvengine-server`), which dispatches into this crate via
//! `tokio::task::spawn_blocking`.

pub mod engine;
pub mod lock_table;
pub mod stats;
pub mod wal;

pub use engine::{Engine, KeyValuePair};
