//! Error taxonomy shared by every crate in the workspace.
//!
//! The core produces exactly the kinds of errors described by the engine's
//! error handling design: I/O-Durability failures are surfaced to callers,
//! while Decode-Truncated and Decode-Corrupt are caught and logged during
//! WAL replay and never escape `Engine::new`.

use thiserror::Error;

/// Crate-wide result alias, mirroring the teacher's `ferrisdb_core::Result`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// I/O-Durability: the WAL append or its fsync failed. Surfaced to the
    /// RPC caller; the index is left untouched because `Engine::put` never
    /// reaches `index.put` when this is returned.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decode-Corrupt: a WAL record's checksum did not match its payload.
    /// Only ever produced during replay, where it is logged and replay
    /// stops at the failure point.
    #[error("WAL record checksum mismatch at offset {offset}: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        offset: u64,
        expected: u32,
        actual: u32,
    },

    /// Decode-Truncated: a partial trailing record was encountered. Only
    /// ever produced during replay; logged and replay stops.
    #[error("WAL record truncated at offset {offset}")]
    Truncated { offset: u64 },

    /// Boundary check on the RPC-facing entry points: keys must be
    /// non-empty UTF-8 strings per the data model.
    #[error("key must be non-empty")]
    EmptyKey,
}
