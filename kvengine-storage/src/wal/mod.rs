//! Write-Ahead Log.
//!
//! Provides durability by persisting every `put` to disk, fsync'd, before
//! the in-memory index reflects it. A WAL file is a flat sequence of
//! self-contained, checksummed records (see [`WalEntry`]) with no file
//! header and no version marker — per this spec, compatibility across a
//! given WAL file is by convention, not by an on-disk version tag.
//!
//! ```text
//! +---------------+---------------+-----+
//! |   WalEntry    |   WalEntry    | ... |
//! +---------------+---------------+-----+
//! ```
//!
//! [`WalWriter`] appends and fsyncs; [`WalReader`] replays sequentially and
//! stops cleanly at the first unreadable trailing record, which is the
//! expected shape of a crash mid-append.

mod entry;
mod reader;
mod writer;

pub use entry::WalEntry;
pub use reader::WalReader;
pub use writer::WalWriter;
