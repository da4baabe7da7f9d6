//! Shared types and error taxonomy for the kvengine workspace.
//!
//! This crate is intentionally small: it holds only what `kvengine-storage`,
//! `kvengine-server`, and `kvengine-client` all need to agree on, following
//! the same split the teacher's workspace uses between its `-core` crate and
//! its `-storage`/`-server`/`-client` crates.

mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Key, StatsSnapshot, SyncMode, Value};
