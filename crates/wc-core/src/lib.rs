//! Delimited text records and the storage collaborators built on them.
//!
//! Every piece of persisted Wordchain state (facts, session checkpoints,
//! player registries, high scores) is a named table of comma-delimited
//! [`Record`]s. The game and ranking engines only talk to a
//! [`RecordStore`]; whether the tables live in memory or in a directory of
//! `.csv` files is the caller's choice.

/// Directory-backed store: one `.csv` file per table.
pub mod dir;
/// Error types for record decoding and storage access.
pub mod error;
/// In-memory store used for tests and embedding.
pub mod memory;
/// The record type and its delimited text codec.
pub mod record;
/// The storage collaborator trait and its keyed helpers.
pub mod store;

pub use dir::DirStore;
pub use error::{DecodeError, StoreError, StoreResult};
pub use memory::MemoryStore;
pub use record::Record;
pub use store::RecordStore;
