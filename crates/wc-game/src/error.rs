//! Error types for the game engine.

use thiserror::Error;

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that can occur while loading facts or running a session.
#[derive(Debug, Error)]
pub enum GameError {
    /// A fact source is missing, unreadable, or malformed.
    #[error("invalid fact source \"{table}\": {reason}")]
    InvalidSource {
        /// Table the facts were read from.
        table: String,
        /// Why the source was rejected.
        reason: String,
    },

    /// An answer was submitted while no prompt was on the board.
    #[error("no active prompt")]
    NoActivePrompt,

    /// `advance` was called before an answer was submitted.
    #[error("no answer to advance from")]
    NotAnswered,

    /// A persisted session record could not be decoded.
    #[error("malformed session record: {0}")]
    MalformedRecord(String),

    /// The storage collaborator failed.
    #[error(transparent)]
    Store(#[from] wc_core::StoreError),
}
