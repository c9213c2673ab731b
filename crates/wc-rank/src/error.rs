//! Error types for the ranking engine.

use thiserror::Error;

/// Result type for ranking operations.
pub type RankResult<T> = Result<T, RankError>;

/// Errors that can occur while persisting the leaderboard.
#[derive(Debug, Error)]
pub enum RankError {
    /// The storage collaborator failed.
    #[error(transparent)]
    Store(#[from] wc_core::StoreError),
}
