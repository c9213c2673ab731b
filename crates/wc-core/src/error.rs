use std::io;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// A delimited text document could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {reason}")]
pub struct DecodeError {
    /// 1-based line on which the offending record starts.
    pub line: usize,
    /// What went wrong.
    pub reason: String,
}

/// Errors raised by a [`RecordStore`](crate::RecordStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing medium failed (missing permissions, disk full, ...).
    #[error("I/O error on table \"{table}\": {source}")]
    Io {
        /// Table being read or written.
        table: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The table exists but its contents are not valid delimited text.
    #[error("malformed table \"{table}\" at {source}")]
    Malformed {
        /// Table being read.
        table: String,
        /// Location and cause of the decoding failure.
        #[source]
        source: DecodeError,
    },

    /// The table name cannot be mapped onto the backing medium.
    #[error("invalid table name: \"{0}\"")]
    InvalidTable(String),
}
