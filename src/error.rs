use thiserror::Error;

use crate::models::ValidationError;
use crate::store::StoreChange;

/// Errors that can occur while reading or writing tracker state
/// These are system-level errors (I/O, encoding), not validation failures
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error for key '{key}': {reason}")]
    Storage { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors returned by store mutations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The submission was rejected; the store is unchanged
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The in-memory change was applied but the snapshot could not be written
    #[error("Could not save transactions: {source}")]
    Persist {
        change: StoreChange,
        #[source]
        source: TrackerError,
    },
}
