//! Game operation errors.

use crate::infrastructure::ports::{Cancelled, RepoError};

/// Failures that end a game operation outright.
///
/// Business failures (unknown user, nothing deleted) are not errors; they
/// travel in `OperationResult`.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Operation cancelled")]
    Cancelled,
    #[error("Storage error: {0}")]
    Storage(RepoError),
}

impl From<RepoError> for GameError {
    fn from(error: RepoError) -> Self {
        match error {
            RepoError::Cancelled => GameError::Cancelled,
            other => GameError::Storage(other),
        }
    }
}

impl From<Cancelled> for GameError {
    fn from(_: Cancelled) -> Self {
        GameError::Cancelled
    }
}
