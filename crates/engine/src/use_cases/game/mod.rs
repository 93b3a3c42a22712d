//! Game use cases.
//!
//! Handles playing against the computer and managing the scoreboard:
//! - Playing a round and recording the result
//! - Resetting results (all, or for one user)
//! - Listing the latest results

mod error;
mod latest_results;
mod play;
mod reset_results;
mod types;

use std::sync::Arc;

pub use error::GameError;
pub use latest_results::LatestResults;
pub use play::PlayGame;
pub use reset_results::{ResetResults, UNABLE_TO_DELETE, USERNAME_NOT_FOUND};
pub use types::{ApplicationError, ApplicationErrorKind, OperationResult, PlayOutcome};

/// Container for game use cases.
pub struct GameUseCases {
    pub play: Arc<PlayGame>,
    pub reset: Arc<ResetResults>,
    pub latest: Arc<LatestResults>,
}

impl GameUseCases {
    pub fn new(play: Arc<PlayGame>, reset: Arc<ResetResults>, latest: Arc<LatestResults>) -> Self {
        Self {
            play,
            reset,
            latest,
        }
    }
}
