//! Reset results use case.
//!
//! Clears the whole scoreboard, or one user's entries.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::infrastructure::ports::PlayResultRepo;

use super::error::GameError;
use super::types::{ApplicationError, OperationResult};

pub const USERNAME_NOT_FOUND: &str = "Username not found";
pub const UNABLE_TO_DELETE: &str = "Unable to delete all results";

pub struct ResetResults {
    play_results: Arc<dyn PlayResultRepo>,
}

impl ResetResults {
    pub fn new(play_results: Arc<dyn PlayResultRepo>) -> Self {
        Self { play_results }
    }

    /// Delete results for `username`, or all results when it is absent or empty.
    ///
    /// # Returns
    /// * success - at least one result was deleted
    /// * `NotFound` - the user has no results; nothing is deleted
    /// * `UnprocessableEntity` - the delete removed nothing
    pub async fn execute(
        &self,
        username: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<OperationResult<()>, GameError> {
        match username.filter(|name| !name.is_empty()) {
            Some(username) => self.reset_for_user(username, cancel).await,
            None => self.reset_all(cancel).await,
        }
    }

    async fn reset_all(&self, cancel: &CancellationToken) -> Result<OperationResult<()>, GameError> {
        tracing::info!("Resetting all results");

        if self.play_results.delete_all(cancel).await? {
            return Ok(OperationResult::success(()));
        }

        tracing::error!("Error happened while trying to delete all results");
        Ok(OperationResult::failure(ApplicationError::unprocessable(
            UNABLE_TO_DELETE,
        )))
    }

    // A concurrent delete between the lookup and the delete surfaces as
    // UnprocessableEntity.
    async fn reset_for_user(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> Result<OperationResult<()>, GameError> {
        tracing::info!(username = %username, "Resetting results for user");

        let existing = self.play_results.list_for_user(username, cancel).await?;
        if existing.is_empty() {
            return Ok(OperationResult::failure(ApplicationError::not_found(
                USERNAME_NOT_FOUND,
            )));
        }

        if self.play_results.delete_for_user(username, cancel).await? {
            return Ok(OperationResult::success(()));
        }

        tracing::error!(
            username = %username,
            "Error happened while trying to delete results for user"
        );
        Ok(OperationResult::failure(ApplicationError::unprocessable(
            UNABLE_TO_DELETE,
        )))
    }
}
