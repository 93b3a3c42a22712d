//! Repository port traits.

use async_trait::async_trait;
use rpssl_domain::{Outcome, PlayRecord};
use tokio_util::sync::CancellationToken;

use super::error::RepoError;

/// Scoreboard storage.
///
/// Every operation is all-or-nothing from the caller's point of view: the
/// boolean results report whether rows were affected, errors are reserved
/// for failures that survived the retry budget.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayResultRepo: Send + Sync {
    /// Record one play. Returns true iff exactly one row was inserted.
    async fn save(
        &self,
        username: &str,
        outcome: Outcome,
        cancel: &CancellationToken,
    ) -> Result<bool, RepoError>;

    /// Remove every stored result. Returns true iff at least one row was removed.
    async fn delete_all(&self, cancel: &CancellationToken) -> Result<bool, RepoError>;

    /// Remove the results of one user. Returns true iff at least one row was removed.
    async fn delete_for_user(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, RepoError>;

    /// Most recent results first, at most `count` entries.
    async fn list_latest(
        &self,
        count: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<PlayRecord>, RepoError>;

    /// All results of one user, in no particular order.
    async fn list_for_user(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<PlayRecord>, RepoError>;
}
