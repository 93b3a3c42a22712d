//! Latest results use case.

use std::sync::Arc;

use rpssl_domain::PlayRecord;
use tokio_util::sync::CancellationToken;

use crate::infrastructure::ports::PlayResultRepo;

use super::error::GameError;

/// Scoreboard page, most recent first. The page size is fixed at startup.
pub struct LatestResults {
    play_results: Arc<dyn PlayResultRepo>,
    count: u32,
}

impl LatestResults {
    pub fn new(play_results: Arc<dyn PlayResultRepo>, count: u32) -> Self {
        Self {
            play_results,
            count,
        }
    }

    pub async fn execute(&self, cancel: &CancellationToken) -> Result<Vec<PlayRecord>, GameError> {
        tracing::info!(count = self.count, "Fetching latest results");
        Ok(self.play_results.list_latest(self.count, cancel).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockPlayResultRepo, RepoError};
    use chrono::{TimeZone, Utc};
    use rpssl_domain::Outcome;

    #[tokio::test]
    async fn uses_configured_page_size() {
        let played_at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        let mut repo = MockPlayResultRepo::new();
        repo.expect_list_latest()
            .withf(|count, _| *count == 7)
            .times(1)
            .returning(move |_, _| {
                Ok(vec![PlayRecord::new("alice", played_at, Outcome::Tie).unwrap()])
            });

        let records = LatestResults::new(Arc::new(repo), 7)
            .execute(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].username, "alice");
    }

    #[tokio::test]
    async fn storage_errors_propagate() {
        let mut repo = MockPlayResultRepo::new();
        repo.expect_list_latest()
            .returning(|_, _| Err(RepoError::unavailable("list_latest", "pool timed out")));

        let result = LatestResults::new(Arc::new(repo), 10)
            .execute(&CancellationToken::new())
            .await;

        assert!(matches!(result, Err(GameError::Storage(_))));
    }
}
