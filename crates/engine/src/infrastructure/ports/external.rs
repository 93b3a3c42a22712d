//! External service port traits.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::error::RandomNumberError;

/// Source of raw random integers (the upstream random-number service).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RandomNumberPort: Send + Sync {
    /// Fetch one random integer. The value is not range-checked.
    async fn random_number(&self, cancel: &CancellationToken) -> Result<i64, RandomNumberError>;
}
