//! Resilient random-number client with exponential backoff retry
//!
//! Wraps any RandomNumberPort implementation with a `RetryPolicy` to ride out
//! transient upstream failures (transport errors and 5xx responses).

use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::infrastructure::ports::{RandomNumberError, RandomNumberPort};
use crate::infrastructure::retry::RetryPolicy;

/// Wrapper that adds retry logic to any random-number client
pub struct ResilientRandomNumberClient {
    inner: Arc<dyn RandomNumberPort>,
    policy: RetryPolicy,
}

impl ResilientRandomNumberClient {
    pub fn new(inner: Arc<dyn RandomNumberPort>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl RandomNumberPort for ResilientRandomNumberClient {
    async fn random_number(&self, cancel: &CancellationToken) -> Result<i64, RandomNumberError> {
        self.policy
            .execute(
                "random_number",
                cancel,
                RandomNumberError::is_retryable,
                || self.inner.random_number(cancel),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::random_number_client::{test_server, HttpRandomNumberClient};
    use axum::http::StatusCode;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Mock client that fails a configurable number of times before succeeding
    struct FailingMockRandom {
        failures_remaining: AtomicU32,
        calls: AtomicU32,
        error: RandomNumberError,
    }

    impl FailingMockRandom {
        fn new(failure_count: u32, error: RandomNumberError) -> Self {
            Self {
                failures_remaining: AtomicU32::new(failure_count),
                calls: AtomicU32::new(0),
                error,
            }
        }
    }

    #[async_trait]
    impl RandomNumberPort for FailingMockRandom {
        async fn random_number(
            &self,
            _cancel: &CancellationToken,
        ) -> Result<i64, RandomNumberError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let remaining = self.failures_remaining.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
                Err(self.error.clone())
            } else {
                Ok(7)
            }
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::upstream().with_backoff_unit(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_success_on_first_try() {
        let mock = Arc::new(FailingMockRandom::new(0, RandomNumberError::ServerError(500)));
        let client = ResilientRandomNumberClient::new(mock.clone(), fast_policy());

        let result = client.random_number(&CancellationToken::new()).await;

        assert_eq!(result, Ok(7));
        assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_success_after_retries() {
        let mock = Arc::new(FailingMockRandom::new(
            2,
            RandomNumberError::RequestFailed("connection reset".into()),
        ));
        let client = ResilientRandomNumberClient::new(mock.clone(), fast_policy());

        let result = client.random_number(&CancellationToken::new()).await;

        assert_eq!(result, Ok(7));
        assert_eq!(mock.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_two_retries() {
        let mock = Arc::new(FailingMockRandom::new(10, RandomNumberError::ServerError(503)));
        let client = ResilientRandomNumberClient::new(mock.clone(), fast_policy());

        let result = client.random_number(&CancellationToken::new()).await;

        assert_eq!(result, Err(RandomNumberError::ServerError(503)));
        assert_eq!(mock.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_rejection_is_not_retried() {
        let mock = Arc::new(FailingMockRandom::new(10, RandomNumberError::Rejected(400)));
        let client = ResilientRandomNumberClient::new(mock.clone(), fast_policy());

        let result = client.random_number(&CancellationToken::new()).await;

        assert_eq!(result, Err(RandomNumberError::Rejected(400)));
        assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_against_real_http_upstream() {
        let upstream = test_server::spawn(vec![
            (StatusCode::SERVICE_UNAVAILABLE, ""),
            (StatusCode::BAD_GATEWAY, ""),
            (StatusCode::OK, r#"{"random_number": 12}"#),
        ])
        .await;
        let http = Arc::new(HttpRandomNumberClient::new(&upstream.base_url));
        let client = ResilientRandomNumberClient::new(http, fast_policy());

        let result = client.random_number(&CancellationToken::new()).await;

        assert_eq!(result, Ok(12));
        assert_eq!(upstream.hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_persistent_server_errors_hit_upstream_three_times() {
        let upstream = test_server::spawn(vec![(StatusCode::SERVICE_UNAVAILABLE, "")]).await;
        let http = Arc::new(HttpRandomNumberClient::new(&upstream.base_url));
        let client = ResilientRandomNumberClient::new(http, fast_policy());

        let result = client.random_number(&CancellationToken::new()).await;

        assert_eq!(result, Err(RandomNumberError::ServerError(503)));
        assert_eq!(upstream.hits.load(Ordering::SeqCst), 3);
    }
}
