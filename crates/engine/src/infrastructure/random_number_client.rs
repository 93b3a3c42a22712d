//! HTTP client for the upstream random-number service.
//!
//! `GET {base_url}/random` answers `{"random_number": <integer>}`. A single
//! call is made per invocation; retries live in `ResilientRandomNumberClient`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::infrastructure::ports::{RandomNumberError, RandomNumberPort};

/// Default upstream request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct HttpRandomNumberClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct RandomNumberBody {
    random_number: i64,
}

impl HttpRandomNumberClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self) -> Result<i64, RandomNumberError> {
        let response = self
            .client
            .get(format!("{}/random", self.base_url))
            .send()
            .await
            .map_err(|e| RandomNumberError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(RandomNumberError::ServerError(status.as_u16()));
        }
        if !status.is_success() {
            return Err(RandomNumberError::Rejected(status.as_u16()));
        }

        let body: RandomNumberBody = response
            .json()
            .await
            .map_err(|e| RandomNumberError::InvalidResponse(e.to_string()))?;

        Ok(body.random_number)
    }
}

#[async_trait]
impl RandomNumberPort for HttpRandomNumberClient {
    async fn random_number(&self, cancel: &CancellationToken) -> Result<i64, RandomNumberError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RandomNumberError::Cancelled),
            result = self.fetch() => result,
        }
    }
}
