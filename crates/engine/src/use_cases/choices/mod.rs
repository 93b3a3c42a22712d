//! Choice use cases.
//!
//! Lists the playable choices and draws the computer's move.

use std::sync::Arc;

use rpssl_domain::Choice;
use tokio_util::sync::CancellationToken;

use crate::infrastructure::ports::{Cancelled, RandomNumberError, RandomNumberPort, RandomPort};

/// Container for choice use cases.
pub struct ChoiceUseCases {
    pub catalog: Arc<ChoiceCatalog>,
}

impl ChoiceUseCases {
    pub fn new(provider: Arc<RandomChoiceProvider>) -> Self {
        Self {
            catalog: Arc::new(ChoiceCatalog::new(provider)),
        }
    }
}

// =============================================================================
// Random Choice
// =============================================================================

/// Draws a choice from the upstream random-number service.
///
/// Never fails except through cancellation: when the upstream is unusable
/// the local generator supplies the raw number instead.
pub struct RandomChoiceProvider {
    random_numbers: Arc<dyn RandomNumberPort>,
    fallback: Arc<dyn RandomPort>,
}

impl RandomChoiceProvider {
    pub fn new(random_numbers: Arc<dyn RandomNumberPort>, fallback: Arc<dyn RandomPort>) -> Self {
        Self {
            random_numbers,
            fallback,
        }
    }

    pub async fn opponent_choice(&self, cancel: &CancellationToken) -> Result<Choice, Cancelled> {
        tracing::info!("Retrieving valid random choice");

        let raw = match self.random_numbers.random_number(cancel).await {
            Ok(raw) => raw,
            Err(RandomNumberError::Cancelled) => return Err(Cancelled),
            Err(e) => {
                let raw = i64::from(self.fallback.gen_range(1, Choice::COUNT as i32));
                tracing::warn!(
                    error = %e,
                    fallback = raw,
                    "Random number service unavailable, using local generator"
                );
                raw
            }
        };

        let choice = Choice::from_random_number(raw);
        tracing::debug!(raw, choice = %choice, "Resolved random choice");
        Ok(choice)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Read side of the choice set, as exposed over HTTP.
pub struct ChoiceCatalog {
    provider: Arc<RandomChoiceProvider>,
}

impl ChoiceCatalog {
    pub fn new(provider: Arc<RandomChoiceProvider>) -> Self {
        Self { provider }
    }

    /// All five choices in id order.
    pub fn list_choices(&self) -> Vec<Choice> {
        tracing::info!("Retrieving all choices");
        Choice::ALL.to_vec()
    }

    pub async fn random_choice(&self, cancel: &CancellationToken) -> Result<Choice, Cancelled> {
        self.provider.opponent_choice(cancel).await
    }
}
