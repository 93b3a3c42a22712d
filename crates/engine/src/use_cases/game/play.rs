//! Play game use case.
//!
//! Draws the computer's move, scores it against the player's, and records
//! the result on the scoreboard.

use std::sync::Arc;

use rpssl_domain::{rules, Choice};
use tokio_util::sync::CancellationToken;

use crate::infrastructure::ports::PlayResultRepo;
use crate::use_cases::choices::RandomChoiceProvider;

use super::error::GameError;
use super::types::{OperationResult, PlayOutcome};

pub struct PlayGame {
    choices: Arc<RandomChoiceProvider>,
    play_results: Arc<dyn PlayResultRepo>,
}

impl PlayGame {
    pub fn new(choices: Arc<RandomChoiceProvider>, play_results: Arc<dyn PlayResultRepo>) -> Self {
        Self {
            choices,
            play_results,
        }
    }

    /// Play one round.
    ///
    /// The returned value is populated even when the result could not be
    /// saved; `succeeded` reports whether it was.
    pub async fn execute(
        &self,
        username: &str,
        player: Choice,
        cancel: &CancellationToken,
    ) -> Result<OperationResult<PlayOutcome>, GameError> {
        tracing::info!(username = %username, "Playing game for user");

        let opponent = self.choices.opponent_choice(cancel).await?;
        let outcome = rules::evaluate(player, opponent);

        tracing::info!(
            result = %outcome,
            player = %player,
            computer = %opponent,
            "Result of the game"
        );

        let saved = self.play_results.save(username, outcome, cancel).await?;
        if !saved {
            tracing::error!(username = %username, "Play result was not saved");
        }

        Ok(OperationResult::with_value(
            saved,
            PlayOutcome {
                outcome,
                player,
                opponent,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedRandom;
    use crate::infrastructure::ports::{MockPlayResultRepo, MockRandomNumberPort, RepoError};
    use rpssl_domain::Outcome;

    fn upstream_returning(raw: i64) -> Arc<RandomChoiceProvider> {
        let mut upstream = MockRandomNumberPort::new();
        upstream.expect_random_number().returning(move |_| Ok(raw));
        Arc::new(RandomChoiceProvider::new(
            Arc::new(upstream),
            Arc::new(FixedRandom(1)),
        ))
    }

    #[tokio::test]
    async fn rock_beats_scissors_and_is_saved() {
        let mut repo = MockPlayResultRepo::new();
        repo.expect_save()
            .withf(|username, outcome, _| {
                username.to_string() == "alice" && *outcome == Outcome::Win
            })
            .times(1)
            .returning(|_, _, _| Ok(true));

        // raw 2 -> Scissors
        let use_case = PlayGame::new(upstream_returning(2), Arc::new(repo));
        let result = use_case
            .execute("alice", Choice::Rock, &CancellationToken::new())
            .await
            .unwrap();

        assert!(result.succeeded);
        assert_eq!(
            result.value,
            Some(PlayOutcome {
                outcome: Outcome::Win,
                player: Choice::Rock,
                opponent: Choice::Scissors,
            })
        );
        assert_eq!(result.error, None);
    }

    #[tokio::test]
    async fn failed_save_still_returns_the_game() {
        let mut repo = MockPlayResultRepo::new();
        repo.expect_save()
            .withf(|_, outcome, _| *outcome == Outcome::Tie)
            .returning(|_, _, _| Ok(false));

        // raw 1 -> Paper
        let use_case = PlayGame::new(upstream_returning(1), Arc::new(repo));
        let result = use_case
            .execute("bob", Choice::Paper, &CancellationToken::new())
            .await
            .unwrap();

        assert!(!result.succeeded);
        let value = result.value.unwrap();
        assert_eq!(value.outcome, Outcome::Tie);
        assert_eq!(value.opponent, Choice::Paper);
    }

    #[tokio::test]
    async fn loss_is_recorded_as_lose() {
        let mut repo = MockPlayResultRepo::new();
        repo.expect_save()
            .withf(|_, outcome, _| *outcome == Outcome::Lose)
            .returning(|_, _, _| Ok(true));

        // raw 4 -> Spock vaporizes Rock
        let use_case = PlayGame::new(upstream_returning(4), Arc::new(repo));
        let result = use_case
            .execute("carol", Choice::Rock, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.value.map(|v| v.outcome), Some(Outcome::Lose));
    }

    #[tokio::test]
    async fn storage_failure_is_fatal() {
        let mut repo = MockPlayResultRepo::new();
        repo.expect_save()
            .returning(|_, _, _| Err(RepoError::unavailable("save", "database is locked")));

        let use_case = PlayGame::new(upstream_returning(0), Arc::new(repo));
        let result = use_case
            .execute("dave", Choice::Lizard, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(GameError::Storage(_))));
    }

    #[tokio::test]
    async fn cancellation_during_draw_skips_save() {
        let mut upstream = MockRandomNumberPort::new();
        upstream
            .expect_random_number()
            .returning(|_| Err(crate::infrastructure::ports::RandomNumberError::Cancelled));
        let provider = Arc::new(RandomChoiceProvider::new(
            Arc::new(upstream),
            Arc::new(FixedRandom(1)),
        ));

        let mut repo = MockPlayResultRepo::new();
        repo.expect_save().never();

        let use_case = PlayGame::new(provider, Arc::new(repo));
        let result = use_case
            .execute("erin", Choice::Spock, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(GameError::Cancelled)));
    }

    #[tokio::test]
    async fn cancelled_save_maps_to_cancelled() {
        let mut repo = MockPlayResultRepo::new();
        repo.expect_save()
            .returning(|_, _, _| Err(RepoError::Cancelled));

        let use_case = PlayGame::new(upstream_returning(3), Arc::new(repo));
        let result = use_case
            .execute("frank", Choice::Paper, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(GameError::Cancelled)));
    }
}
