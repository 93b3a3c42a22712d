//! Application state and composition.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::infrastructure::{
    app_settings::AppSettings,
    clock::SystemRandom,
    ports::{PlayResultRepo, RandomNumberPort, RandomPort},
};
use crate::use_cases::{
    choices::RandomChoiceProvider,
    game::{LatestResults, PlayGame, ResetResults},
    ChoiceUseCases, GameUseCases,
};

/// Main application state.
///
/// Holds all use cases and the process shutdown token.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    shutdown: CancellationToken,
}

/// Container for all use cases.
pub struct UseCases {
    pub game: GameUseCases,
    pub choices: ChoiceUseCases,
}

impl App {
    /// Create a new App with all dependencies wired.
    pub fn new(
        settings: &AppSettings,
        random_numbers: Arc<dyn RandomNumberPort>,
        play_results: Arc<dyn PlayResultRepo>,
        shutdown: CancellationToken,
    ) -> Self {
        Self::with_fallback(
            settings,
            random_numbers,
            Arc::new(SystemRandom::new()),
            play_results,
            shutdown,
        )
    }

    /// Like `new`, with an explicit local generator for the opponent fallback.
    pub fn with_fallback(
        settings: &AppSettings,
        random_numbers: Arc<dyn RandomNumberPort>,
        fallback: Arc<dyn RandomPort>,
        play_results: Arc<dyn PlayResultRepo>,
        shutdown: CancellationToken,
    ) -> Self {
        let provider = Arc::new(RandomChoiceProvider::new(random_numbers, fallback));

        let game = GameUseCases::new(
            Arc::new(PlayGame::new(provider.clone(), play_results.clone())),
            Arc::new(ResetResults::new(play_results.clone())),
            Arc::new(LatestResults::new(
                play_results,
                settings.latest_results_count,
            )),
        );
        let choices = ChoiceUseCases::new(provider);

        Self {
            use_cases: UseCases { game, choices },
            shutdown,
        }
    }

    /// Token for one inbound request: cancelled on shutdown, or by its owner
    /// when the request goes away.
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}
