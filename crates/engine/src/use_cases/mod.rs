//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod choices;
pub mod game;

pub use choices::ChoiceUseCases;
pub use game::GameUseCases;
