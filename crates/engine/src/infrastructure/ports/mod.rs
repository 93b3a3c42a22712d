//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Scoreboard storage (could swap SQLite -> Postgres)
//! - The upstream random-number service
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;

pub use error::{Cancelled, RandomNumberError, RepoError};
pub use external::RandomNumberPort;
pub use repos::PlayResultRepo;
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use external::MockRandomNumberPort;
#[cfg(test)]
pub use repos::MockPlayResultRepo;
#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};
