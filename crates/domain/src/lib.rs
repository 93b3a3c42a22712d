//! RPSSL Domain - choices, outcomes, the rule table and stored results.
//!
//! Pure types and functions only. No I/O, no randomness.

pub mod choice;
pub mod error;
pub mod outcome;
pub mod play_record;
pub mod rules;

pub use choice::Choice;
pub use error::DomainError;
pub use outcome::Outcome;
pub use play_record::PlayRecord;
