//! Persisted result of a single game.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::outcome::Outcome;

/// A stored game result. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub username: String,
    pub played_at: DateTime<Utc>,
    pub outcome: Outcome,
}

impl PlayRecord {
    pub fn new(
        username: impl Into<String>,
        played_at: DateTime<Utc>,
        outcome: Outcome,
    ) -> Result<Self, DomainError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(DomainError::validation("Username cannot be empty"));
        }
        Ok(Self {
            username,
            played_at,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_username() {
        assert!(PlayRecord::new("  ", Utc::now(), Outcome::Win).is_err());
        assert!(PlayRecord::new("alice", Utc::now(), Outcome::Win).is_ok());
    }
}
