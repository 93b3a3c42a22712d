//! Game outcome from the player's perspective.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

impl Outcome {
    /// Text form used in storage and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Win => "Win",
            Outcome::Lose => "Lose",
            Outcome::Tie => "Tie",
        }
    }

    /// The same game seen from the opponent's side.
    pub fn reversed(self) -> Self {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Tie => Outcome::Tie,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Win" => Ok(Outcome::Win),
            "Lose" => Ok(Outcome::Lose),
            "Tie" => Ok(Outcome::Tie),
            other => Err(DomainError::parse(format!("Unknown outcome: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form_round_trips_through_from_str() {
        for outcome in [Outcome::Win, Outcome::Lose, Outcome::Tie] {
            assert_eq!(outcome.as_str().parse::<Outcome>().unwrap(), outcome);
        }
        assert!("win".parse::<Outcome>().is_err());
    }

    #[test]
    fn serializes_as_plain_label() {
        assert_eq!(serde_json::to_string(&Outcome::Lose).unwrap(), "\"Lose\"");
    }
}
