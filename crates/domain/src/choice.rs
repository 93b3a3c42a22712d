//! Game moves.
//!
//! The set of choices is closed: five moves with stable identifiers `1..=5`.
//! Identifiers are part of the wire contract and of the normalization formula
//! used for upstream random numbers, so the ordering below must not change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One of the five fixed game moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Rock = 1,
    Paper = 2,
    Scissors = 3,
    Lizard = 4,
    Spock = 5,
}

impl Choice {
    /// All choices in identifier order.
    pub const ALL: [Choice; 5] = [
        Choice::Rock,
        Choice::Paper,
        Choice::Scissors,
        Choice::Lizard,
        Choice::Spock,
    ];

    /// Number of choices in the closed set.
    pub const COUNT: i64 = Self::ALL.len() as i64;

    /// Stable identifier (starting at 1).
    pub fn id(self) -> i32 {
        self as i32
    }

    /// Zero-based position, used to index static tables.
    pub fn ordinal(self) -> usize {
        self as usize - 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Choice::Rock => "Rock",
            Choice::Paper => "Paper",
            Choice::Scissors => "Scissors",
            Choice::Lizard => "Lizard",
            Choice::Spock => "Spock",
        }
    }

    /// Look up a choice by its identifier.
    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.id() == id)
    }

    /// Map an arbitrary random integer onto the closed set.
    ///
    /// `id = (raw mod 5) + 1`. The reduction is Euclidean so negative inputs
    /// still produce a valid identifier; for non-negative input this is the
    /// plain modulo.
    pub fn from_random_number(raw: i64) -> Self {
        let id = raw.rem_euclid(Self::COUNT) + 1;
        Self::ALL[(id - 1) as usize]
    }
}

impl TryFrom<i32> for Choice {
    type Error = DomainError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or_else(|| {
            DomainError::validation(format!(
                "Move not valid. It has to be one of the possible choices (got {id})"
            ))
        })
    }
}

impl From<Choice> for i32 {
    fn from(choice: Choice) -> Self {
        choice.id()
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Choice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::parse(format!("Unknown choice: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_follow_declaration_order() {
        let ids: Vec<i32> = Choice::ALL.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(Choice::Rock.ordinal(), 0);
        assert_eq!(Choice::Spock.ordinal(), 4);
    }

    #[test]
    fn try_from_rejects_ids_outside_the_set() {
        assert_eq!(Choice::try_from(3).unwrap(), Choice::Scissors);
        assert!(Choice::try_from(0).is_err());
        assert!(Choice::try_from(6).is_err());
        assert!(Choice::try_from(-1).is_err());
    }

    #[test]
    fn random_number_normalization_is_modulo_plus_one() {
        assert_eq!(Choice::from_random_number(7).id(), 3);
        assert_eq!(Choice::from_random_number(2).id(), 3);
        assert_eq!(Choice::from_random_number(0), Choice::Rock);
        assert_eq!(Choice::from_random_number(4), Choice::Spock);
        assert_eq!(Choice::from_random_number(5), Choice::Rock);

        for raw in 0..100i64 {
            assert_eq!(i64::from(Choice::from_random_number(raw).id()), raw % 5 + 1);
        }
    }

    #[test]
    fn random_number_normalization_handles_negative_input() {
        assert_eq!(Choice::from_random_number(-1), Choice::Spock);
        assert_eq!(Choice::from_random_number(-5), Choice::Rock);
        assert_eq!(Choice::from_random_number(i64::MIN).id(), 3);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("spock".parse::<Choice>().unwrap(), Choice::Spock);
        assert_eq!(" Lizard ".parse::<Choice>().unwrap(), Choice::Lizard);
        assert!("well".parse::<Choice>().is_err());
    }
}
