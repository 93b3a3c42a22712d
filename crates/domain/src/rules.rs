//! Game rules.
//!
//! The beats relation is kept as data: a fixed table indexed by
//! [`Choice::ordinal`]. Each choice defeats exactly two others and loses to
//! the remaining two, which makes the relation antisymmetric and total over
//! distinct pairs.

use crate::choice::Choice;
use crate::outcome::Outcome;

/// Choices defeated by each choice, indexed by ordinal.
pub const BEATS: [[Choice; 2]; 5] = [
    // Rock
    [Choice::Lizard, Choice::Scissors],
    // Paper
    [Choice::Rock, Choice::Spock],
    // Scissors
    [Choice::Lizard, Choice::Paper],
    // Lizard
    [Choice::Paper, Choice::Spock],
    // Spock
    [Choice::Rock, Choice::Scissors],
];

/// The two choices `choice` defeats.
pub fn beaten_by(choice: Choice) -> &'static [Choice; 2] {
    &BEATS[choice.ordinal()]
}

/// Whether `attacker` defeats `defender`.
pub fn beats(attacker: Choice, defender: Choice) -> bool {
    beaten_by(attacker).contains(&defender)
}

/// Evaluate a game from the player's perspective.
pub fn evaluate(player: Choice, opponent: Choice) -> Outcome {
    if player == opponent {
        Outcome::Tie
    } else if beats(player, opponent) {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}
