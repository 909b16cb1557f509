//! Result of a finished game.

use crate::types::Player;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Outcome of a finished game.
///
/// The textual form is exactly `"X"`, `"O"` or `"draw"`, which is also how
/// outcomes travel over the wire and sit in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Outcome {
    /// Player completed a line.
    Winner(Player),
    /// Board filled without a line.
    Draw,
}

impl Outcome {
    /// Every outcome, in the order `X`, `O`, `draw`.
    pub const ALL: [Outcome; 3] = [
        Outcome::Winner(Player::X),
        Outcome::Winner(Player::O),
        Outcome::Draw,
    ];

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }

    /// The canonical literal: `"X"`, `"O"` or `"draw"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Winner(Player::X) => "X",
            Outcome::Winner(Player::O) => "O",
            Outcome::Draw => "draw",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A literal that is not `"X"`, `"O"` or `"draw"`.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid winner '{}': expected \"X\", \"O\" or \"draw\"", value)]
pub struct ParseOutcomeError {
    value: String,
}

impl ParseOutcomeError {
    /// The rejected literal.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" => Ok(Outcome::Winner(Player::X)),
            "O" => Ok(Outcome::Winner(Player::O)),
            "draw" => Ok(Outcome::Draw),
            other => Err(ParseOutcomeError {
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Outcome {
    type Error = ParseOutcomeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Outcome> for String {
    fn from(outcome: Outcome) -> Self {
        outcome.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_are_exact() {
        assert_eq!("X".parse::<Outcome>(), Ok(Outcome::Winner(Player::X)));
        assert_eq!("O".parse::<Outcome>(), Ok(Outcome::Winner(Player::O)));
        assert_eq!("draw".parse::<Outcome>(), Ok(Outcome::Draw));
    }

    #[test]
    fn test_near_misses_are_rejected() {
        for bad in ["x", "o", "Draw", "DRAW", "", " X", "tie"] {
            let err = bad.parse::<Outcome>().unwrap_err();
            assert_eq!(err.value(), bad);
        }
    }

    #[test]
    fn test_json_form_is_the_literal() {
        let json = serde_json::to_string(&Outcome::Draw).unwrap();
        assert_eq!(json, "\"draw\"");
        let parsed: Outcome = serde_json::from_str("\"O\"").unwrap();
        assert_eq!(parsed, Outcome::Winner(Player::O));
        assert!(serde_json::from_str::<Outcome>("\"nobody\"").is_err());
    }
}
