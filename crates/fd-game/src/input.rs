//! The input collaborator: prompts, validated choices, and the shared
//! line parser.

use std::fmt;

use crate::error::GameResult;

/// A question put to the human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Guess the committed bit.
    Guess,
    /// Choose a die by id, `0..count`.
    ChooseDie {
        /// Number of dice in the game.
        count: usize,
    },
    /// Add a number modulo `range` to the committed one.
    Contribution {
        /// The draw's range.
        range: u32,
    },
}

impl Prompt {
    /// Exclusive upper bound for numeric answers.
    pub fn bound(&self) -> u32 {
        match self {
            Self::Guess => 2,
            Self::ChooseDie { count } => u32::try_from(*count).unwrap_or(u32::MAX),
            Self::Contribution { range } => *range,
        }
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guess => write!(f, "Guess my number (0 or 1)"),
            Self::ChooseDie { .. } => write!(f, "Choose your die"),
            Self::Contribution { range } => write!(f, "Add your number modulo {range}"),
        }
    }
}

/// A validated answer to a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// A number below the prompt's bound.
    Number(u32),
    /// Show the probability table, then ask again.
    Help,
    /// End the session.
    Abort,
}

/// Parse one line of input against an exclusive numeric bound.
///
/// Accepts `X`/`x` (abort), `?` (help), or a base-10 integer in
/// `[0, bound)`, ignoring surrounding whitespace. Anything else is `None`
/// and should be re-prompted.
pub fn parse_choice(line: &str, bound: u32) -> Option<Choice> {
    match line.trim() {
        "x" | "X" => Some(Choice::Abort),
        "?" => Some(Choice::Help),
        other => other
            .parse::<u32>()
            .ok()
            .filter(|n| *n < bound)
            .map(Choice::Number),
    }
}

/// Supplies the human player's answers.
///
/// Implementations own the retry loop: malformed input is reported and
/// asked again, never returned.
pub trait InputProvider {
    /// Block until a valid answer to `prompt` is available.
    fn read_choice(&mut self, prompt: &Prompt) -> GameResult<Choice>;
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn signals() {
        assert_eq!(parse_choice("x", 6), Some(Choice::Abort));
        assert_eq!(parse_choice(" X \n", 6), Some(Choice::Abort));
        assert_eq!(parse_choice("?", 6), Some(Choice::Help));
    }

    #[test]
    fn numbers_respect_bound() {
        assert_eq!(parse_choice("0", 2), Some(Choice::Number(0)));
        assert_eq!(parse_choice("1\n", 2), Some(Choice::Number(1)));
        assert_eq!(parse_choice("2", 2), None);
        assert_eq!(parse_choice("5", 6), Some(Choice::Number(5)));
        assert_eq!(parse_choice("6", 6), None);
    }

    #[test]
    fn garbage_is_rejected() {
        for line in ["", "abc", "-1", "1.5", "??", "xx", "0x1"] {
            assert_eq!(parse_choice(line, 6), None, "{line:?}");
        }
    }

    #[test]
    fn prompt_bounds_and_text() {
        assert_eq!(Prompt::Guess.bound(), 2);
        assert_eq!(Prompt::ChooseDie { count: 4 }.bound(), 4);
        assert_eq!(Prompt::Contribution { range: 6 }.bound(), 6);
        assert_eq!(
            Prompt::Contribution { range: 6 }.to_string(),
            "Add your number modulo 6"
        );
    }

    proptest! {
        #[test]
        fn every_in_range_number_parses(bound in 1u32..1000, n in 0u32..1000) {
            let parsed = parse_choice(&n.to_string(), bound);
            if n < bound {
                prop_assert_eq!(parsed, Some(Choice::Number(n)));
            } else {
                prop_assert_eq!(parsed, None);
            }
        }
    }
}
