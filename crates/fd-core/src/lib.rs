//! Core types for fairdice: dice, dice sets, and win probabilities.
//!
//! This crate knows nothing about randomness or the interactive game. It
//! turns command-line dice specifications into a validated [`DiceSet`] and
//! answers "how often does this die beat that one" for the help table.

pub mod die;
/// Error types for dice configuration.
pub mod error;
pub mod probability;

/// Re-export dice types.
pub use die::{DiceSet, Die, DieId, FACES, MIN_DICE};
/// Re-export error types.
pub use error::{ConfigError, ConfigResult};
/// Re-export probability types.
pub use probability::{Cell, Odds, ProbabilityMatrix, tie_probability, win_probability};
