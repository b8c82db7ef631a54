//! The output collaborator and the events a session publishes.
//!
//! Event order is part of the protocol: for every draw the engine emits
//! [`Event::Committed`] before the human is asked for anything and the
//! matching reveal only after the answer is in.

use fd_core::{DiceSet, Die, ProbabilityMatrix};
use fd_fair::{GuessOutcome, Offer, ResolvedValue};

use crate::engine::{Roll, Score};
use crate::error::GameResult;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The human at the console.
    User,
    /// The computer counterpart.
    Computer,
}

/// The part of the game a request to the human belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The coin flip deciding who picks first.
    FirstMover,
    /// Choosing dice.
    Selection,
    /// The roll of one side's die.
    Roll(Side),
}

/// Something the session wants shown to the human.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// A commitment was published. Only the digest is public.
    Committed {
        /// The draw this commitment is for.
        stage: Stage,
        /// Range and digest.
        offer: &'a Offer,
    },
    /// The coin flip was revealed.
    GuessRevealed {
        /// Disclosed number, key, and the human's guess.
        outcome: &'a GuessOutcome,
        /// Who picks first as a result.
        first: Side,
    },
    /// The dice the human may choose from.
    DieOptions {
        /// Available dice, in id order.
        dice: &'a [&'a Die],
    },
    /// A side picked its die.
    DieChosen {
        /// Who picked.
        side: Side,
        /// The picked die.
        die: &'a Die,
    },
    /// The human asked for the probability table.
    Help {
        /// All dice in the game.
        dice: &'a DiceSet,
        /// Pairwise win probabilities.
        matrix: &'a ProbabilityMatrix,
    },
    /// A roll was revealed and mapped to a face.
    RollRevealed {
        /// Whose die was rolled.
        side: Side,
        /// Disclosed number, key, contribution, and modular result.
        value: &'a ResolvedValue,
        /// The face that came up.
        roll: &'a Roll,
    },
    /// The game is over.
    Finished(&'a Score),
}

/// Renders events for the human.
pub trait OutputSink {
    /// Show one event.
    fn emit(&mut self, event: &Event<'_>) -> GameResult<()>;
}
