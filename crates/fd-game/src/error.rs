//! Error types for the game engine.

use fd_core::DieId;
use fd_fair::FairError;
use thiserror::Error;

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that end a game session.
///
/// A user abort is not among them: it surfaces as
/// [`GameOutcome::Aborted`](crate::GameOutcome::Aborted).
#[derive(Debug, Error)]
pub enum GameError {
    /// A die was chosen that is not available to the chooser.
    #[error("die {0} is not available: choose a die nobody has taken")]
    IllegalChoice(DieId),

    /// There was no die left to pick from.
    #[error("no dice left to choose from")]
    NoDieAvailable,

    /// A step ran before the state it depends on was set.
    #[error("game step out of order: {0}")]
    OutOfOrder(&'static str),

    /// A fair draw failed, including reveals that do not verify.
    #[error(transparent)]
    Fair(#[from] FairError),

    /// The console could not be read or written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl GameError {
    /// True if a revealed commitment failed verification.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::Fair(e) if e.is_protocol_violation())
    }
}
