//! Error types for the fair-draw protocol.

use thiserror::Error;

/// Result type for fair-draw operations.
pub type FairResult<T> = Result<T, FairError>;

/// Errors raised while drawing, committing, or revealing.
#[derive(Debug, Error)]
pub enum FairError {
    /// The secure entropy source could not produce bytes.
    #[error("secure entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    /// A draw was requested over fewer than two outcomes.
    #[error("invalid range {0}: a fair draw needs at least 2 outcomes")]
    InvalidRange(u32),

    /// The counterpart supplied a contribution outside `[0, range)`.
    #[error("contribution {value} is outside 0..{range}")]
    ContributionOutOfRange {
        /// The supplied value.
        value: u32,
        /// The draw's range.
        range: u32,
    },

    /// A revealed number and key do not reproduce the published digest.
    #[error("protocol violation: revealed number {number} does not match commitment {digest}")]
    ProtocolViolation {
        /// The revealed number.
        number: u32,
        /// The digest that was published before the reveal.
        digest: String,
    },
}

impl FairError {
    /// True for a failed reveal check, as opposed to operational failures.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::ProtocolViolation { .. })
    }
}
