/// Alias for `Result<T, ConfigError>`.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors in the dice specification given at startup.
///
/// All of these are fatal: the game never starts with a malformed dice set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Fewer dice than the game needs.
    #[error("provide at least {min} dice, got {found}")]
    TooFewDice {
        /// Minimum number of dice.
        min: usize,
        /// Number of dice supplied.
        found: usize,
    },

    /// A die does not have exactly six faces.
    #[error("die #{index} must have exactly {expected} values, got {found}")]
    WrongFaceCount {
        /// Position of the die on the command line.
        index: usize,
        /// Required face count.
        expected: usize,
        /// Faces actually supplied.
        found: usize,
    },

    /// A face value is not a base-10 integer.
    #[error("die #{index} contains a non-integer value: \"{token}\"")]
    InvalidFace {
        /// Position of the die on the command line.
        index: usize,
        /// The offending token.
        token: String,
    },
}
