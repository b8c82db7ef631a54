//! Provably fair random draws between two parties.
//!
//! The committing party draws a secret number, publishes an HMAC of it under
//! a fresh key, and only reveals number and key once the other party's
//! contribution is fixed. Neither side can steer the combined result:
//!
//! 1. [`Commitment::draw`] picks `number` uniformly from `[0, range)`.
//! 2. The [`Contributor`] sees only the [`Offer`] (range and digest).
//! 3. The [`Reveal`] discloses `number` and key; anyone can
//!    [`verify`](Reveal::verify) it against the published digest.

/// Secret numbers, keys, digests, and reveals.
pub mod commitment;
/// Sources of randomness.
pub mod entropy;
/// Error types for the fair-draw protocol.
pub mod error;
/// The two-phase commit/reveal exchange.
pub mod resolver;

/// Re-export commitment types.
pub use commitment::{Commitment, Digest, KEY_LEN, Reveal, SecretKey, compute_digest};
/// Re-export entropy types.
pub use entropy::{Entropy, EntropySource, OsEntropy, SeededEntropy, uniform_below};
/// Re-export error types.
pub use error::{FairError, FairResult};
/// Re-export resolver types.
pub use resolver::{
    Contributor, FairResolver, GuessOutcome, Offer, Purpose, Reply, Resolution, ResolvedValue,
    combine,
};
