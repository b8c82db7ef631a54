//! The two-phase commit/reveal exchange.
//!
//! The resolver is always the committing side. It publishes an [`Offer`],
//! waits for the [`Contributor`]'s reply, and only then reveals. A help or
//! abort reply ends the exchange with the commitment discarded unrevealed.

use tracing::debug;

use crate::commitment::{Commitment, Digest, Reveal};
use crate::entropy::EntropySource;
use crate::error::{FairError, FairResult};

/// What the counterpart is asked to do with an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// Guess the committed number; the draw is settled by equality.
    Guess,
    /// Add a number modulo the range; the sum is the result.
    Combine,
}

/// The public half of a commitment, handed to the counterpart before it
/// chooses. Carries no secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offer {
    /// How the reply will be used.
    pub purpose: Purpose,
    /// Replies must lie in `[0, range)`.
    pub range: u32,
    /// The published digest.
    pub digest: Digest,
}

/// A participant's answer to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply<T> {
    /// A concrete answer.
    Value(T),
    /// The participant wants the probability table before answering.
    Help,
    /// The participant ends the session.
    Abort,
}

impl<T> Reply<T> {
    /// Transform the value, keeping `Help` and `Abort` as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        match self {
            Self::Value(v) => Reply::Value(f(v)),
            Self::Help => Reply::Help,
            Self::Abort => Reply::Abort,
        }
    }
}

/// The side of a draw that answers a published commitment.
pub trait Contributor {
    /// Failure type of the contributor; protocol failures must convert
    /// into it.
    type Error: From<FairError>;

    /// Answer `offer` with a number in `[0, offer.range)`, or a signal.
    fn contribute(&mut self, offer: &Offer) -> Result<Reply<u32>, Self::Error>;
}

impl<C: Contributor + ?Sized> Contributor for &mut C {
    type Error = C::Error;

    fn contribute(&mut self, offer: &Offer) -> Result<Reply<u32>, Self::Error> {
        (**self).contribute(offer)
    }
}

/// How an exchange ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// Both sides took part and the secret was revealed.
    Done(T),
    /// The counterpart asked for help; nothing was revealed.
    Help,
    /// The counterpart aborted; nothing was revealed.
    Abort,
}

/// A finished modular-combine draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    /// The digest published before the contribution.
    pub digest: Digest,
    /// The disclosed number and key.
    pub reveal: Reveal,
    /// The counterpart's contribution.
    pub contribution: u32,
    /// `(number + contribution) mod range`.
    pub result: u32,
}

impl ResolvedValue {
    /// Audit the draw: the reveal must match the digest and the result must
    /// be the modular sum.
    pub fn verify(&self) -> FairResult<()> {
        self.reveal.verify(&self.digest)?;
        if combine(self.reveal.number, self.contribution, self.reveal.range) != self.result {
            return Err(FairError::ProtocolViolation {
                number: self.reveal.number,
                digest: self.digest.to_string(),
            });
        }
        Ok(())
    }
}

/// A finished guess-the-number draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    /// The digest published before the guess.
    pub digest: Digest,
    /// The disclosed number and key.
    pub reveal: Reveal,
    /// The counterpart's guess.
    pub guess: u32,
}

impl GuessOutcome {
    /// True if the guess equals the committed number.
    pub fn correct(&self) -> bool {
        self.guess == self.reveal.number
    }

    /// Audit the reveal against the published digest.
    pub fn verify(&self) -> FairResult<()> {
        self.reveal.verify(&self.digest)
    }
}

/// `(number + contribution) mod range`, computed without overflow.
///
/// # Panics
///
/// Panics if `range` is zero.
pub fn combine(number: u32, contribution: u32, range: u32) -> u32 {
    let sum = u64::from(number) + u64::from(contribution);
    // the remainder is below range, so it fits in u32
    (sum % u64::from(range)) as u32
}

/// Runs commit/reveal exchanges as the committing side.
#[derive(Debug)]
pub struct FairResolver<E> {
    entropy: E,
}

impl<E: EntropySource> FairResolver<E> {
    /// Create a resolver drawing from `entropy`.
    pub fn new(entropy: E) -> Self {
        Self { entropy }
    }

    /// Draw a fair value in `[0, range)` jointly with `contributor`.
    ///
    /// The contributor sees the digest before it answers and the number and
    /// key only afterwards, inside the returned [`ResolvedValue`].
    pub fn resolve_random<C: Contributor + ?Sized>(
        &mut self,
        range: u32,
        contributor: &mut C,
    ) -> Result<Resolution<ResolvedValue>, C::Error> {
        let commitment = Commitment::draw(&mut self.entropy, range)?;
        let offer = Offer {
            purpose: Purpose::Combine,
            range,
            digest: commitment.digest(),
        };
        debug!(range, digest = %offer.digest, "published commitment");

        let contribution = match contributor.contribute(&offer)? {
            Reply::Value(v) => v,
            Reply::Help => {
                debug!("help requested, commitment discarded");
                return Ok(Resolution::Help);
            }
            Reply::Abort => return Ok(Resolution::Abort),
        };
        if contribution >= range {
            return Err(FairError::ContributionOutOfRange {
                value: contribution,
                range,
            }
            .into());
        }

        let reveal = commitment.reveal();
        let result = combine(reveal.number, contribution, range);
        debug!(
            number = reveal.number,
            key = %reveal.key,
            contribution,
            result,
            "revealed commitment"
        );
        Ok(Resolution::Done(ResolvedValue {
            digest: offer.digest,
            reveal,
            contribution,
            result,
        }))
    }

    /// Commit to a bit and let `contributor` guess it.
    pub fn resolve_guess<C: Contributor + ?Sized>(
        &mut self,
        contributor: &mut C,
    ) -> Result<Resolution<GuessOutcome>, C::Error> {
        let commitment = Commitment::draw(&mut self.entropy, 2)?;
        let offer = Offer {
            purpose: Purpose::Guess,
            range: 2,
            digest: commitment.digest(),
        };
        debug!(digest = %offer.digest, "published guess commitment");

        let guess = match contributor.contribute(&offer)? {
            Reply::Value(v) => v,
            Reply::Help => return Ok(Resolution::Help),
            Reply::Abort => return Ok(Resolution::Abort),
        };
        if guess >= 2 {
            return Err(FairError::ContributionOutOfRange {
                value: guess,
                range: 2,
            }
            .into());
        }

        let reveal = commitment.reveal();
        debug!(number = reveal.number, key = %reveal.key, guess, "revealed guess commitment");
        Ok(Resolution::Done(GuessOutcome {
            digest: offer.digest,
            reveal,
            guess,
        }))
    }
}
