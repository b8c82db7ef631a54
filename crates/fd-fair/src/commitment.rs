//! Secret numbers, keys, digests, and reveals.
//!
//! Digest encoding: `HMAC-SHA3-256(key, ascii_decimal(number))`, e.g. the
//! number 4 is MACed as the single byte `b"4"`. Keys are 32 random bytes.
//! Keys and digests are shown as lowercase hex.

use std::fmt;

use hmac::digest::Key;
use hmac::{Hmac, Mac};
use sha3::Sha3_256;

use crate::entropy::{EntropySource, uniform_below};
use crate::error::{FairError, FairResult};

type HmacSha3 = Hmac<Sha3_256>;

/// Length of a commitment key in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// The HMAC key behind one commitment.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Draw a fresh key from `source`.
    pub fn random<E: EntropySource + ?Sized>(source: &mut E) -> FairResult<Self> {
        let mut bytes = [0u8; KEY_LEN];
        source.fill_bytes(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(..)")
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// The public HMAC digest that binds the committing side to its number.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

fn keyed_mac(key: &SecretKey, number: u32) -> HmacSha3 {
    // HMAC zero-pads keys shorter than the hash block.
    let mut block = Key::<HmacSha3>::default();
    block[..KEY_LEN].copy_from_slice(key.as_bytes());
    let mut mac = <HmacSha3 as Mac>::new(&block);
    mac.update(number.to_string().as_bytes());
    mac
}

/// Compute `HMAC-SHA3-256(key, ascii_decimal(number))`.
pub fn compute_digest(key: &SecretKey, number: u32) -> Digest {
    Digest(keyed_mac(key, number).finalize().into_bytes().into())
}

/// A secret number in `[0, range)` bound to a published digest.
///
/// The number and key stay inside until [`Commitment::reveal`] consumes the
/// commitment.
pub struct Commitment {
    range: u32,
    number: u32,
    key: SecretKey,
    digest: Digest,
}

impl Commitment {
    /// Draw a uniform number from `[0, range)` and a fresh key, and commit
    /// to the number. `range` must be at least 2.
    pub fn draw<E: EntropySource + ?Sized>(source: &mut E, range: u32) -> FairResult<Self> {
        if range < 2 {
            return Err(FairError::InvalidRange(range));
        }
        let number = uniform_below(source, range)?;
        let key = SecretKey::random(source)?;
        let digest = compute_digest(&key, number);
        Ok(Self {
            range,
            number,
            key,
            digest,
        })
    }

    /// The size of the committed range.
    pub fn range(&self) -> u32 {
        self.range
    }

    /// The public digest. Safe to publish before the reveal.
    pub fn digest(&self) -> Digest {
        self.digest
    }

    /// Disclose the number and key. The commitment is spent.
    pub fn reveal(self) -> Reveal {
        Reveal {
            range: self.range,
            number: self.number,
            key: self.key,
        }
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commitment")
            .field("range", &self.range)
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}

/// A disclosed commitment: everything needed to audit the digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    /// The committed range.
    pub range: u32,
    /// The committed number.
    pub number: u32,
    /// The HMAC key.
    pub key: SecretKey,
}

impl Reveal {
    /// Check that this reveal reproduces `published` and that the number
    /// lies inside the committed range.
    ///
    /// Any mismatch is a [`FairError::ProtocolViolation`].
    pub fn verify(&self, published: &Digest) -> FairResult<()> {
        let violation = || FairError::ProtocolViolation {
            number: self.number,
            digest: published.to_string(),
        };
        if self.number >= self.range {
            return Err(violation());
        }
        keyed_mac(&self.key, self.number)
            .verify_slice(published.as_bytes())
            .map_err(|_| violation())
    }
}
