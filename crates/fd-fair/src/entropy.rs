//! Sources of randomness.
//!
//! Production draws come from the operating system CSPRNG. Tests and replays
//! substitute a seeded generator through the same [`EntropySource`] trait.

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng, TryRngCore};

use crate::error::{FairError, FairResult};

/// Something that can fill a buffer with random bytes.
pub trait EntropySource {
    /// Fill `dest` entirely, or fail without partial success.
    fn fill_bytes(&mut self, dest: &mut [u8]) -> FairResult<()>;
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> FairResult<()> {
        (**self).fill_bytes(dest)
    }
}

impl<E: EntropySource + ?Sized> EntropySource for Box<E> {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> FairResult<()> {
        (**self).fill_bytes(dest)
    }
}

/// The operating system's secure random number generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> FairResult<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| FairError::EntropyUnavailable(e.to_string()))
    }
}

/// A deterministic generator seeded from a `u64`.
///
/// Reproducible, and therefore not secret: anyone who knows the seed knows
/// every draw.
#[derive(Debug, Clone)]
pub struct SeededEntropy {
    rng: StdRng,
}

impl SeededEntropy {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl EntropySource for SeededEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> FairResult<()> {
        self.rng.fill_bytes(dest);
        Ok(())
    }
}

/// Entropy chosen at runtime: the OS generator, or a seeded one for replays.
#[derive(Debug, Clone)]
pub enum Entropy {
    /// Operating system CSPRNG.
    Os(OsEntropy),
    /// Deterministic seeded generator.
    Seeded(SeededEntropy),
}

impl Entropy {
    /// `Seeded` when a seed is given, `Os` otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Seeded(SeededEntropy::new(seed)),
            None => Self::Os(OsEntropy),
        }
    }

    /// True if draws are reproducible from a seed.
    pub fn is_deterministic(&self) -> bool {
        matches!(self, Self::Seeded(_))
    }
}

impl EntropySource for Entropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> FairResult<()> {
        match self {
            Self::Os(os) => os.fill_bytes(dest),
            Self::Seeded(seeded) => seeded.fill_bytes(dest),
        }
    }
}

/// Draw an integer uniformly from `[0, range)`.
///
/// For `range <= 256` single bytes are drawn and any byte
/// `>= 256 - (256 % range)` is rejected before reducing modulo `range`.
/// Larger ranges use the same rejection rule on 32-bit words.
pub fn uniform_below<E: EntropySource + ?Sized>(source: &mut E, range: u32) -> FairResult<u32> {
    match range {
        0 => Err(FairError::InvalidRange(range)),
        1 => Ok(0),
        2..=256 => {
            let limit = 256 - (256 % range);
            loop {
                let mut byte = [0u8; 1];
                source.fill_bytes(&mut byte)?;
                let value = u32::from(byte[0]);
                if value < limit {
                    return Ok(value % range);
                }
            }
        }
        _ => {
            let span = 1u64 << 32;
            let range = u64::from(range);
            let limit = span - (span % range);
            loop {
                let mut word = [0u8; 4];
                source.fill_bytes(&mut word)?;
                let value = u64::from(u32::from_le_bytes(word));
                if value < limit {
                    // value % range < range <= u32::MAX
                    return Ok((value % range) as u32);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    struct Bytes(VecDeque<u8>);

    impl EntropySource for Bytes {
        fn fill_bytes(&mut self, dest: &mut [u8]) -> FairResult<()> {
            for b in dest.iter_mut() {
                *b = self
                    .0
                    .pop_front()
                    .ok_or_else(|| FairError::EntropyUnavailable("exhausted".into()))?;
            }
            Ok(())
        }
    }

    /// Pearson chi-square statistic for observed counts against a flat
    /// distribution.
    fn chi_square(counts: &[u64], samples: u64) -> f64 {
        let expected = samples as f64 / counts.len() as f64;
        counts
            .iter()
            .map(|&c| {
                let d = c as f64 - expected;
                d * d / expected
            })
            .sum()
    }

    #[test]
    fn rejects_biased_bytes() {
        // 256 % 6 == 4, so bytes 252..=255 must be redrawn.
        let mut src = Bytes(VecDeque::from(vec![255, 252, 251]));
        assert_eq!(uniform_below(&mut src, 6).unwrap(), 251 % 6);
        assert!(src.0.is_empty());
    }

    #[test]
    fn power_of_two_range_never_rejects() {
        let mut src = Bytes(VecDeque::from(vec![255]));
        assert_eq!(uniform_below(&mut src, 256).unwrap(), 255);
        let mut src = Bytes(VecDeque::from(vec![255]));
        assert_eq!(uniform_below(&mut src, 2).unwrap(), 1);
    }

    #[test]
    fn degenerate_ranges() {
        let mut src = SeededEntropy::new(1);
        assert!(matches!(
            uniform_below(&mut src, 0),
            Err(FairError::InvalidRange(0))
        ));
        assert_eq!(uniform_below(&mut src, 1).unwrap(), 0);
    }

    #[test]
    fn exhausted_source_fails() {
        let mut src = Bytes(VecDeque::new());
        assert!(matches!(
            uniform_below(&mut src, 6),
            Err(FairError::EntropyUnavailable(_))
        ));
    }

    #[test]
    fn large_range_stays_in_bounds() {
        let mut src = SeededEntropy::new(7);
        for _ in 0..1000 {
            assert!(uniform_below(&mut src, 1000).unwrap() < 1000);
        }
    }

    #[test]
    fn draws_are_uniform() {
        let mut src = SeededEntropy::new(0x5eed);
        for range in [2u32, 3, 6, 7, 10, 37, 100, 255, 256] {
            let samples = u64::from(range) * 400;
            let mut counts = vec![0u64; range as usize];
            for _ in 0..samples {
                counts[uniform_below(&mut src, range).unwrap() as usize] += 1;
            }
            let df = f64::from(range - 1);
            let stat = chi_square(&counts, samples);
            // Roughly six standard deviations above the mean of chi2(df).
            let bound = df + 6.0 * (2.0 * df).sqrt() + 10.0;
            assert!(stat < bound, "range {range}: chi2 {stat} >= {bound}");
        }
    }

    #[test]
    fn seeded_is_reproducible() {
        let mut a = Entropy::from_seed(Some(42));
        let mut b = Entropy::from_seed(Some(42));
        assert!(a.is_deterministic());
        let (mut x, mut y) = ([0u8; 16], [0u8; 16]);
        a.fill_bytes(&mut x).unwrap();
        b.fill_bytes(&mut y).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn os_entropy_fills_buffer() {
        let mut os = Entropy::from_seed(None);
        assert!(!os.is_deterministic());
        let mut buf = [0u8; 32];
        os.fill_bytes(&mut buf).unwrap();
        assert_ne!(buf, [0u8; 32]);
    }
}
