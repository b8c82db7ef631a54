//! Dice, die identifiers, and the validated dice set.

use std::fmt;

use crate::error::{ConfigError, ConfigResult};

/// Number of faces on every die.
pub const FACES: usize = 6;

/// Minimum number of dice for a game.
pub const MIN_DICE: usize = 3;

/// Identifier of a die: its position on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DieId(pub usize);

impl DieId {
    /// The id as a plain index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A six-sided die with arbitrary integer faces.
///
/// Faces may repeat, be negative, or come in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Die {
    id: DieId,
    faces: [i64; FACES],
}

impl Die {
    /// Create a die from its id and faces.
    pub fn new(id: DieId, faces: [i64; FACES]) -> Self {
        Self { id, faces }
    }

    /// This die's identifier.
    pub fn id(&self) -> DieId {
        self.id
    }

    /// All six faces in input order.
    pub fn faces(&self) -> &[i64; FACES] {
        &self.faces
    }

    /// The face at `index`, or `None` if `index >= 6`.
    pub fn face(&self, index: usize) -> Option<i64> {
        self.faces.get(index).copied()
    }

    /// Parse one comma-separated die specification like `"2,2,4,4,9,9"`.
    pub fn parse(id: DieId, spec: &str) -> ConfigResult<Self> {
        let tokens: Vec<&str> = spec.split(',').map(str::trim).collect();
        if tokens.len() != FACES {
            return Err(ConfigError::WrongFaceCount {
                index: id.index(),
                expected: FACES,
                found: tokens.len(),
            });
        }

        let mut faces = [0i64; FACES];
        for (slot, token) in faces.iter_mut().zip(&tokens) {
            *slot = token.parse().map_err(|_| ConfigError::InvalidFace {
                index: id.index(),
                token: (*token).to_string(),
            })?;
        }
        Ok(Self::new(id, faces))
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.faces.iter().map(i64::to_string).collect();
        write!(f, "{}", faces.join(","))
    }
}

/// The validated, immutable set of dice for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceSet {
    dice: Vec<Die>,
}

impl DiceSet {
    /// Parse command-line dice specifications.
    ///
    /// Requires at least [`MIN_DICE`] specifications of exactly [`FACES`]
    /// integers each. Die ids are assigned by position.
    pub fn parse<S: AsRef<str>>(specs: &[S]) -> ConfigResult<Self> {
        if specs.len() < MIN_DICE {
            return Err(ConfigError::TooFewDice {
                min: MIN_DICE,
                found: specs.len(),
            });
        }

        let dice = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| Die::parse(DieId(i), spec.as_ref()))
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self { dice })
    }

    /// Build a set from already-constructed faces, ids assigned by position.
    pub fn from_faces(faces: Vec<[i64; FACES]>) -> ConfigResult<Self> {
        if faces.len() < MIN_DICE {
            return Err(ConfigError::TooFewDice {
                min: MIN_DICE,
                found: faces.len(),
            });
        }
        let dice = faces
            .into_iter()
            .enumerate()
            .map(|(i, f)| Die::new(DieId(i), f))
            .collect();
        Ok(Self { dice })
    }

    /// Number of dice.
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    /// Always false for a validated set; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Look up a die by id.
    pub fn get(&self, id: DieId) -> Option<&Die> {
        self.dice.get(id.index())
    }

    /// Iterate over the dice in id order.
    pub fn iter(&self) -> std::slice::Iter<'_, Die> {
        self.dice.iter()
    }

    /// All die ids in order.
    pub fn ids(&self) -> Vec<DieId> {
        self.dice.iter().map(Die::id).collect()
    }

    /// All die ids except `taken`.
    pub fn ids_without(&self, taken: DieId) -> Vec<DieId> {
        self.dice
            .iter()
            .map(Die::id)
            .filter(|id| *id != taken)
            .collect()
    }
}

impl<'a> IntoIterator for &'a DiceSet {
    type Item = &'a Die;
    type IntoIter = std::slice::Iter<'a, Die>;

    fn into_iter(self) -> Self::IntoIter {
        self.dice.iter()
    }
}
