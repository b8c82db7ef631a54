//! Pairwise win probabilities between dice.

use std::fmt;

use crate::die::{DiceSet, Die, DieId, FACES};

/// Number of equally likely face pairings between two dice.
const PAIRINGS: u32 = (FACES * FACES) as u32;

/// An exact probability as `favorable / total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Odds {
    /// Number of favorable face pairings.
    pub favorable: u32,
    /// Number of face pairings considered.
    pub total: u32,
}

impl Odds {
    /// The probability as a float in `[0, 1]`.
    pub fn as_f64(self) -> f64 {
        f64::from(self.favorable) / f64::from(self.total)
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.as_f64())
    }
}

fn count_pairs(a: &Die, b: &Die, pred: impl Fn(i64, i64) -> bool) -> u32 {
    let mut count = 0;
    for &x in a.faces() {
        for &y in b.faces() {
            if pred(x, y) {
                count += 1;
            }
        }
    }
    count
}

/// Probability that a uniformly random face of `a` is strictly greater
/// than a uniformly random face of `b`. Ties count for neither side.
pub fn win_probability(a: &Die, b: &Die) -> Odds {
    Odds {
        favorable: count_pairs(a, b, |x, y| x > y),
        total: PAIRINGS,
    }
}

/// Probability that a random face of `a` equals a random face of `b`.
pub fn tie_probability(a: &Die, b: &Die) -> Odds {
    Odds {
        favorable: count_pairs(a, b, |x, y| x == y),
        total: PAIRINGS,
    }
}

/// One cell of the pairwise matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// A die against itself. Never played, so no probability is shown.
    NotApplicable,
    /// Row die beats column die with these odds.
    Odds(Odds),
}

/// Pairwise win probabilities: `cell(row, col)` is the chance that the
/// row die beats the column die.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbabilityMatrix {
    size: usize,
    cells: Vec<Cell>,
}

impl ProbabilityMatrix {
    /// Compute the matrix for every ordered pair of dice in the set.
    pub fn compute(dice: &DiceSet) -> Self {
        let size = dice.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in dice {
            for col in dice {
                if row.id() == col.id() {
                    cells.push(Cell::NotApplicable);
                } else {
                    cells.push(Cell::Odds(win_probability(row, col)));
                }
            }
        }
        Self { size, cells }
    }

    /// Number of dice along each axis.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The cell for `row` against `col`, or `None` if either id is unknown.
    pub fn cell(&self, row: DieId, col: DieId) -> Option<Cell> {
        if row.index() >= self.size || col.index() >= self.size {
            return None;
        }
        self.cells.get(row.index() * self.size + col.index()).copied()
    }

    /// The cells of one row, in column order.
    pub fn row(&self, row: DieId) -> &[Cell] {
        let start = row.index() * self.size;
        self.cells.get(start..start + self.size).unwrap_or(&[])
    }
}
