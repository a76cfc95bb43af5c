//! Board representation, fitness evaluation, and the stopping rule.
//!
//! A [`Board`] stores one row per column, so two queens can never share a
//! column. Fitness is recomputed on demand and never cached.

use super::config::{GENES, GENE_STATES, PERFECT_FITNESS};
use super::error::GaError;
use rand::Rng;
use std::fmt;

/// One candidate placement: `genes[c]` is the row of the queen in column `c`.
///
/// Equality and hashing are by gene value, which is what population
/// deduplication keys on.
///
/// ```
/// use queens_ga::ga::Board;
///
/// let board = Board::new([0, 4, 7, 5, 2, 6, 1, 3]).unwrap();
/// assert!(board.is_solution());
/// assert_eq!(board.to_string(), "{,0,4,7,5,2,6,1,3}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    genes: [u8; GENES],
}

impl Board {
    /// Builds a board, rejecting any gene outside `0..GENE_STATES`.
    pub fn new(genes: [u8; GENES]) -> Result<Self, GaError> {
        if let Some(index) = genes.iter().position(|&g| g >= GENE_STATES) {
            return Err(GaError::GeneOutOfRange {
                index,
                value: genes[index],
            });
        }
        Ok(Self { genes })
    }

    /// Draws every gene independently and uniformly from `0..GENE_STATES`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            genes: std::array::from_fn(|_| rng.random_range(0..GENE_STATES)),
        }
    }

    /// Row of each column's queen.
    pub fn genes(&self) -> &[u8; GENES] {
        &self.genes
    }

    /// Callers must keep every gene below `GENE_STATES`.
    pub(crate) fn genes_mut(&mut self) -> &mut [u8; GENES] {
        &mut self.genes
    }

    /// Inverse-attack score in `[36, 100]`.
    ///
    /// Every ordered pair `(i, j)`, `i != j`, costs one point when the two
    /// queens share a row and one point when they share a diagonal, so each
    /// attacking pair is charged twice.
    pub fn fitness(&self) -> u32 {
        let mut score = PERFECT_FITNESS;
        for (i, &row) in self.genes.iter().enumerate() {
            for (j, &other) in self.genes.iter().enumerate() {
                if i == j {
                    continue;
                }
                if row == other {
                    score -= 1;
                }
                if i.abs_diff(j) == usize::from(row.abs_diff(other)) {
                    score -= 1;
                }
            }
        }
        score
    }

    /// Whether no two queens attack each other.
    pub fn is_solution(&self) -> bool {
        self.fitness() == PERFECT_FITNESS
    }

    /// Number of unordered attacking relationships.
    pub fn attacking_pairs(&self) -> u32 {
        (PERFECT_FITNESS - self.fitness()) / 2
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for gene in &self.genes {
            write!(f, ",{gene}")?;
        }
        f.write_str("}")
    }
}

/// Stopping rule: true once any board in `population` is a solution.
pub fn has_solution(population: &[Board]) -> bool {
    population.iter().any(Board::is_solution)
}
