//! Roulette-wheel (fitness-proportionate) selection.
//!
//! The wheel is laid out in whole percentage points: each individual owns a
//! slice of `score * 100 / total` points (truncated), stacked in population
//! order. A draw in `0..100` picks the first individual whose cumulative upper
//! boundary reaches the draw.
//!
//! Truncation can leave the stacked slices short of 100. The final boundary
//! is therefore pinned to 100, so the remainder goes to the last individual
//! and every draw selects someone.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1

use super::error::GaError;
use super::types::Board;
use rand::Rng;

/// Width of the wheel in points.
const WHEEL: u32 = 100;

/// A roulette wheel built once per generation from the parents' scores.
///
/// # Examples
///
/// ```
/// use queens_ga::ga::Roulette;
///
/// let wheel = Roulette::new(&[50, 30, 20]).unwrap();
/// assert_eq!(wheel.bounds(), &[50, 80, 100]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roulette {
    bounds: Vec<u32>,
    total: u64,
}

impl Roulette {
    /// Builds the wheel from per-individual scores.
    ///
    /// Fails with [`GaError::EmptySelection`] when there are no scores or they
    /// sum to zero.
    pub fn new(scores: &[u32]) -> Result<Self, GaError> {
        let total: u64 = scores.iter().map(|&score| u64::from(score)).sum();
        if scores.is_empty() || total == 0 {
            return Err(GaError::EmptySelection);
        }

        // Truncated shares never sum past WHEEL.
        let mut cumulative = 0u32;
        let mut bounds: Vec<u32> = scores
            .iter()
            .map(|&score| {
                let share = u64::from(score) * u64::from(WHEEL) / total;
                cumulative += share as u32;
                cumulative
            })
            .collect();
        if let Some(last) = bounds.last_mut() {
            *last = WHEEL;
        }

        Ok(Self { bounds, total })
    }

    /// Builds the wheel from the fitness of every board in `population`.
    pub fn from_population(population: &[Board]) -> Result<Self, GaError> {
        let scores: Vec<u32> = population.iter().map(Board::fitness).collect();
        Self::new(&scores)
    }

    /// Cumulative upper boundary of each individual, ending at 100.
    pub fn bounds(&self) -> &[u32] {
        &self.bounds
    }

    /// Sum of the scores the wheel was built from.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Spins the wheel and returns the selected index.
    pub fn select<R: Rng>(&self, rng: &mut R) -> usize {
        let draw = rng.random_range(0..WHEEL);
        self.bounds
            .iter()
            .position(|&bound| bound >= draw)
            // The last bound is WHEEL, which exceeds every draw.
            .unwrap_or(self.bounds.len() - 1)
    }
}
