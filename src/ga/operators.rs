//! Genetic operators for 8-queens boards.
//!
//! # Initialization
//!
//! - [`random_population`]: `size` boards with uniformly drawn genes
//!
//! # Crossover
//!
//! - [`crossover`]: single-point splice, head from the first parent
//!
//! # Mutation
//!
//! - [`mutate`]: per-bit trials over the three low bits of every gene, with
//!   the flip semantics chosen by [`MutationMode`]

use super::config::{MutationMode, GENES};
use super::types::Board;
use rand::Rng;

/// Bit masks of the three bits a gene in `0..8` can occupy, high to low.
const BIT_MASKS: [u8; 3] = [0x4, 0x2, 0x1];

// ============================================================================
// Initialization
// ============================================================================

/// Creates `size` random boards.
pub fn random_population<R: Rng>(size: usize, rng: &mut R) -> Vec<Board> {
    let mut population = Vec::with_capacity(size);
    refill_random(&mut population, size, rng);
    population
}

/// Clears `population` and refills it with `size` random boards, keeping the
/// allocation.
pub(crate) fn refill_random<R: Rng>(population: &mut Vec<Board>, size: usize, rng: &mut R) {
    population.clear();
    population.extend((0..size).map(|_| Board::random(rng)));
}

// ============================================================================
// Crossover
// ============================================================================

/// Single-point crossover.
///
/// Genes `[0, point)` come from `first`, genes `[point, GENES)` from
/// `second`. A `point` past the end copies `first` whole.
///
/// ```
/// use queens_ga::ga::{crossover, Board};
///
/// let a = Board::new([0; 8]).unwrap();
/// let b = Board::new([7; 8]).unwrap();
/// assert_eq!(crossover(&a, &b, 5).genes(), &[0, 0, 0, 0, 0, 7, 7, 7]);
/// ```
pub fn crossover(first: &Board, second: &Board, point: usize) -> Board {
    let point = point.min(GENES);
    let mut child = *first;
    child.genes_mut()[point..].copy_from_slice(&second.genes()[point..]);
    child
}

// ============================================================================
// Mutation
// ============================================================================

impl MutationMode {
    /// Applies one firing trial for `mask` to `gene`.
    ///
    /// Both modes keep the result inside `0..8` for masks in `BIT_MASKS`.
    pub fn flip(self, gene: u8, mask: u8) -> u8 {
        match self {
            MutationMode::XorToggle => gene ^ mask,
            MutationMode::ComplementMask => !gene & mask,
        }
    }
}

/// Per-bit mutation, in place.
///
/// Every gene gets one trial per bit mask. A trial draws a percentage in
/// `1..=100` and fires when the draw is at or below `rate * 100`, so a rate
/// of 0 never fires and a rate of 1 always does. The threshold is a whole
/// percentage: `rate` is rounded to the nearest 0.01, which is why
/// [`GaConfig::validate`](super::GaConfig::validate) only accepts multiples
/// of 0.01.
///
/// Returns the number of trials that fired.
pub fn mutate<R: Rng>(board: &mut Board, rate: f64, mode: MutationMode, rng: &mut R) -> usize {
    let threshold = (rate.clamp(0.0, 1.0) * 100.0).round() as u32;
    let mut fired = 0;
    for gene in board.genes_mut().iter_mut() {
        for mask in BIT_MASKS {
            if rng.random_range(1..=100) <= threshold {
                *gene = mode.flip(*gene, mask);
                fired += 1;
            }
        }
    }
    fired
}

// ============================================================================
// Tests
// ============================================================================
