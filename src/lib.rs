//! Genetic-algorithm solver for the 8-queens puzzle.
//!
//! Places eight queens on an 8×8 board so that none attacks another, by
//! evolving a population of candidate boards:
//!
//! - **Fitness**: 100 minus two points per attacking pair
//! - **Selection**: roulette wheel over integer percentages
//! - **Recombination**: single-point crossover producing both children
//! - **Mutation**: per-bit trials on each 3-bit gene
//! - **Termination**: stop once a population holds a perfect board
//!
//! Everything lives in [`ga`]; the `queens-ga` binary runs a search with the
//! default constants and prints the solutions it finds.

pub mod ga;
