//! Genetic algorithm for the 8-queens puzzle.
//!
//! A board is encoded as eight genes, one row per column, so only row and
//! diagonal attacks are possible. The engine evolves a small fixed-size
//! population until some board scores [`PERFECT_FITNESS`].
//!
//! # Key Types
//!
//! - [`Board`]: a candidate placement and its fitness
//! - [`GaConfig`]: run parameters, defaulting to the puzzle constants
//! - [`GaRunner`]: executes the generational loop
//! - [`GaResult`]: solutions found plus run statistics
//!
//! # Operators
//!
//! - [`Roulette`]: fitness-proportionate parent selection
//! - [`crossover`]: single-point recombination
//! - [`mutate`]: per-bit mutation, see [`MutationMode`]
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod error;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::{
    GaConfig, MutationMode, CROSSOVER_POINT, CROSSOVER_RATE, GENES, GENE_STATES, MUTATION_RATE,
    PERFECT_FITNESS, POP_SIZE,
};
pub use error::GaError;
pub use operators::{crossover, mutate, random_population};
pub use runner::{GaResult, GaRunner, SOLUTION_LABEL};
pub use selection::Roulette;
pub use types::{has_solution, Board};
