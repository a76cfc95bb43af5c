//! GA configuration.
//!
//! The puzzle constants live here as `pub const`s; [`GaConfig`] carries them
//! as defaults and lets tests and embedders override the run parameters.

use super::error::GaError;

/// Number of individuals in every population.
pub const POP_SIZE: usize = 15;

/// Genes per individual (one per board column).
pub const GENES: usize = 8;

/// Number of valid gene values: rows `0..GENE_STATES`.
pub const GENE_STATES: u8 = 8;

/// Probability that a selected parent pair is recombined.
pub const CROSSOVER_RATE: f64 = 0.5;

/// Probability that a single bit-trial of a gene fires.
pub const MUTATION_RATE: f64 = 0.01;

/// Genes `[0, CROSSOVER_POINT)` come from the first parent.
pub const CROSSOVER_POINT: usize = 5;

/// Fitness of a board with no attacking queens.
pub const PERFECT_FITNESS: u32 = 100;

/// How a firing mutation trial flips its bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationMode {
    /// `gene ^ mask`: toggles exactly the targeted bit.
    #[default]
    XorToggle,

    /// `(!gene) & mask`: complements the gene and keeps only the targeted
    /// bit, discarding the others. Reproduces the historical operator.
    ComplementMask,
}

/// Configuration for the 8-queens GA.
///
/// # Defaults
///
/// ```
/// use queens_ga::ga::{GaConfig, POP_SIZE};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, POP_SIZE);
/// assert_eq!(config.max_generations, None);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use queens_ga::ga::{GaConfig, MutationMode};
///
/// let config = GaConfig::default()
///     .with_max_generations(500)
///     .with_mutation_mode(MutationMode::ComplementMask)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in each population buffer.
    pub population_size: usize,

    /// Probability of recombining a selected pair (0.0–1.0).
    ///
    /// When recombination does not fire, both parents are copied verbatim.
    /// Drawn as a whole percentage, so it must be a multiple of 0.01.
    pub crossover_rate: f64,

    /// Probability of each per-bit mutation trial firing (0.0–1.0).
    ///
    /// Drawn as a whole percentage, so it must be a multiple of 0.01;
    /// [`validate`](Self::validate) rejects values such as 0.005.
    pub mutation_rate: f64,

    /// Single crossover point in `0..=GENES`.
    pub crossover_point: usize,

    /// Bit-flip semantics used by mutation.
    pub mutation_mode: MutationMode,

    /// Whether children are deduplicated by value while the next
    /// generation is filled.
    pub deduplicate: bool,

    /// Optional cap on the number of generations.
    ///
    /// `None` runs until a solution appears. The cap is checked between
    /// generations only; a generation that cannot fill its children (for
    /// example with deduplication on and identical parents that never
    /// recombine) is bounded by [`stall_limit`](Self::stall_limit) or the
    /// cancel flag instead.
    pub max_generations: Option<usize>,

    /// Optional cap on consecutive parent-pair draws that add no child while
    /// a generation is being filled.
    ///
    /// Exceeding it fails the run with [`GaError::Stalled`]. `None` never
    /// gives up.
    pub stall_limit: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: POP_SIZE,
            crossover_rate: CROSSOVER_RATE,
            mutation_rate: MUTATION_RATE,
            crossover_point: CROSSOVER_POINT,
            mutation_mode: MutationMode::default(),
            deduplicate: true,
            max_generations: None,
            stall_limit: None,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-bit mutation rate (a multiple of 0.01).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover point.
    pub fn with_crossover_point(mut self, point: usize) -> Self {
        self.crossover_point = point;
        self
    }

    /// Sets the mutation bit-flip semantics.
    pub fn with_mutation_mode(mut self, mode: MutationMode) -> Self {
        self.mutation_mode = mode;
        self
    }

    /// Enables or disables value deduplication of children.
    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    /// Caps the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    /// Caps consecutive fruitless pair draws within one generation.
    pub fn with_stall_limit(mut self, draws: usize) -> Self {
        self.stall_limit = Some(draws);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Crossover rate as an integer percentage in `0..=100`.
    pub(crate) fn crossover_percent(&self) -> u32 {
        (self.crossover_rate * 100.0).round() as u32
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size < 2 {
            return Err(GaError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.crossover_point > GENES {
            return Err(GaError::InvalidConfig(format!(
                "crossover_point must be in 0..={GENES}"
            )));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(GaError::InvalidConfig(format!("{name} must be in [0, 1]")));
            }
            if !is_whole_percent(rate) {
                return Err(GaError::InvalidConfig(format!(
                    "{name} must be a whole percentage, got {rate}"
                )));
            }
        }
        if self.stall_limit == Some(0) {
            return Err(GaError::InvalidConfig(
                "stall_limit must be positive or None".into(),
            ));
        }
        if self.max_generations == Some(0) {
            return Err(GaError::InvalidConfig(
                "max_generations must be positive or None".into(),
            ));
        }
        Ok(())
    }
}

/// Whether `rate * 100` is an integer, up to float noise.
fn is_whole_percent(rate: f64) -> bool {
    let percent = rate * 100.0;
    (percent - percent.round()).abs() < 1e-9
}
