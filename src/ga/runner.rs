//! Generational driver.
//!
//! [`GaRunner`] runs the loop: initialize → (score → roulette → crossover /
//! copy → mutate → deduplicate → swap) until a population holds a solution.
//!
//! Two population buffers are allocated once. Each generation reads parents
//! from the current buffer, writes children into the other, then flips the
//! `current` index.

use super::config::GaConfig;
use super::error::GaError;
use super::operators::{crossover, mutate, refill_random};
use super::selection::Roulette;
use super::types::{has_solution, Board};
use rand::Rng;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use u_numflow::random::create_rng;

/// Result of a GA run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// Every board of the final population with perfect fitness, in
    /// population order.
    pub solutions: Vec<Board>,

    /// The fittest board of the final population.
    pub best: Board,

    /// Fitness of `best`.
    pub best_fitness: u32,

    /// Number of generations bred after initialization.
    pub generations: usize,

    /// Whether the final population holds a solution.
    pub solved: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness of the initial population and of every later one.
    pub fitness_history: Vec<u32>,
}

/// Prefix of every reported solution line.
pub const SOLUTION_LABEL: &str = "Indivíduo solução: ";

impl GaResult {
    /// One printable line per solution, e.g.
    /// `Indivíduo solução: {,7,1,4,2,0,6,3,5}`.
    pub fn solution_lines(&self) -> Vec<String> {
        self.solutions
            .iter()
            .map(|board| format!("{SOLUTION_LABEL}{board}"))
            .collect()
    }
}

/// Executes the GA loop.
///
/// # Usage
///
/// ```no_run
/// use queens_ga::ga::{GaConfig, GaRunner};
///
/// let result = GaRunner::run(&GaConfig::default()).unwrap();
/// for board in &result.solutions {
///     println!("{board}");
/// }
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs until a solution appears or the generation cap is reached.
    pub fn run(config: &GaConfig) -> Result<GaResult, GaError> {
        Self::run_from(config, &[], None)
    }

    /// Runs with an optional cancellation flag, checked before each generation
    /// and before every parent-pair draw.
    pub fn run_with_cancel(
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult, GaError> {
        Self::run_from(config, &[], cancel)
    }

    /// Runs with `injected` boards overwriting the first slots of the random
    /// initial population.
    pub fn run_from(
        config: &GaConfig,
        injected: &[Board],
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult, GaError> {
        config.validate()?;
        if injected.len() > config.population_size {
            return Err(GaError::InvalidConfig(format!(
                "{} injected boards exceed population_size {}",
                injected.len(),
                config.population_size
            )));
        }

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let mut buffers = Buffers::new(config.population_size);
        let initial = buffers.current_mut();
        refill_random(initial, config.population_size, &mut rng);
        initial[..injected.len()].copy_from_slice(injected);

        tracing::info!(
            population_size = config.population_size,
            seed = ?config.seed,
            injected = injected.len(),
            "Starting 8-queens search"
        );

        let mut fitness_history = vec![best_of(buffers.current())?.fitness()];
        let mut generations = 0usize;
        let mut cancelled = false;

        while !has_solution(buffers.current()) {
            if config.max_generations.is_some_and(|max| generations >= max) {
                tracing::warn!(generations, "Generation cap reached without a solution");
                break;
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    tracing::warn!(generations, "Search cancelled");
                    cancelled = true;
                    break;
                }
            }

            let (parents, children) = buffers.split();
            let fill = breed(
                parents,
                children,
                config,
                generations + 1,
                cancel.as_deref(),
                &mut rng,
            )?;
            if fill == Fill::Cancelled {
                tracing::warn!(generations, "Search cancelled mid-generation");
                cancelled = true;
                break;
            }
            buffers.swap();
            generations += 1;

            let best_fitness = best_of(buffers.current())?.fitness();
            fitness_history.push(best_fitness);
            tracing::debug!(generation = generations, best_fitness, "Generation bred");
        }

        let population = buffers.current();
        let solutions: Vec<Board> = population
            .iter()
            .filter(|board| board.is_solution())
            .copied()
            .collect();
        let best = *best_of(population)?;
        let solved = !solutions.is_empty();

        if solved {
            tracing::info!(
                generations,
                solutions = solutions.len(),
                "Solution found"
            );
        }

        Ok(GaResult {
            solutions,
            best,
            best_fitness: best.fitness(),
            generations,
            solved,
            cancelled,
            fitness_history,
        })
    }
}

/// The two population buffers and which one holds the current parents.
#[derive(Debug)]
struct Buffers {
    populations: [Vec<Board>; 2],
    current: usize,
}

impl Buffers {
    fn new(capacity: usize) -> Self {
        Self {
            populations: [Vec::with_capacity(capacity), Vec::with_capacity(capacity)],
            current: 0,
        }
    }

    fn current(&self) -> &[Board] {
        &self.populations[self.current]
    }

    fn current_mut(&mut self) -> &mut Vec<Board> {
        &mut self.populations[self.current]
    }

    /// Parents (read-only) and the buffer that will receive the children.
    fn split(&mut self) -> (&[Board], &mut Vec<Board>) {
        let [first, second] = &mut self.populations;
        if self.current == 0 {
            (first.as_slice(), second)
        } else {
            (second.as_slice(), first)
        }
    }

    fn swap(&mut self) {
        self.current ^= 1;
    }
}

/// How a call to [`breed`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fill {
    Complete,
    Cancelled,
}

/// Fills `children` with the next generation bred from `parents`.
///
/// Parent pairs are drawn from one roulette wheel. A pair is recombined into
/// two mutated children with probability `crossover_rate`, otherwise both
/// parents are copied. With `deduplicate` set, a child equal to one already
/// placed is dropped. Overflow past `population_size` is truncated.
///
/// The cancel flag is polled before every pair draw. With `stall_limit` set, that
/// many consecutive pairs adding no child fail with [`GaError::Stalled`].
fn breed<R: Rng>(
    parents: &[Board],
    children: &mut Vec<Board>,
    config: &GaConfig,
    generation: usize,
    cancel: Option<&AtomicBool>,
    rng: &mut R,
) -> Result<Fill, GaError> {
    let size = config.population_size;
    let wheel = Roulette::from_population(parents)?;
    let crossover_percent = config.crossover_percent();
    let mut seen: HashSet<Board> = HashSet::with_capacity(size + 1);
    let mut fruitless = 0usize;

    children.clear();
    while children.len() < size {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Ok(Fill::Cancelled);
        }

        let father = parents[wheel.select(rng)];
        let mother = parents[wheel.select(rng)];

        let pair = if rng.random_range(0..100) < crossover_percent {
            [(father, mother), (mother, father)].map(|(first, second)| {
                let mut child = crossover(&first, &second, config.crossover_point);
                mutate(&mut child, config.mutation_rate, config.mutation_mode, rng);
                child
            })
        } else {
            [father, mother]
        };

        let before = children.len();
        for child in pair {
            if !config.deduplicate || seen.insert(child) {
                children.push(child);
            }
        }

        if children.len() == before {
            fruitless += 1;
            if config.stall_limit.is_some_and(|limit| fruitless >= limit) {
                return Err(GaError::Stalled {
                    generation,
                    draws: fruitless,
                });
            }
        } else {
            fruitless = 0;
        }
    }
    children.truncate(size);

    Ok(Fill::Complete)
}

/// The fittest board; ties go to the later one.
fn best_of(population: &[Board]) -> Result<&Board, GaError> {
    population
        .iter()
        .max_by_key(|board| board.fitness())
        .ok_or(GaError::EmptySelection)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::config::{CROSSOVER_POINT, POP_SIZE};
    use crate::ga::operators::random_population;

    fn board(genes: [u8; 8]) -> Board {
        Board::new(genes).expect("valid genes")
    }

    fn known_solution() -> Board {
        board([7, 1, 4, 2, 0, 6, 3, 5])
    }

    // ---- Driver ----

    #[test]
    fn test_injected_solution_stops_immediately() {
        let config = GaConfig::default().with_seed(42);
        let result = GaRunner::run_from(&config, &[known_solution()], None).unwrap();

        assert!(result.solved);
        assert_eq!(result.generations, 0);
        assert_eq!(result.fitness_history, vec![100]);
        assert!(result.solutions.contains(&known_solution()));
        assert_eq!(result.best_fitness, 100);
        assert_eq!(result.solutions[0].to_string(), "{,7,1,4,2,0,6,3,5}");
    }

    #[test]
    fn test_too_many_injected_boards() {
        let config = GaConfig::default().with_population_size(2).with_seed(1);
        let injected = [known_solution(); 3];
        assert!(matches!(
            GaRunner::run_from(&config, &injected, None),
            Err(GaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let config = GaConfig::default().with_population_size(1);
        assert!(matches!(
            GaRunner::run(&config),
            Err(GaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_generation_cap() {
        let config = GaConfig::default().with_max_generations(25).with_seed(42);
        let result = GaRunner::run(&config).unwrap();

        assert!(result.generations <= 25);
        assert_eq!(result.fitness_history.len(), result.generations + 1);
        if !result.solved {
            assert_eq!(result.generations, 25);
            assert!(result.solutions.is_empty());
            assert!(result.best_fitness < 100);
        }
        assert!(!result.cancelled);
    }

    #[test]
    fn test_solutions_are_perfect() {
        let config = GaConfig::default()
            .with_mutation_rate(0.05)
            .with_max_generations(2_000)
            .with_seed(7);
        let result = GaRunner::run(&config).unwrap();

        assert_eq!(result.solved, !result.solutions.is_empty());
        for board in &result.solutions {
            assert_eq!(board.fitness(), 100);
        }
        let max_seen = *result.fitness_history.iter().max().unwrap();
        assert!(max_seen >= result.best_fitness);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = GaConfig::default().with_max_generations(200).with_seed(123);
        let a = GaRunner::run(&config).unwrap();
        let b = GaRunner::run(&config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_cancellation_before_first_generation() {
        let config = GaConfig::default().with_seed(42);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = GaRunner::run_with_cancel(&config, Some(cancel)).unwrap();

        assert_eq!(result.generations, 0);
        assert!(result.cancelled || result.solved);
    }

    #[test]
    fn test_solution_lines_match_printed_format() {
        let config = GaConfig::default().with_seed(42);
        let result = GaRunner::run_from(&config, &[known_solution()], None).unwrap();

        let lines = result.solution_lines();
        assert_eq!(lines.len(), result.solutions.len());
        assert_eq!(lines[0], "Indivíduo solução: {,7,1,4,2,0,6,3,5}");
    }

    #[test]
    fn test_solution_lines_empty_when_unsolved() {
        let unsolved = GaResult {
            solutions: Vec::new(),
            best: board([0; 8]),
            best_fitness: 44,
            generations: 1,
            solved: false,
            cancelled: false,
            fitness_history: vec![44, 44],
        };
        assert!(unsolved.solution_lines().is_empty());
    }

    /// Two identical parents that never recombine can only ever yield one
    /// distinct child, so a population of two cannot be filled.
    fn stuck_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(2)
            .with_crossover_rate(0.0)
            .with_deduplicate(true)
            .with_max_generations(1)
            .with_seed(42)
    }

    #[test]
    fn test_stall_limit_bounds_unfillable_generation() {
        let stuck = board([0; 8]);
        let config = stuck_config().with_stall_limit(100);

        let err = GaRunner::run_from(&config, &[stuck, stuck], None).unwrap_err();

        assert_eq!(
            err,
            GaError::Stalled {
                generation: 1,
                draws: 100
            }
        );
    }

    #[test]
    fn test_cancel_interrupts_unfillable_generation() {
        let stuck = board([0; 8]);
        let cancel = Arc::new(AtomicBool::new(false));

        let cancel_clone = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(20));
            cancel_clone.store(true, Ordering::Relaxed);
        });

        let result = GaRunner::run_from(&stuck_config(), &[stuck, stuck], Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.best, stuck);
    }

    #[test]
    fn test_literal_mutation_mode_runs() {
        let config = GaConfig::default()
            .with_mutation_mode(crate::ga::MutationMode::ComplementMask)
            .with_max_generations(50)
            .with_seed(3);
        let result = GaRunner::run(&config).unwrap();
        assert!(result.generations <= 50);
    }

    // ---- Buffers ----

    #[test]
    fn test_buffers_alternate_roles() {
        let mut buffers = Buffers::new(POP_SIZE);
        buffers.current_mut().push(known_solution());

        let (parents, children) = buffers.split();
        assert_eq!(parents.len(), 1);
        children.push(board([0; 8]));
        children.push(board([1; 8]));
        buffers.swap();

        assert_eq!(buffers.current().len(), 2);
        let (parents, children) = buffers.split();
        assert_eq!(parents.len(), 2);
        assert_eq!(children.as_slice(), &[known_solution()]);

        buffers.swap();
        assert_eq!(buffers.current(), &[known_solution()]);
    }

    // ---- Breeding ----

    #[test]
    fn test_breed_fills_distinct_children() {
        let mut rng = create_rng(42);
        let parents = random_population(POP_SIZE, &mut rng);
        let mut children = Vec::new();

        breed(&parents, &mut children, &GaConfig::default(), 1, None, &mut rng).unwrap();

        assert_eq!(children.len(), POP_SIZE);
        let distinct: HashSet<Board> = children.iter().copied().collect();
        assert_eq!(distinct.len(), POP_SIZE);
    }

    #[test]
    fn test_breed_without_crossover_copies_parents() {
        let mut rng = create_rng(9);
        let parents = random_population(POP_SIZE, &mut rng);
        let config = GaConfig::default()
            .with_crossover_rate(0.0)
            .with_deduplicate(false);
        let mut children = vec![known_solution(); 3];

        breed(&parents, &mut children, &config, 1, None, &mut rng).unwrap();

        assert_eq!(children.len(), POP_SIZE);
        assert!(children.iter().all(|c| parents.contains(c)));
    }

    #[test]
    fn test_breed_with_crossover_splices_parents() {
        let mut rng = create_rng(11);
        let parents = random_population(POP_SIZE, &mut rng);
        let config = GaConfig::default()
            .with_crossover_rate(1.0)
            .with_mutation_rate(0.0);
        let mut children = Vec::new();

        breed(&parents, &mut children, &config, 1, None, &mut rng).unwrap();

        let p = CROSSOVER_POINT;
        for child in &children {
            assert!(parents.iter().any(|a| a.genes()[..p] == child.genes()[..p]));
            assert!(parents.iter().any(|b| b.genes()[p..] == child.genes()[p..]));
        }
    }

    #[test]
    fn test_breed_without_dedup_keeps_duplicates() {
        let mut rng = create_rng(5);
        let parents = vec![known_solution(); POP_SIZE];
        let config = GaConfig::default()
            .with_mutation_rate(0.0)
            .with_deduplicate(false);
        let mut children = Vec::new();

        breed(&parents, &mut children, &config, 1, None, &mut rng).unwrap();

        assert_eq!(children, vec![known_solution(); POP_SIZE]);
    }

    #[test]
    fn test_breed_stops_when_cancelled() {
        let mut rng = create_rng(4);
        let parents = random_population(POP_SIZE, &mut rng);
        let cancel = AtomicBool::new(true);
        let mut children = Vec::new();

        let fill = breed(
            &parents,
            &mut children,
            &GaConfig::default(),
            1,
            Some(&cancel),
            &mut rng,
        )
        .unwrap();

        assert_eq!(fill, Fill::Cancelled);
        assert!(children.is_empty());
    }

    #[test]
    fn test_best_of() {
        let worst = board([0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(best_of(&[worst, known_solution()]), Ok(&known_solution()));
        assert_eq!(best_of(&[]), Err(GaError::EmptySelection));
    }
}
