//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → selection → crossover → mutation → elitist replacement
//! → best tracking → repeat.

use super::config::GaConfig;
use super::operators::mutate_population;
use super::selection::select_parents;
use super::types::{Chromosome, GaProblem, Individual};
use crate::error::ConfigError;
use crate::random::create_rng;
use crate::solution::Solution;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of a GA optimization run.
///
/// Contains the best solution found, along with statistics about the
/// evolutionary process.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Decoded best solution of the entire run.
    pub best: Solution,

    /// Chromosome that decodes to `best`.
    pub best_chromosome: Chromosome,

    /// Fitness of `best_chromosome`.
    pub best_fitness: f64,

    /// Generation in which the best solution was first reached (0 = initial population).
    pub best_generation: usize,

    /// Number of generations executed after generation 0.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run hit its time limit.
    pub timed_out: bool,

    /// Best-so-far fitness after generation 0 and after each executed generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = QbfProblem::new(evaluator);
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best: {}", result.best);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] before any generation runs if the
    /// configuration is invalid or the problem has an empty domain.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult, ConfigError> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The flag and the time limit are checked only at generations that are
    /// a multiple of `config.check_interval`, before that generation starts.
    /// A stopped run still returns the best solution found so far.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult, ConfigError> {
        config.validate()?;
        if problem.chromosome_size() == 0 {
            return Err(ConfigError::EmptyDomain);
        }

        let started = Instant::now();
        let time_limit = config.time_limit_ms.map(Duration::from_millis);
        let mut rng = create_rng(config.seed);

        log::debug!(
            "GA start: population={}, generations={}, mutation_rate={}, seed={}",
            config.population_size,
            config.max_generations,
            config.mutation_rate,
            config.seed
        );

        // 1. Initialize and evaluate population
        let chromosomes = problem.initialize_population(config.population_size, &mut rng);
        debug_assert_eq!(chromosomes.len(), config.population_size);
        let mut population = evaluate(problem, chromosomes, config.parallel);

        // 2. Track best
        let mut best = population[index_of_best(&population)].clone();
        let mut best_solution = problem.decode(&best.chromosome);
        let mut best_generation = 0usize;
        log::info!("(Gen. 0) BestSol = {best_solution}");
        problem.on_improvement(0, &best_solution, None);

        let mut fitness_history = vec![best.fitness];
        let mut generations = 0usize;
        let mut cancelled = false;
        let mut timed_out = false;

        // 3. Evolutionary loop
        for gen in 1..=config.max_generations {
            if gen % config.check_interval == 0 {
                if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                    cancelled = true;
                } else if time_limit.is_some_and(|limit| started.elapsed() >= limit) {
                    timed_out = true;
                }
                if cancelled || timed_out {
                    log::warn!(
                        "GA stopped at generation {gen} ({})",
                        if cancelled { "cancelled" } else { "time limit" }
                    );
                    break;
                }
            }

            // Selection
            let parents = select_parents(&population, &mut rng);

            // Crossover on consecutive pairs
            let mut offspring = Vec::with_capacity(config.population_size);
            for pair in parents.chunks_exact(2) {
                let (c1, c2) = problem.crossover(&pair[0], &pair[1], &mut rng);
                offspring.push(c1);
                offspring.push(c2);
            }

            // Mutation
            let rate = problem.mutation_rate(gen, config.max_generations, config.mutation_rate);
            mutate_population(problem, &mut offspring, rate, &mut rng);

            population = evaluate(problem, offspring, config.parallel);

            // Elitist replacement
            let worst = index_of_worst(&population);
            if population[worst].fitness < best.fitness {
                population[worst] = best.clone();
            }

            // Update best
            let gen_best = index_of_best(&population);
            if population[gen_best].fitness > best.fitness {
                best = population[gen_best].clone();
                best_solution = problem.decode(&best.chromosome);
                best_generation = gen;
                log::info!("(Gen. {gen}) BestSol = {best_solution}");
                problem.on_improvement(gen, &best_solution, Some(rate));
            }

            fitness_history.push(best.fitness);
            generations = gen;

            problem.on_generation(gen, best.fitness);
        }

        Ok(GaResult {
            best: best_solution,
            best_chromosome: best.chromosome,
            best_fitness: best.fitness,
            best_generation,
            generations,
            cancelled,
            timed_out,
            fitness_history,
        })
    }
}

/// Scores every chromosome.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
fn evaluate<P: GaProblem>(
    problem: &P,
    chromosomes: Vec<Chromosome>,
    parallel: bool,
) -> Vec<Individual> {
    #[cfg(feature = "parallel")]
    if parallel {
        return chromosomes
            .into_par_iter()
            .map(|chromosome| Individual {
                fitness: problem.fitness(&chromosome),
                chromosome,
            })
            .collect();
    }

    chromosomes
        .into_iter()
        .map(|chromosome| Individual {
            fitness: problem.fitness(&chromosome),
            chromosome,
        })
        .collect()
}

/// Index of the first individual with the highest fitness.
fn index_of_best(population: &[Individual]) -> usize {
    let mut best = 0;
    for (i, ind) in population.iter().enumerate().skip(1) {
        if ind.fitness > population[best].fitness {
            best = i;
        }
    }
    best
}

/// Index of the first individual with the lowest fitness.
fn index_of_worst(population: &[Individual]) -> usize {
    let mut worst = 0;
    for (i, ind) in population.iter().enumerate().skip(1) {
        if ind.fitness < population[worst].fitness {
            worst = i;
        }
    }
    worst
}

// ============================================================================
// Tests
// ============================================================================
