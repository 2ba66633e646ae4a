//! QBF with a set-cover constraint.
//!
//! Every chromosome the GA creates or modifies is pushed back into the
//! feasible region by the constraint's greedy [`repair`]. Chromosomes that
//! still leave elements uncovered (only possible on an instance some element
//! of which no set contains) are scored with a large per-element penalty.
//!
//! Three generation-0 strategies are available, selected by
//! [`PopulationStrategy`]:
//!
//! | Strategy | Construction |
//! |----------|--------------|
//! | `random` | uniform bits, then repair |
//! | `stratified` (`lhc`) | individual `i` sets each bit when `(i + u) / size > 0.5`, then repair |
//! | `greedy` | repair from all-zero, then each unset bit on with probability 0.3 |
//!
//! [`repair`]: CoverageConstraint::repair

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::evaluator::{CoverageConstraint, Evaluator};
use crate::ga::operators::{random_chromosome, two_point_crossover};
use crate::ga::{Chromosome, GaConfig, GaProblem, GaResult, GaRunner};
use crate::solution::Solution;
use rand::Rng;

/// Fitness deducted per uncovered element.
pub const INFEASIBILITY_PENALTY: f64 = 10_000.0;

const GREEDY_EXTRA_PROBABILITY: f64 = 0.3;
const ADAPTIVE_INITIAL_RATE: f64 = 0.1;
const ADAPTIVE_FINAL_RATE: f64 = 0.001;

/// How the generation-0 population is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PopulationStrategy {
    #[default]
    Random,
    /// Latin-hypercube style density strata.
    Stratified,
    Greedy,
}

impl FromStr for PopulationStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "stratified" | "lhc" => Ok(Self::Stratified),
            "greedy" => Ok(Self::Greedy),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for PopulationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Random => "random",
            Self::Stratified => "stratified",
            Self::Greedy => "greedy",
        };
        f.write_str(name)
    }
}

/// Maximizes an evaluator subject to its coverage constraint.
#[derive(Debug, Clone)]
pub struct QbfScProblem<E> {
    evaluator: E,
    strategy: PopulationStrategy,
    adaptive_mutation: bool,
}

impl<E: Evaluator + CoverageConstraint> QbfScProblem<E> {
    /// Random initialization, fixed mutation rate.
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            strategy: PopulationStrategy::default(),
            adaptive_mutation: false,
        }
    }

    pub fn with_strategy(mut self, strategy: PopulationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replaces the configured mutation rate with a schedule decaying
    /// linearly from 0.1 to 0.001 over the run.
    pub fn with_adaptive_mutation(mut self, adaptive: bool) -> Self {
        self.adaptive_mutation = adaptive;
        self
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn strategy(&self) -> PopulationStrategy {
        self.strategy
    }

    pub fn adaptive_mutation(&self) -> bool {
        self.adaptive_mutation
    }

    /// Adaptive rate at `generation` of `max_generations`.
    ///
    /// The schedule is defined from generation 0, but the runner only asks
    /// for generations `1..=max_generations`, so 0.1 itself is never used.
    pub fn adaptive_rate(generation: usize, max_generations: usize) -> f64 {
        let progress = if max_generations == 0 {
            0.0
        } else {
            generation as f64 / max_generations as f64
        };
        ADAPTIVE_INITIAL_RATE * (1.0 - progress) + ADAPTIVE_FINAL_RATE * progress
    }

    /// Runs the GA on this problem.
    pub fn solve(&self, config: &GaConfig) -> Result<GaResult, ConfigError> {
        GaRunner::run(self, config)
    }

    fn stratified_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Chromosome> {
        let n = self.chromosome_size();
        (0..size)
            .map(|i| {
                let mut chromosome = Chromosome::zeros(n);
                for gene in chromosome.iter_mut() {
                    let threshold = (i as f64 + rng.random::<f64>()) / size as f64;
                    *gene = threshold > 0.5;
                }
                self.evaluator.repair(&mut chromosome);
                chromosome
            })
            .collect()
    }

    fn greedy_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome {
        let mut chromosome = Chromosome::zeros(self.chromosome_size());
        self.evaluator.repair(&mut chromosome);
        for gene in chromosome.iter_mut() {
            if !*gene && rng.random::<f64>() < GREEDY_EXTRA_PROBABILITY {
                *gene = true;
            }
        }
        chromosome
    }
}

impl<E: Evaluator + CoverageConstraint> GaProblem for QbfScProblem<E> {
    fn chromosome_size(&self) -> usize {
        self.evaluator.domain_size()
    }

    fn decode(&self, chromosome: &Chromosome) -> Solution {
        let mut solution = Solution::from_mask(chromosome);
        self.evaluator.evaluate(&mut solution);
        solution
    }

    fn generate_random_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome {
        let mut chromosome = random_chromosome(self.chromosome_size(), 0.5, rng);
        self.evaluator.repair(&mut chromosome);
        chromosome
    }

    fn fitness(&self, chromosome: &Chromosome) -> f64 {
        let solution = self.decode(chromosome);
        if self.evaluator.is_feasible(&solution) {
            solution.cost
        } else {
            let uncovered = self.evaluator.get_uncovered_elements(&solution).len();
            solution.cost - INFEASIBILITY_PENALTY * uncovered as f64
        }
    }

    /// Flips the gene; dropping a variable that breaks coverage triggers repair.
    fn mutate_gene(&self, chromosome: &mut Chromosome, locus: usize) {
        let now_set = chromosome.flip(locus);
        if !now_set && !self.evaluator.is_feasible_mask(chromosome) {
            self.evaluator.repair(chromosome);
        }
    }

    fn initialize_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Chromosome> {
        match self.strategy {
            PopulationStrategy::Random => (0..size)
                .map(|_| self.generate_random_chromosome(rng))
                .collect(),
            PopulationStrategy::Stratified => self.stratified_population(size, rng),
            PopulationStrategy::Greedy => (0..size).map(|_| self.greedy_chromosome(rng)).collect(),
        }
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        let (mut child1, mut child2) = two_point_crossover(parent1, parent2, rng);
        self.evaluator.repair(&mut child1);
        self.evaluator.repair(&mut child2);
        (child1, child2)
    }

    fn mutation_rate(&self, generation: usize, max_generations: usize, base_rate: f64) -> f64 {
        if self.adaptive_mutation {
            Self::adaptive_rate(generation, max_generations)
        } else {
            base_rate
        }
    }

    fn on_improvement(&self, generation: usize, best: &Solution, mutation_rate: Option<f64>) {
        let uncovered = self.evaluator.get_uncovered_elements(best).len();
        match mutation_rate {
            Some(rate) => log::info!(
                "(Gen. {generation}) feasible={}, uncovered={uncovered}, mutation_rate={rate:.4}",
                uncovered == 0
            ),
            None => log::info!(
                "(Gen. {generation}) feasible={}, uncovered={uncovered}",
                uncovered == 0
            ),
        }
    }
}

/// Builds a [`QbfScProblem`] from a strategy name and runs it.
///
/// # Errors
/// [`ConfigError::UnknownStrategy`] for an unrecognised `strategy`, or any
/// configuration error reported by [`GaConfig::validate`].
pub fn run_qbf_sc<E: Evaluator + CoverageConstraint>(
    evaluator: E,
    config: &GaConfig,
    strategy: &str,
    adaptive_mutation: bool,
) -> crate::Result<GaResult> {
    let strategy: PopulationStrategy = strategy.parse()?;
    log::debug!(
        "QBF-SC run: strategy={strategy}, adaptive_mutation={adaptive_mutation}, n={}",
        evaluator.domain_size()
    );
    let problem = QbfScProblem::new(evaluator)
        .with_strategy(strategy)
        .with_adaptive_mutation(adaptive_mutation);
    Ok(problem.solve(config)?)
}
