//! Core type definitions for the GA framework.
//!
//! [`GaProblem`] is the contract between the generic engine and a problem
//! binding: the engine owns the population, the random stream and the
//! evolutionary loop; the binding owns decoding, scoring and gene mutation.

use super::operators::two_point_crossover;
use crate::solution::Solution;
use rand::Rng;
use std::ops::{Deref, DerefMut};

/// Fixed-length bit-vector genotype.
///
/// Locus `i` set means decision variable `i` is selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome {
    genes: Vec<bool>,
}

impl Chromosome {
    /// All-zero chromosome of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            genes: vec![false; n],
        }
    }

    pub fn from_genes(genes: Vec<bool>) -> Self {
        Self { genes }
    }

    /// Re-encodes a solution's selected indices over a domain of size `n`.
    pub fn from_solution(solution: &Solution, n: usize) -> Self {
        Self {
            genes: solution.to_mask(n),
        }
    }

    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    /// Inverts the gene at `locus`, returning its new value.
    pub fn flip(&mut self, locus: usize) -> bool {
        self.genes[locus] = !self.genes[locus];
        self.genes[locus]
    }

    /// Number of set loci.
    pub fn count_ones(&self) -> usize {
        self.genes.iter().filter(|&&g| g).count()
    }

    /// Indices of set loci, ascending.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(i, &g)| g.then_some(i))
    }
}

impl Deref for Chromosome {
    type Target = [bool];

    fn deref(&self) -> &[bool] {
        &self.genes
    }
}

impl DerefMut for Chromosome {
    fn deref_mut(&mut self) -> &mut [bool] {
        &mut self.genes
    }
}

impl From<Vec<bool>> for Chromosome {
    fn from(genes: Vec<bool>) -> Self {
        Self { genes }
    }
}

/// A population member: a chromosome and its cached fitness.
///
/// Fitness is a pure function of the chromosome, so it is computed once per
/// individual and reused by selection, replacement and best tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub chromosome: Chromosome,
    pub fitness: f64,
}

/// Defines a binary GA optimization problem.
///
/// The engine always **maximizes** [`fitness`](Self::fitness). Minimization
/// problems are expressed by negating the objective upstream, e.g. with
/// [`SignFlip`](crate::evaluator::SignFlip).
///
/// Only the first five methods are required; the rest have defaults that
/// implement the plain GA (uniform random population, two-point crossover,
/// constant mutation rate).
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate
/// offspring in parallel when the `parallel` feature is enabled.
pub trait GaProblem: Send + Sync {
    /// Length of every chromosome (the evaluator's domain size).
    fn chromosome_size(&self) -> usize;

    /// Genotype to phenotype: one solution element per set locus, evaluated.
    fn decode(&self, chromosome: &Chromosome) -> Solution;

    /// Creates one random chromosome.
    fn generate_random_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome;

    /// Scores a chromosome. Higher is better.
    fn fitness(&self, chromosome: &Chromosome) -> f64;

    /// Mutates the gene at `locus` in place.
    fn mutate_gene(&self, chromosome: &mut Chromosome, locus: usize);

    /// Creates the generation-0 population of `size` chromosomes.
    fn initialize_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Chromosome> {
        (0..size)
            .map(|_| self.generate_random_chromosome(rng))
            .collect()
    }

    /// Recombines two parents into two children.
    fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        two_point_crossover(parent1, parent2, rng)
    }

    /// Per-locus mutation probability used in `generation` of
    /// `max_generations`. The default ignores the schedule.
    ///
    /// Only generations `1..=max_generations` mutate: generation 0 is the
    /// initial population, so the runner never asks for the rate at 0.
    fn mutation_rate(&self, _generation: usize, _max_generations: usize, base_rate: f64) -> f64 {
        base_rate
    }

    /// Called after each generation with the best-so-far fitness.
    fn on_generation(&self, _generation: usize, _best_fitness: f64) {}

    /// Called when the best-so-far solution strictly improves.
    ///
    /// `mutation_rate` is the rate used in `generation`, or `None` for the
    /// initial population.
    fn on_improvement(
        &self,
        _generation: usize,
        _best: &Solution,
        _mutation_rate: Option<f64>,
    ) {
    }
}
