//! Parent selection.
//!
//! Binary tournament with replacement: for each slot, draw two population
//! indices uniformly (repeats allowed) and keep the fitter individual.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::{Chromosome, Individual};
use rand::Rng;

/// Runs one binary tournament and returns the winner's index.
///
/// Higher fitness wins. On equal fitness the second draw wins.
///
/// # Panics
/// Panics if `population` is empty.
pub fn binary_tournament<R: Rng>(population: &[Individual], rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();
    let first = rng.random_range(0..n);
    let second = rng.random_range(0..n);
    if population[first].fitness > population[second].fitness {
        first
    } else {
        second
    }
}

/// Fills a parent pool of the same size as `population` by binary tournament.
///
/// Winners are copied, so parents never alias population members.
pub fn select_parents<R: Rng>(population: &[Individual], rng: &mut R) -> Vec<Chromosome> {
    (0..population.len())
        .map(|_| population[binary_tournament(population, rng)].chromosome.clone())
        .collect()
}
