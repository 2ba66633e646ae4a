//! Bit-vector genetic operators.
//!
//! # Crossover
//!
//! - [`two_point_crossover`]: swap one contiguous window between two parents
//!
//! # Mutation
//!
//! - [`mutate_population`]: visit every locus of every chromosome and hand it
//!   to the problem's gene mutation with a fixed probability
//!
//! # Initialization
//!
//! - [`random_chromosome`]: independent Bernoulli bits

use super::types::{Chromosome, GaProblem};
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Two-point crossover.
///
/// Draws `cp1` uniformly in `[0, n]`, then `cp2` uniformly in `[cp1, n]`,
/// and swaps the genes in `[cp1, cp2)` between the parents. Loci outside the
/// window are copied unchanged. An empty window yields copies of the parents.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn two_point_crossover<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    let cp1 = rng.random_range(0..=n);
    let cp2 = cp1 + rng.random_range(0..=n - cp1);

    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();
    child1[cp1..cp2].copy_from_slice(&parent2[cp1..cp2]);
    child2[cp1..cp2].copy_from_slice(&parent1[cp1..cp2]);
    (child1, child2)
}

// ============================================================================
// Mutation
// ============================================================================

/// Flips each locus of each chromosome with probability `rate`.
///
/// One uniform draw is consumed per locus whether or not it mutates, so the
/// random stream advances identically for a given population shape.
pub fn mutate_population<P: GaProblem, R: Rng>(
    problem: &P,
    offspring: &mut [Chromosome],
    rate: f64,
    rng: &mut R,
) {
    for chromosome in offspring.iter_mut() {
        for locus in 0..chromosome.len() {
            if rng.random::<f64>() < rate {
                problem.mutate_gene(chromosome, locus);
            }
        }
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Chromosome of length `n` whose bits are set independently with probability `p`.
pub fn random_chromosome<R: Rng>(n: usize, p: f64, rng: &mut R) -> Chromosome {
    Chromosome::from_genes((0..n).map(|_| rng.random_bool(p)).collect())
}

// ============================================================================
// Tests
// ============================================================================
