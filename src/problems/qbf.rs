//! Unconstrained QBF binding.

use crate::error::ConfigError;
use crate::evaluator::Evaluator;
use crate::ga::operators::random_chromosome;
use crate::ga::{Chromosome, GaConfig, GaProblem, GaResult, GaRunner};
use crate::solution::Solution;
use rand::Rng;

/// Maximizes an [`Evaluator`] over unconstrained bit vectors.
///
/// Fitness is the decoded solution's cost. Wrap the evaluator in
/// [`SignFlip`](crate::evaluator::SignFlip) to minimize instead.
#[derive(Debug, Clone)]
pub struct QbfProblem<E> {
    evaluator: E,
}

impl<E: Evaluator> QbfProblem<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Runs the GA on this problem.
    pub fn solve(&self, config: &GaConfig) -> Result<GaResult, ConfigError> {
        GaRunner::run(self, config)
    }
}

impl<E: Evaluator> GaProblem for QbfProblem<E> {
    fn chromosome_size(&self) -> usize {
        self.evaluator.domain_size()
    }

    fn decode(&self, chromosome: &Chromosome) -> Solution {
        let mut solution = Solution::from_mask(chromosome);
        self.evaluator.evaluate(&mut solution);
        solution
    }

    fn generate_random_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome {
        random_chromosome(self.chromosome_size(), 0.5, rng)
    }

    fn fitness(&self, chromosome: &Chromosome) -> f64 {
        self.decode(chromosome).cost
    }

    fn mutate_gene(&self, chromosome: &mut Chromosome, locus: usize) {
        chromosome.flip(locus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{QbfEvaluator, QbfInverse};

    /// Unique maximum 10 at {0, 2, 3}; unique minimum -2 at {1, 2, 3}.
    fn small_qbf() -> QbfEvaluator {
        QbfEvaluator::from_upper_rows(vec![
            vec![3.0, -5.0, 1.0, 2.0],
            vec![2.0, -4.0, -4.0],
            vec![2.0, 1.0],
            vec![1.0],
        ])
        .unwrap()
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(20)
            .with_max_generations(100)
            .with_mutation_rate(0.05)
            .with_seed(42)
    }

    #[test]
    fn test_decode_evaluates() {
        let problem = QbfProblem::new(small_qbf());
        let c = Chromosome::from_genes(vec![true, false, true, true]);
        let sol = problem.decode(&c);
        assert_eq!(sol.elements(), &[0, 2, 3]);
        assert_eq!(sol.cost, 10.0);
        assert_eq!(problem.fitness(&c), 10.0);
    }

    #[test]
    fn test_finds_maximum() {
        let problem = QbfProblem::new(small_qbf());
        let result = problem.solve(&config()).unwrap();
        assert_eq!(result.best_fitness, 10.0);
        assert_eq!(result.best.elements(), &[0, 2, 3]);
        assert_eq!(result.best.cost, result.best_fitness);
    }

    #[test]
    fn test_inverse_minimizes() {
        let problem = QbfProblem::new(QbfInverse::new(small_qbf()));
        let result = problem.solve(&config()).unwrap();
        // maximizing -f finds the minimum of f
        assert_eq!(result.best_fitness, 2.0);
        assert_eq!(result.best.elements(), &[1, 2, 3]);
        assert_eq!(result.best.cost, 2.0);
    }

    #[test]
    fn test_mutate_gene_flips() {
        let problem = QbfProblem::new(small_qbf());
        let mut c = Chromosome::zeros(4);
        problem.mutate_gene(&mut c, 1);
        assert_eq!(c.genes(), &[false, true, false, false]);
        problem.mutate_gene(&mut c, 1);
        assert_eq!(c.count_ones(), 0);
    }
}
