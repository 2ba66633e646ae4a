//! Sign inversion.

use super::qbf::QbfEvaluator;
use super::set_cover::CoverageConstraint;
use super::types::Evaluator;
use crate::solution::Solution;

/// Negates every value produced by the wrapped evaluator.
///
/// The GA always maximizes; wrapping an objective in `SignFlip` turns it
/// into a minimization without touching the numeric code. Coverage queries
/// pass through untouched when the inner evaluator carries a constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct SignFlip<E> {
    inner: E,
}

/// QBF with negated values, for minimization.
pub type QbfInverse = SignFlip<QbfEvaluator>;

impl<E> SignFlip<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Evaluator> Evaluator for SignFlip<E> {
    fn domain_size(&self) -> usize {
        self.inner.domain_size()
    }

    fn evaluate(&self, solution: &mut Solution) -> f64 {
        solution.cost = -self.inner.evaluate(solution);
        solution.cost
    }

    fn evaluate_insertion_cost(&self, elem: usize, solution: &Solution) -> f64 {
        -self.inner.evaluate_insertion_cost(elem, solution)
    }

    fn evaluate_removal_cost(&self, elem: usize, solution: &Solution) -> f64 {
        -self.inner.evaluate_removal_cost(elem, solution)
    }

    fn evaluate_exchange_cost(&self, elem_in: usize, elem_out: usize, solution: &Solution) -> f64 {
        -self.inner.evaluate_exchange_cost(elem_in, elem_out, solution)
    }
}

impl<E: CoverageConstraint> CoverageConstraint for SignFlip<E> {
    fn universe_size(&self) -> usize {
        self.inner.universe_size()
    }

    fn variable_count(&self) -> usize {
        self.inner.variable_count()
    }

    fn coverage_set(&self, var: usize) -> &[usize] {
        self.inner.coverage_set(var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::SetCoverConstraint;

    fn qbf() -> QbfEvaluator {
        QbfEvaluator::from_upper_rows(vec![vec![1.0, -2.0, 3.0], vec![4.0, 5.0], vec![-6.0]])
            .unwrap()
    }

    #[test]
    fn test_negates_full_evaluation() {
        let inverse = QbfInverse::new(qbf());
        for elems in [vec![], vec![0], vec![1, 2], vec![0, 1, 2]] {
            let mut a = Solution::from_elements(elems.clone());
            let mut b = Solution::from_elements(elems);
            let direct = qbf().evaluate(&mut a);
            assert_eq!(inverse.evaluate(&mut b), -direct);
            assert_eq!(b.cost, -direct);
        }
    }

    #[test]
    fn test_negates_incremental_queries() {
        let inner = qbf();
        let inverse = SignFlip::new(inner.clone());
        let sol = Solution::from_elements([0, 2]);
        assert_eq!(
            inverse.evaluate_insertion_cost(1, &sol),
            -inner.evaluate_insertion_cost(1, &sol)
        );
        assert_eq!(
            inverse.evaluate_removal_cost(2, &sol),
            -inner.evaluate_removal_cost(2, &sol)
        );
        assert_eq!(
            inverse.evaluate_exchange_cost(1, 0, &sol),
            -inner.evaluate_exchange_cost(1, 0, &sol)
        );
        assert_eq!(inverse.domain_size(), 3);
    }

    #[test]
    fn test_wrapping_order_is_irrelevant() {
        let sets = vec![vec![1, 2], vec![2, 3], vec![1, 3]];
        let outer = SignFlip::new(SetCoverConstraint::new(qbf(), sets.clone()).unwrap());
        let inner = SetCoverConstraint::new(SignFlip::new(qbf()), sets).unwrap();

        let mut a = Solution::from_elements([0, 1]);
        let mut b = a.clone();
        assert_eq!(outer.evaluate(&mut a), inner.evaluate(&mut b));
        assert_eq!(outer.is_feasible(&a), inner.is_feasible(&b));

        let partial = Solution::from_elements([0]);
        assert_eq!(
            outer.get_uncovered_elements(&partial),
            inner.get_uncovered_elements(&partial)
        );
    }
}
