//! The evaluator capability.

use crate::solution::Solution;

/// Scores solutions over a binary domain of fixed size.
///
/// Implementations are read-only: any per-call working state (such as the
/// dense 0/1 view of a solution) is built inside the call, so one evaluator
/// can serve several runs at once.
///
/// # Incremental queries
///
/// The three `*_cost` methods return the change in cost a move would cause,
/// without building the moved solution:
///
/// ```text
/// insertion(e, s)     == evaluate(s ∪ {e}) − evaluate(s)
/// removal(e, s)       == evaluate(s ∖ {e}) − evaluate(s)
/// exchange(i, o, s)   == evaluate(s ∪ {i} ∖ {o}) − evaluate(s)
/// ```
///
/// Moves that change nothing (inserting a present element, removing an
/// absent one, exchanging an element with itself) return `0.0`.
pub trait Evaluator: Send + Sync {
    /// Number of decision variables.
    fn domain_size(&self) -> usize;

    /// Full evaluation. Writes the result to `solution.cost` and returns it.
    fn evaluate(&self, solution: &mut Solution) -> f64;

    /// Cost change of adding `elem` to `solution`.
    fn evaluate_insertion_cost(&self, elem: usize, solution: &Solution) -> f64;

    /// Cost change of removing `elem` from `solution`.
    fn evaluate_removal_cost(&self, elem: usize, solution: &Solution) -> f64;

    /// Cost change of adding `elem_in` and removing `elem_out` in one move.
    fn evaluate_exchange_cost(&self, elem_in: usize, elem_out: usize, solution: &Solution) -> f64;
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn domain_size(&self) -> usize {
        (**self).domain_size()
    }

    fn evaluate(&self, solution: &mut Solution) -> f64 {
        (**self).evaluate(solution)
    }

    fn evaluate_insertion_cost(&self, elem: usize, solution: &Solution) -> f64 {
        (**self).evaluate_insertion_cost(elem, solution)
    }

    fn evaluate_removal_cost(&self, elem: usize, solution: &Solution) -> f64 {
        (**self).evaluate_removal_cost(elem, solution)
    }

    fn evaluate_exchange_cost(&self, elem_in: usize, elem_out: usize, solution: &Solution) -> f64 {
        (**self).evaluate_exchange_cost(elem_in, elem_out, solution)
    }
}
