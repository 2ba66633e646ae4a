//! Set-cover constraint layer.
//!
//! QBF-SC adds a covering requirement to the QBF: the universe is
//! `U = {1, …, n}`, selecting variable `i` covers `sets[i] ⊆ U`, and a
//! solution is feasible when the selected sets cover all of `U`.
//!
//! Coverage is monotone in the selection: switching a variable on can never
//! break feasibility. [`CoverageConstraint::repair`] relies on this and only
//! ever switches variables on.

use super::types::Evaluator;
use crate::error::InstanceError;
use crate::solution::Solution;
use std::collections::{BTreeMap, BTreeSet};

/// Coverage multiplicity statistics of a solution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageSummary {
    /// Smallest number of selected sets covering any one element.
    pub min: usize,
    /// Largest number of selected sets covering any one element.
    pub max: usize,
    /// Average coverage multiplicity over the universe.
    pub mean: f64,
    /// Number of selected variables that could be dropped while staying feasible.
    pub removable: usize,
}

/// Access to a covering requirement, plus the queries and repair built on it.
///
/// Implementors provide the three accessors; everything else is derived.
/// Universe elements are 1-indexed; variables are 0-indexed.
pub trait CoverageConstraint {
    /// Size of the universe `{1..=universe_size}`.
    fn universe_size(&self) -> usize;

    /// Number of decision variables (one coverage set each).
    fn variable_count(&self) -> usize;

    /// Universe elements covered by selecting `var`, ascending.
    fn coverage_set(&self, var: usize) -> &[usize];

    /// Whether the selection covers the whole universe.
    fn is_feasible(&self, solution: &Solution) -> bool {
        uncovered_mask(self, solution.iter()).1 == 0
    }

    /// Same as [`is_feasible`](Self::is_feasible), for a dense selection.
    fn is_feasible_mask(&self, mask: &[bool]) -> bool {
        uncovered_mask(self, selected(mask)).1 == 0
    }

    /// Universe elements not covered by the selection.
    fn get_uncovered_elements(&self, solution: &Solution) -> BTreeSet<usize> {
        let (uncovered, _) = uncovered_mask(self, solution.iter());
        (1..=self.universe_size()).filter(|&e| uncovered[e]).collect()
    }

    /// For each universe element, how many selected variables cover it.
    fn get_coverage_count(&self, solution: &Solution) -> BTreeMap<usize, usize> {
        let mut counts: BTreeMap<usize, usize> =
            (1..=self.universe_size()).map(|e| (e, 0)).collect();
        for var in solution.iter().filter(|&v| v < self.variable_count()) {
            for e in self.coverage_set(var) {
                if let Some(c) = counts.get_mut(e) {
                    *c += 1;
                }
            }
        }
        counts
    }

    /// Selected variables whose removal keeps the solution feasible.
    ///
    /// Each candidate is judged on its own against the current selection.
    /// Returns an empty list when the solution is infeasible.
    fn get_removable_variables(&self, solution: &Solution) -> Vec<usize> {
        if !self.is_feasible(solution) {
            return Vec::new();
        }
        let counts = self.get_coverage_count(solution);
        solution
            .iter()
            .filter(|&v| v < self.variable_count())
            .filter(|&v| {
                self.coverage_set(v)
                    .iter()
                    .all(|e| counts.get(e).copied().unwrap_or(0) > 1)
            })
            .collect()
    }

    /// Min/max/mean coverage multiplicity and the removable-variable count.
    fn coverage_summary(&self, solution: &Solution) -> CoverageSummary {
        let counts = self.get_coverage_count(solution);
        let min = counts.values().copied().min().unwrap_or(0);
        let max = counts.values().copied().max().unwrap_or(0);
        let mean = if counts.is_empty() {
            0.0
        } else {
            counts.values().sum::<usize>() as f64 / counts.len() as f64
        };
        CoverageSummary {
            min,
            max,
            mean,
            removable: self.get_removable_variables(solution).len(),
        }
    }

    /// Greedily switches variables on until the selection is feasible.
    ///
    /// Each round scans the unselected variables in ascending order and
    /// picks the one covering the most still-uncovered elements; on equal
    /// gain the lowest index wins. Stops when everything is covered or no
    /// unselected variable covers anything new, which only happens on an
    /// instance that fails [`validate_instance`](Self::validate_instance).
    fn repair(&self, chromosome: &mut [bool]) {
        let (mut uncovered, mut remaining) = uncovered_mask(self, selected(chromosome));

        while remaining > 0 {
            let mut best: Option<usize> = None;
            let mut best_gain = 0usize;
            for var in (0..chromosome.len()).filter(|&v| !chromosome[v]) {
                let gain = self
                    .coverage_set(var)
                    .iter()
                    .filter(|&&e| uncovered[e])
                    .count();
                if gain > best_gain {
                    best_gain = gain;
                    best = Some(var);
                }
            }

            let Some(var) = best else {
                log::debug!("repair stopped with {remaining} uncoverable elements");
                break;
            };

            chromosome[var] = true;
            for &e in self.coverage_set(var) {
                if uncovered[e] {
                    uncovered[e] = false;
                    remaining -= 1;
                }
            }
        }
    }

    /// Checks that every universe element belongs to at least one set.
    ///
    /// # Errors
    /// [`InstanceError::InfeasibleInstance`] listing the uncoverable elements.
    fn validate_instance(&self) -> Result<(), InstanceError> {
        let (uncovered, remaining) = uncovered_mask(self, 0..self.variable_count());
        if remaining == 0 {
            return Ok(());
        }
        Err(InstanceError::InfeasibleInstance {
            missing: (1..=self.universe_size()).filter(|&e| uncovered[e]).collect(),
        })
    }
}

impl<C: CoverageConstraint + ?Sized> CoverageConstraint for &C {
    fn universe_size(&self) -> usize {
        (**self).universe_size()
    }

    fn variable_count(&self) -> usize {
        (**self).variable_count()
    }

    fn coverage_set(&self, var: usize) -> &[usize] {
        (**self).coverage_set(var)
    }
}

fn selected(mask: &[bool]) -> impl Iterator<Item = usize> + '_ {
    mask.iter().enumerate().filter_map(|(i, &b)| b.then_some(i))
}

/// Marks universe elements left uncovered by `vars`.
///
/// Returns the mask (indexed by element, slot 0 unused) and the number of
/// uncovered elements. Out-of-range variables are ignored.
fn uncovered_mask<C, I>(constraint: &C, vars: I) -> (Vec<bool>, usize)
where
    C: CoverageConstraint + ?Sized,
    I: IntoIterator<Item = usize>,
{
    let size = constraint.universe_size();
    let mut uncovered = vec![true; size + 1];
    uncovered[0] = false;
    let mut remaining = size;
    for var in vars
        .into_iter()
        .filter(|&v| v < constraint.variable_count())
    {
        for &e in constraint.coverage_set(var) {
            if uncovered[e] {
                uncovered[e] = false;
                remaining -= 1;
            }
        }
    }
    (uncovered, remaining)
}

/// An evaluator constrained by a set-cover requirement over `{1..=n}`.
///
/// Cost queries are delegated to the inner evaluator unchanged; feasibility
/// is a separate concern, queried through [`CoverageConstraint`].
#[derive(Debug, Clone, PartialEq)]
pub struct SetCoverConstraint<E> {
    inner: E,
    sets: Vec<Vec<usize>>,
}

impl<E: Evaluator> SetCoverConstraint<E> {
    /// Attaches one coverage set per variable to `inner`.
    ///
    /// The universe is `{1..=n}` with `n = inner.domain_size()`. Duplicate
    /// elements within a set are merged.
    ///
    /// # Errors
    /// - [`InstanceError::SetCountMismatch`] if `sets.len() != n`
    /// - [`InstanceError::InvalidElement`] for an element `0` or `> n`
    pub fn new(inner: E, mut sets: Vec<Vec<usize>>) -> Result<Self, InstanceError> {
        let n = inner.domain_size();
        if sets.len() != n {
            return Err(InstanceError::SetCountMismatch {
                expected: n,
                actual: sets.len(),
            });
        }
        for (i, set) in sets.iter_mut().enumerate() {
            if let Some(&element) = set.iter().find(|&&e| e == 0 || e > n) {
                return Err(InstanceError::InvalidElement {
                    set: i,
                    element,
                    universe: n,
                });
            }
            set.sort_unstable();
            set.dedup();
        }
        Ok(Self { inner, sets })
    }
}

impl<E> SetCoverConstraint<E> {
    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn sets(&self) -> &[Vec<usize>] {
        &self.sets
    }
}

impl<E> CoverageConstraint for SetCoverConstraint<E> {
    fn universe_size(&self) -> usize {
        self.sets.len()
    }

    fn variable_count(&self) -> usize {
        self.sets.len()
    }

    fn coverage_set(&self, var: usize) -> &[usize] {
        &self.sets[var]
    }
}

impl<E: Evaluator> Evaluator for SetCoverConstraint<E> {
    fn domain_size(&self) -> usize {
        self.inner.domain_size()
    }

    fn evaluate(&self, solution: &mut Solution) -> f64 {
        self.inner.evaluate(solution)
    }

    fn evaluate_insertion_cost(&self, elem: usize, solution: &Solution) -> f64 {
        self.inner.evaluate_insertion_cost(elem, solution)
    }

    fn evaluate_removal_cost(&self, elem: usize, solution: &Solution) -> f64 {
        self.inner.evaluate_removal_cost(elem, solution)
    }

    fn evaluate_exchange_cost(&self, elem_in: usize, elem_out: usize, solution: &Solution) -> f64 {
        self.inner.evaluate_exchange_cost(elem_in, elem_out, solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::QbfEvaluator;

    fn zero_qbf(n: usize) -> QbfEvaluator {
        QbfEvaluator::from_upper_rows((0..n).map(|i| vec![0.0; n - i]).collect()).unwrap()
    }

    fn triangle() -> SetCoverConstraint<QbfEvaluator> {
        SetCoverConstraint::new(zero_qbf(3), vec![vec![1, 2], vec![2, 3], vec![1, 3]]).unwrap()
    }

    #[test]
    fn test_feasibility() {
        let sc = triangle();
        assert!(!sc.is_feasible(&Solution::from_elements([0])));
        assert!(sc.is_feasible(&Solution::from_elements([0, 1])));
        assert!(sc.is_feasible_mask(&[true, false, true]));
        assert!(!sc.is_feasible_mask(&[false, false, false]));
    }

    #[test]
    fn test_uncovered_elements() {
        let sc = triangle();
        let uncovered = sc.get_uncovered_elements(&Solution::from_elements([0]));
        assert_eq!(uncovered.into_iter().collect::<Vec<_>>(), vec![3]);
        assert_eq!(sc.get_uncovered_elements(&Solution::new()).len(), 3);
    }

    #[test]
    fn test_coverage_count() {
        let sc = triangle();
        let counts = sc.get_coverage_count(&Solution::from_elements([0, 1, 2]));
        assert_eq!(counts.values().copied().collect::<Vec<_>>(), vec![2, 2, 2]);
        let counts = sc.get_coverage_count(&Solution::from_elements([0]));
        assert_eq!(counts[&1], 1);
        assert_eq!(counts[&3], 0);
    }

    #[test]
    fn test_removable_variables() {
        let sc = triangle();
        // every element is covered twice: any single variable may go
        let all = Solution::from_elements([0, 1, 2]);
        assert_eq!(sc.get_removable_variables(&all), vec![0, 1, 2]);
        // minimal cover: nothing can go
        assert!(sc
            .get_removable_variables(&Solution::from_elements([0, 1]))
            .is_empty());
        // infeasible: empty by definition
        assert!(sc
            .get_removable_variables(&Solution::from_elements([0]))
            .is_empty());
    }

    #[test]
    fn test_repair_worked_example() {
        let sc = triangle();
        let mut chromosome = vec![true, false, false];
        sc.repair(&mut chromosome);
        // variables 1 and 2 both gain 1; the lower index wins
        assert_eq!(chromosome, vec![true, true, false]);
        assert!(sc.is_feasible_mask(&chromosome));
    }

    #[test]
    fn test_repair_from_empty_picks_largest_gain() {
        let sc = SetCoverConstraint::new(
            zero_qbf(4),
            vec![vec![1], vec![1, 2, 3], vec![4], vec![2, 4]],
        )
        .unwrap();
        let mut chromosome = vec![false; 4];
        sc.repair(&mut chromosome);
        assert_eq!(chromosome, vec![false, true, true, false]);
    }

    #[test]
    fn test_repair_keeps_feasible_untouched() {
        let sc = triangle();
        let mut chromosome = vec![false, true, true];
        sc.repair(&mut chromosome);
        assert_eq!(chromosome, vec![false, true, true]);
    }

    #[test]
    fn test_validate_instance() {
        assert!(triangle().validate_instance().is_ok());

        let sc = SetCoverConstraint::new(zero_qbf(3), vec![vec![1], vec![1], vec![]]).unwrap();
        match sc.validate_instance() {
            Err(InstanceError::InfeasibleInstance { missing }) => assert_eq!(missing, vec![2, 3]),
            other => panic!("expected InfeasibleInstance, got {other:?}"),
        }
    }

    #[test]
    fn test_repair_stops_on_invalid_instance() {
        let sc = SetCoverConstraint::new(zero_qbf(3), vec![vec![1], vec![1], vec![]]).unwrap();
        let mut chromosome = vec![false; 3];
        sc.repair(&mut chromosome);
        assert_eq!(chromosome, vec![true, false, false]);
    }

    #[test]
    fn test_invalid_element_rejected() {
        let err = SetCoverConstraint::new(zero_qbf(2), vec![vec![1], vec![3]]).unwrap_err();
        assert!(matches!(
            err,
            InstanceError::InvalidElement {
                set: 1,
                element: 3,
                universe: 2
            }
        ));
        let err = SetCoverConstraint::new(zero_qbf(2), vec![vec![0], vec![1]]).unwrap_err();
        assert!(matches!(err, InstanceError::InvalidElement { element: 0, .. }));
    }

    #[test]
    fn test_set_count_mismatch() {
        let err = SetCoverConstraint::new(zero_qbf(3), vec![vec![1]]).unwrap_err();
        assert!(matches!(
            err,
            InstanceError::SetCountMismatch {
                expected: 3,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_duplicates_merged() {
        let sc = SetCoverConstraint::new(zero_qbf(2), vec![vec![2, 1, 2], vec![1]]).unwrap();
        assert_eq!(sc.coverage_set(0), &[1, 2]);
    }

    #[test]
    fn test_coverage_summary() {
        let sc = triangle();
        let summary = sc.coverage_summary(&Solution::from_elements([0, 1, 2]));
        assert_eq!(summary.min, 2);
        assert_eq!(summary.max, 2);
        assert!((summary.mean - 2.0).abs() < 1e-12);
        assert_eq!(summary.removable, 3);

        let summary = sc.coverage_summary(&Solution::from_elements([0, 1]));
        assert_eq!((summary.min, summary.max, summary.removable), (1, 2, 0));
        assert!((summary.mean - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_cost_delegated() {
        let qbf =
            QbfEvaluator::from_upper_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0], vec![6.0]])
                .unwrap();
        let sc = SetCoverConstraint::new(qbf.clone(), vec![vec![1, 2], vec![2, 3], vec![1, 3]])
            .unwrap();
        let mut a = Solution::from_elements([0, 2]);
        let mut b = a.clone();
        assert_eq!(sc.evaluate(&mut a), qbf.evaluate(&mut b));
        assert_eq!(
            sc.evaluate_exchange_cost(1, 0, &a),
            qbf.evaluate_exchange_cost(1, 0, &a)
        );
    }
}
