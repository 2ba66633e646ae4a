//! Quadratic Binary Function evaluator.
//!
//! Evaluates `f(x) = Σᵢ Σⱼ xᵢ·A[i][j]·xⱼ` for a binary vector `x`. The
//! coefficient matrix is stored densely but only its upper triangle
//! (`j >= i`) carries values; the strict lower triangle is zero.
//!
//! # Incremental evaluation
//!
//! The marginal value of switching variable `i` on, given the rest of `x`, is
//!
//! ```text
//! c(i, x) = A[i][i] + Σ_{j ≠ i} xⱼ·(A[i][j] + A[j][i])
//! ```
//!
//! Summing both orientations makes the formula independent of which triangle
//! physically holds a pair's coefficient. Insertion returns `c`, removal
//! returns `-c`, and an exchange combines both minus the pair term of the
//! two moved variables, which `c(in)` counts although `out` is leaving.
//! Every incremental query is O(n).

use super::types::Evaluator;
use crate::error::InstanceError;
use crate::solution::Solution;

/// Dense QBF with upper-triangular coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct QbfEvaluator {
    size: usize,
    /// Row-major `size × size`, zero below the diagonal.
    matrix: Vec<f64>,
}

impl QbfEvaluator {
    /// Builds the evaluator from upper-triangle rows.
    ///
    /// Row `i` holds the `n − i` values `A[i][i..n]`, where `n = rows.len()`.
    ///
    /// # Errors
    /// [`InstanceError::DimensionMismatch`] if a row has the wrong length.
    pub fn from_upper_rows(rows: Vec<Vec<f64>>) -> Result<Self, InstanceError> {
        let size = rows.len();
        let mut matrix = vec![0.0; size * size];
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size - i {
                return Err(InstanceError::DimensionMismatch {
                    row: i,
                    expected: size - i,
                    actual: row.len(),
                });
            }
            matrix[i * size + i..(i + 1) * size].copy_from_slice(&row);
        }
        Ok(Self { size, matrix })
    }

    /// Coefficient `A[i][j]`; zero whenever `j < i`.
    #[inline]
    pub fn coefficient(&self, i: usize, j: usize) -> f64 {
        self.matrix[i * self.size + j]
    }

    /// Joint coefficient of the unordered pair `{i, j}`.
    #[inline]
    fn pair(&self, i: usize, j: usize) -> f64 {
        self.coefficient(i, j) + self.coefficient(j, i)
    }

    /// `f(x)` for a dense assignment. O(n²).
    pub fn evaluate_qbf(&self, x: &[bool]) -> f64 {
        let n = self.size;
        let mut total = 0.0;
        for i in (0..n).filter(|&i| x[i]) {
            let row = &self.matrix[i * n..(i + 1) * n];
            total += (i..n).filter(|&j| x[j]).map(|j| row[j]).sum::<f64>();
        }
        total
    }

    fn contribution(&self, i: usize, x: &[bool]) -> f64 {
        let mut total = self.coefficient(i, i);
        for j in (0..self.size).filter(|&j| j != i && x[j]) {
            total += self.pair(i, j);
        }
        total
    }

    /// Cost change of switching `i` on in `x`.
    pub fn evaluate_insertion_qbf(&self, i: usize, x: &[bool]) -> f64 {
        if x[i] {
            return 0.0;
        }
        self.contribution(i, x)
    }

    /// Cost change of switching `i` off in `x`.
    pub fn evaluate_removal_qbf(&self, i: usize, x: &[bool]) -> f64 {
        if !x[i] {
            return 0.0;
        }
        -self.contribution(i, x)
    }

    /// Cost change of switching `elem_in` on and `elem_out` off in `x`.
    pub fn evaluate_exchange_qbf(&self, elem_in: usize, elem_out: usize, x: &[bool]) -> f64 {
        if elem_in == elem_out {
            return 0.0;
        }
        if x[elem_in] {
            return self.evaluate_removal_qbf(elem_out, x);
        }
        if !x[elem_out] {
            return self.evaluate_insertion_qbf(elem_in, x);
        }
        self.contribution(elem_in, x)
            - self.contribution(elem_out, x)
            - self.pair(elem_in, elem_out)
    }
}

impl Evaluator for QbfEvaluator {
    fn domain_size(&self) -> usize {
        self.size
    }

    fn evaluate(&self, solution: &mut Solution) -> f64 {
        let x = solution.to_mask(self.size);
        solution.cost = self.evaluate_qbf(&x);
        solution.cost
    }

    fn evaluate_insertion_cost(&self, elem: usize, solution: &Solution) -> f64 {
        self.evaluate_insertion_qbf(elem, &solution.to_mask(self.size))
    }

    fn evaluate_removal_cost(&self, elem: usize, solution: &Solution) -> f64 {
        self.evaluate_removal_qbf(elem, &solution.to_mask(self.size))
    }

    fn evaluate_exchange_cost(&self, elem_in: usize, elem_out: usize, solution: &Solution) -> f64 {
        self.evaluate_exchange_qbf(elem_in, elem_out, &solution.to_mask(self.size))
    }
}
