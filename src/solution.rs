//! Decoded candidate solutions.

use std::fmt;

/// A set of selected decision variables with a cached cost.
///
/// Elements are distinct indices in `0..n`, kept in insertion order (the
/// decoder inserts them ascending). `cost` starts at `+∞`, meaning "not yet
/// evaluated", and is overwritten by every [`Evaluator::evaluate`] call.
///
/// [`Evaluator::evaluate`]: crate::evaluator::Evaluator::evaluate
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    elements: Vec<usize>,

    /// Last evaluated cost.
    pub cost: f64,
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}

impl Solution {
    /// Creates an empty, unevaluated solution.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    /// Creates an unevaluated solution from the given indices.
    ///
    /// Duplicates are dropped, keeping the first occurrence.
    pub fn from_elements<I: IntoIterator<Item = usize>>(elements: I) -> Self {
        let mut sol = Self::new();
        for e in elements {
            sol.insert(e);
        }
        sol
    }

    /// Builds the solution selecting every set locus of `mask`.
    pub fn from_mask(mask: &[bool]) -> Self {
        Self {
            elements: mask
                .iter()
                .enumerate()
                .filter_map(|(i, &b)| b.then_some(i))
                .collect(),
            cost: f64::INFINITY,
        }
    }

    /// Adds `elem` if not already present. Returns whether it was added.
    pub fn insert(&mut self, elem: usize) -> bool {
        if self.contains(elem) {
            return false;
        }
        self.elements.push(elem);
        true
    }

    /// Removes `elem` if present. Returns whether it was removed.
    pub fn remove(&mut self, elem: usize) -> bool {
        match self.elements.iter().position(|&e| e == elem) {
            Some(pos) => {
                self.elements.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, elem: usize) -> bool {
        self.elements.contains(&elem)
    }

    /// Selected indices in order.
    pub fn elements(&self) -> &[usize] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.elements.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Dense 0/1 view of the solution over a domain of size `n`.
    ///
    /// Indices `>= n` are ignored.
    pub fn to_mask(&self, n: usize) -> Vec<bool> {
        let mut mask = vec![false; n];
        for &e in &self.elements {
            if e < n {
                mask[e] = true;
            }
        }
        mask
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Solution: cost=[{}], size=[{}], elements={:?}",
            self.cost,
            self.elements.len(),
            self.elements
        )
    }
}
