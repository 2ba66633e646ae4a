//! GA bindings for the two problem variants.
//!
//! - [`QbfProblem`]: unconstrained QBF (maximize, or minimize through
//!   [`SignFlip`](crate::evaluator::SignFlip))
//! - [`QbfScProblem`]: QBF restricted to selections that cover a universe

mod qbf;
mod qbf_sc;

pub use qbf::QbfProblem;
pub use qbf_sc::{run_qbf_sc, PopulationStrategy, QbfScProblem, INFEASIBILITY_PENALTY};
