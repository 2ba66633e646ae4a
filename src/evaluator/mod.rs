//! Objective and constraint evaluation.
//!
//! The GA never looks at coefficients or coverage sets directly; it goes
//! through the [`Evaluator`] capability, which exposes the domain size, full
//! evaluation, and three incremental cost queries.
//!
//! # Composition
//!
//! Concerns are layered by wrapping rather than by subtyping:
//!
//! - [`QbfEvaluator`]: dense upper-triangular QBF, `f(x) = xᵀAx`
//! - [`SignFlip`]: negates every value of an inner evaluator
//! - [`SetCoverConstraint`]: adds a universe and coverage sets to an inner
//!   evaluator, delegating the numeric work unchanged
//!
//! The two wrappers combine in either order:
//! `SignFlip<SetCoverConstraint<QbfEvaluator>>` and
//! `SetCoverConstraint<SignFlip<QbfEvaluator>>` score and cover identically.

mod qbf;
mod set_cover;
mod sign_flip;
mod types;

pub use qbf::QbfEvaluator;
pub use set_cover::{CoverageConstraint, CoverageSummary, SetCoverConstraint};
pub use sign_flip::{QbfInverse, SignFlip};
pub use types::Evaluator;
