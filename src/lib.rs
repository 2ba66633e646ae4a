//! Genetic algorithm for Quadratic Binary Functions.
//!
//! Maximizes or minimizes `f(x) = xᵀAx` over binary vectors, where `A` is a
//! dense upper-triangular coefficient matrix, optionally subject to a
//! set-cover constraint (QBF-SC): every element of a universe `{1, …, n}`
//! must belong to at least one selected variable's coverage set.
//!
//! - **Evaluation** ([`evaluator`]): full and incremental QBF scoring,
//!   sign inversion for minimization, and the coverage constraint with its
//!   greedy repair. Wrappers compose in either order.
//! - **Instances** ([`instance`]): loaders for the QBF and QBF-SC text formats.
//! - **Genetic Algorithm** ([`ga`]): a generic maximizing GA over bit-vector
//!   chromosomes with binary tournament selection, two-point crossover,
//!   per-locus mutation and single-slot elitism.
//! - **Problems** ([`problems`]): GA bindings for plain QBF and QBF-SC, the
//!   latter with three initialization strategies and an adaptive mutation rate.
//!
//! # Example
//!
//! ```
//! use qbf_ga::evaluator::{QbfEvaluator, SetCoverConstraint, SignFlip};
//! use qbf_ga::ga::GaConfig;
//! use qbf_ga::problems::run_qbf_sc;
//!
//! let qbf = QbfEvaluator::from_upper_rows(vec![
//!     vec![1.0, 2.0, 3.0],
//!     vec![4.0, 5.0],
//!     vec![6.0],
//! ])?;
//! let sets = vec![vec![1, 2], vec![2, 3], vec![1, 3]];
//! let minimize = SignFlip::new(SetCoverConstraint::new(qbf, sets)?);
//!
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_max_generations(50)
//!     .with_seed(1);
//! let result = run_qbf_sc(minimize, &config, "greedy", true)?;
//! // cheapest cover: f({0, 1}) = 1 + 4 + 2
//! assert_eq!(result.best.elements(), &[0, 1]);
//! assert_eq!(result.best.cost, -7.0);
//! # Ok::<(), qbf_ga::Error>(())
//! ```

pub mod error;
pub mod evaluator;
pub mod ga;
pub mod instance;
pub mod problems;
pub mod random;
pub mod solution;

pub use error::{ConfigError, Error, InstanceError, Result};
pub use solution::Solution;
