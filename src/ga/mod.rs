//! Genetic Algorithm framework.
//!
//! A generic GA over fixed-length bit-vector chromosomes. Problems plug in
//! by implementing [`GaProblem`], which specifies how to decode, score,
//! create and mutate chromosomes; the engine always maximizes fitness.
//!
//! # Core Types
//!
//! - [`Chromosome`]: Bit-vector genotype
//! - [`GaProblem`]: Problem contract: decoding, scoring, initialization and gene mutation
//! - [`GaConfig`]: Algorithm parameters (population size, mutation rate, seed, limits)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best solution found plus run statistics
//!
//! # Generation Cycle
//!
//! 1. Binary tournament selection fills a parent pool of `population_size`
//! 2. Consecutive parent pairs recombine by two-point crossover
//! 3. Every locus of every child mutates with the current mutation rate
//! 4. The worst child is replaced by the best-so-far chromosome if worse
//! 5. The best-so-far is updated on strict improvement only
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use types::{Chromosome, GaProblem, Individual};
