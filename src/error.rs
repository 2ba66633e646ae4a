//! Error types.
//!
//! Two families of failures exist, and both are raised before any
//! generation runs:
//!
//! - [`InstanceError`]: the instance text could not be read or does not
//!   describe a valid (and, for QBF-SC, coverable) problem.
//! - [`ConfigError`]: the run parameters are unusable.
//!
//! Once a run starts, the evolutionary loop does not fail: infeasibility is
//! absorbed by repair and by the fitness penalty.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading or validating a problem instance.
#[derive(Debug, Error)]
pub enum InstanceError {
    /// The instance file could not be read.
    #[error("cannot read instance file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text is malformed (missing or non-numeric token, missing row).
    ///
    /// `line` is 1-indexed.
    #[error("format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// A matrix row carries the wrong number of values.
    #[error("matrix row {row}: expected {expected} values, got {actual}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A coverage set references an element outside `{1..=universe}`.
    #[error("set {set} contains element {element} outside the universe 1..={universe}")]
    InvalidElement {
        set: usize,
        element: usize,
        universe: usize,
    },

    /// The number of coverage sets differs from the number of variables.
    #[error("expected {expected} coverage sets, got {actual}")]
    SetCountMismatch { expected: usize, actual: usize },

    /// Some universe elements are not covered by any set.
    #[error("elements {missing:?} cannot be covered by any set")]
    InfeasibleInstance { missing: Vec<usize> },
}

/// Invalid run configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown population strategy '{0}' (expected random, stratified or greedy)")]
    UnknownStrategy(String),

    #[error("population size must be positive, got {0}")]
    PopulationTooSmall(usize),

    /// Crossover pairs consecutive individuals, so the population must be even.
    #[error("population size must be even, got {0}")]
    OddPopulation(usize),

    #[error("mutation rate must lie in [0, 1], got {0}")]
    MutationRateOutOfRange(f64),

    #[error("problem domain is empty")]
    EmptyDomain,

    #[error("cancellation check interval must be at least 1")]
    ZeroCheckInterval,

    #[error("time_limit_ms must be positive or None")]
    ZeroTimeLimit,
}

/// Any error surfaced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Instance(#[from] InstanceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience alias used by the public entry points.
pub type Result<T> = std::result::Result<T, Error>;
