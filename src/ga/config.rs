//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::ConfigError;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use qbf_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use qbf_ga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_max_generations(10_000)
///     .with_mutation_rate(0.05)
///     .with_seed(42)
///     .with_time_limit_ms(1_800_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population. Must be positive and even,
    /// since crossover pairs consecutive parents.
    pub population_size: usize,

    /// Number of generations after generation 0.
    pub max_generations: usize,

    /// Base per-locus mutation probability (0.0–1.0).
    ///
    /// Problems with an adaptive schedule may ignore it.
    pub mutation_rate: f64,

    /// Seed of the run's random stream.
    pub seed: u64,

    /// Whether to evaluate offspring fitness in parallel using rayon.
    ///
    /// Only honoured with the `parallel` feature; results are identical
    /// either way because fitness is a pure function of the chromosome.
    pub parallel: bool,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// When set, the GA stops at the next cancellation checkpoint after the
    /// limit has elapsed and returns the best solution found so far.
    pub time_limit_ms: Option<u64>,

    /// Cancellation and time limit are checked at generations that are a
    /// multiple of this interval.
    pub check_interval: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            mutation_rate: 0.01,
            seed: 0,
            parallel: false,
            time_limit_ms: None,
            check_interval: 10,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the base mutation rate.
    ///
    /// Not clamped: out-of-range values are reported by [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Sets the cancellation check interval in generations.
    pub fn with_check_interval(mut self, generations: usize) -> Self {
        self.check_interval = generations;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.population_size % 2 != 0 {
            return Err(ConfigError::OddPopulation(self.population_size));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRateOutOfRange(self.mutation_rate));
        }
        if self.check_interval == 0 {
            return Err(ConfigError::ZeroCheckInterval);
        }
        if self.time_limit_ms == Some(0) {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 1000);
        assert!((config.mutation_rate - 0.01).abs() < 1e-12);
        assert_eq!(config.seed, 0);
        assert!(!config.parallel);
        assert!(config.time_limit_ms.is_none());
        assert_eq!(config.check_interval, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_max_generations(50)
            .with_mutation_rate(0.05)
            .with_seed(42)
            .with_parallel(true)
            .with_time_limit_ms(5000)
            .with_check_interval(1);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.max_generations, 50);
        assert!((config.mutation_rate - 0.05).abs() < 1e-12);
        assert_eq!(config.seed, 42);
        assert!(config.parallel);
        assert_eq!(config.time_limit_ms, Some(5000));
        assert_eq!(config.check_interval, 1);
    }

    #[test]
    fn test_validate_population() {
        let config = GaConfig::default().with_population_size(0);
        assert_eq!(config.validate(), Err(ConfigError::PopulationTooSmall(0)));

        let config = GaConfig::default().with_population_size(7);
        assert_eq!(config.validate(), Err(ConfigError::OddPopulation(7)));

        assert!(GaConfig::default().with_population_size(2).validate().is_ok());
    }

    #[test]
    fn test_validate_mutation_rate() {
        for rate in [-0.1, 1.5, f64::NAN] {
            let config = GaConfig::default().with_mutation_rate(rate);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::MutationRateOutOfRange(_))
            ));
        }
        for rate in [0.0, 1.0] {
            assert!(GaConfig::default().with_mutation_rate(rate).validate().is_ok());
        }
    }

    #[test]
    fn test_validate_checkpoints() {
        let config = GaConfig::default().with_check_interval(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroCheckInterval));

        let config = GaConfig::default().with_time_limit_ms(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeLimit));
    }

    #[test]
    fn test_zero_generations_allowed() {
        // generation 0 alone is a valid (if trivial) run
        assert!(GaConfig::default().with_max_generations(0).validate().is_ok());
    }
}
