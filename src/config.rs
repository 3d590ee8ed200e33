//! Run configuration.
//!
//! A [`GaConfig`] is validated once when it is built and never changes
//! afterwards, so the ranking tables an engine derives from it cannot go
//! stale mid-run. Deserialization goes through [`GaConfigBuilder`], which
//! means missing fields take their defaults and invalid values are rejected
//! by the same checks as the builder.

use crate::SearchDirection;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the generation loop decides to stop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Run exactly `generations_count` reproduction cycles.
    #[default]
    Fixed,
    /// Run until the better half of the population has converged.
    Adaptive,
}

/// How mutation perturbs the Y coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationScheme {
    /// Each coordinate regresses toward its own random draw.
    #[default]
    Independent,
    /// Y is replaced by the average of X and a random draw, as the legacy
    /// engine did. Only useful for reproducing old runs.
    LegacyCoupled,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("population_size must be greater than 0")]
    EmptyPopulation,
    #[error("{name} must be within [0.0, 1.0], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error("max_generations must be greater than 0 when set")]
    ZeroMaxGenerations,
    #[error("initial population has {actual} chromosomes, expected {expected}")]
    PopulationSizeMismatch { expected: usize, actual: usize },
}

/// Validated, immutable engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GaConfigBuilder")]
pub struct GaConfig {
    direction: SearchDirection,
    mode: GenerationMode,
    population_size: usize,
    generations_count: u64,
    two_child: bool,
    mutation_rate: f64,
    crossover_rate: f64,
    rand_limit: u32,
    mutation_scheme: MutationScheme,
    max_generations: Option<u64>,
    seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        let b = GaConfigBuilder::default();
        Self {
            direction: b.direction,
            mode: b.mode,
            population_size: b.population_size,
            generations_count: b.generations_count,
            two_child: b.two_child,
            mutation_rate: b.mutation_rate,
            crossover_rate: b.crossover_rate,
            rand_limit: b.rand_limit,
            mutation_scheme: b.mutation_scheme,
            max_generations: b.max_generations,
            seed: b.seed,
        }
    }
}

impl GaConfig {
    pub fn builder() -> GaConfigBuilder {
        GaConfigBuilder::default()
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Number of cycles in fixed mode. Ignored in adaptive mode.
    pub fn generations_count(&self) -> u64 {
        self.generations_count
    }

    pub fn two_child(&self) -> bool {
        self.two_child
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    /// Exclusive bound on the integer part of initial coordinates.
    pub fn rand_limit(&self) -> u32 {
        self.rand_limit
    }

    pub fn mutation_scheme(&self) -> MutationScheme {
        self.mutation_scheme
    }

    /// Upper bound on adaptive-mode cycles, if any.
    pub fn max_generations(&self) -> Option<u64> {
        self.max_generations
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Offspring produced per reproduction call.
    pub fn children_per_pairing(&self) -> usize {
        1 + self.two_child as usize
    }
}

/// Mutable staging area for a [`GaConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfigBuilder {
    direction: SearchDirection,
    mode: GenerationMode,
    population_size: usize,
    generations_count: u64,
    two_child: bool,
    mutation_rate: f64,
    crossover_rate: f64,
    rand_limit: u32,
    mutation_scheme: MutationScheme,
    max_generations: Option<u64>,
    seed: Option<u64>,
}

impl Default for GaConfigBuilder {
    fn default() -> Self {
        Self {
            direction: SearchDirection::Minimize,
            mode: GenerationMode::Fixed,
            population_size: 100,
            generations_count: 2000,
            two_child: true,
            mutation_rate: 0.05,
            crossover_rate: 0.8,
            rand_limit: 10,
            mutation_scheme: MutationScheme::Independent,
            max_generations: None,
            seed: None,
        }
    }
}

impl GaConfigBuilder {
    pub fn direction(mut self, direction: SearchDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn generations_count(mut self, count: u64) -> Self {
        self.generations_count = count;
        self
    }

    pub fn two_child(mut self, two_child: bool) -> Self {
        self.two_child = two_child;
        self
    }

    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    pub fn rand_limit(mut self, limit: u32) -> Self {
        self.rand_limit = limit;
        self
    }

    pub fn mutation_scheme(mut self, scheme: MutationScheme) -> Self {
        self.mutation_scheme = scheme;
        self
    }

    pub fn max_generations(mut self, bound: Option<u64>) -> Self {
        self.max_generations = bound;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<GaConfig, ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        check_rate("mutation_rate", self.mutation_rate)?;
        check_rate("crossover_rate", self.crossover_rate)?;
        if self.max_generations == Some(0) {
            return Err(ConfigError::ZeroMaxGenerations);
        }
        if self.rand_limit == 0 {
            tracing::warn!("rand_limit is 0, initial coordinates collapse to [0, 1)");
        }

        Ok(GaConfig {
            direction: self.direction,
            mode: self.mode,
            population_size: self.population_size,
            generations_count: self.generations_count,
            two_child: self.two_child,
            mutation_rate: self.mutation_rate,
            crossover_rate: self.crossover_rate,
            rand_limit: self.rand_limit,
            mutation_scheme: self.mutation_scheme,
            max_generations: self.max_generations,
            seed: self.seed,
        })
    }
}

impl TryFrom<GaConfigBuilder> for GaConfig {
    type Error = ConfigError;

    fn try_from(builder: GaConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl From<GaConfig> for GaConfigBuilder {
    fn from(config: GaConfig) -> Self {
        Self {
            direction: config.direction,
            mode: config.mode,
            population_size: config.population_size,
            generations_count: config.generations_count,
            two_child: config.two_child,
            mutation_rate: config.mutation_rate,
            crossover_rate: config.crossover_rate,
            rand_limit: config.rand_limit,
            mutation_scheme: config.mutation_scheme,
            max_generations: config.max_generations,
            seed: config.seed,
        }
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails `contains`, so it is rejected here too
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::RateOutOfRange { name, value });
    }
    Ok(())
}
