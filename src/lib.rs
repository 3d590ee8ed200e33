//! Roulette-wheel genetic algorithm for the extrema of
//! `f(x, y) = x³ - 6xy + 8y³ + 5`.
//!
//! The engine always maximizes internally. Minimization is expressed by
//! negating the objective inside the fitness evaluator, and every reported
//! value is flipped back before it leaves the crate.
//!
//! ```rust
//! use symbios_extremum::{GaConfig, RouletteGA, SearchDirection};
//!
//! let config = GaConfig::builder()
//!     .direction(SearchDirection::Minimize)
//!     .population_size(50)
//!     .generations_count(100)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! let mut ga = RouletteGA::new(config);
//! let summary = ga.run();
//! assert_eq!(summary.generations, 100);
//! println!("x = {}, y = {}, z = {}", summary.best.x, summary.best.y, summary.best.fitness);
//! ```

use serde::{Deserialize, Serialize};

/// A candidate point together with its internal (maximize-only) fitness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Chromosome {
    pub x: f64,
    pub y: f64,
    pub fitness: f64,
}

impl Chromosome {
    /// A fresh, not yet evaluated chromosome.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, fitness: 0.0 }
    }
}

/// Which extremum of the objective is searched for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchDirection {
    #[default]
    Minimize,
    Maximize,
}

impl SearchDirection {
    /// Maps an objective value to internal fitness, and back. The mapping is
    /// its own inverse.
    pub fn orient(self, value: f64) -> f64 {
        match self {
            SearchDirection::Minimize => -value,
            SearchDirection::Maximize => value,
        }
    }
}

/// The master engine trait.
pub trait Evolver {
    /// Builds and ranks one new generation.
    fn step(&mut self);
    /// The current ranked population, ascending by internal fitness.
    fn population(&self) -> &[Chromosome];
}

pub mod config;
pub mod objective;
pub mod population;
pub mod ranking;
pub mod reproduction;
pub mod report;
pub mod selection;

pub mod algorithms {
    pub mod roulette;
}

pub use algorithms::roulette::{GaResult, RouletteGA, RunSummary, StopReason};
pub use config::{ConfigError, GaConfig, GaConfigBuilder, GenerationMode, MutationScheme};
pub use report::{ConsoleReporter, GenerationView, NullReporter, Reporter};
