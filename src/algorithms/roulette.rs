//! Generational GA with roulette-wheel selection.
//!
//! Each cycle replaces the whole population: parents are drawn from the
//! ranked generation `g` in pairs, bred into generation `g + 1`, and the new
//! generation is evaluated, sorted and tabulated before anything else reads
//! it.
//!
//! # Stop conditions
//!
//! - [`GenerationMode::Fixed`] runs exactly `generations_count` cycles.
//! - [`GenerationMode::Adaptive`] runs until [`ranking::is_converged`]
//!   holds, or until the optional `max_generations` bound is reached.
//!
//! # Determinism
//!
//! All randomness comes from one [`Pcg64`] owned by the engine. Two engines
//! built from equal configs with the same seed produce identical runs.

use crate::config::{ConfigError, GaConfig, GenerationMode};
use crate::objective::{self, Objective};
use crate::ranking::{self, Ranking, Wheel};
use crate::report::{GenerationView, NullReporter, Reporter};
use crate::reproduction::{self, Breeding};
use crate::{Chromosome, Evolver, SearchDirection, population, selection};
use rand::prelude::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument, trace, warn};

/// Best point found, with fitness in the objective's own sign convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaResult {
    pub x: f64,
    pub y: f64,
    pub fitness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Fixed mode finished its configured cycles.
    GenerationsExhausted,
    /// Adaptive mode saw a converged upper half.
    Converged,
    /// Adaptive mode hit `max_generations` first.
    SafetyBound,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::GenerationsExhausted => "generations exhausted",
            StopReason::Converged => "converged",
            StopReason::SafetyBound => "safety bound reached",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub best: GaResult,
    pub direction: SearchDirection,
    /// Cycles performed by this run.
    pub generations: u64,
    pub stop: StopReason,
}

pub struct RouletteGA {
    config: GaConfig,
    objective: Objective,
    population: Vec<Chromosome>,
    ranking: Ranking,
    generations_count: u64,
    generation: u64,
    seed: u64,
    rng: Pcg64,
    wheel_warned: bool,
}

impl RouletteGA {
    /// Samples and ranks an initial population.
    ///
    /// Without a configured seed one is drawn from thread entropy; it is
    /// logged and available from [`RouletteGA::seed`] so the run can be
    /// repeated.
    pub fn new(config: GaConfig) -> Self {
        Self::build(config, objective::cubic, None)
    }

    /// Starts from the given chromosomes instead of sampling. Their fitness
    /// fields are recomputed.
    pub fn with_population(
        config: GaConfig,
        initial_pop: Vec<Chromosome>,
    ) -> Result<Self, ConfigError> {
        if initial_pop.len() != config.population_size() {
            return Err(ConfigError::PopulationSizeMismatch {
                expected: config.population_size(),
                actual: initial_pop.len(),
            });
        }
        Ok(Self::build(config, objective::cubic, Some(initial_pop)))
    }

    #[cfg(test)]
    pub(crate) fn with_objective(config: GaConfig, objective: Objective) -> Self {
        Self::build(config, objective, None)
    }

    #[instrument(level = "debug", skip(config, objective, initial_pop), fields(population_size = config.population_size()))]
    fn build(
        config: GaConfig,
        objective: Objective,
        initial_pop: Option<Vec<Chromosome>>,
    ) -> Self {
        let seed = config.seed().unwrap_or_else(rand::random);
        info!(seed, "seeding roulette engine");
        let mut rng = Pcg64::seed_from_u64(seed);

        let mut population = match initial_pop {
            Some(pop) => pop,
            None => {
                population::initialize(&mut rng, config.population_size(), config.rand_limit())
            }
        };
        let ranking = ranking::rank(&mut population, objective, config.direction());
        let generations_count = match config.mode() {
            GenerationMode::Fixed => config.generations_count(),
            GenerationMode::Adaptive => 0,
        };

        let mut engine = Self {
            config,
            objective,
            population,
            ranking,
            generations_count,
            generation: 0,
            seed,
            rng,
            wheel_warned: false,
        };
        engine.check_wheel();
        engine
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    pub fn total_fitness(&self) -> f64 {
        self.ranking.total_fitness()
    }

    pub fn cumulative_fitness(&self) -> &[f64] {
        self.ranking.cumulative()
    }

    /// In fixed mode always the configured count; in adaptive mode the
    /// number of cycles the last run performed (0 before the first run).
    pub fn generations_count(&self) -> u64 {
        self.generations_count
    }

    /// Index of the current generation since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_converged(&self) -> bool {
        ranking::is_converged(&self.population)
    }

    pub fn view(&self) -> GenerationView<'_> {
        GenerationView {
            generation: self.generation,
            direction: self.config.direction(),
            population: &self.population,
        }
    }

    /// The best individual of the current generation, sign corrected.
    pub fn result(&self) -> GaResult {
        let best = self.population[self.population.len() - 1];
        GaResult {
            x: best.x,
            y: best.y,
            fitness: self.config.direction().orient(best.fitness),
        }
    }

    pub fn run(&mut self) -> RunSummary {
        self.run_with(&mut NullReporter)
    }

    /// Runs the generation loop from the current population and reports
    /// every ranked generation, starting with the current one.
    #[instrument(level = "info", skip(self, reporter), fields(mode = ?self.config.mode(), direction = ?self.config.direction(), population_size = self.config.population_size()))]
    pub fn run_with<R: Reporter>(&mut self, reporter: &mut R) -> RunSummary {
        reporter.on_generation(&self.view());

        let stop = match self.config.mode() {
            GenerationMode::Fixed => {
                let target = self.config.generations_count();
                for _ in 0..target {
                    self.step();
                    reporter.on_generation(&self.view());
                }
                self.generations_count = target;
                StopReason::GenerationsExhausted
            }
            GenerationMode::Adaptive => {
                self.generations_count = 0;
                loop {
                    self.step();
                    reporter.on_generation(&self.view());
                    self.generations_count += 1;
                    if self.is_converged() {
                        break StopReason::Converged;
                    }
                    if let Some(bound) = self.config.max_generations() {
                        if self.generations_count >= bound {
                            warn!(bound, "adaptive run stopped before converging");
                            break StopReason::SafetyBound;
                        }
                    }
                }
            }
        };

        let summary = RunSummary {
            best: self.result(),
            direction: self.config.direction(),
            generations: self.generations_count,
            stop,
        };
        info!(
            generations = summary.generations,
            stop = %summary.stop,
            x = summary.best.x,
            y = summary.best.y,
            fitness = summary.best.fitness,
            "run finished"
        );
        reporter.on_finish(&summary);
        summary
    }

    fn breeding(&self) -> Breeding {
        Breeding {
            two_child: self.config.two_child(),
            crossover_rate: self.config.crossover_rate(),
            mutation_rate: self.config.mutation_rate(),
            scheme: self.config.mutation_scheme(),
        }
    }

    /// Parent pairings needed to fill one generation. An odd population in
    /// two-child mode drops the surplus child of the last pairing.
    pub(crate) fn pairings_per_generation(&self) -> usize {
        self.config
            .population_size()
            .div_ceil(self.config.children_per_pairing())
    }

    fn next_generation(&mut self) -> Vec<Chromosome> {
        let size = self.config.population_size();
        let params = self.breeding();
        let mut next = Vec::with_capacity(size);

        for _ in 0..self.pairings_per_generation() {
            let i = selection::roulette(&mut self.rng, &self.population, &self.ranking);
            let j = selection::roulette(&mut self.rng, &self.population, &self.ranking);
            let (parent1, parent2) = (self.population[i], self.population[j]);
            reproduction::breed(&mut self.rng, &parent1, &parent2, &params)
                .append_capped(&mut next, size);
        }
        debug_assert_eq!(next.len(), size);
        next
    }

    fn check_wheel(&mut self) {
        if self.ranking.wheel() == Wheel::Cumulative {
            return;
        }
        if self.wheel_warned {
            trace!(
                generation = self.generation,
                wheel = ?self.ranking.wheel(),
                "roulette fallback"
            );
        } else {
            warn!(
                generation = self.generation,
                wheel = ?self.ranking.wheel(),
                "negative or non-finite fitness, roulette falls back to shifted weights"
            );
            self.wheel_warned = true;
        }
    }
}

impl Evolver for RouletteGA {
    fn step(&mut self) {
        self.population = self.next_generation();
        let direction = self.config.direction();
        self.ranking = ranking::rank(&mut self.population, self.objective, direction);
        self.generation += 1;
        self.check_wheel();

        debug!(
            generation = self.generation,
            best = self.population[self.population.len() - 1].fitness,
            total_fitness = self.ranking.total_fitness(),
            "generation ranked"
        );
    }

    fn population(&self) -> &[Chromosome] {
        &self.population
    }
}
