//! Ranking: evaluation, ascending sort and the cumulative fitness table the
//! roulette wheel spins over. Also hosts the adaptive-mode convergence test,
//! which only makes sense on a ranked population.

use crate::objective::{self, Objective};
use crate::{Chromosome, SearchDirection};
use std::cmp::Ordering;

/// Compare two f64 values, treating NaN as less than all other values.
/// This sorts NaN fitness individuals to the front (worst end).
pub fn cmp_f64_nan_first(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// How the selector should turn fitness into selection probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wheel {
    /// Every fitness is finite and non-negative and the total is positive:
    /// the cumulative table is non-decreasing and can be binary searched.
    Cumulative,
    /// Some fitness is negative or non-finite. Finite values are shifted by
    /// `floor` (the smallest finite fitness) and scanned linearly;
    /// non-finite values get zero weight.
    Shifted { floor: f64, total: f64 },
    /// No usable spread at all: every index is equally likely.
    Uniform,
}

/// Derived tables of a ranked population.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    total_fitness: f64,
    cumulative: Vec<f64>,
    wheel: Wheel,
}

impl Ranking {
    /// Builds the tables for a population that is already evaluated and
    /// sorted ascending. `total_fitness` is the sum reported by the
    /// evaluation pass, taken in pre-sort order.
    pub fn from_sorted(population: &[Chromosome], total_fitness: f64) -> Self {
        let mut running = 0.0;
        let cumulative: Vec<f64> = population
            .iter()
            .map(|c| {
                running += c.fitness;
                running
            })
            .collect();

        Self {
            total_fitness,
            cumulative,
            wheel: classify(population, total_fitness),
        }
    }

    pub fn total_fitness(&self) -> f64 {
        self.total_fitness
    }

    /// Prefix sums of fitness over the sorted population.
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn wheel(&self) -> Wheel {
        self.wheel
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }
}

fn classify(sorted: &[Chromosome], total: f64) -> Wheel {
    let min = sorted.first().map_or(f64::NAN, |c| c.fitness);
    if min >= 0.0 && total.is_finite() && total > 0.0 {
        return Wheel::Cumulative;
    }

    let floor = sorted
        .iter()
        .map(|c| c.fitness)
        .filter(|f| f.is_finite())
        .fold(f64::INFINITY, f64::min);
    if !floor.is_finite() {
        return Wheel::Uniform;
    }
    let shifted_total: f64 = sorted
        .iter()
        .map(|c| shifted_weight(c.fitness, floor))
        .sum();
    if shifted_total.is_finite() && shifted_total > 0.0 {
        Wheel::Shifted {
            floor,
            total: shifted_total,
        }
    } else {
        Wheel::Uniform
    }
}

/// Selection weight of a fitness value under [`Wheel::Shifted`].
pub fn shifted_weight(fitness: f64, floor: f64) -> f64 {
    if fitness.is_finite() {
        fitness - floor
    } else {
        0.0
    }
}

/// Evaluates, sorts ascending by fitness and rebuilds the tables.
pub fn rank(
    population: &mut [Chromosome],
    objective: Objective,
    direction: SearchDirection,
) -> Ranking {
    let total = objective::evaluate_population(population, objective, direction);
    population.sort_by(|a, b| cmp_f64_nan_first(a.fitness, b.fitness));
    Ranking::from_sorted(population, total)
}

/// Sum of `fitness[i] - fitness[last]` over the upper half of a ranked
/// population.
pub fn upper_half_spread(sorted: &[Chromosome]) -> f64 {
    let Some(best) = sorted.last() else {
        return 0.0;
    };
    sorted[sorted.len() / 2..]
        .iter()
        .map(|c| c.fitness - best.fitness)
        .sum()
}

/// Adaptive stop test: the upper-half spread is exactly zero or in `(0, 1)`.
pub fn is_converged(sorted: &[Chromosome]) -> bool {
    let spread = upper_half_spread(sorted);
    spread == 0.0 || (spread > 0.0 && spread < 1.0)
}
