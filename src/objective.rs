//! The objective surface and the fitness evaluator built on it.
//!
//! Inputs large enough to overflow `f64` (roughly `|x|, |y| > 5e102`) yield
//! infinite or NaN fitness. The ranker treats such values as the worst
//! possible, but no further guarantees are made about them.

use crate::{Chromosome, SearchDirection};

/// Signature of an objective surface.
pub type Objective = fn(f64, f64) -> f64;

/// `f(x, y) = x³ - 6xy + 8y³ + 5`
pub fn cubic(x: f64, y: f64) -> f64 {
    x * x * x - 6.0 * x * y + 8.0 * y * y * y + 5.0
}

/// Internal fitness of a point: higher is always better.
pub fn fitness(objective: Objective, direction: SearchDirection, x: f64, y: f64) -> f64 {
    direction.orient(objective(x, y))
}

/// Evaluates every chromosome in place and returns the total fitness.
pub fn evaluate_population(
    population: &mut [Chromosome],
    objective: Objective,
    direction: SearchDirection,
) -> f64 {
    let mut total = 0.0;
    for c in population.iter_mut() {
        c.fitness = fitness(objective, direction, c.x, c.y);
        total += c.fitness;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_known_points() {
        assert_eq!(cubic(0.0, 0.0), 5.0);
        assert_eq!(cubic(1.0, 0.0), 6.0);
        assert_eq!(cubic(0.0, 1.0), 13.0);
        // Local minimum of the surface at (1, 0.5)
        assert_eq!(cubic(1.0, 0.5), 4.0);
        assert_eq!(cubic(-1.0, -1.0), -10.0);
    }

    #[test]
    fn test_minimize_negates_objective() {
        assert_eq!(fitness(cubic, SearchDirection::Minimize, 1.0, 0.5), -4.0);
        assert_eq!(fitness(cubic, SearchDirection::Maximize, 1.0, 0.5), 4.0);
    }

    #[test]
    fn test_evaluate_population_accumulates_total() {
        let mut pop = vec![
            Chromosome::new(0.0, 0.0),
            Chromosome::new(1.0, 0.0),
            Chromosome::new(0.0, 1.0),
        ];
        let total = evaluate_population(&mut pop, cubic, SearchDirection::Maximize);
        assert_eq!(total, 5.0 + 6.0 + 13.0);
        assert_eq!(pop[2].fitness, 13.0);

        let total = evaluate_population(&mut pop, cubic, SearchDirection::Minimize);
        assert_eq!(total, -24.0);
        assert_eq!(pop[0].fitness, -5.0);
    }
}
