//! Roulette-wheel parent selection.

use crate::Chromosome;
use crate::ranking::{Ranking, Wheel, shifted_weight};
use rand::Rng;

/// Picks a parent index with probability proportional to its share of the
/// total fitness.
///
/// With a [`Wheel::Cumulative`] ranking this draws `r ∈ [0, total)` and
/// returns the smallest index whose prefix sum reaches `r`. The other wheel
/// kinds are described on [`Wheel`].
///
/// `population` must be the sorted population `ranking` was built from.
pub fn roulette<R: Rng>(rng: &mut R, population: &[Chromosome], ranking: &Ranking) -> usize {
    debug_assert_eq!(population.len(), ranking.len());
    let last = population.len().saturating_sub(1);

    match ranking.wheel() {
        Wheel::Cumulative => {
            let spin = rng.random::<f64>() * ranking.total_fitness();
            // Rounding can leave the spin a hair above the final prefix sum
            ranking
                .cumulative()
                .partition_point(|&c| c < spin)
                .min(last)
        }
        Wheel::Shifted { floor, total } => {
            let spin = rng.random::<f64>() * total;
            let mut cumulative = 0.0;
            for (index, c) in population.iter().enumerate() {
                cumulative += shifted_weight(c.fitness, floor);
                if cumulative >= spin {
                    return index;
                }
            }
            last
        }
        Wheel::Uniform => rng.random_range(0..population.len()),
    }
}
