//! Crossover and mutation.

use crate::Chromosome;
use crate::config::MutationScheme;
use rand::Rng;

/// Parameters of one reproduction step, copied out of the run config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breeding {
    pub two_child: bool,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub scheme: MutationScheme,
}

/// Offspring of one pairing: one or two children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offspring {
    One(Chromosome),
    Two(Chromosome, Chromosome),
}

impl Offspring {
    /// Appends the children to `next`, never growing it past `cap`.
    pub fn append_capped(self, next: &mut Vec<Chromosome>, cap: usize) {
        let children = match self {
            Offspring::One(a) => [Some(a), None],
            Offspring::Two(a, b) => [Some(a), Some(b)],
        };
        for child in children.into_iter().flatten() {
            if next.len() < cap {
                next.push(child);
            }
        }
    }
}

/// Single-point crossover on the Y coordinate followed by mutation.
pub fn breed<R: Rng>(
    rng: &mut R,
    parent1: &Chromosome,
    parent2: &Chromosome,
    params: &Breeding,
) -> Offspring {
    if params.two_child {
        let (mut child1, mut child2) = if rng.random::<f64>() < params.crossover_rate {
            (
                Chromosome::new(parent1.x, parent2.y),
                Chromosome::new(parent2.x, parent1.y),
            )
        } else {
            (
                Chromosome::new(parent1.x, parent1.y),
                Chromosome::new(parent2.x, parent2.y),
            )
        };
        mutate(rng, &mut child1, params.mutation_rate, params.scheme);
        mutate(rng, &mut child2, params.mutation_rate, params.scheme);
        Offspring::Two(child1, child2)
    } else {
        let mut child = if rng.random::<f64>() < params.crossover_rate {
            Chromosome::new(parent1.x, parent2.y)
        } else if rng.random::<f64>() < 0.5 {
            Chromosome::new(parent1.x, parent1.y)
        } else {
            Chromosome::new(parent2.x, parent2.y)
        };
        mutate(rng, &mut child, params.mutation_rate, params.scheme);
        Offspring::One(child)
    }
}

/// Each coordinate, with probability `rate`, moves halfway toward a fresh
/// draw from `[0, 1)`.
pub fn mutate<R: Rng>(rng: &mut R, c: &mut Chromosome, rate: f64, scheme: MutationScheme) {
    if rng.random::<f64>() < rate {
        c.x = (c.x + rng.random::<f64>()) / 2.0;
    }
    if rng.random::<f64>() < rate {
        let base = match scheme {
            MutationScheme::Independent => c.y,
            MutationScheme::LegacyCoupled => c.x,
        };
        c.y = (base + rng.random::<f64>()) / 2.0;
    }
}
