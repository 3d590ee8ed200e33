//! Initial population sampling.

use crate::Chromosome;
use rand::Rng;

/// Draws one coordinate as `sign * offset + fraction`, where the sign is
/// `±1` with equal odds, `offset` is uniform in `0..rand_limit` and
/// `fraction` is uniform in `[0, 1)`.
pub fn random_coordinate<R: Rng>(rng: &mut R, rand_limit: u32) -> f64 {
    let sign = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
    let offset = if rand_limit == 0 {
        0
    } else {
        rng.random_range(0..rand_limit)
    };
    sign * offset as f64 + rng.random::<f64>()
}

/// Samples `size` unevaluated chromosomes.
pub fn initialize<R: Rng>(rng: &mut R, size: usize, rand_limit: u32) -> Vec<Chromosome> {
    (0..size)
        .map(|_| {
            let x = random_coordinate(rng, rand_limit);
            let y = random_coordinate(rng, rand_limit);
            Chromosome::new(x, y)
        })
        .collect()
}
