//! Shared fixtures for unit tests.
use rand::Rng;
use rand::SeedableRng;
use rand::distr::StandardUniform;
use rand::rngs::StdRng;

use crate::utils::linspace;

/// Fixed random seed to support repeatable testing
const SEED: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6,
    5, 4, 3, 2, 1,
];

/// Get a random number generator with a const seed for repeatable testing
pub fn rng_fixed_seed() -> StdRng {
    StdRng::from_seed(SEED)
}

/// Generate `n` random numbers using provided generator
pub fn randn<T>(rng: &mut StdRng, n: usize) -> Vec<T>
where
    StandardUniform: rand::distr::Distribution<T>,
{
    std::iter::repeat_with(|| rng.random::<T>())
        .take(n)
        .collect()
}

/// Evenly spaced pivots from `start` to `stop` with uniform noise of
/// amplitude `noise` added, so that the grid is rectilinear but not regular.
///
/// Panics if the noise was large enough to break monotonicity.
pub fn noisy_pivots(rng: &mut StdRng, start: f64, stop: f64, n: usize, noise: f64) -> Vec<f64> {
    let mut x = linspace(start, stop, n);
    let dx = randn::<f64>(rng, n);
    (0..n).for_each(|i| x[i] += (dx[i] - 0.5) * noise);
    (0..n - 1).for_each(|i| assert!(x[i + 1] > x[i]));
    x
}

/// Transpose a list of points into one column per dimension.
pub fn columns(points: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let ndims = points.first().map_or(0, |p| p.len());
    (0..ndims)
        .map(|j| points.iter().map(|p| p[j]).collect())
        .collect()
}
