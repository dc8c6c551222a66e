//! Convenience methods for constructing grids and observation sets in a way
//! that echoes, but does not exactly match, methods common in scripting languages.
use itertools::Itertools;
use num_traits::Float;

/// Generates `n` evenly spaced values from start to stop, including the endpoint.
///
/// Returns an empty vec for `n == 0` and `[start]` for `n == 1`.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = T::from(n - 1).unwrap_or_else(T::nan);
            let dx = (stop - start) / last;
            (0..n)
                .map(|i| match i {
                    // Land exactly on the endpoint rather than accumulating roundoff
                    i if i == n - 1 => stop,
                    i => start + T::from(i).unwrap_or_else(T::nan) * dx,
                })
                .collect()
        }
    }
}

/// Generates a meshgrid in C ordering (x0, y0, z0, x0, y0, z1, ..., x0, yn, zn),
/// one inner vec per point.
pub fn meshgrid<T>(x: Vec<&Vec<T>>) -> Vec<Vec<T>>
where
    T: Float,
{
    x.into_iter()
        .multi_cartesian_product()
        .map(|xx| xx.iter().map(|y| **y).collect())
        .collect()
}

/// Evaluates `f` at every point of the C-ordered Cartesian product of `axes`,
/// producing a flat sample array suitable for a [`DataCube`](crate::DataCube).
pub fn sample_grid<T, F>(axes: &[Vec<T>], mut f: F) -> Vec<T>
where
    T: Float,
    F: FnMut(&[T]) -> T,
{
    meshgrid(axes.iter().collect())
        .iter()
        .map(|p| f(&p[..]))
        .collect()
}
