//! Precomputed natural-spline second derivatives for every row of a cube.
use num_traits::Float;

use super::MIN_SPLINE_POINTS;
use crate::axis::Axis;
use crate::error::{InterpError, Result};

/// Solve for the second derivatives of the natural cubic spline through
/// `(x[i], y[i])`, writing them to `y2`. `scratch` holds the decomposed
/// right-hand side and must be the same length as `x`.
///
/// Forward elimination of the tridiagonal system
/// `h[i-1] y2[i-1] + 2 (h[i-1] + h[i]) y2[i] + h[i] y2[i+1] = 6 (d[i] - d[i-1])`,
/// with `h[i] = x[i+1] - x[i]` and `d[i] = (y[i+1] - y[i]) / h[i]`,
/// normalized by `x[i+1] - x[i-1]`, followed by back substitution from
/// `y2[n-1] = 0`. The system is diagonally dominant for any strictly
/// increasing `x`, so no pivoting is needed.
///
/// # Panics
/// * If `x`, `y`, `y2` and `scratch` do not all have the same length
/// * If there are fewer than 2 points
pub fn natural_second_derivatives<T: Float>(x: &[T], y: &[T], y2: &mut [T], scratch: &mut [T]) {
    let n = x.len();
    assert!(
        n >= 2 && y.len() == n && y2.len() == n && scratch.len() == n,
        "Dimension mismatch"
    );

    let one = T::one();
    let two = one + one;
    let six = two * (two + one);
    let u = scratch;

    y2[0] = T::zero();
    u[0] = T::zero();
    for i in 1..n - 1 {
        let sig = (x[i] - x[i - 1]) / (x[i + 1] - x[i - 1]);
        let p = sig * y2[i - 1] + two;
        y2[i] = (sig - one) / p;

        let dd = (y[i + 1] - y[i]) / (x[i + 1] - x[i]) - (y[i] - y[i - 1]) / (x[i] - x[i - 1]);
        u[i] = (six * dd / (x[i + 1] - x[i - 1]) - sig * u[i - 1]) / p;
    }

    y2[n - 1] = T::zero();
    for k in (0..n - 1).rev() {
        y2[k] = y2[k] * y2[k + 1] + u[k];
    }
}

/// Natural-spline second derivatives for every row of samples along one axis.
///
/// Rows are stored back to back in one flat buffer, in the same order as the
/// rows of the sample array they were computed from, so a row's coefficients
/// live at the same flat offset as its samples.
#[derive(Clone, Debug, PartialEq)]
pub struct SplineCoefficients<T> {
    /// Number of nodes along the spline axis (the row length)
    nodes: usize,

    /// Second derivatives, size rows * nodes
    y2: Vec<T>,
}

impl<T: Float> SplineCoefficients<T> {
    /// Solve for the second derivatives of every contiguous row of
    /// `axis.len()` samples in `vals`, using O(axis.len()) scratch storage.
    ///
    /// # Errors
    /// * If the axis has fewer than 4 points
    /// * If `vals` is not a whole number of rows
    pub fn new(axis: &Axis<T>, vals: &[T]) -> Result<Self> {
        Self::for_axis(axis, vals, 0)
    }

    /// Same as [`SplineCoefficients::new`], labelling errors with `axis_index`.
    pub(crate) fn for_axis(axis: &Axis<T>, vals: &[T], axis_index: usize) -> Result<Self> {
        let nodes = axis.len();
        if nodes < MIN_SPLINE_POINTS {
            return Err(InterpError::InsufficientData {
                axis: axis_index,
                len: nodes,
                min: MIN_SPLINE_POINTS,
            });
        }
        if vals.len() % nodes != 0 {
            return Err(InterpError::ShapeMismatch {
                cube: vec![vals.len()],
                axes: vec![nodes],
            });
        }

        let rows = vals.len() / nodes;
        tracing::debug!(rows, nodes, "precomputing natural spline coefficients");

        let x = axis.as_slice();
        let mut y2 = vec![T::zero(); vals.len()];
        let mut scratch = vec![T::zero(); nodes];
        vals.chunks_exact(nodes)
            .zip(y2.chunks_exact_mut(nodes))
            .for_each(|(y, row)| natural_second_derivatives(x, y, row, &mut scratch));

        tracing::debug!(rows, "spline coefficients ready");
        Ok(Self { nodes, y2 })
    }

    /// Number of nodes per row
    #[inline]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.y2.len() / self.nodes
    }

    /// Second derivatives of row `r`
    #[inline]
    pub fn row(&self, r: usize) -> &[T] {
        self.at_offset(r * self.nodes)
    }

    /// Second derivatives of the row whose samples start at flat `offset`
    #[inline]
    pub(crate) fn at_offset(&self, offset: usize) -> &[T] {
        &self.y2[offset..offset + self.nodes]
    }

    /// All second derivatives, row-major
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.y2
    }
}
