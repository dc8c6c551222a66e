//! One-dimensional interpolation along a single row of samples.
//!
//! These are lightweight views over an [`Axis`] and a row of values, used to
//! evaluate the output axis of a cube at arbitrary pivots once the parameter
//! axes have been blended down to one row. They are also usable on their own.
//!
//! ```rust
//! use hypercube_interp::{one_dim::{Interp1D, Spline1D}, spline::SplineCoefficients, Axis};
//!
//! let axis = Axis::new(vec![0.0_f64, 1.0, 2.0, 3.0]).unwrap();
//! let y = [0.0, 1.0, 8.0, 27.0];
//! let y2 = SplineCoefficients::new(&axis, &y).unwrap();
//!
//! let spline = Spline1D::new(&axis, &y, y2.row(0)).unwrap();
//! assert_eq!(spline.eval_one(2.0).unwrap(), 8.0);
//! ```
use num_traits::Float;

use crate::axis::{Axis, BoundaryPolicy};
use crate::error::{InterpError, Result};
use crate::spline;

/// A one-dimensional interpolator.
pub trait Interp1D<T: Float> {
    /// Evaluate the interpolant at an observation point.
    fn eval_one(&self, loc: T) -> Result<T>;

    /// Evaluate the interpolant at a set of observation points.
    ///
    /// # Errors
    /// * If `locs` and `out` have different lengths
    /// * If any single evaluation fails
    #[inline]
    fn eval(&self, locs: &[T], out: &mut [T]) -> Result<()> {
        if locs.len() != out.len() {
            return Err(InterpError::DimensionMismatch {
                expected: locs.len(),
                found: out.len(),
            });
        }

        for i in 0..locs.len() {
            out[i] = self.eval_one(locs[i])?;
        }

        Ok(())
    }

    /// Evaluate the interpolant at a set of observation points, allocating
    /// for the output values for convenience.
    #[inline]
    fn eval_alloc(&self, locs: &[T]) -> Result<Vec<T>> {
        let mut out = vec![T::zero(); locs.len()];
        self.eval(locs, &mut out)?;
        Ok(out)
    }
}

fn check_row_len(axis_len: usize, row_len: usize) -> Result<()> {
    if axis_len != row_len {
        return Err(InterpError::DimensionMismatch {
            expected: axis_len,
            found: row_len,
        });
    }
    Ok(())
}

/// Piecewise-linear interpolation / extrapolation.
#[derive(Clone, Copy, Debug)]
pub struct Linear1D<'a, T> {
    axis: &'a Axis<T>,
    vals: &'a [T],
    policy: BoundaryPolicy,
}

impl<'a, T: Float> Linear1D<'a, T> {
    /// # Errors
    /// * If `vals` is not the same length as the axis
    pub fn new(axis: &'a Axis<T>, vals: &'a [T]) -> Result<Self> {
        check_row_len(axis.len(), vals.len())?;
        Ok(Self {
            axis,
            vals,
            policy: BoundaryPolicy::Extrapolate,
        })
    }

    /// Set the treatment of observation points outside the axis
    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<T: Float> Interp1D<T> for Linear1D<'_, T> {
    #[inline]
    fn eval_one(&self, loc: T) -> Result<T> {
        let b = self.axis.locate_with(loc, self.policy, 0)?;
        let (y0, y1) = (self.vals[b.index], self.vals[b.index + 1]);
        Ok((T::one() - b.frac) * y0 + b.frac * y1)
    }
}

/// Natural cubic spline on one row with precomputed second derivatives.
#[derive(Clone, Copy, Debug)]
pub struct Spline1D<'a, T> {
    axis: &'a Axis<T>,
    vals: &'a [T],
    y2: &'a [T],
    policy: BoundaryPolicy,
}

impl<'a, T: Float> Spline1D<'a, T> {
    /// # Errors
    /// * If `vals` or `y2` is not the same length as the axis
    pub fn new(axis: &'a Axis<T>, vals: &'a [T], y2: &'a [T]) -> Result<Self> {
        check_row_len(axis.len(), vals.len())?;
        check_row_len(axis.len(), y2.len())?;
        Ok(Self {
            axis,
            vals,
            y2,
            policy: BoundaryPolicy::Extrapolate,
        })
    }

    /// Set the treatment of observation points outside the axis
    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// First derivative of the spline at `loc`.
    pub fn slope(&self, loc: T) -> Result<T> {
        let b = self.axis.locate_with(loc, self.policy, 0)?;
        Ok(spline::derivative(self.axis.as_slice(), &b, self.vals, self.y2))
    }
}

impl<T: Float> Interp1D<T> for Spline1D<'_, T> {
    #[inline]
    fn eval_one(&self, loc: T) -> Result<T> {
        let b = self.axis.locate_with(loc, self.policy, 0)?;
        Ok(spline::evaluate(self.axis.as_slice(), &b, self.vals, self.y2))
    }
}
