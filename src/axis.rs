//! Rectilinear coordinate axes and bracket location on them.
//!
//! ```rust
//! use hypercube_interp::{Axis, Extrap};
//!
//! // Pivots need not be evenly spaced
//! let axis = Axis::new(vec![0.0_f64, 1.0, 4.0]).unwrap();
//!
//! let b = axis.locate(2.5);
//! assert_eq!(b.index, 1);
//! assert_eq!(b.frac, 0.5);
//!
//! // Outside the axis, the edge interval is extended
//! let b = axis.locate(-1.0);
//! assert_eq!((b.index, b.frac, b.extrap), (0, -1.0, Extrap::OutsideLow));
//! ```
use num_traits::Float;

use crate::error::{InterpError, Result};

/// Where an observation point falls relative to the span of an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extrap {
    Inside,
    OutsideLow,
    OutsideHigh,
}

/// Lower index of the interval containing (or nearest to) an observation,
/// and the normalized position `(x - x[index]) / (x[index + 1] - x[index])`.
///
/// `frac` is in `[0, 1]` for points inside the axis and outside that range
/// for extrapolated points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bracket<T> {
    pub index: usize,
    pub frac: T,
    pub extrap: Extrap,
}

impl<T: Float> Default for Bracket<T> {
    fn default() -> Self {
        Self {
            index: 0,
            frac: T::zero(),
            extrap: Extrap::Inside,
        }
    }
}

/// Treatment of observation coordinates outside the span of an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryPolicy {
    /// Extend the edge interval linearly (or the edge cubic, on a spline axis).
    #[default]
    Extrapolate,
    /// Reject the observation with [`InterpError::OutOfBounds`].
    Error,
}

/// A strictly increasing, finite sequence of pivots with at least two entries.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis<T> {
    pivots: Vec<T>,
}

#[allow(clippy::len_without_is_empty)]
impl<T: Float> Axis<T> {
    /// Validate and take ownership of a set of pivots.
    ///
    /// # Errors
    /// * If there are fewer than 2 pivots
    /// * If any pivot is NaN or infinite
    /// * If the pivots are not strictly increasing
    pub fn new(pivots: Vec<T>) -> Result<Self> {
        Self::validated(pivots, 0)
    }

    /// Same as [`Axis::new`], reporting `axis` as the offending dimension on error.
    pub(crate) fn validated(pivots: Vec<T>, axis: usize) -> Result<Self> {
        if pivots.len() < 2 {
            return Err(InterpError::InvalidAxis {
                axis,
                reason: "fewer than 2 pivots",
            });
        }
        if !pivots.iter().all(|x| x.is_finite()) {
            return Err(InterpError::InvalidAxis {
                axis,
                reason: "non-finite pivot",
            });
        }
        // Written as a negated comparison so that equal pivots are rejected too
        if pivots.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(InterpError::InvalidAxis {
                axis,
                reason: "pivots must be strictly increasing",
            });
        }

        Ok(Self { pivots })
    }

    /// Number of pivots
    #[inline]
    pub fn len(&self) -> usize {
        self.pivots.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.pivots
    }

    /// First pivot
    #[inline]
    pub fn lo(&self) -> T {
        self.pivots[0]
    }

    /// Last pivot
    #[inline]
    pub fn hi(&self) -> T {
        self.pivots[self.pivots.len() - 1]
    }

    /// Find the bracketing interval for `x`, extrapolating from the edge
    /// interval when `x` is outside the axis.
    ///
    /// Bisection search for the largest `i` with `axis[i] <= x`, clipped so
    /// that `i + 1` is always a valid pivot. A point exactly on the last pivot
    /// lands in the last interval with `frac == 1`.
    #[inline]
    pub fn locate(&self, x: T) -> Bracket<T> {
        let n = self.pivots.len();
        let index = self
            .pivots
            .partition_point(|p| *p <= x)
            .saturating_sub(1)
            .min(n - 2);

        let x0 = self.pivots[index];
        let x1 = self.pivots[index + 1];
        let frac = (x - x0) / (x1 - x0);

        let extrap = match x {
            x if x < self.pivots[0] => Extrap::OutsideLow,
            x if x > self.pivots[n - 1] => Extrap::OutsideHigh,
            _ => Extrap::Inside,
        };

        Bracket {
            index,
            frac,
            extrap,
        }
    }

    /// Find the bracketing interval for `x` under a boundary policy.
    /// `axis` is only used to label errors.
    ///
    /// # Errors
    /// * Under [`BoundaryPolicy::Error`], if `x` is outside the axis or NaN
    #[inline]
    pub fn locate_with(&self, x: T, policy: BoundaryPolicy, axis: usize) -> Result<Bracket<T>> {
        if policy == BoundaryPolicy::Error && !(x >= self.lo() && x <= self.hi()) {
            tracing::trace!(axis, "observation outside grid");
            return Err(InterpError::OutOfBounds {
                axis,
                value: x.to_f64().unwrap_or(f64::NAN),
                lo: self.lo().to_f64().unwrap_or(f64::NAN),
                hi: self.hi().to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.locate(x))
    }

    /// Whether `x` is within the axis, allowing `atol` of slack at each end.
    /// The end pivots are inside for any `atol >= 0`, the same points
    /// [`BoundaryPolicy::Error`] accepts when `atol == 0`.
    #[inline]
    pub fn contains(&self, x: T, atol: T) -> bool {
        (x - self.lo()) >= -atol && (x - self.hi()) <= atol
    }
}
