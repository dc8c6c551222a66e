//! Error type shared by engine construction and queries.
use thiserror::Error;

/// Errors from building an [`InterpolationEngine`](crate::InterpolationEngine)
/// or from evaluating it at an observation point.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpError {
    /// The data cube's shape does not match the axis lengths.
    #[error("shape mismatch: data cube has shape {cube:?}, axes imply {axes:?}")]
    ShapeMismatch { cube: Vec<usize>, axes: Vec<usize> },

    /// An axis is too short, not strictly increasing, or not finite.
    #[error("invalid axis {axis}: {reason}")]
    InvalidAxis { axis: usize, reason: &'static str },

    /// Spline mode on an axis with too few nodes for a cubic fit.
    #[error("spline axis {axis} has {len} points, at least {min} required")]
    InsufficientData { axis: usize, len: usize, min: usize },

    /// Observation coordinate outside the grid under the strict boundary policy.
    #[error("coordinate {value} on axis {axis} is outside [{lo}, {hi}]")]
    OutOfBounds {
        axis: usize,
        value: f64,
        lo: f64,
        hi: f64,
    },

    /// The designated output axis does not exist.
    #[error("output axis {index} out of range for a {ndims}-dimensional cube")]
    InvalidOutputAxis { index: usize, ndims: usize },

    /// Log-scaled interpolation needs every sample to be strictly positive.
    #[error("log scale requires positive data, found {value} at flat index {index}")]
    NonPositiveData { index: usize, value: f64 },

    /// More parameter axes than the fixed per-query storage supports.
    #[error("{ndims} parameter axes exceed the maximum of {max}")]
    TooManyDimensions { ndims: usize, max: usize },

    /// A query point or output buffer has the wrong length.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A vector-valued query was made on an engine without an output axis.
    #[error("engine has no output axis; use a scalar query")]
    NoOutputAxis,
}

/// Convenience alias for results carrying an [`InterpError`].
pub type Result<T> = std::result::Result<T, InterpError>;
