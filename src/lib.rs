//! Interpolation of precomputed data cubes on rectilinear grids,
//! prioritizing correctness and reuse of precomputation across many queries.
//!
//! A data cube is a set of samples on the Cartesian product of per-axis
//! pivots, which need not be evenly spaced. One axis may be designated as an
//! output axis, so that each point on the remaining (parameter) axes holds a
//! whole curve, such as a spectrum sampled at many wavelengths. Along that
//! axis, values can be blended linearly or with a natural cubic spline whose
//! coefficients are computed once at construction.
//!
//! # Performance Scalings
//! For a self-consistent multidimensional linear interpolation, there are 2^ndims grid values
//! that contribute to each observation point, and as such, that is the theoretical floor for
//! performance scaling. Locating the grid cell takes a bisection search on each axis, with a
//! worst-case number of iterations of log2(number of grid elements).
//!
//! | Query                                  | RAM                | Cost                                        |
//! |----------------------------------------|--------------------|---------------------------------------------|
//! | scalar, multilinear                    | O(ndims)           | O(2^ndims) + log2(gridsize)                 |
//! | scalar, spline output axis             | O(ndims)           | O(2^nparams) + log2(gridsize)               |
//! | whole curve                            | O(noutput)         | O(2^nparams * noutput) + log2(gridsize)     |
//! | curve at m pivots, spline output axis  | O(noutput + m)     | O(2^nparams * noutput + m log2(noutput))    |
//!
//! Spline construction solves one tridiagonal system per curve, O(nsamples) in total.
//!
//! # Example: Scalar Output
//! ```rust
//! use hypercube_interp::{DataCube, EngineConfig, InterpolationEngine};
//!
//! // Define a grid
//! let x = vec![0.0_f64, 1.0, 2.0];
//! let y = vec![0.0_f64, 10.0];
//!
//! // Values at grid points, z = x + y, C-ordered
//! let z = vec![0.0, 10.0, 1.0, 11.0, 2.0, 12.0];
//! let cube = DataCube::new(vec![3, 2], z).unwrap();
//!
//! let engine = InterpolationEngine::new(cube, vec![x, y], EngineConfig::default()).unwrap();
//! assert_eq!(engine.interp_one(&[0.5, 5.0]).unwrap(), 5.5);
//!
//! // Points outside the grid are extrapolated by default
//! assert_eq!(engine.interp_one(&[3.0, 10.0]).unwrap(), 13.0);
//! ```
//!
//! # Example: Curves Along a Spline Output Axis
//! ```rust
//! use hypercube_interp::{BoundaryPolicy, DataCube, InterpolationEngine, ValueScale};
//! use hypercube_interp::utils::{linspace, sample_grid};
//!
//! // Two model parameters and a wavelength axis
//! let axes = vec![
//!     linspace(-2.0_f64, 2.0, 20),
//!     linspace(-1.0, 1.5, 12),
//!     linspace(0.1, 3.0, 10),
//! ];
//! let z = sample_grid(&axes, |p| (-(p[0].powi(2) + (p[1] - p[2]).powi(2)).sqrt()).exp());
//! let cube = DataCube::new(vec![20, 12, 10], z).unwrap();
//!
//! let engine = InterpolationEngine::builder(cube, axes)
//!     .spline(2)
//!     .scale(ValueScale::Log10)
//!     .boundary(BoundaryPolicy::Error)
//!     .build()
//!     .unwrap();
//!
//! // The interpolated curve, on a finer wavelength grid
//! let wave = linspace(0.5, 2.9, 50);
//! let sed = engine.interp_pivots(&[0.5, 1.0], &wave).unwrap();
//! assert_eq!(sed.len(), 50);
//!
//! // Outside the grid is an error under this policy
//! assert!(engine.interp_pivots(&[0.5, 1.0], &[3.5]).is_err());
//! ```
// These "needless" range loops are a significant speedup
#![allow(clippy::needless_range_loop)]

pub mod axis;
pub use axis::{Axis, BoundaryPolicy, Bracket, Extrap};

pub mod cube;
pub use cube::DataCube;

pub mod engine;
pub use engine::{
    EngineBuilder, EngineConfig, InterpolationEngine, OutputAxis, OutputMethod, ValueScale,
};

pub mod error;
pub use error::{InterpError, Result};

pub mod multilinear;
pub use multilinear::MAXDIMS;

pub mod one_dim;
pub use one_dim::{Interp1D, Linear1D, Spline1D};

pub mod spline;
pub use spline::SplineCoefficients;

pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
