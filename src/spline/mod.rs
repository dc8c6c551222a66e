//! Natural cubic splines along one axis of a data cube.
//!
//! The spline on each interval `[x_i, x_{i+1}]` is determined by the sample
//! values at its ends and the second derivatives `y''` at its ends. The
//! second derivatives are found once per row by solving a tridiagonal
//! system with `y'' = 0` at both ends of the axis (the "natural" boundary
//! condition), after which every evaluation is a constant-time formula on
//! the bracketing interval.
//!
//! This is split into two stages so that each can be checked on its own:
//! * [`cache`] solves for and stores the second derivatives of every row
//! * [`eval`] evaluates one interval of one row
//!
//! Unlike a local Hermite scheme, every value in a row affects the spline
//! everywhere along that row through the linear solve, and the result has
//! continuous first and second derivatives at interior nodes.
//!
//! References
//! * https://en.wikipedia.org/wiki/Spline_interpolation
pub mod cache;
pub mod eval;

pub use cache::{natural_second_derivatives, SplineCoefficients};
pub use eval::{derivative, evaluate};

/// Fewest nodes on a spline axis; a cubic fit is ill-posed below this.
pub const MIN_SPLINE_POINTS: usize = 4;
