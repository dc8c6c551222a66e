//! Interpolation engine over a data cube on a rectilinear grid.
//!
//! The engine owns the cube, its axes, and (in spline mode) the natural-spline
//! coefficients along the output axis. After construction it is immutable, so
//! a single engine can be shared between threads and queried concurrently.
//!
//! One axis of the cube may be designated as the output axis, typically a
//! wavelength or frequency axis along which each grid point stores a whole
//! curve. The remaining axes are parameter axes. Queries then come in two
//! forms:
//! * A full point, with one coordinate per cube axis, produces a scalar.
//! * A parameter point, with one coordinate per parameter axis, produces
//!   the whole curve, either at the output-axis pivots or at caller-chosen
//!   locations.
//!
//! Internally the cube is stored with the output axis innermost, so that
//! each parameter-grid vertex owns one contiguous row of samples and one
//! contiguous row of spline coefficients at the same offset.
//!
//! ```rust
//! use hypercube_interp::{DataCube, InterpolationEngine, utils::sample_grid};
//!
//! let axes = vec![vec![0.0_f64, 1.0, 2.0], vec![0.0, 1.0, 2.0, 3.0]];
//!
//! // z = p + w^3, where `w` is the output axis
//! let z = sample_grid(&axes, |x| x[0] + x[1].powi(3));
//! let cube = DataCube::new(vec![3, 4], z).unwrap();
//!
//! let engine = InterpolationEngine::builder(cube, axes)
//!     .spline(1)
//!     .build()
//!     .unwrap();
//!
//! // Whole curve at p = 0.5
//! let curve = engine.interp_vector(&[0.5]).unwrap();
//! assert_eq!(curve, vec![0.5, 1.5, 8.5, 27.5]);
//!
//! // One value along the curve
//! let v = engine.interp_one(&[0.5, 2.0]).unwrap();
//! assert_eq!(v, 8.5);
//! ```
use num_traits::Float;

use crate::axis::{Axis, BoundaryPolicy, Bracket};
use crate::cube::{gather, DataCube};
use crate::error::{InterpError, Result};
use crate::multilinear::{self, MAXDIMS};
use crate::one_dim::{Interp1D, Linear1D, Spline1D};
use crate::spline::{self, SplineCoefficients};

/// Interpolation method along the output axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputMethod {
    /// Piecewise-linear, the same as every other axis
    #[default]
    Linear,
    /// Natural cubic spline with precomputed coefficients
    Spline,
}

/// Designation of one cube axis as the output axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputAxis {
    /// Index of the axis in cube order
    pub index: usize,
    pub method: OutputMethod,
}

/// Space in which samples are blended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueScale {
    /// Blend samples as given
    #[default]
    Linear,
    /// Blend `log10` of the samples and return `10^result`.
    /// Much more accurate for data spanning several orders of magnitude.
    /// All samples must be positive.
    Log10,
}

/// Construction options for an [`InterpolationEngine`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Output axis, if any. Without one, every query produces a scalar.
    pub output: Option<OutputAxis>,
    pub boundary: BoundaryPolicy,
    pub scale: ValueScale,
}

/// Multilinear / natural-spline interpolator over an owned data cube.
///
/// Operation Complexity
/// * O(2^ndims) + O(ndims log2(gridsize)) for a scalar query
/// * O(2^nparams * noutput) for a whole-curve query
///
/// Memory Complexity
/// * One copy of the cube, plus one coefficient per sample in spline mode
/// * Per-query storage of O(MAXDIMS) on the stack, plus the output vector
#[derive(Clone, Debug)]
pub struct InterpolationEngine<T> {
    /// Axes in storage order: parameter axes in cube order, then the output axis
    axes: Vec<Axis<T>>,

    /// Cube axis index of each stored axis
    order: Vec<usize>,

    /// Storage position of each cube axis
    position: Vec<usize>,

    /// Shape in cube order
    shape: Vec<usize>,

    /// Strides of the stored samples, in storage order
    strides: Vec<usize>,

    /// Samples in storage order, after scaling
    vals: Vec<T>,

    /// Second derivatives along the output axis, present in spline mode
    spline: Option<SplineCoefficients<T>>,

    /// Base of the log value scale
    ten: T,

    config: EngineConfig,
}

/// Fluent construction of an [`InterpolationEngine`].
#[derive(Clone, Debug)]
pub struct EngineBuilder<T> {
    cube: DataCube<T>,
    axes: Vec<Vec<T>>,
    config: EngineConfig,
}

impl<T: Float> EngineBuilder<T> {
    /// Designate an output axis
    pub fn output_axis(mut self, index: usize, method: OutputMethod) -> Self {
        self.config.output = Some(OutputAxis { index, method });
        self
    }

    /// Designate a natural-spline output axis
    pub fn spline(self, index: usize) -> Self {
        self.output_axis(index, OutputMethod::Spline)
    }

    pub fn boundary(mut self, policy: BoundaryPolicy) -> Self {
        self.config.boundary = policy;
        self
    }

    pub fn scale(mut self, scale: ValueScale) -> Self {
        self.config.scale = scale;
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<InterpolationEngine<T>> {
        InterpolationEngine::new(self.cube, self.axes, self.config)
    }
}

impl<T: Float> InterpolationEngine<T> {
    /// Start building an engine for `cube`, with one list of pivots per cube axis.
    pub fn builder(cube: DataCube<T>, axes: Vec<Vec<T>>) -> EngineBuilder<T> {
        EngineBuilder {
            cube,
            axes,
            config: EngineConfig::default(),
        }
    }

    /// Validate the cube and axes, and precompute spline coefficients if
    /// the output axis uses the spline method.
    ///
    /// # Errors
    /// * `ShapeMismatch` if the cube's rank or any dimension disagrees with the axes
    /// * `InvalidAxis` if any axis has fewer than 2 entries or is not strictly increasing
    /// * `InvalidOutputAxis` if the output axis index is out of range
    /// * `TooManyDimensions` if more than [`MAXDIMS`] axes would be blended
    /// * `NonPositiveData` under log scaling with any sample <= 0
    /// * `InsufficientData` if a spline output axis has fewer than 4 entries
    pub fn new(cube: DataCube<T>, axes: Vec<Vec<T>>, config: EngineConfig) -> Result<Self> {
        tracing::debug!(
            shape = ?cube.shape(),
            output = ?config.output,
            boundary = ?config.boundary,
            scale = ?config.scale,
            "building interpolation engine"
        );
        Self::build(cube, axes, config).inspect_err(|e| {
            tracing::debug!(error = %e, "rejected interpolation engine configuration");
        })
    }

    fn build(cube: DataCube<T>, axes: Vec<Vec<T>>, config: EngineConfig) -> Result<Self> {
        let (shape, vals) = cube.into_parts();
        let ndims = shape.len();
        let axis_lens: Vec<usize> = axes.iter().map(|a| a.len()).collect();

        // Check rank before looking at individual axes
        if axes.len() != ndims {
            return Err(InterpError::ShapeMismatch {
                cube: shape,
                axes: axis_lens,
            });
        }
        let axes = axes
            .into_iter()
            .enumerate()
            .map(|(i, a)| Axis::validated(a, i))
            .collect::<Result<Vec<_>>>()?;
        if shape != axis_lens {
            return Err(InterpError::ShapeMismatch {
                cube: shape,
                axes: axis_lens,
            });
        }

        // Parameter axes in cube order, then the output axis
        let order: Vec<usize> = match config.output {
            Some(OutputAxis { index, .. }) if index >= ndims => {
                return Err(InterpError::InvalidOutputAxis { index, ndims });
            }
            Some(OutputAxis { index, .. }) => (0..ndims)
                .filter(|&i| i != index)
                .chain(core::iter::once(index))
                .collect(),
            None => (0..ndims).collect(),
        };
        let mut position = vec![0; ndims];
        order.iter().enumerate().for_each(|(s, &i)| position[i] = s);

        let blended = match config.output {
            Some(OutputAxis {
                method: OutputMethod::Spline,
                ..
            }) => ndims - 1,
            _ => ndims,
        };
        if blended > MAXDIMS {
            return Err(InterpError::TooManyDimensions {
                ndims: blended,
                max: MAXDIMS,
            });
        }

        let vals = match config.scale {
            ValueScale::Linear => vals,
            ValueScale::Log10 => {
                if let Some((index, &value)) =
                    vals.iter().enumerate().find(|(_, v)| !(**v > T::zero()))
                {
                    return Err(InterpError::NonPositiveData {
                        index,
                        value: value.to_f64().unwrap_or(f64::NAN),
                    });
                }
                vals.into_iter().map(|v| v.log10()).collect()
            }
        };

        // Move the output axis innermost if it is not already
        let identity = order.iter().enumerate().all(|(s, &i)| s == i);
        let (axes, vals) = if identity {
            (axes, vals)
        } else {
            let src_strides = multilinear::strides(&shape);
            let dst_shape: Vec<usize> = order.iter().map(|&i| shape[i]).collect();
            let dst_src_strides: Vec<usize> = order.iter().map(|&i| src_strides[i]).collect();
            let vals = gather(&vals, &dst_shape, &dst_src_strides);

            let mut slots: Vec<Option<Axis<T>>> = axes.into_iter().map(Some).collect();
            let axes = order.iter().filter_map(|&i| slots[i].take()).collect();
            (axes, vals)
        };
        let stored_shape: Vec<usize> = order.iter().map(|&i| shape[i]).collect();
        let strides = multilinear::strides(&stored_shape);

        let spline = match config.output {
            Some(OutputAxis {
                index,
                method: OutputMethod::Spline,
            }) => Some(SplineCoefficients::for_axis(
                &axes[ndims - 1],
                &vals,
                index,
            )?),
            _ => None,
        };

        Ok(Self {
            axes,
            order,
            position,
            shape,
            strides,
            vals,
            spline,
            ten: T::from(10.0).unwrap_or_else(T::nan),
            config,
        })
    }

    /// Number of cube axes, including the output axis
    #[inline]
    pub fn ndims(&self) -> usize {
        self.shape.len()
    }

    /// Number of parameter axes: all axes except the output axis
    #[inline]
    pub fn nparams(&self) -> usize {
        match self.config.output {
            Some(_) => self.ndims() - 1,
            None => self.ndims(),
        }
    }

    /// Shape of the cube, in cube order
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Axis `index`, in cube order
    #[inline]
    pub fn axis(&self, index: usize) -> Option<&Axis<T>> {
        self.position.get(index).map(|&s| &self.axes[s])
    }

    /// All axes, in cube order
    pub fn axes(&self) -> Vec<&Axis<T>> {
        self.position.iter().map(|&s| &self.axes[s]).collect()
    }

    #[inline]
    pub fn output_axis(&self) -> Option<OutputAxis> {
        self.config.output
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Spline second derivatives, one row per parameter-grid vertex in C order
    /// over the parameter axes. Stored in the engine's value scale.
    #[inline]
    pub fn spline_coefficients(&self) -> Option<&SplineCoefficients<T>> {
        self.spline.as_ref()
    }

    /// Interpolate the value at a point with one coordinate per cube axis,
    /// in cube order.
    ///
    /// In spline mode, the spline along the output axis is evaluated at every
    /// vertex of the parameter-grid cell and the results are blended
    /// multilinearly. Otherwise, every axis is blended multilinearly.
    ///
    /// # Errors
    /// * If the point does not have one coordinate per cube axis
    /// * If any coordinate is outside the grid under [`BoundaryPolicy::Error`]
    #[inline]
    pub fn interp_one(&self, point: &[T]) -> Result<T> {
        let ndims = self.ndims();
        if point.len() != ndims {
            return Err(InterpError::DimensionMismatch {
                expected: ndims,
                found: point.len(),
            });
        }

        // Stored order: parameters, then output axis
        let mut brackets = [Bracket::default(); MAXDIMS];
        let interped = match &self.spline {
            Some(coeffs) => {
                let np = ndims - 1;
                self.locate_params(|s| point[self.order[s]], &mut brackets[..np])?;

                let out_axis = &self.axes[np];
                let ob = out_axis.locate_with(
                    point[self.order[np]],
                    self.config.boundary,
                    self.order[np],
                )?;
                let x = out_axis.as_slice();
                let n = out_axis.len();

                let mut acc = T::zero();
                multilinear::for_each_corner(&brackets[..np], &self.strides[..np], |k, w| {
                    let v = spline::evaluate(x, &ob, &self.vals[k..k + n], coeffs.at_offset(k));
                    acc = acc + w * v;
                });
                acc
            }
            None => {
                self.locate_params(|s| point[self.order[s]], &mut brackets[..ndims])?;
                multilinear::blend(&brackets[..ndims], &self.strides, &self.vals)
            }
        };

        Ok(self.unscale(interped))
    }

    /// Interpolate the whole output curve at a point with one coordinate per
    /// parameter axis, in cube order with the output axis skipped.
    ///
    /// The result has one entry per output-axis pivot. The spline passes
    /// through every pivot, so this is the same for either output method.
    ///
    /// # Errors
    /// * If there is no output axis
    /// * If the point does not have one coordinate per parameter axis
    /// * If any coordinate is outside the grid under [`BoundaryPolicy::Error`]
    pub fn interp_vector(&self, params: &[T]) -> Result<Vec<T>> {
        let (brackets, np, n) = self.locate_curve(params)?;
        let mut out = vec![T::zero(); n];
        multilinear::blend_rows(&brackets[..np], &self.strides[..np], &self.vals, &mut out);
        out.iter_mut().for_each(|v| *v = self.unscale(*v));
        Ok(out)
    }

    /// Interpolate the output curve at arbitrary locations (`pivots`) along
    /// the output axis, at a point with one coordinate per parameter axis.
    ///
    /// Both the samples and the spline coefficients are linear in the data,
    /// so the rows of the parameter-grid cell are blended first and the
    /// blended row is evaluated once per pivot. This gives the same result
    /// as evaluating every vertex's curve and blending afterward.
    ///
    /// # Errors
    /// * Same as [`InterpolationEngine::interp_vector`]
    /// * If any pivot is outside the output axis under [`BoundaryPolicy::Error`]
    pub fn interp_pivots(&self, params: &[T], pivots: &[T]) -> Result<Vec<T>> {
        let (brackets, np, n) = self.locate_curve(params)?;
        let brackets = &brackets[..np];
        let strides = &self.strides[..np];
        let out_axis = &self.axes[np];

        let mut y = vec![T::zero(); n];
        multilinear::blend_rows(brackets, strides, &self.vals, &mut y);

        let mut out = vec![T::zero(); pivots.len()];
        let evaluated = match &self.spline {
            Some(coeffs) => {
                let mut y2 = vec![T::zero(); n];
                multilinear::blend_rows(brackets, strides, coeffs.as_slice(), &mut y2);
                Spline1D::new(out_axis, &y, &y2)?
                    .with_policy(self.config.boundary)
                    .eval(pivots, &mut out)
            }
            None => Linear1D::new(out_axis, &y)?
                .with_policy(self.config.boundary)
                .eval(pivots, &mut out),
        };
        evaluated.map_err(|e| self.relabel(e, np))?;

        out.iter_mut().for_each(|v| *v = self.unscale(*v));
        Ok(out)
    }

    /// Interpolate on a contiguous list of observation points, given as one
    /// slice of coordinates per cube axis, writing one value per point to `out`.
    ///
    /// # Errors
    /// * If there is not one coordinate slice per cube axis
    /// * If any coordinate slice is not the same length as `out`
    /// * On the first point that fails, as in [`InterpolationEngine::interp_one`]
    pub fn interp(&self, obs: &[&[T]], out: &mut [T]) -> Result<()> {
        let ndims = self.ndims();
        if obs.len() != ndims {
            return Err(InterpError::DimensionMismatch {
                expected: ndims,
                found: obs.len(),
            });
        }
        if let Some(bad) = obs.iter().find(|o| o.len() != out.len()) {
            return Err(InterpError::DimensionMismatch {
                expected: out.len(),
                found: bad.len(),
            });
        }

        let mut tmp = [T::zero(); MAXDIMS + 1];
        for i in 0..out.len() {
            (0..ndims).for_each(|j| tmp[j] = obs[j][i]);
            out[i] = self.interp_one(&tmp[..ndims])?;
        }

        Ok(())
    }

    /// Interpolate each of a list of full points independently.
    ///
    /// The result for each point is exactly what [`InterpolationEngine::interp_one`]
    /// returns for it; a failure at one point does not affect the others.
    pub fn interp_batch<P: AsRef<[T]>>(&self, points: &[P]) -> Vec<Result<T>> {
        points.iter().map(|p| self.interp_one(p.as_ref())).collect()
    }

    /// Interpolate the output curve at each of a list of parameter points
    /// independently, as in [`InterpolationEngine::interp_vector`].
    pub fn interp_vector_batch<P: AsRef<[T]>>(&self, points: &[P]) -> Vec<Result<Vec<T>>> {
        points
            .iter()
            .map(|p| self.interp_vector(p.as_ref()))
            .collect()
    }

    /// Check whether a list of observation points, given as one slice of
    /// coordinates per cube axis, are inside the grid within some absolute tolerance.
    ///
    /// Output slice entry `i` is set to `false` if no points on that dimension
    /// are out of bounds, and set to `true` if there is a bounds violation on that axis.
    /// With `atol == 0`, a point is in bounds exactly when [`BoundaryPolicy::Error`]
    /// would accept it.
    ///
    /// # Errors
    /// * If there is not one coordinate slice per cube axis
    /// * If the output slice length does not match the number of cube axes
    pub fn check_bounds(&self, obs: &[&[T]], atol: T, out: &mut [bool]) -> Result<()> {
        let ndims = self.ndims();
        if obs.len() != ndims || out.len() != ndims {
            return Err(InterpError::DimensionMismatch {
                expected: ndims,
                found: if obs.len() != ndims {
                    obs.len()
                } else {
                    out.len()
                },
            });
        }
        for i in 0..ndims {
            let axis = &self.axes[self.position[i]];
            out[i] = obs[i].iter().any(|&x| !axis.contains(x, atol));
        }
        Ok(())
    }

    /// Populate the brackets of the leading stored axes, reading the
    /// coordinate for stored axis `s` from `coord(s)`.
    #[inline]
    fn locate_params<F: Fn(usize) -> T>(
        &self,
        coord: F,
        brackets: &mut [Bracket<T>],
    ) -> Result<()> {
        for s in 0..brackets.len() {
            brackets[s] = self.axes[s].locate_with(coord(s), self.config.boundary, self.order[s])?;
        }
        Ok(())
    }

    /// Locate a parameter point for a curve query,
    /// returning the brackets, the number of parameter axes, and the curve length.
    #[inline]
    fn locate_curve(&self, params: &[T]) -> Result<([Bracket<T>; MAXDIMS], usize, usize)> {
        if self.config.output.is_none() {
            return Err(InterpError::NoOutputAxis);
        }
        let np = self.nparams();
        if params.len() != np {
            return Err(InterpError::DimensionMismatch {
                expected: np,
                found: params.len(),
            });
        }
        // Curve queries blend over the parameter axes only, which the
        // construction-time limit on blended axes already covers
        let mut brackets = [Bracket::default(); MAXDIMS];
        self.locate_params(|s| params[s], &mut brackets[..np])?;
        Ok((brackets, np, self.axes[np].len()))
    }

    /// Label out-of-bounds errors from a one-dimensional evaluation
    /// of stored axis `s` with its cube axis index.
    fn relabel(&self, e: InterpError, s: usize) -> InterpError {
        match e {
            InterpError::OutOfBounds { value, lo, hi, .. } => InterpError::OutOfBounds {
                axis: self.order[s],
                value,
                lo,
                hi,
            },
            other => other,
        }
    }

    #[inline]
    fn unscale(&self, v: T) -> T {
        match self.config.scale {
            ValueScale::Linear => v,
            ValueScale::Log10 => self.ten.powf(v),
        }
    }
}

#[cfg(feature = "rayon")]
impl<T: Float + Send + Sync> InterpolationEngine<T> {
    /// Same as [`InterpolationEngine::interp_batch`], evaluating points in
    /// parallel on the rayon thread pool. Results are in input order.
    pub fn par_interp_batch<P: AsRef<[T]> + Sync>(&self, points: &[P]) -> Vec<Result<T>> {
        use rayon::prelude::*;

        points
            .par_iter()
            .map(|p| self.interp_one(p.as_ref()))
            .collect()
    }

    /// Same as [`InterpolationEngine::interp_vector_batch`], evaluating
    /// points in parallel on the rayon thread pool. Results are in input order.
    pub fn par_interp_vector_batch<P: AsRef<[T]> + Sync>(
        &self,
        points: &[P],
    ) -> Vec<Result<Vec<T>>> {
        use rayon::prelude::*;

        points
            .par_iter()
            .map(|p| self.interp_vector(p.as_ref()))
            .collect()
    }
}
