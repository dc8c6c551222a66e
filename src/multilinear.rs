//! Multilinear blending over the corners of a bracketing hypercube.
//!
//! Given one [`Bracket`] per dimension, the interpolated value is the
//! weighted sum of the 2^ndims surrounding samples, where each corner's
//! weight is the product over dimensions of `frac` (upper side) or
//! `1 - frac` (lower side). This is the n-dimensional generalization of
//! bilinear interpolation and reduces to `(1 - t) * y0 + t * y1` in 1D.
//!
//! Because the weights are computed from the bracket's `frac` directly,
//! extrapolated brackets (with `frac` outside `[0, 1]`) continue the
//! multilinear form of the edge cell, which is exact for functions that
//! are affine along each dimension.
//!
//! ```rust
//! use hypercube_interp::{multilinear, Axis};
//!
//! let x = Axis::new(vec![0.0_f64, 1.0, 2.0]).unwrap();
//! let y = Axis::new(vec![0.0_f64, 10.0]).unwrap();
//!
//! // z = x + y, C-ordered
//! let z = [0.0, 10.0, 1.0, 11.0, 2.0, 12.0];
//! let strides = multilinear::strides(&[3, 2]);
//!
//! let brackets = [x.locate(0.5), y.locate(5.0)];
//! assert_eq!(multilinear::blend(&brackets, &strides, &z), 5.5);
//! ```
//!
//! References
//! * https://en.wikipedia.org/wiki/Bilinear_interpolation#Weighted_mean
use num_traits::Float;

use crate::axis::Bracket;

/// Maximum number of blended dimensions per query.
///
/// Queries keep their per-dimension brackets on the stack in arrays of
/// this size; 2^MAXDIMS corners is already far past practical use.
pub const MAXDIMS: usize = 16;

/// Cumulative products of higher dimensions, used for indexing
/// a C-ordered array.
///
/// Each entry is the cumulative product of the size of dimensions
/// higher than this one, which is the stride between blocks
/// relating to a given index along each dimension.
pub fn strides(dims: &[usize]) -> Vec<usize> {
    let mut out = vec![1_usize; dims.len()];
    let mut acc = 1;
    for i in (0..dims.len()).rev() {
        out[i] = acc;
        acc *= dims[i];
    }
    out
}

/// Visit every corner of the hypercube spanned by `brackets`, calling
/// `f(offset, weight)` with the flat offset of the corner's sample and
/// its multilinear weight.
///
/// Bit `j` of the corner counter selects the upper side of the bracket on
/// dimension `j`, so iterating the counter over `0..2^ndims` visits each
/// corner exactly once. With zero dimensions, a single corner at offset 0
/// with weight 1 is visited.
#[inline]
pub fn for_each_corner<T, F>(brackets: &[Bracket<T>], strides: &[usize], mut f: F)
where
    T: Float,
    F: FnMut(usize, T),
{
    let ndims = brackets.len();
    debug_assert_eq!(ndims, strides.len());

    let nverts = 1_usize << ndims;
    for corner in 0..nverts {
        let mut offset = 0;
        let mut weight = T::one();
        for j in 0..ndims {
            let b = &brackets[j];
            if corner & (1 << j) != 0 {
                offset += (b.index + 1) * strides[j];
                weight = weight * b.frac;
            } else {
                offset += b.index * strides[j];
                weight = weight * (T::one() - b.frac);
            }
        }
        f(offset, weight);
    }
}

/// Blend scalar samples at the corners of the bracketing hypercube.
#[inline]
pub fn blend<T: Float>(brackets: &[Bracket<T>], strides: &[usize], vals: &[T]) -> T {
    let mut acc = T::zero();
    for_each_corner(brackets, strides, |k, w| acc = acc + w * vals[k]);
    acc
}

/// Blend contiguous rows of `out.len()` samples starting at each corner's offset.
///
/// Every element of a corner's row is scaled by the same weight; `out` is
/// overwritten with the elementwise sum.
#[inline]
pub fn blend_rows<T: Float>(brackets: &[Bracket<T>], strides: &[usize], vals: &[T], out: &mut [T]) {
    let n = out.len();
    out.iter_mut().for_each(|o| *o = T::zero());
    for_each_corner(brackets, strides, |k, w| {
        out.iter_mut()
            .zip(&vals[k..k + n])
            .for_each(|(o, &v)| *o = *o + w * v);
    });
}
