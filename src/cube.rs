//! Owned n-dimensional sample arrays.
use itertools::Itertools;

use crate::error::{InterpError, Result};
use crate::multilinear::strides;

/// An n-dimensional array of samples in C order
/// (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
#[derive(Clone, Debug, PartialEq)]
pub struct DataCube<T> {
    shape: Vec<usize>,
    vals: Vec<T>,
}

impl<T: Copy> DataCube<T> {
    /// Wrap C-ordered samples.
    ///
    /// # Errors
    /// * If `shape` is empty
    /// * If the number of samples is not the product of `shape`,
    ///   including when that product overflows
    pub fn new(shape: Vec<usize>, vals: Vec<T>) -> Result<Self> {
        let nvals = shape.iter().try_fold(1_usize, |acc, &n| acc.checked_mul(n));
        if shape.is_empty() || nvals != Some(vals.len()) {
            return Err(InterpError::ShapeMismatch {
                cube: vec![vals.len()],
                axes: shape,
            });
        }
        Ok(Self { shape, vals })
    }

    /// Wrap column-major (Fortran-ordered) samples, where the first index
    /// varies fastest, reordering them to C order.
    ///
    /// # Errors
    /// * Same as [`DataCube::new`]
    pub fn from_column_major(shape: Vec<usize>, vals: Vec<T>) -> Result<Self> {
        let cube = Self::new(shape, vals)?;

        let mut fstrides = vec![1_usize; cube.shape.len()];
        for i in 1..cube.shape.len() {
            fstrides[i] = fstrides[i - 1] * cube.shape[i - 1];
        }
        let vals = gather(&cube.vals, &cube.shape, &fstrides);

        Ok(Self {
            shape: cube.shape,
            vals,
        })
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn ndims(&self) -> usize {
        self.shape.len()
    }

    /// Samples in C order
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.vals
    }

    /// Sample at a multi-index, if it is inside the cube
    pub fn get(&self, index: &[usize]) -> Option<T> {
        if index.len() != self.shape.len() || index.iter().zip(&self.shape).any(|(i, n)| i >= n) {
            return None;
        }
        let k: usize = index
            .iter()
            .zip(strides(&self.shape))
            .map(|(i, s)| i * s)
            .sum();
        Some(self.vals[k])
    }

    pub fn into_parts(self) -> (Vec<usize>, Vec<T>) {
        (self.shape, self.vals)
    }
}

#[cfg(feature = "ndarray")]
impl<T: Copy, D: ndarray::Dimension> From<ndarray::Array<T, D>> for DataCube<T> {
    /// Copies the array in logical (C) order, whatever its memory layout.
    fn from(arr: ndarray::Array<T, D>) -> Self {
        Self {
            shape: arr.shape().to_vec(),
            vals: arr.iter().copied().collect(),
        }
    }
}

/// Build a C-ordered array of shape `dst_shape`, reading the element at
/// multi-index `idx` from flat offset `sum(idx[k] * src_strides[k])` of `vals`.
///
/// This covers both reordering memory layouts and permuting axes.
pub(crate) fn gather<T: Copy>(vals: &[T], dst_shape: &[usize], src_strides: &[usize]) -> Vec<T> {
    debug_assert_eq!(dst_shape.len(), src_strides.len());
    dst_shape
        .iter()
        .map(|&n| 0..n)
        .multi_cartesian_product()
        .map(|idx| {
            let k: usize = idx.iter().zip(src_strides).map(|(i, s)| i * s).sum();
            vals[k]
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_checks_sample_count() {
        assert!(DataCube::new(vec![2, 3], vec![0.0; 6]).is_ok());
        assert_eq!(
            DataCube::new(vec![2, 3], vec![0.0; 5]),
            Err(InterpError::ShapeMismatch {
                cube: vec![5],
                axes: vec![2, 3]
            })
        );
        assert!(DataCube::<f64>::new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_new_rejects_overflowing_shape() {
        let big = 1_usize << (usize::BITS - 1);
        assert_eq!(
            DataCube::<f64>::new(vec![big, 2], vec![]),
            Err(InterpError::ShapeMismatch {
                cube: vec![0],
                axes: vec![big, 2]
            })
        );
        // Wraps to 0 without the overflow check
        let half = 1_usize << (usize::BITS / 2);
        assert!(DataCube::<f64>::new(vec![half, half], vec![]).is_err());
    }

    #[test]
    fn test_get() {
        let cube = DataCube::new(vec![2, 3], (0..6).map(|i| i as f64).collect()).unwrap();
        assert_eq!(cube.get(&[0, 2]), Some(2.0));
        assert_eq!(cube.get(&[1, 0]), Some(3.0));
        assert_eq!(cube.get(&[2, 0]), None);
        assert_eq!(cube.get(&[0]), None);
    }

    #[test]
    fn test_column_major_reorder() {
        // Column-major 2x3: first index varies fastest
        let f = vec![0.0, 10.0, 1.0, 11.0, 2.0, 12.0];
        let cube = DataCube::from_column_major(vec![2, 3], f).unwrap();
        assert_eq!(cube.as_slice(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(cube.get(&[1, 2]), Some(12.0));
    }

    #[test]
    fn test_column_major_3d_matches_ndarray() {
        let shape = (2, 3, 4);
        let c = ndarray::Array::from_shape_fn(shape, |(i, j, k)| (100 * i + 10 * j + k) as f64);
        let fvals: Vec<f64> = c.t().iter().copied().collect();
        let cube = DataCube::from_column_major(vec![2, 3, 4], fvals).unwrap();
        assert_eq!(cube.as_slice(), c.as_slice().unwrap());
    }

    #[test]
    fn test_gather_permutes_axes() {
        // 2x3 C-ordered, transposed to 3x2
        let vals = [0, 1, 2, 3, 4, 5];
        let t = gather(&vals, &[3, 2], &[1, 3]);
        assert_eq!(t, vec![0, 3, 1, 4, 2, 5]);
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn test_from_ndarray() {
        let a = ndarray::Array::from_shape_fn((2, 2), |(i, j)| (2 * i + j) as f32);
        let cube = DataCube::from(a.reversed_axes());
        assert_eq!(cube.shape(), &[2, 2]);
        assert_eq!(cube.as_slice(), &[0.0, 2.0, 1.0, 3.0]);
    }
}
