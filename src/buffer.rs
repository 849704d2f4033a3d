use nalgebra::{Scalar, Vector3};
use ndarray::{ArrayView2, ArrayView3, Axis};
use num::traits::NumAssign;
use num::Float;

use crate::error::{CloudError, Result};

/// Element type of point and normal buffers.
///
/// Implemented for `f32` and `f64`, the geometry code is written once over it.
pub trait CloudScalar: Float + NumAssign + Scalar + Default {}

impl CloudScalar for f32 {}
impl CloudScalar for f64 {}

/// Numeric depth of a point buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    F32,
    F64,
}

/// Read-only view of points (or normals) laid out as a grid.
///
/// The arrays have shape `(rows, cols, channels)`, where channels is 3 or 4.
/// The 4th channel, when present, is padding and is never read.
/// A flat list of points is a grid with a single row.
#[derive(Debug, Clone, Copy)]
pub enum PointBuffer<'a> {
    F32(ArrayView3<'a, f32>),
    F64(ArrayView3<'a, f64>),
}

/// Per point RGB colors, shape is `(rows, cols, 3)`.
pub type ColorBuffer<'a> = ArrayView3<'a, u8>;

impl<'a> PointBuffer<'a> {
    pub fn depth(&self) -> Depth {
        match self {
            PointBuffer::F32(_) => Depth::F32,
            PointBuffer::F64(_) => Depth::F64,
        }
    }

    /// Returns `(rows, cols, channels)`.
    pub fn dim(&self) -> (usize, usize, usize) {
        match self {
            PointBuffer::F32(view) => view.dim(),
            PointBuffer::F64(view) => view.dim(),
        }
    }

    pub fn rows(&self) -> usize {
        self.dim().0
    }

    pub fn cols(&self) -> usize {
        self.dim().1
    }

    pub fn channels(&self) -> usize {
        self.dim().2
    }

    /// Total number of points, valid or not.
    pub fn len(&self) -> usize {
        let (rows, cols, _) = self.dim();
        rows * cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the buffer holds a 2D grid of points, like the ones from range images.
    pub fn is_organized(&self) -> bool {
        let (rows, cols, _) = self.dim();
        rows > 1 && cols > 1
    }

    /// Checks the channel count.
    pub fn validate(&self) -> Result<()> {
        let channels = self.channels();
        if channels != 3 && channels != 4 {
            return Err(CloudError::invalid_input(format!(
                "point buffers must have 3 or 4 channels, got {}",
                channels
            )));
        }
        Ok(())
    }

    /// Checks that `other` can be paired with this buffer point by point:
    /// same rows, columns, channels and depth.
    pub fn validate_pair(&self, other: &PointBuffer) -> Result<()> {
        if self.depth() != other.depth() {
            return Err(CloudError::invalid_input(format!(
                "buffer depths differ: {:?} and {:?}",
                self.depth(),
                other.depth()
            )));
        }
        if self.dim() != other.dim() {
            return Err(CloudError::invalid_input(format!(
                "buffer shapes differ: {:?} and {:?}",
                self.dim(),
                other.dim()
            )));
        }
        Ok(())
    }

    /// Checks that `colors` holds one RGB triplet per point.
    pub fn validate_colors(&self, colors: &ColorBuffer) -> Result<()> {
        let (rows, cols, _) = self.dim();
        let (color_rows, color_cols, color_channels) = colors.dim();
        if color_channels != 3 {
            return Err(CloudError::invalid_input(format!(
                "color buffers must have 3 channels, got {}",
                color_channels
            )));
        }
        if (rows, cols) != (color_rows, color_cols) {
            return Err(CloudError::invalid_input(format!(
                "colors shape {:?} does not match points shape {:?}",
                (color_rows, color_cols),
                (rows, cols)
            )));
        }
        Ok(())
    }
}

impl<'a> From<ArrayView3<'a, f32>> for PointBuffer<'a> {
    fn from(view: ArrayView3<'a, f32>) -> Self {
        PointBuffer::F32(view)
    }
}

impl<'a> From<ArrayView3<'a, f64>> for PointBuffer<'a> {
    fn from(view: ArrayView3<'a, f64>) -> Self {
        PointBuffer::F64(view)
    }
}

/// A `(N, channels)` list becomes a single row grid.
impl<'a> From<ArrayView2<'a, f32>> for PointBuffer<'a> {
    fn from(view: ArrayView2<'a, f32>) -> Self {
        PointBuffer::F32(view.insert_axis(Axis(0)))
    }
}

impl<'a> From<ArrayView2<'a, f64>> for PointBuffer<'a> {
    fn from(view: ArrayView2<'a, f64>) -> Self {
        PointBuffer::F64(view.insert_axis(Axis(0)))
    }
}

/// First 3 channels of the element at `(row, col)`.
#[inline]
pub(crate) fn xyz<T: Scalar + Copy>(view: &ArrayView3<T>, row: usize, col: usize) -> Vector3<T> {
    Vector3::new(view[(row, col, 0)], view[(row, col, 1)], view[(row, col, 2)])
}

/// Whether none of the first 3 channels is NaN. Infinite values are valid.
#[inline]
pub(crate) fn is_valid_point<T: Float>(view: &ArrayView3<T>, row: usize, col: usize) -> bool {
    !(view[(row, col, 0)].is_nan() || view[(row, col, 1)].is_nan() || view[(row, col, 2)].is_nan())
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, Array3};
    use rstest::*;

    use super::{Depth, PointBuffer};
    use crate::error::CloudError;

    #[rstest]
    #[case(3, true)]
    #[case(4, true)]
    #[case(2, false)]
    #[case(5, false)]
    fn test_validate_channels(#[case] channels: usize, #[case] is_ok: bool) {
        let points = Array3::<f32>::zeros((2, 2, channels));
        let buffer = PointBuffer::from(points.view());
        assert_eq!(buffer.validate().is_ok(), is_ok);
    }

    #[test]
    fn test_list_is_single_row() {
        let points = Array2::<f64>::zeros((10, 4));
        let buffer = PointBuffer::from(points.view());
        assert_eq!(buffer.dim(), (1, 10, 4));
        assert_eq!(buffer.depth(), Depth::F64);
        assert!(!buffer.is_organized());
        assert_eq!(buffer.len(), 10);
    }

    #[test]
    fn test_validate_pair() {
        let points = Array3::<f32>::zeros((4, 4, 3));
        let same = Array3::<f32>::zeros((4, 4, 3));
        let other_depth = Array3::<f64>::zeros((4, 4, 3));
        let other_shape = Array3::<f32>::zeros((4, 4, 4));

        let buffer = PointBuffer::from(points.view());
        assert!(buffer.validate_pair(&PointBuffer::from(same.view())).is_ok());
        assert!(matches!(
            buffer.validate_pair(&PointBuffer::from(other_depth.view())),
            Err(CloudError::InvalidInput(_))
        ));
        assert!(matches!(
            buffer.validate_pair(&PointBuffer::from(other_shape.view())),
            Err(CloudError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_colors() {
        let points = Array3::<f32>::zeros((3, 2, 4));
        let buffer = PointBuffer::from(points.view());

        assert!(buffer
            .validate_colors(&Array3::<u8>::zeros((3, 2, 3)).view())
            .is_ok());
        assert!(buffer
            .validate_colors(&Array3::<u8>::zeros((2, 3, 3)).view())
            .is_err());
        assert!(buffer
            .validate_colors(&Array3::<u8>::zeros((3, 2, 4)).view())
            .is_err());
    }
}
