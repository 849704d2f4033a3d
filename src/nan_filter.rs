//! Compaction of per point attributes against the validity of a reference cloud.
//!
//! A point is valid when none of its first 3 channels is NaN. The same mask is
//! used for any attribute paired with the cloud, so colors are kept or dropped
//! together with their points.

use ndarray::{s, Array2, ArrayView3, ArrayViewMut2};
use num::{Float, Zero};

use crate::buffer::is_valid_point;
use crate::error::{CloudError, Result};

/// Copies the first 3 channels of every `source` element whose `reference`
/// point is valid into consecutive rows of `destination`.
///
/// # Arguments
///
/// * `source` - Attribute grid `(rows, cols, channels >= 3)`. May be the reference itself.
/// * `destination` - Output rows, shape `(capacity, 3)`, capacity must be at least `rows * cols`.
/// * `reference` - Cloud that defines the mask, same rows and cols as `source`.
///
/// # Returns
///
/// The number of rows written. Surviving elements keep their relative order.
pub fn copy<S, T>(
    source: &ArrayView3<S>,
    destination: &mut ArrayViewMut2<S>,
    reference: &ArrayView3<T>,
) -> Result<usize>
where
    S: Copy,
    T: Float,
{
    let (rows, cols, channels) = source.dim();
    let (ref_rows, ref_cols, ref_channels) = reference.dim();
    if (rows, cols) != (ref_rows, ref_cols) {
        return Err(CloudError::invalid_input(format!(
            "source shape {:?} does not match reference shape {:?}",
            (rows, cols),
            (ref_rows, ref_cols)
        )));
    }
    if channels < 3 || ref_channels < 3 {
        return Err(CloudError::invalid_input(
            "source and reference need at least 3 channels",
        ));
    }
    let (capacity, dst_channels) = destination.dim();
    if dst_channels != 3 || capacity < rows * cols {
        return Err(CloudError::invalid_input(format!(
            "destination shape {:?} can not hold {} elements of 3 channels",
            (capacity, dst_channels),
            rows * cols
        )));
    }

    let mut written = 0;
    for row in 0..rows {
        for col in 0..cols {
            if !is_valid_point(reference, row, col) {
                continue;
            }
            destination[(written, 0)] = source[(row, col, 0)];
            destination[(written, 1)] = source[(row, col, 1)];
            destination[(written, 2)] = source[(row, col, 2)];
            written += 1;
        }
    }

    Ok(written)
}

/// Same as [`copy`], but allocates the destination and returns it with exactly
/// as many rows as valid reference points.
pub fn filter<S, T>(source: &ArrayView3<S>, reference: &ArrayView3<T>) -> Result<Array2<S>>
where
    S: Copy + Zero,
    T: Float,
{
    let (rows, cols, _) = source.dim();
    let mut destination = Array2::<S>::zeros((rows * cols, 3));
    let written = copy(source, &mut destination.view_mut(), reference)?;
    if written == rows * cols {
        return Ok(destination);
    }
    Ok(destination.slice(s![..written, ..]).to_owned())
}
