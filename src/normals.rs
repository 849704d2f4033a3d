//! Line geometry for visualizing normals.
//!
//! Each sampled point yields one segment from the point to `point + normal * scale`.
//! Organized clouds (grids with more than one row and column) are sampled on a
//! regular sub-grid, unorganized ones every `level` points.

use itertools::iproduct;
use nalgebra::Vector3;
use ndarray::{Array2, ArrayView3};
use num::NumCast;
use serde_derive::{Deserialize, Serialize};

use crate::buffer::{xyz, CloudScalar, PointBuffer};
use crate::cells::CellArray;
use crate::error::{CloudError, Result};
use crate::polydata::{DynPolyData, PolyData};

/// One visualizable normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalSegment<T: nalgebra::Scalar> {
    pub origin: Vector3<T>,
    pub end: Vector3<T>,
}

/// Parameters of the normals geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalsParams {
    /// Sampling density divisor: one normal every `level` points.
    pub level: usize,
    /// Length multiplier of the normals.
    pub scale: f64,
}

impl Default for NormalsParams {
    fn default() -> Self {
        Self {
            level: 100,
            scale: 0.02,
        }
    }
}

impl NormalsParams {
    pub fn level(mut self, value: usize) -> Self {
        self.level = value;
        self
    }

    pub fn scale(mut self, value: f64) -> Self {
        self.scale = value;
        self
    }

    /// Reads the parameters from JSON. Missing fields take their default values.
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    fn validate(&self) -> Result<()> {
        validate_level(self.level)
    }
}

fn validate_level(level: usize) -> Result<()> {
    if level < 1 {
        return Err(CloudError::invalid_argument(format!(
            "sampling level must be at least 1, got {}",
            level
        )));
    }
    Ok(())
}

/// How points are picked from a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// Every `stride`-th row and column of a grid.
    Organized { stride: usize },
    /// Every `step`-th point in row-major order.
    Unorganized { step: usize },
}

impl Sampling {
    /// Picks the strategy for a `rows x cols` buffer.
    /// Fails with `InvalidArgument` when `level` is 0.
    pub fn new(rows: usize, cols: usize, level: usize) -> Result<Self> {
        validate_level(level)?;
        if rows > 1 && cols > 1 {
            let stride = (level as f64).sqrt().floor() as usize;
            Ok(Sampling::Organized { stride })
        } else {
            Ok(Sampling::Unorganized { step: level })
        }
    }

    /// Number of segments produced for a `rows x cols` buffer.
    pub fn count(&self, rows: usize, cols: usize) -> usize {
        fn ceil_div(n: usize, d: usize) -> usize {
            if n == 0 {
                0
            } else {
                (n - 1) / d + 1
            }
        }

        match *self {
            Sampling::Organized { stride } => ceil_div(rows, stride) * ceil_div(cols, stride),
            Sampling::Unorganized { step } => ceil_div(rows * cols, step),
        }
    }

    /// Grid positions `(row, col)` visited, in emission order.
    pub fn positions(&self, rows: usize, cols: usize) -> Box<dyn Iterator<Item = (usize, usize)>> {
        match *self {
            Sampling::Organized { stride } => Box::new(iproduct!(
                (0..rows).step_by(stride),
                (0..cols).step_by(stride)
            )),
            Sampling::Unorganized { step } => Box::new(
                (0..rows * cols)
                    .step_by(step)
                    .map(move |index| (index / cols, index % cols)),
            ),
        }
    }
}

/// Computes the normal segments of a cloud.
///
/// # Arguments
///
/// * `points` - Points, shape `(rows, cols, 3 or 4)`.
/// * `normals` - Normals with the same shape as `points`.
/// * `level` - Sampling density divisor, at least 1.
/// * `scale` - Length multiplier of the normals.
pub fn normal_segments<T: CloudScalar>(
    points: &ArrayView3<T>,
    normals: &ArrayView3<T>,
    level: usize,
    scale: T,
) -> Result<Vec<NormalSegment<T>>> {
    let (rows, cols, channels) = points.dim();
    if channels != 3 && channels != 4 {
        return Err(CloudError::invalid_input(format!(
            "point buffers must have 3 or 4 channels, got {}",
            channels
        )));
    }
    if normals.dim() != points.dim() {
        return Err(CloudError::invalid_input(format!(
            "normals shape {:?} does not match points shape {:?}",
            normals.dim(),
            points.dim()
        )));
    }

    let sampling = Sampling::new(rows, cols, level)?;
    let mut segments = Vec::with_capacity(sampling.count(rows, cols));
    for (row, col) in sampling.positions(rows, cols) {
        let origin = xyz(points, row, col);
        let end = origin + xyz(normals, row, col) * scale;
        segments.push(NormalSegment { origin, end });
    }

    Ok(segments)
}

/// Packs segments as a line dataset: points `2j` and `2j + 1` are the ends of
/// segment `j`, and line `j` joins them.
pub fn segments_to_polydata<T: CloudScalar>(segments: &[NormalSegment<T>]) -> PolyData<T> {
    let mut points = Array2::<T>::zeros((2 * segments.len(), 3));
    for (j, segment) in segments.iter().enumerate() {
        for k in 0..3 {
            points[(2 * j, k)] = segment.origin[k];
            points[(2 * j + 1, k)] = segment.end[k];
        }
    }

    let lines = CellArray::lines((0..segments.len()).map(|j| (2 * j, 2 * j + 1)));
    PolyData::new(points).with_lines(lines)
}

fn build_typed<T: CloudScalar>(
    points: &ArrayView3<T>,
    normals: &ArrayView3<T>,
    params: &NormalsParams,
) -> Result<PolyData<T>> {
    let scale = <T as NumCast>::from(params.scale).ok_or_else(|| {
        CloudError::invalid_argument(format!("scale {} is not representable", params.scale))
    })?;
    let segments = normal_segments(points, normals, params.level, scale)?;
    Ok(segments_to_polydata(&segments))
}

/// Builds the normals line geometry of a cloud, keeping the depth of its points.
pub fn build_normals(
    points: &PointBuffer,
    normals: &PointBuffer,
    params: &NormalsParams,
) -> Result<DynPolyData> {
    points.validate()?;
    points.validate_pair(normals)?;
    params.validate()?;

    let polydata: DynPolyData = match (points, normals) {
        (PointBuffer::F32(points), PointBuffer::F32(normals)) => {
            build_typed(points, normals, params)?.into()
        }
        (PointBuffer::F64(points), PointBuffer::F64(normals)) => {
            build_typed(points, normals, params)?.into()
        }
        _ => return Err(CloudError::invalid_input("points and normals depths differ")),
    };

    tracing::debug!(
        rows = points.rows(),
        cols = points.cols(),
        organized = points.is_organized(),
        level = params.level,
        segments = polydata.num_lines(),
        "built normals geometry"
    );
    Ok(polydata)
}
