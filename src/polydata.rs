use nalgebra::Vector3;
use ndarray::{Array2, ArrayView1, Axis};

use crate::buffer::{CloudScalar, Depth};
use crate::cells::CellArray;

/// Per point RGB scalars with their value range.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScalars {
    /// Colors, shape is (Nx3).
    pub colors: Array2<u8>,
    /// Minimum and maximum over all channels, used to map scalars to colors.
    pub range: (f64, f64),
}

impl PointScalars {
    pub fn new(colors: Array2<u8>) -> Self {
        let range = scalar_range(&colors);
        Self { colors, range }
    }

    pub fn len(&self) -> usize {
        self.colors.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// (min, max) across every channel. An empty array has range `(0, 1)`.
fn scalar_range(colors: &Array2<u8>) -> (f64, f64) {
    let mut iter = colors.iter();
    match iter.next() {
        Some(&first) => {
            let (min, max) = iter.fold((first, first), |(mi, ma), &v| (mi.min(v), ma.max(v)));
            (min as f64, max as f64)
        }
        None => (0.0, 1.0),
    }
}

/// Polygonal dataset ready to be handed to a mapper.
///
/// Holds the point positions, vertex and line cells, optional point scalars and
/// whether the scalars should be interpolated before mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyData<T> {
    /// Point positions, shape is (Nx3).
    pub points: Array2<T>,
    pub verts: Option<CellArray>,
    pub lines: Option<CellArray>,
    pub scalars: Option<PointScalars>,
    pub interpolate_scalars: bool,
}

impl<T: CloudScalar> PolyData<T> {
    pub fn new(points: Array2<T>) -> Self {
        Self {
            points,
            verts: None,
            lines: None,
            scalars: None,
            interpolate_scalars: false,
        }
    }

    pub fn with_verts(mut self, verts: CellArray) -> Self {
        self.verts = Some(verts);
        self
    }

    pub fn with_lines(mut self, lines: CellArray) -> Self {
        self.lines = Some(lines);
        self
    }

    /// Attaches point scalars.
    /// Interpolation is enabled only when the dataset has cells other than vertices.
    pub fn with_scalars(mut self, scalars: PointScalars) -> Self {
        self.scalars = Some(scalars);
        self.interpolate_scalars = self.num_cells() != self.num_verts();
        self
    }

    pub fn num_points(&self) -> usize {
        self.points.nrows()
    }

    pub fn num_verts(&self) -> usize {
        self.verts.as_ref().map_or(0, CellArray::len)
    }

    pub fn num_lines(&self) -> usize {
        self.lines.as_ref().map_or(0, CellArray::len)
    }

    pub fn num_cells(&self) -> usize {
        self.num_verts() + self.num_lines()
    }

    pub fn point(&self, index: usize) -> Vector3<T> {
        let row: ArrayView1<T> = self.points.row(index);
        Vector3::new(row[0], row[1], row[2])
    }

    pub fn iter_points(&self) -> impl Iterator<Item = Vector3<T>> + '_ {
        self.points
            .axis_iter(Axis(0))
            .map(|row| Vector3::new(row[0], row[1], row[2]))
    }
}

/// A [`PolyData`] of either depth. The point type of the input is kept.
#[derive(Debug, Clone, PartialEq)]
pub enum DynPolyData {
    F32(PolyData<f32>),
    F64(PolyData<f64>),
}

macro_rules! dispatch {
    ($self:expr, $data:ident => $body:expr) => {
        match $self {
            DynPolyData::F32($data) => $body,
            DynPolyData::F64($data) => $body,
        }
    };
}

impl DynPolyData {
    pub fn depth(&self) -> Depth {
        match self {
            DynPolyData::F32(_) => Depth::F32,
            DynPolyData::F64(_) => Depth::F64,
        }
    }

    pub fn num_points(&self) -> usize {
        dispatch!(self, data => data.num_points())
    }

    pub fn num_verts(&self) -> usize {
        dispatch!(self, data => data.num_verts())
    }

    pub fn num_lines(&self) -> usize {
        dispatch!(self, data => data.num_lines())
    }

    pub fn num_cells(&self) -> usize {
        dispatch!(self, data => data.num_cells())
    }

    pub fn verts(&self) -> Option<&CellArray> {
        dispatch!(self, data => data.verts.as_ref())
    }

    pub fn lines(&self) -> Option<&CellArray> {
        dispatch!(self, data => data.lines.as_ref())
    }

    pub fn scalars(&self) -> Option<&PointScalars> {
        dispatch!(self, data => data.scalars.as_ref())
    }

    pub fn interpolate_scalars(&self) -> bool {
        dispatch!(self, data => data.interpolate_scalars)
    }

    /// Point `index` widened to `f64`.
    pub fn point_f64(&self, index: usize) -> Vector3<f64> {
        match self {
            DynPolyData::F32(data) => data.point(index).cast::<f64>(),
            DynPolyData::F64(data) => data.point(index),
        }
    }

    pub fn as_f32(&self) -> Option<&PolyData<f32>> {
        match self {
            DynPolyData::F32(data) => Some(data),
            DynPolyData::F64(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<&PolyData<f64>> {
        match self {
            DynPolyData::F64(data) => Some(data),
            DynPolyData::F32(_) => None,
        }
    }
}

impl From<PolyData<f32>> for DynPolyData {
    fn from(data: PolyData<f32>) -> Self {
        DynPolyData::F32(data)
    }
}

impl From<PolyData<f64>> for DynPolyData {
    fn from(data: PolyData<f64>) -> Self {
        DynPolyData::F64(data)
    }
}
