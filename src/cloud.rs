use ndarray::ArrayView3;

use crate::buffer::{CloudScalar, ColorBuffer, PointBuffer};
use crate::cells::VertexCellCache;
use crate::error::Result;
use crate::nan_filter;
use crate::polydata::{DynPolyData, PointScalars, PolyData};

/// Builds point cloud datasets: valid points, one vertex cell per point and
/// optional per point colors.
///
/// The builder keeps the vertex cells of previous calls and reuses them when
/// the next cloud is not larger.
#[derive(Debug, Default)]
pub struct CloudBuilder {
    cells: VertexCellCache,
}

impl CloudBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the dataset of a cloud.
    ///
    /// # Arguments
    ///
    /// * `points` - Points with 3 or 4 channels. Points with NaN coordinates are dropped.
    /// * `colors` - Optional RGB colors, one per point. Colors of dropped points are dropped too.
    ///
    /// # Returns
    ///
    /// The dataset and its number of points after filtering.
    pub fn build(
        &mut self,
        points: &PointBuffer,
        colors: Option<&ColorBuffer>,
    ) -> Result<(DynPolyData, usize)> {
        points.validate()?;
        if let Some(colors) = colors {
            points.validate_colors(colors)?;
        }

        let polydata: DynPolyData = match points {
            PointBuffer::F32(points) => self.build_typed(points, colors)?.into(),
            PointBuffer::F64(points) => self.build_typed(points, colors)?.into(),
        };
        let nr_points = polydata.num_points();

        tracing::debug!(
            total = points.len(),
            valid = nr_points,
            colored = colors.is_some(),
            "built cloud geometry"
        );
        Ok((polydata, nr_points))
    }

    fn build_typed<T: CloudScalar>(
        &mut self,
        points: &ArrayView3<T>,
        colors: Option<&ColorBuffer>,
    ) -> Result<PolyData<T>> {
        let valid_points = nan_filter::filter(points, points)?;
        let nr_points = valid_points.nrows();

        let polydata = PolyData::new(valid_points).with_verts(self.cells.get(nr_points));
        match colors {
            Some(colors) => {
                let valid_colors = nan_filter::filter(colors, points)?;
                Ok(polydata.with_scalars(PointScalars::new(valid_colors)))
            }
            None => Ok(polydata),
        }
    }

    /// Vertex cells currently cached.
    pub fn cached_cells(&self) -> usize {
        self.cells.capacity()
    }
}

/// Builds a cloud dataset without keeping any cache around.
pub fn build_cloud(
    points: &PointBuffer,
    colors: Option<&ColorBuffer>,
) -> Result<(DynPolyData, usize)> {
    CloudBuilder::new().build(points, colors)
}
