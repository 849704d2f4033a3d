use crate::actor::{Actor, Color, ColorMode, Mapper, ScalarMode};
use crate::buffer::{ColorBuffer, PointBuffer};
use crate::cloud::CloudBuilder;
use crate::error::Result;
use crate::normals::{build_normals, NormalsParams};

/// A point cloud ready to be inserted into a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudWidget {
    actor: Actor,
    nr_points: usize,
}

impl CloudWidget {
    /// Cloud colored per point.
    pub fn new(points: &PointBuffer, colors: &ColorBuffer) -> Result<Self> {
        Self::with_builder(&mut CloudBuilder::new(), points, colors)
    }

    /// Same as [`CloudWidget::new`], reusing the vertex cells kept by `builder`.
    pub fn with_builder(
        builder: &mut CloudBuilder,
        points: &PointBuffer,
        colors: &ColorBuffer,
    ) -> Result<Self> {
        let (polydata, nr_points) = builder.build(points, Some(colors))?;
        let actor = Actor::point_cloud(Mapper::new(polydata));
        Ok(Self { actor, nr_points })
    }

    /// Cloud painted with a single color, point scalars are not shown.
    pub fn uniform(points: &PointBuffer, color: Color) -> Result<Self> {
        let (polydata, nr_points) = CloudBuilder::new().build(points, None)?;
        let mut mapper = Mapper::new(polydata);
        mapper.scalar_visibility = false;
        let actor = Actor::point_cloud(mapper).with_color(color);
        Ok(Self { actor, nr_points })
    }

    /// Number of points kept after dropping the ones with NaN coordinates.
    pub fn nr_points(&self) -> usize {
        self.nr_points
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn into_actor(self) -> Actor {
        self.actor
    }
}

/// Lines showing the normals of a cloud.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudNormalsWidget {
    actor: Actor,
}

impl CloudNormalsWidget {
    pub fn new(
        points: &PointBuffer,
        normals: &PointBuffer,
        params: &NormalsParams,
        color: Color,
    ) -> Result<Self> {
        let polydata = build_normals(points, normals, params)?;
        let mut mapper = Mapper::new(polydata);
        mapper.color_mode = ColorMode::MapScalars;
        mapper.scalar_mode = ScalarMode::UsePointData;
        Ok(Self {
            actor: Actor::new(mapper).with_color(color),
        })
    }

    /// Number of normal segments.
    pub fn len(&self) -> usize {
        self.actor.mapper().input().num_lines()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn into_actor(self) -> Actor {
        self.actor
    }
}
