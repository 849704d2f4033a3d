//! Mapper and actor descriptions consumed by the scene graph.
//!
//! These are plain values: the geometry is moved into a [`Mapper`], the mapper
//! into an [`Actor`], and the scene graph takes the actor. Nothing here renders.

use serde_derive::{Deserialize, Serialize};

use crate::polydata::DynPolyData;

/// RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }
}

/// Which data the mapper reads scalars from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarMode {
    Default,
    UsePointData,
}

/// How scalars become colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Default,
    MapScalars,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    Flat,
    Gouraud,
}

/// Maps a dataset to renderable primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapper {
    input: DynPolyData,
    pub scalar_visibility: bool,
    pub scalar_range: (f64, f64),
    pub scalar_mode: ScalarMode,
    pub color_mode: ColorMode,
    pub interpolate_scalars_before_mapping: bool,
}

impl Mapper {
    /// Takes ownership of `input`. Scalar settings follow the dataset:
    /// visible with their range when the dataset has point scalars.
    pub fn new(input: DynPolyData) -> Self {
        let (scalar_visibility, scalar_range) = match input.scalars() {
            Some(scalars) => (true, scalars.range),
            None => (false, (0.0, 1.0)),
        };
        let interpolate_scalars_before_mapping = input.interpolate_scalars();
        Self {
            input,
            scalar_visibility,
            scalar_range,
            scalar_mode: ScalarMode::UsePointData,
            color_mode: ColorMode::Default,
            interpolate_scalars_before_mapping,
        }
    }

    pub fn input(&self) -> &DynPolyData {
        &self.input
    }

    pub fn into_input(self) -> DynPolyData {
        self.input
    }
}

/// Surface properties of an actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Property {
    pub shading: Shading,
    pub backface_culling: bool,
    /// Uniform color, used when the mapper does not show scalars.
    pub color: Option<Color>,
}

impl Default for Property {
    fn default() -> Self {
        Self {
            shading: Shading::Gouraud,
            backface_culling: false,
            color: None,
        }
    }
}

/// A level of detail actor.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    mapper: Mapper,
    pub property: Property,
    /// Number of points drawn when the actor is rendered at low detail.
    pub cloud_points: Option<usize>,
}

impl Actor {
    pub fn new(mapper: Mapper) -> Self {
        Self {
            mapper,
            property: Property::default(),
            cloud_points: None,
        }
    }

    /// Actor for point clouds: flat shading, backface culling and a low detail
    /// budget of a tenth of the points, at least one.
    pub fn point_cloud(mapper: Mapper) -> Self {
        let cloud_points = lod_point_budget(mapper.input().num_points());
        Self {
            mapper,
            property: Property {
                shading: Shading::Flat,
                backface_culling: true,
                color: None,
            },
            cloud_points: Some(cloud_points),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.property.color = Some(color);
        self
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    pub fn mapper_mut(&mut self) -> &mut Mapper {
        &mut self.mapper
    }

    pub fn into_mapper(self) -> Mapper {
        self.mapper
    }
}

/// `max(1, num_points / 10)`.
pub fn lod_point_budget(num_points: usize) -> usize {
    (num_points / 10).max(1)
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use rstest::*;

    use super::{lod_point_budget, Actor, Color, Mapper, Shading};
    use crate::cells::CellArray;
    use crate::polydata::{DynPolyData, PointScalars, PolyData};

    #[rstest]
    #[case(0, 1)]
    #[case(9, 1)]
    #[case(10, 1)]
    #[case(25, 2)]
    #[case(1000, 100)]
    fn test_lod_point_budget(#[case] num_points: usize, #[case] expected: usize) {
        assert_eq!(lod_point_budget(num_points), expected);
    }

    #[test]
    fn test_mapper_follows_scalars() {
        let colors = Array2::from_shape_fn((4, 3), |(i, k)| (i * 10 + k) as u8);
        let data: DynPolyData = PolyData::new(Array2::<f32>::zeros((4, 3)))
            .with_verts(CellArray::vertices(4))
            .with_scalars(PointScalars::new(colors))
            .into();
        let mapper = Mapper::new(data);

        assert!(mapper.scalar_visibility);
        assert_eq!(mapper.scalar_range, (0.0, 32.0));
        assert!(!mapper.interpolate_scalars_before_mapping);
    }

    #[test]
    fn test_point_cloud_actor() {
        let data: DynPolyData = PolyData::new(Array2::<f64>::zeros((120, 3)))
            .with_verts(CellArray::vertices(120))
            .into();
        let actor = Actor::point_cloud(Mapper::new(data)).with_color(Color::white());

        assert!(!actor.mapper().scalar_visibility);
        assert_eq!(actor.cloud_points, Some(12));
        assert_eq!(actor.property.shading, Shading::Flat);
        assert!(actor.property.backface_culling);
        assert_eq!(actor.property.color, Some(Color::new(255, 255, 255)));
    }
}
