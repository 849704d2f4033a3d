//! Renderable geometry for point clouds.
//!
//! Turns point, color and normal buffers into polygonal datasets: vertex
//! clouds with optional color scalars ([`cloud`]) and line sets showing the
//! normals ([`normals`]). The [`widget`] module wraps them into actor
//! descriptions for a scene graph.

pub mod actor;
pub mod buffer;
pub mod cells;
pub mod cloud;
pub mod error;
pub mod nan_filter;
pub mod normals;
pub mod polydata;
pub mod widget;

#[cfg(test)]
mod unit_test;

pub use buffer::{CloudScalar, ColorBuffer, Depth, PointBuffer};
pub use cloud::{build_cloud, CloudBuilder};
pub use error::{CloudError, Result};
pub use normals::{build_normals, NormalSegment, NormalsParams};
pub use polydata::{DynPolyData, PolyData};
pub use widget::{CloudNormalsWidget, CloudWidget};
