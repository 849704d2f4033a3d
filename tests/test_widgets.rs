use cloudgeom::{
    actor::{Color, Shading},
    build_cloud, build_normals, CloudBuilder, CloudError, CloudNormalsWidget, CloudWidget,
    DynPolyData, NormalsParams, PointBuffer,
};
use ndarray::{Array2, Array3};
use rstest::{fixture, rstest};

/// A 16x12 organized cloud on the plane z = 1 with normals along +z.
/// The last column has no return.
#[fixture]
fn organized_cloud() -> (Array3<f64>, Array3<f64>, Array3<u8>) {
    let (rows, cols) = (16, 12);
    let points = Array3::from_shape_fn((rows, cols, 3), |(r, c, k)| {
        if c == cols - 1 {
            return f64::NAN;
        }
        match k {
            0 => c as f64,
            1 => r as f64,
            _ => 1.0,
        }
    });
    let normals =
        Array3::from_shape_fn((rows, cols, 3), |(_, _, k)| if k == 2 { 1.0 } else { 0.0 });
    let colors = Array3::from_shape_fn((rows, cols, 3), |(r, c, k)| (r + c + k) as u8);
    (points, normals, colors)
}

#[rstest]
fn test_cloud_widget(organized_cloud: (Array3<f64>, Array3<f64>, Array3<u8>)) {
    let (points, _, colors) = organized_cloud;
    let widget = CloudWidget::new(&PointBuffer::from(points.view()), &colors.view()).unwrap();

    assert_eq!(widget.nr_points(), 16 * 11);
    let actor = widget.actor();
    assert_eq!(actor.cloud_points, Some(17));
    assert_eq!(actor.property.shading, Shading::Flat);
    assert!(actor.property.backface_culling);

    let mapper = actor.mapper();
    assert!(mapper.scalar_visibility);
    assert!(!mapper.interpolate_scalars_before_mapping);
    // Max is at row 15, col 10, channel 2: the last column was dropped.
    assert_eq!(mapper.scalar_range, (0.0, 27.0));

    let polydata = mapper.input();
    assert_eq!(polydata.num_verts(), 16 * 11);
    assert_eq!(polydata.point_f64(11), nalgebra::Vector3::new(0.0, 1.0, 1.0));
}

#[rstest]
fn test_normals_widget(organized_cloud: (Array3<f64>, Array3<f64>, Array3<u8>)) {
    let (points, normals, _) = organized_cloud;
    let widget = CloudNormalsWidget::new(
        &PointBuffer::from(points.view()),
        &PointBuffer::from(normals.view()),
        &NormalsParams::default().level(16).scale(2.0),
        Color::new(0, 0, 255),
    )
    .unwrap();

    // Stride 4 over 16 rows and 12 columns.
    assert_eq!(widget.len(), 4 * 3);
    let polydata = widget.actor().mapper().input();
    assert_eq!(polydata.point_f64(0), nalgebra::Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(polydata.point_f64(1), nalgebra::Vector3::new(0.0, 0.0, 3.0));
    assert_eq!(polydata.point_f64(2), nalgebra::Vector3::new(4.0, 0.0, 1.0));
    assert_eq!(widget.actor().property.color, Some(Color::new(0, 0, 255)));
}

#[test]
fn test_rebuild_with_fewer_points_matches_fresh_build() {
    let large = Array2::from_shape_fn((40, 4), |(i, _)| i as f32);
    let small = Array2::from_shape_fn((15, 4), |(i, _)| i as f32);
    let mut builder = CloudBuilder::new();

    builder.build(&PointBuffer::from(large.view()), None).unwrap();
    let (reused, reused_count) = builder.build(&PointBuffer::from(small.view()), None).unwrap();
    let (fresh, fresh_count) = build_cloud(&PointBuffer::from(small.view()), None).unwrap();

    assert_eq!(reused_count, fresh_count);
    assert_eq!(reused, fresh);
}

#[test]
fn test_two_channels_rejected() {
    let points = Array2::<f32>::zeros((8, 2));
    let normals = Array2::<f32>::zeros((8, 2));
    let buffer = PointBuffer::from(points.view());

    assert!(matches!(
        build_cloud(&buffer, None),
        Err(CloudError::InvalidInput(_))
    ));
    assert!(matches!(
        build_normals(
            &buffer,
            &PointBuffer::from(normals.view()),
            &NormalsParams::default()
        ),
        Err(CloudError::InvalidInput(_))
    ));
    assert!(CloudWidget::uniform(&buffer, Color::white()).is_err());
}

#[test]
fn test_depth_is_kept() {
    let points = Array2::<f32>::zeros((3, 3));
    let (polydata, _) = build_cloud(&PointBuffer::from(points.view()), None).unwrap();
    assert!(matches!(polydata, DynPolyData::F32(_)));
}
