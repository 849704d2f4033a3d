use ndarray::Array3;
use rstest::fixture;

/// Synthetic range scan: a tilted plane seen by a `rows x cols` sensor.
/// Every 7th pixel has no return and holds NaN coordinates.
pub struct TestScan {
    pub points: Array3<f32>,
    pub normals: Array3<f32>,
    pub colors: Array3<u8>,
}

impl TestScan {
    pub fn new(rows: usize, cols: usize, channels: usize) -> Self {
        let points = Array3::from_shape_fn((rows, cols, channels), |(r, c, k)| {
            if (r * cols + c) % 7 == 3 {
                return f32::NAN;
            }
            match k {
                0 => c as f32 * 0.1,
                1 => r as f32 * 0.1,
                2 => 2.0 + r as f32 * 0.05,
                _ => 1.0,
            }
        });
        let normals = Array3::from_shape_fn((rows, cols, channels), |(_, _, k)| match k {
            1 => -0.6,
            2 => -0.8,
            _ => 0.0,
        });
        let colors = Array3::from_shape_fn((rows, cols, 3), |(r, c, k)| {
            ((r * cols + c) * 3 + k) as u8
        });
        Self {
            points,
            normals,
            colors,
        }
    }

    /// Number of pixels with a return.
    pub fn valid_count(&self) -> usize {
        let (rows, cols, _) = self.points.dim();
        (0..rows * cols).filter(|i| i % 7 != 3).count()
    }
}

#[fixture]
pub fn sample_scan() -> TestScan {
    TestScan::new(8, 6, 4)
}
